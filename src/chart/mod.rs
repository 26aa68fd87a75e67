pub mod axis;
pub mod models;
pub mod state;
pub mod window;

pub use axis::AxisRange;
pub use models::{CreateChart, DataPoint, UpdateChart, indexed_series};
pub use state::ChartState;
pub use window::PriceWindow;
