pub mod chart;
pub mod client;
pub mod error;
pub mod feed;
pub mod render;

pub use crate::chart::{AxisRange, ChartState, DataPoint, PriceWindow};
pub use crate::feed::FeedDispatcher;
pub use crate::render::{ChannelRenderer, ChartRenderer, RenderInstruction};

pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
