pub mod dispatcher;
pub mod models;

pub use dispatcher::FeedDispatcher;
pub use models::{FeedEvent, StockHistory, StockListing, StockUpdate, SubscribeRequest};
