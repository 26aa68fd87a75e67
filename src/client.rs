use std::time::Duration;

use bon::Builder;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::{
    Result,
    feed::{
        FeedDispatcher,
        models::{StockListing, SubscribeRequest},
    },
    render::ChartRenderer,
};

/// Exponential backoff strategy for reconnection attempts.
struct ExponentialBackoff {
    initial_delay: Duration,
    current_delay: Duration,
    max_delay: Duration,
    max_attempts: usize,
    attempts: usize,
}

impl ExponentialBackoff {
    fn new(initial_delay: Duration, max_attempts: usize) -> Self {
        Self {
            initial_delay,
            current_delay: initial_delay,
            max_delay: Duration::from_secs(30),
            max_attempts,
            attempts: 0,
        }
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.attempts >= self.max_attempts {
            return None;
        }
        let delay = self.current_delay;
        self.attempts += 1;
        self.current_delay = std::cmp::min(self.current_delay * 2, self.max_delay);
        Some(delay)
    }

    /// Back to a clean slate once a connection was actually established, so
    /// the attempt budget only ever counts consecutive failures.
    fn reset(&mut self) {
        self.current_delay = self.initial_delay;
        self.attempts = 0;
    }
}

#[derive(Debug, Clone, Builder)]
pub struct FeedClientOptions {
    /// Push feed endpoint; the page reads this off its own body tag, a
    /// headless client takes it here.
    #[builder(into, default = String::from("ws://localhost:9000/ws"))]
    pub feed_url: String,

    /// Stock list endpoint fetched once at startup.
    #[builder(into, default = String::from("http://localhost:9000/stocks"))]
    pub stocks_url: String,

    #[builder(default = 10)]
    pub max_reconnect_attempts: usize,

    #[builder(default = Duration::from_millis(500))]
    pub initial_backoff: Duration,
}

impl Default for FeedClientOptions {
    fn default() -> Self {
        FeedClientOptions::builder().build()
    }
}

/// Transport plumbing around the dispatcher: fetches the symbol list once,
/// subscribes per symbol and pumps feed frames into the engine. Connection
/// lifecycle lives entirely here, never inside the dispatcher.
pub struct FeedClient<R: ChartRenderer> {
    options: FeedClientOptions,
    dispatcher: FeedDispatcher<R>,
}

impl<R: ChartRenderer> FeedClient<R> {
    pub fn new(options: FeedClientOptions, dispatcher: FeedDispatcher<R>) -> Self {
        Self {
            options,
            dispatcher,
        }
    }

    /// One-shot fetch of the symbols to subscribe to; only `symbol` is read
    /// from each listing.
    pub async fn fetch_stock_list(&self) -> Result<Vec<StockListing>> {
        let listings = reqwest::get(&self.options.stocks_url)
            .await?
            .json::<Vec<StockListing>>()
            .await?;
        debug!("fetched {} stock listings", listings.len());
        Ok(listings)
    }

    /// Connects, subscribes every known symbol and pumps the feed until the
    /// connection closes cleanly. Reconnects with exponential backoff and
    /// re-subscribes; chart state survives reconnects because a repeated
    /// history push re-seeds in place.
    pub async fn run(&mut self) -> Result<()> {
        let symbols: Vec<String> = self
            .fetch_stock_list()
            .await?
            .into_iter()
            .map(|listing| listing.symbol)
            .collect();

        let mut backoff = ExponentialBackoff::new(
            self.options.initial_backoff,
            self.options.max_reconnect_attempts,
        );
        loop {
            let mut subscribed = false;
            match self.pump(&symbols, &mut subscribed).await {
                Ok(()) => {
                    info!("feed closed cleanly");
                    return Ok(());
                }
                Err(e) => {
                    if subscribed {
                        backoff.reset();
                    }
                    match backoff.next_backoff() {
                        Some(delay) => {
                            warn!("feed connection lost ({}), reconnecting in {:?}", e, delay);
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            error!("giving up on feed: {}", e);
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    async fn pump(&mut self, symbols: &[String], subscribed: &mut bool) -> Result<()> {
        let url = Url::parse(&self.options.feed_url)?;
        let (socket, _) = connect_async(url).await?;
        info!("feed websocket connected");
        let (mut write, mut read) = socket.split();

        for symbol in symbols {
            let request = serde_json::to_string(&SubscribeRequest {
                symbol: symbol.clone(),
            })?;
            write.send(Message::text(request)).await?;
        }
        debug!("subscribed {} symbols", symbols.len());
        *subscribed = true;

        while let Some(frame) = read.next().await {
            match frame? {
                Message::Text(raw) => self.dispatcher.handle_message(raw.as_str()),
                Message::Ping(payload) => write.send(Message::Pong(payload)).await?,
                Message::Close(_) => break,
                other => warn!("ignoring non-text frame: {:?}", other),
            }
        }
        Ok(())
    }

    pub fn dispatcher(&self) -> &FeedDispatcher<R> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut FeedDispatcher<R> {
        &mut self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_until_capped_and_gives_up() {
        let mut backoff = ExponentialBackoff::new(Duration::from_millis(500), 3);
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(500)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(1)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_secs(2)));
        assert_eq!(backoff.next_backoff(), None);
    }

    #[test]
    fn backoff_reset_restores_the_full_attempt_budget() {
        let mut backoff = ExponentialBackoff::new(Duration::from_millis(500), 2);
        assert!(backoff.next_backoff().is_some());
        assert!(backoff.next_backoff().is_some());
        assert_eq!(backoff.next_backoff(), None);

        // transient drops on a long-lived feed must not eat into the budget
        backoff.reset();
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(500)));
        assert!(backoff.next_backoff().is_some());
        assert_eq!(backoff.next_backoff(), None);
    }

    #[test]
    fn options_default_to_the_local_dashboard_endpoints() {
        let options = FeedClientOptions::default();
        assert_eq!(options.feed_url, "ws://localhost:9000/ws");
        assert_eq!(options.stocks_url, "http://localhost:9000/stocks");
    }
}
