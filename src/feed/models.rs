use serde::{Deserialize, Serialize};

/// Message kinds pushed over the feed, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    History,
    Update,
    Unknown(String),
}

impl From<&str> for FeedEvent {
    fn from(s: &str) -> Self {
        match s {
            "stockhistory" => FeedEvent::History,
            "stockupdate" => FeedEvent::Update,
            other => FeedEvent::Unknown(other.to_string()),
        }
    }
}

/// Full history push for one symbol. The rolling window's capacity is taken
/// from `history.len()`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockHistory {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub history: Vec<f64>,
}

impl StockHistory {
    /// Latest value of the pushed history, shown beside the chart.
    pub fn last_price(&self) -> Option<f64> {
        self.history.last().copied()
    }
}

/// Single fresh price for an already charted symbol.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockUpdate {
    pub symbol: String,
    pub price: f64,
}

/// Sent once per known symbol after the stock list has been fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscribeRequest {
    pub symbol: String,
}

/// One row of the stock list endpoint; only `symbol` is consumed by the
/// engine, everything else the endpoint returns is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockListing {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_event_from_type_string() {
        assert_eq!(FeedEvent::from("stockhistory"), FeedEvent::History);
        assert_eq!(FeedEvent::from("stockupdate"), FeedEvent::Update);
        assert_eq!(
            FeedEvent::from("heartbeat"),
            FeedEvent::Unknown("heartbeat".to_string())
        );
    }

    #[test]
    fn history_message_decodes_from_wire_shape() {
        let raw = r#"{"type":"stockhistory","symbol":"ACME","name":"Acme Corp","history":[10,12,11]}"#;
        let history: StockHistory = serde_json::from_str(raw).unwrap();
        assert_eq!(history.symbol, "ACME");
        assert_eq!(history.name, "Acme Corp");
        assert_eq!(history.history, vec![10.0, 12.0, 11.0]);
        assert_eq!(history.last_price(), Some(11.0));
    }

    #[test]
    fn update_message_decodes_from_wire_shape() {
        let raw = r#"{"type":"stockupdate","symbol":"ACME","price":9.5}"#;
        let update: StockUpdate = serde_json::from_str(raw).unwrap();
        assert_eq!(update.symbol, "ACME");
        assert_eq!(update.price, 9.5);
    }

    #[test]
    fn subscribe_request_serializes_to_wire_shape() {
        let request = SubscribeRequest {
            symbol: "ACME".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"symbol":"ACME"}"#
        );
    }
}
