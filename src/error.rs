use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode feed message")]
    ParseError(#[from] serde_json::Error),

    #[error("feed message has no string `type` field")]
    MissingMessageType,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no chart exists for symbol {0}")]
    UnknownSymbol(String),

    #[error("failed to fetch the stock list")]
    RequestError(#[from] reqwest::Error),

    #[error("something went wrong with websocket")]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("invalid feed url")]
    UrlParseError(#[from] url::ParseError),
}
