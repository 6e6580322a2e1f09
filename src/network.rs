//! Network client for the CertStream WebSocket feed
//!
//! This module opens the single feed connection and turns raw WebSocket
//! frames into decoded `FeedEvent`s. There is no reconnection logic: a
//! dropped connection surfaces as a `FeedError` and ends the watch loop.

use crate::core::FeedEvent;
use async_trait::async_trait;
use futures_util::stream::StreamExt;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// The public certstream endpoint.
pub const CERTSTREAM_URL: &str = "wss://certstream.calidog.io";

/// Fatal feed failures.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("could not connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: WsError,
    },
    #[error("websocket error: {0}")]
    Transport(#[from] WsError),
    #[error("feed connection closed")]
    Closed,
    #[error("error decoding JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Trait for WebSocket connections to enable testing with fake implementations
#[async_trait]
pub trait WebSocketConnection: Send {
    /// Reads the next message from the WebSocket connection
    ///
    /// # Returns
    /// * `Some(Ok(Message))` if a message was successfully received
    /// * `Some(Err(error))` if there was an error reading the message
    /// * `None` if the connection has been closed
    async fn read_message(&mut self) -> Option<Result<Message, WsError>>;
}

/// A live `tokio-tungstenite` stream.
pub struct TungsteniteConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl WebSocketConnection for TungsteniteConnection {
    async fn read_message(&mut self) -> Option<Result<Message, WsError>> {
        self.stream.next().await
    }
}

/// Opens connections to the CertStream service.
pub struct CertStreamClient {
    url: String,
}

impl Default for CertStreamClient {
    fn default() -> Self {
        Self::new(CERTSTREAM_URL.to_string())
    }
}

impl CertStreamClient {
    /// Creates a client for `url`. Production code uses `CertStreamClient::default()`.
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Opens the feed connection. Exactly one attempt is made.
    pub async fn connect(&self) -> Result<FeedConnection, FeedError> {
        let (stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(|source| FeedError::Connect {
                url: self.url.clone(),
                source,
            })?;

        tracing::info!(url = %self.url, "Connected to certstream");
        Ok(FeedConnection::new(Box::new(TungsteniteConnection { stream })))
    }
}

/// An established feed connection yielding one decoded event per call.
///
/// Dropping it closes the underlying socket.
pub struct FeedConnection {
    inner: Box<dyn WebSocketConnection>,
}

impl FeedConnection {
    pub fn new(inner: Box<dyn WebSocketConnection>) -> Self {
        Self { inner }
    }

    /// Waits for the next event on the feed.
    ///
    /// Control frames are skipped. A close frame, the end of the stream, a
    /// transport error, or a payload that is not valid JSON is an error.
    pub async fn next_event(&mut self) -> Result<FeedEvent, FeedError> {
        loop {
            let message = match self.inner.read_message().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => return Err(FeedError::Transport(e)),
                None => return Err(FeedError::Closed),
            };

            match message {
                Message::Text(text) => {
                    return FeedEvent::decode(text.as_bytes()).map_err(FeedError::Decode);
                }
                Message::Binary(bytes) => {
                    return FeedEvent::decode(&bytes).map_err(FeedError::Decode);
                }
                Message::Ping(_) | Message::Pong(_) => {
                    tracing::trace!("Received control frame");
                }
                Message::Frame(_) => {
                    tracing::trace!("Received raw frame, ignoring");
                }
                Message::Close(frame) => {
                    tracing::info!(?frame, "Received close message from server");
                    return Err(FeedError::Closed);
                }
            }
        }
    }
}
