/*
[INPUT]:  Feed URL and a channel subscription
[OUTPUT]: Typed feed messages via an mpsc channel
[POS]:    WebSocket layer - connection and dispatch loop
[UPDATE]: When adding new channels or changing connection logic
*/

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, warn};

use crate::http::{GdaxError, Result};
use crate::ws::message::{FeedMessage, Subscription};

const FEED_URL: &str = "wss://ws-feed.gdax.com";
const MESSAGE_BUFFER: usize = 100;

/// Push-feed client.
///
/// `connect` opens the socket, sends the subscribe frame, and spawns a
/// dispatch task that forwards every parsed [`FeedMessage`] to the channel
/// obtained from [`ExchangeFeed::take_receiver`]. The loop ends when the
/// server closes the socket or sends an `error` frame; there is no
/// reconnect logic.
#[derive(Debug)]
pub struct ExchangeFeed {
    url: String,
    message_tx: mpsc::Sender<FeedMessage>,
    message_rx: Option<mpsc::Receiver<FeedMessage>>,
}

impl ExchangeFeed {
    /// Create a feed client against the production feed URL
    pub fn new() -> Self {
        Self::with_url(FEED_URL)
    }

    /// Create a feed client against an explicit URL (tests)
    pub fn with_url(url: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel(MESSAGE_BUFFER);
        Self {
            url: url.into(),
            message_tx: tx,
            message_rx: Some(rx),
        }
    }

    /// Take the message receiver; yields `None` after the first call
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<FeedMessage>> {
        self.message_rx.take()
    }

    /// Connect, subscribe, and start the dispatch loop.
    ///
    /// Does not block beyond the handshake and the subscribe frame; the
    /// dispatch loop runs on a spawned task.
    pub async fn connect(&self, subscription: &Subscription) -> Result<()> {
        let (ws_stream, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|err| GdaxError::Feed(err.to_string()))?;
        let (mut write, mut read) = ws_stream.split();

        let frame = serde_json::to_string(subscription)?;
        write
            .send(WsMessage::Text(frame.into()))
            .await
            .map_err(|err| GdaxError::Feed(err.to_string()))?;
        debug!(url = %self.url, "subscribed to feed");

        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            while let Some(incoming) = read.next().await {
                match incoming {
                    Ok(WsMessage::Close(_)) => {
                        let _ = write.send(WsMessage::Close(None)).await;
                        break;
                    }
                    Ok(WsMessage::Ping(_)) | Ok(WsMessage::Pong(_)) => {}
                    Ok(message) => {
                        let Some(parsed) = Self::parse_message(message) else {
                            continue;
                        };
                        let is_error = matches!(parsed, FeedMessage::Error { .. });
                        if message_tx.send(parsed).await.is_err() {
                            // receiver dropped, nobody is listening
                            break;
                        }
                        if is_error {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "feed read failed");
                        break;
                    }
                }
            }
            debug!("feed dispatch loop ended");
        });

        Ok(())
    }

    fn parse_message(message: WsMessage) -> Option<FeedMessage> {
        let text: String = match message {
            WsMessage::Text(text) => text.to_string(),
            WsMessage::Binary(bytes) => String::from_utf8(bytes.to_vec()).ok()?,
            _ => return None,
        };

        match serde_json::from_str::<FeedMessage>(&text) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(error = %err, bytes = text.len(), "feed frame parse failed");
                Some(FeedMessage::Other)
            }
        }
    }
}

impl Default for ExchangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
