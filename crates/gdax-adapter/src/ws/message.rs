/*
[INPUT]:  Raw feed frames as JSON text
[OUTPUT]: Parsed FeedMessage values
[POS]:    WebSocket layer - message definitions and parsing
[UPDATE]: When adding new message types or changing format
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Side;

/// Feed channels that can be subscribed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Heartbeat,
    Ticker,
    Level2,
    User,
    Matches,
    Full,
}

/// The initial subscribe frame sent after connecting
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    #[serde(rename = "type")]
    kind: &'static str,
    pub channels: Vec<Channel>,
    pub product_ids: Vec<String>,
}

impl Subscription {
    pub fn new(channels: Vec<Channel>, product_ids: Vec<String>) -> Self {
        Self {
            kind: "subscribe",
            channels,
            product_ids,
        }
    }
}

/// One channel entry in the server's subscription confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub name: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
}

/// A price level as `["price", "size"]` string pairs on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel(
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
);

/// A book change as `["side", "price", "size"]` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelChange(
    pub Side,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
    #[serde(with = "rust_decimal::serde::str")] pub Decimal,
);

/// A push-feed message, dispatched on its `type` field.
///
/// Frames with an unrecognized type decode to `Other` rather than failing
/// the dispatch loop.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum FeedMessage {
    #[serde(rename = "subscriptions")]
    Subscriptions { channels: Vec<ChannelInfo> },
    #[serde(rename = "heartbeat")]
    Heartbeat {
        sequence: i64,
        last_trade_id: i64,
        product_id: String,
        time: DateTime<Utc>,
    },
    #[serde(rename = "ticker")]
    Ticker {
        trade_id: i64,
        sequence: i64,
        time: DateTime<Utc>,
        product_id: String,
        #[serde(with = "rust_decimal::serde::str")]
        price: Decimal,
        side: Side,
        #[serde(with = "rust_decimal::serde::str")]
        last_size: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        best_bid: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        best_ask: Decimal,
    },
    #[serde(rename = "snapshot")]
    Snapshot {
        product_id: String,
        bids: Vec<PriceLevel>,
        asks: Vec<PriceLevel>,
    },
    #[serde(rename = "l2update")]
    L2Update {
        product_id: String,
        changes: Vec<LevelChange>,
    },
    #[serde(rename = "match")]
    Match {
        time: DateTime<Utc>,
        sequence: i64,
        trade_id: i64,
        maker_order_id: Uuid,
        taker_order_id: Uuid,
        #[serde(with = "rust_decimal::serde::str")]
        size: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        price: Decimal,
        side: Side,
    },
    #[serde(rename = "error")]
    Error { message: String },
    #[serde(other)]
    Other,
}
