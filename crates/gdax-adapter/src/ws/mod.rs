/*
[INPUT]:  Feed subscriptions and socket frames
[OUTPUT]: Typed push-feed messages via channels
[POS]:    WebSocket layer - module wiring
[UPDATE]: When adding new feed channels
*/

pub mod client;
pub mod message;

pub use client::ExchangeFeed;
pub use message::{Channel, ChannelInfo, FeedMessage, LevelChange, PriceLevel, Subscription};
