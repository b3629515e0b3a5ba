/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public GDAX adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod types;
pub mod ws;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Credentials,
    Cursor,
    GdaxClient,
    GdaxError,
    Paginated,
    RequestSigner,
    Result,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    Channel,
    ExchangeFeed,
    FeedMessage,
    LevelChange,
    PriceLevel,
    Subscription,
};
