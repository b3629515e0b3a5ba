/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod accounts;
pub mod client;
pub mod coinbase_accounts;
pub mod error;
pub mod fills;
pub mod orders;
pub mod pagination;
pub mod reports;
pub mod signature;

pub use error::{GdaxError, Result};
pub use pagination::{Cursor, Paginated};
pub use signature::RequestSigner;

pub use client::{ClientConfig, Credentials, GdaxClient};
