/*
[INPUT]:  Order and report parameters chosen by the caller
[OUTPUT]: Request bodies serialized for the REST API
[POS]:    Data layer - outgoing request definitions
[UPDATE]: When adding new request parameters
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{OrderType, ReportFormat, ReportKind, SelfTradePrevention, Side, StopKind, TimeInForce};

/// Parameters for `POST /orders`.
///
/// `order_type` and `client_oid` are filled in by the client when unset;
/// everything else is sent exactly as provided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub product_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stp: Option<SelfTradePrevention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopKind>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// GTT expiry as "min,hour,day"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub funds: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
}

impl OrderRequest {
    /// A limit order for `size` at `price`
    pub fn limit(product_id: impl Into<String>, side: Side, price: Decimal, size: Decimal) -> Self {
        Self {
            price: Some(price),
            size: Some(size),
            ..Self::bare(product_id, side)
        }
    }

    /// A market order; set `size` or `funds` before submitting
    pub fn market(product_id: impl Into<String>, side: Side) -> Self {
        Self::bare(product_id, side)
    }

    fn bare(product_id: impl Into<String>, side: Side) -> Self {
        Self {
            side,
            product_id: product_id.into(),
            order_type: None,
            client_oid: None,
            stp: None,
            stop: None,
            stop_price: None,
            time_in_force: None,
            cancel_after: None,
            price: None,
            size: None,
            funds: None,
            post_only: None,
        }
    }
}

/// Parameters for `POST /reports`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
