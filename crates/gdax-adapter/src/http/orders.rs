/*
[INPUT]:  Order parameters, statuses, and identifiers
[OUTPUT]: Placed orders, order listings, and cancelled order ids
[POS]:    HTTP layer - order endpoints (signed)
[UPDATE]: When adding new order endpoints or changing order flow
*/

use reqwest::Method;
use uuid::Uuid;

use crate::http::{GdaxClient, Paginated, Result};
use crate::types::{Order, OrderRequest, OrderStatus, OrderType};

impl GdaxClient {
    /// Place a market order; `size` or `funds` must be set on the request
    ///
    /// POST /orders
    pub async fn place_market_order(&self, request: &OrderRequest) -> Result<Order> {
        self.submit_order(request, OrderType::Market).await
    }

    /// Place a limit order
    ///
    /// POST /orders
    pub async fn place_limit_order(&self, request: &OrderRequest) -> Result<Order> {
        self.submit_order(request, OrderType::Limit).await
    }

    async fn submit_order(&self, request: &OrderRequest, order_type: OrderType) -> Result<Order> {
        let mut request = request.clone();
        request.order_type = Some(order_type);
        if request.client_oid.is_none() {
            request.client_oid = Some(Uuid::new_v4());
        }
        let body = serde_json::to_string(&request)?;
        self.request(Method::POST, "/orders", &body).await
    }

    /// Get a single order
    ///
    /// GET /orders/{order_id}
    pub async fn get_order(&self, order_id: Uuid) -> Result<Order> {
        self.request(Method::GET, &format!("/orders/{order_id}"), "")
            .await
    }

    /// Lazily list orders in the given statuses; an empty slice means all
    ///
    /// GET /orders?status=... — cursor-paginated
    pub fn list_orders(&self, statuses: &[OrderStatus]) -> Paginated<'_, Order> {
        self.list_orders_for_product("", statuses)
    }

    /// Lazily list orders for one product in the given statuses
    ///
    /// GET /orders?status=...&product_id=... — cursor-paginated
    pub fn list_orders_for_product(
        &self,
        product_id: &str,
        statuses: &[OrderStatus],
    ) -> Paginated<'_, Order> {
        let statuses = if statuses.is_empty() {
            &[OrderStatus::All]
        } else {
            statuses
        };
        let mut params: Vec<String> = statuses
            .iter()
            .map(|status| format!("status={}", status.as_str()))
            .collect();
        if !product_id.is_empty() {
            params.push(format!("product_id={product_id}"));
        }
        Paginated::new(self, Method::GET, "/orders", params.join("&"), "", true)
    }

    /// Lazily cancel one order, yielding the cancelled id
    ///
    /// DELETE /orders?order_id=... — single response
    pub fn cancel_order(&self, order_id: Uuid) -> Paginated<'_, Uuid> {
        Paginated::new(
            self,
            Method::DELETE,
            "/orders",
            format!("order_id={order_id}"),
            "",
            false,
        )
    }

    /// Lazily cancel every open order, yielding the cancelled ids
    ///
    /// DELETE /orders — single response
    pub fn cancel_all_orders(&self) -> Paginated<'_, Uuid> {
        self.cancel_all_orders_for_product("")
    }

    /// Lazily cancel every open order for one product
    ///
    /// DELETE /orders?product_id=... — single response
    pub fn cancel_all_orders_for_product(&self, product_id: &str) -> Paginated<'_, Uuid> {
        let params = if product_id.is_empty() {
            String::new()
        } else {
            format!("product_id={product_id}")
        };
        Paginated::new(self, Method::DELETE, "/orders", params, "", false)
    }
}
