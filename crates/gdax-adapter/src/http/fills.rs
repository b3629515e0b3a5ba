/*
[INPUT]:  Order and product filters
[OUTPUT]: Fill executions for the authenticated profile
[POS]:    HTTP layer - fill endpoints (signed)
[UPDATE]: When adding new fill filters
*/

use reqwest::Method;
use uuid::Uuid;

use crate::http::{GdaxClient, Paginated};
use crate::types::Fill;

impl GdaxClient {
    /// Lazily list fills for the given orders; empty means every fill
    ///
    /// GET /fills?order_id=... — cursor-paginated
    pub fn list_fills(&self, order_ids: &[Uuid]) -> Paginated<'_, Fill> {
        self.list_fills_for_product("", order_ids)
    }

    /// Lazily list fills for one product, optionally narrowed to orders
    ///
    /// GET /fills?order_id=...&product_id=... — cursor-paginated
    pub fn list_fills_for_product(
        &self,
        product_id: &str,
        order_ids: &[Uuid],
    ) -> Paginated<'_, Fill> {
        let mut params = Vec::new();
        if !order_ids.is_empty() {
            let ids: Vec<String> = order_ids.iter().map(Uuid::to_string).collect();
            params.push(format!("order_id={}", ids.join(",")));
        }
        if !product_id.is_empty() {
            params.push(format!("product_id={product_id}"));
        }
        Paginated::new(self, Method::GET, "/fills", params.join("&"), "", true)
    }
}
