/*
[INPUT]:  Account identifiers and pagination cursors
[OUTPUT]: Account balances, ledger entries, and holds
[POS]:    HTTP layer - account endpoints (signed)
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use reqwest::Method;
use uuid::Uuid;

use crate::http::{GdaxClient, Paginated, Result};
use crate::types::{Account, AccountHistory, AccountHold};

impl GdaxClient {
    /// Lazily list all trading accounts
    ///
    /// GET /accounts — single response, no pagination cursors
    pub fn list_accounts(&self) -> Paginated<'_, Account> {
        Paginated::new(self, Method::GET, "/accounts", "", "", false)
    }

    /// Get a single account
    ///
    /// GET /accounts/{account_id}
    pub async fn get_account(&self, account_id: Uuid) -> Result<Account> {
        self.request(Method::GET, &format!("/accounts/{account_id}"), "")
            .await
    }

    /// Lazily iterate the ledger of an account, newest first
    ///
    /// GET /accounts/{account_id}/ledger — cursor-paginated
    pub fn account_history(&self, account_id: Uuid) -> Paginated<'_, AccountHistory> {
        Paginated::new(
            self,
            Method::GET,
            format!("/accounts/{account_id}/ledger"),
            "",
            "",
            true,
        )
    }

    /// Lazily iterate the holds on an account
    ///
    /// GET /accounts/{account_id}/holds — cursor-paginated
    pub fn account_holds(&self, account_id: Uuid) -> Paginated<'_, AccountHold> {
        Paginated::new(
            self,
            Method::GET,
            format!("/accounts/{account_id}/holds"),
            "",
            "",
            true,
        )
    }
}
