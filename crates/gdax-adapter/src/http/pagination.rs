/*
[INPUT]:  Cursor headers and JSON array response bodies
[OUTPUT]: Lazy, typed iteration over cursor-paginated endpoints
[POS]:    HTTP layer - generic pagination engine
[UPDATE]: When the exchange changes its cursor scheme
*/

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

use crate::http::client::GdaxClient;
use crate::http::{GdaxError, Result};

/// Pagination position as understood by the remote API: opaque `before` /
/// `after` tokens plus an optional page-size limit.
///
/// A cursor is immutable once received from a response and is replaced
/// wholesale after each fetch. Token contents are never inspected; the
/// server assigns them. Forward iteration only ever sets `after`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: Option<u32>,
}

impl Cursor {
    /// Build a cursor from the CB-BEFORE / CB-AFTER response headers.
    /// An absent or empty header leaves the field unset.
    pub(crate) fn from_headers(headers: &HeaderMap) -> Self {
        let token = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            before: token("CB-BEFORE"),
            after: token("CB-AFTER"),
            limit: None,
        }
    }

    /// Render as a URL query fragment, omitting unset fields
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();
        if let Some(before) = &self.before {
            parts.push(format!("before={before}"));
        }
        if let Some(after) = &self.after {
            parts.push(format!("after={after}"));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={limit}"));
        }
        parts.join("&")
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

/// A lazy sequence of records pulled from a cursor-paginated endpoint.
///
/// One sequence is created per logical query and never reused. It owns the
/// current cursor and every page fetched so far (append-only), and fetches
/// the next page only when the buffered ones are exhausted. Endpoints that
/// return their full result in one response are constructed with
/// `uses_cursors = false` and fetch at most once.
///
/// The sequence is single-writer state: drive it from one task and share
/// only the underlying [`GdaxClient`].
///
/// Prefer [`Paginated::next`]:
///
/// ```no_run
/// # async fn demo(client: &gdax_adapter::GdaxClient) -> gdax_adapter::Result<()> {
/// let mut accounts = client.list_accounts();
/// while let Some(account) = accounts.next().await {
///     let account = account?;
///     println!("{} {}", account.currency, account.balance);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Paginated<'a, T> {
    client: &'a GdaxClient,
    method: Method,
    path: String,
    params: String,
    body: String,
    uses_cursors: bool,
    cursor: Cursor,
    pages: Vec<Vec<T>>,
    page_index: usize,
    index_in_page: usize,
    finished_current_page: bool,
    fetched: bool,
    pending_error: Option<GdaxError>,
}

impl<'a, T> Paginated<'a, T>
where
    T: DeserializeOwned + Clone,
{
    pub(crate) fn new(
        client: &'a GdaxClient,
        method: Method,
        path: impl Into<String>,
        params: impl Into<String>,
        body: impl Into<String>,
        uses_cursors: bool,
    ) -> Self {
        Self {
            client,
            method,
            path: path.into(),
            params: params.into(),
            body: body.into(),
            uses_cursors,
            cursor: Cursor::default(),
            pages: Vec::new(),
            page_index: 0,
            index_in_page: 0,
            finished_current_page: false,
            fetched: false,
            pending_error: None,
        }
    }

    /// Fetch-and-take in one step: `None` once the sequence is exhausted,
    /// `Some(Err(_))` when a fetch failed. A failed sequence is terminal;
    /// stop on the first error and issue a fresh query to retry.
    pub async fn next(&mut self) -> Option<Result<T>> {
        if !self.has_more().await {
            return None;
        }
        Some(self.take_next())
    }

    /// Drain the remaining records into a vector, stopping at the first error
    pub async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut records = Vec::new();
        while self.has_more().await {
            records.push(self.take_next()?);
        }
        Ok(records)
    }

    /// Report whether another record is retrievable, fetching at most one
    /// page from the network to find out.
    ///
    /// Returns `true` when a buffered record remains, when a fetch produced
    /// a non-empty page, or when a fetch failed. In the failure case the
    /// error is parked and surfaced by the following [`Paginated::take_next`]
    /// call, so `has_more` alone never reports a fetch problem.
    ///
    /// Hazard: a caller looping on `has_more` without calling `take_next`
    /// will spin forever against a permanently failing endpoint and never
    /// see the error text. Always drive the pair together, or use
    /// [`Paginated::next`].
    pub async fn has_more(&mut self) -> bool {
        if self.pending_error.is_some() {
            // never fetch over an unobserved error
            return true;
        }
        if self.pages.is_empty() || self.index_in_page == self.pages[self.page_index].len() {
            if self.fetched && !self.uses_cursors {
                // single-shot endpoint: the one response was the whole result
                return false;
            }
            self.finished_current_page = true;
        } else if !self.finished_current_page {
            return true;
        }
        self.fetch_page().await
    }

    /// Take the record at the read position and advance.
    ///
    /// Surfaces the pending fetch error if one is parked; the error stays
    /// set, so a failed sequence keeps returning it. Calling this without a
    /// preceding `has_more` that returned `true` breaks the protocol and
    /// yields [`GdaxError::Contract`].
    pub fn take_next(&mut self) -> Result<T> {
        if let Some(err) = &self.pending_error {
            return Err(err.clone());
        }
        let record = self
            .pages
            .get(self.page_index)
            .and_then(|page| page.get(self.index_in_page))
            .cloned()
            .ok_or(GdaxError::Contract(
                "take_next called without a preceding successful has_more",
            ))?;
        self.index_in_page += 1;
        Ok(record)
    }

    /// Fetch one page. Returns `true` when the caller should call
    /// `take_next` next (a record arrived, or an error is parked) and
    /// `false` on a clean end of data.
    async fn fetch_page(&mut self) -> bool {
        let query = self.request_query();
        debug!(path = %self.path, query = %query, "fetching page");
        self.fetched = true;

        let fetched = self
            .client
            .collection_request(self.method.clone(), &self.path, &query, &self.body)
            .await;
        let (body, cursor) = match fetched {
            Ok(fetched) => fetched,
            Err(err) => {
                self.pending_error = Some(err);
                return true;
            }
        };
        let page: Vec<T> = match serde_json::from_str(&body) {
            Ok(page) => page,
            Err(err) => {
                self.pending_error = Some(err.into());
                return true;
            }
        };

        self.cursor = cursor;
        if page.is_empty() {
            return false;
        }
        debug!(records = page.len(), page = self.pages.len(), "buffered page");
        self.pages.push(page);
        self.page_index = self.pages.len() - 1;
        self.index_in_page = 0;
        self.finished_current_page = false;
        true
    }

    /// Resource params and the cursor, joined into one query string
    fn request_query(&self) -> String {
        let cursor = self.cursor.to_query();
        match (self.params.is_empty(), cursor.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.params.clone(),
            (true, false) => cursor,
            (false, false) => format!("{}&{}", self.params, cursor),
        }
    }
}
