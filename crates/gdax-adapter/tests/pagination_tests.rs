/*
[INPUT]:  Mock paginated HTTP responses with cursor headers
[OUTPUT]: Test results for the lazy pagination engine
[POS]:    Integration tests - pagination semantics
[UPDATE]: When pagination behavior changes
*/

mod common;

use common::{history_entry, setup_mock_server, test_client};
use gdax_adapter::GdaxError;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT_ID: &str = "e0b3f39a-183d-453e-b754-0c13e5bab0b3";

fn ledger_path() -> String {
    format!("/accounts/{ACCOUNT_ID}/ledger")
}

fn account_id() -> Uuid {
    ACCOUNT_ID.parse().expect("account id")
}

async fn mount_ledger_page(
    server: &MockServer,
    after: Option<&str>,
    body: String,
    next_after: Option<&str>,
) {
    let mut mock = Mock::given(method("GET")).and(path(ledger_path()));
    mock = match after {
        Some(after) => mock.and(query_param("after", after)),
        None => mock.and(query_param_is_missing("after")),
    };
    let mut response = ResponseTemplate::new(200)
        .insert_header("content-type", "application/json")
        .set_body_raw(body, "application/json");
    if let Some(next_after) = next_after {
        response = response.insert_header("CB-AFTER", next_after);
    }
    mock.respond_with(response).expect(1).mount(server).await;
}

#[tokio::test]
async fn test_multi_page_iteration_yields_all_records_in_server_order() {
    let server = setup_mock_server().await;
    mount_ledger_page(
        &server,
        None,
        format!("[{},{}]", history_entry(100), history_entry(99)),
        Some("99"),
    )
    .await;
    mount_ledger_page(&server, Some("99"), format!("[{}]", history_entry(98)), Some("98")).await;
    mount_ledger_page(&server, Some("98"), "[]".to_string(), None).await;

    let client = test_client(&server.uri());
    let mut history = client.account_history(account_id());

    let mut ids = Vec::new();
    while history.has_more().await {
        ids.push(history.take_next().expect("record after has_more").id);
    }

    assert_eq!(ids, vec![100, 99, 98]);
}

#[tokio::test]
async fn test_single_shot_endpoint_fetches_exactly_once() {
    let server = setup_mock_server().await;
    let body = r#"
        [
            {
                "id": "71452118-efc7-4cc4-8780-a5e22d4baa53",
                "currency": "BTC",
                "balance": "0.0000000000000000",
                "available": "0.0000000000000000",
                "hold": "0.0000000000000000"
            },
            {
                "id": "e316cb9a-0808-4fd7-8914-97829c1925de",
                "currency": "USD",
                "balance": "80.2301373066930000",
                "available": "79.2266348066930000",
                "hold": "1.0035025000000000"
            }
        ]
    "#;

    // pagination headers on a single-shot endpoint must be ignored
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .insert_header("CB-AFTER", "3052")
                .set_body_raw(body, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut accounts = client.list_accounts();

    let mut currencies = Vec::new();
    while let Some(account) = accounts.next().await {
        currencies.push(account.expect("account record").currency);
    }

    assert_eq!(currencies, ["BTC", "USD"]);
    // exhausted single-shot sequences stay exhausted, with no second fetch
    assert!(!accounts.has_more().await);
    assert!(!accounts.has_more().await);
}

#[tokio::test]
async fn test_empty_second_page_stops_cleanly() {
    let server = setup_mock_server().await;
    mount_ledger_page(&server, None, format!("[{}]", history_entry(100)), Some("100")).await;
    mount_ledger_page(&server, Some("100"), "[]".to_string(), None).await;

    let client = test_client(&server.uri());
    let mut history = client.account_history(account_id());

    let records = history.collect_all().await.expect("clean end of data");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 100);
}

#[tokio::test]
async fn test_fetch_error_surfaces_on_take_next_and_stays_sticky() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(ledger_path()))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("content-type", "application/json")
                .set_body_raw(r#"{"message": "Account id not found"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut history = client.account_history(account_id());

    // has_more reports true so the caller reaches take_next and sees the error
    assert!(history.has_more().await);
    let err = history.take_next().expect_err("deferred fetch error");
    assert_eq!(err.to_string(), "Account id not found");
    assert!(matches!(err, GdaxError::Api { status: 404, .. }));

    // the error is sticky: no refetch, same error again
    assert!(history.has_more().await);
    let again = history.take_next().expect_err("error stays set");
    assert_eq!(again, err);
}

#[tokio::test]
async fn test_take_next_within_buffered_page_does_not_refetch() {
    let server = setup_mock_server().await;
    mount_ledger_page(
        &server,
        None,
        format!(
            "[{},{},{}]",
            history_entry(100),
            history_entry(99),
            history_entry(98)
        ),
        Some("98"),
    )
    .await;

    let client = test_client(&server.uri());
    let mut history = client.account_history(account_id());

    for expected in [100, 99, 98] {
        assert!(history.has_more().await);
        assert_eq!(history.take_next().expect("buffered record").id, expected);
    }
    // the expect(1) on the mock verifies only one request was ever made
}

#[tokio::test]
async fn test_three_page_sequence_makes_exactly_three_fetches() {
    let server = setup_mock_server().await;
    mount_ledger_page(&server, None, format!("[{}]", history_entry(2)), Some("2")).await;
    mount_ledger_page(&server, Some("2"), format!("[{}]", history_entry(1)), Some("1")).await;
    mount_ledger_page(&server, Some("1"), "[]".to_string(), None).await;

    let client = test_client(&server.uri());
    let mut history = client.account_history(account_id());

    let mut count = 0;
    while history.has_more().await {
        history.take_next().expect("record");
        count += 1;
    }

    assert_eq!(count, 2);
    // each mock carries expect(1): two fetches before the empty page, one
    // for the empty page, and none after has_more returned false
}

#[tokio::test]
async fn test_empty_single_shot_response_does_not_refetch() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_raw("[]", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut accounts = client.list_accounts();

    assert!(!accounts.has_more().await);
    assert!(!accounts.has_more().await);
}

#[tokio::test]
async fn test_take_next_without_has_more_is_a_contract_violation() {
    let server = setup_mock_server().await;
    let client = test_client(&server.uri());
    let mut accounts = client.list_accounts();

    let err = accounts.take_next().expect_err("no page was fetched");
    assert!(matches!(err, GdaxError::Contract(_)));
}
