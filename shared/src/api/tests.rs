use super::*;
use crate::calendar::Weekday;
use crate::grid::RowField;
use crate::lock::{FormMode, ReportForm};
use crate::request::{HttpMethod, MockHttpClient};
use crate::token::MockTokenStore;
use serde_json::json;

const BASE: &str = "http://api.test";

// =========================================================
// 辅助函数
// =========================================================

fn client(tokens: MockTokenStore) -> ApiClient<MockHttpClient, MockTokenStore> {
    ApiClient::new(
        &format!("{}/", BASE),
        MockHttpClient::new(),
        tokens,
        Duration::from_millis(100),
    )
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn user_json() -> serde_json::Value {
    json!({"id": 1, "name": "Admin", "email": "admin@example.com"})
}

fn credentials() -> Credentials {
    Credentials {
        email: "admin@example.com".into(),
        password: "secret".into(),
    }
}

// =========================================================
// 请求管道
// =========================================================

#[tokio::test]
async fn test_default_headers_on_every_request() {
    let api = client(MockTokenStore::with_token("tok"));
    api.http
        .mock_response(HttpMethod::Get, &url("/api/outlets"), 200, json!([]));

    api.list_outlets().await.unwrap();

    let requests = api.http.requests.borrow();
    let req = &requests[0];
    assert_eq!(req.url, url("/api/outlets"));
    assert_eq!(req.header("Accept"), Some("application/json"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("X-Requested-With"), Some("XMLHttpRequest"));
    // GET 不附带令牌
    assert_eq!(req.header(HEADER_XSRF_TOKEN), None);
}

#[tokio::test]
async fn test_mutation_uses_existing_token() {
    let api = client(MockTokenStore::with_token("abc"));
    api.http.mock_empty(HttpMethod::Delete, &url("/api/items/5"), 204);

    api.delete_item(5).await.unwrap();

    assert_eq!(api.http.calls(), vec![format!("DELETE {}", url("/api/items/5"))]);
    assert_eq!(
        api.http.requests.borrow()[0].header(HEADER_XSRF_TOKEN),
        Some("abc")
    );
    assert_eq!(api.tokens.waits.get(), 0);
}

#[tokio::test]
async fn test_mutation_primes_token_when_absent() {
    let api = client(MockTokenStore::primed_by_wait("fresh"));
    api.http
        .mock_empty(HttpMethod::Get, &url("/sanctum/csrf-cookie"), 204);
    api.http
        .mock_response(HttpMethod::Post, &url("/api/outlets"), 201, json!({"id": 9}));

    let input = OutletInput {
        code: "OUT-009".into(),
        name: "Cibubur".into(),
    };
    api.create_outlet(&input).await.unwrap();

    assert_eq!(
        api.http.calls(),
        vec![
            format!("GET {}", url("/sanctum/csrf-cookie")),
            format!("POST {}", url("/api/outlets")),
        ]
    );
    assert_eq!(api.tokens.waits.get(), 1);
    let requests = api.http.requests.borrow();
    assert_eq!(requests[1].header(HEADER_XSRF_TOKEN), Some("fresh"));
    assert_eq!(
        requests[1].body.as_deref(),
        Some(r#"{"code":"OUT-009","name":"Cibubur"}"#)
    );
}

#[tokio::test]
async fn test_mutation_sends_empty_token_when_priming_yields_nothing() {
    let api = client(MockTokenStore::empty());
    api.http
        .mock_empty(HttpMethod::Get, &url("/sanctum/csrf-cookie"), 204);
    api.http.mock_response(
        HttpMethod::Post,
        &url("/api/sales-reports"),
        419,
        json!({"message": "CSRF token mismatch."}),
    );

    let err = api.submit_report(&[]).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(
        api.http.requests.borrow()[1].header(HEADER_XSRF_TOKEN),
        Some("")
    );
}

#[tokio::test]
async fn test_rejection_carries_server_message() {
    let api = client(MockTokenStore::with_token("t"));
    api.http.mock_response(
        HttpMethod::Post,
        &url("/api/sales-reports"),
        422,
        json!({"message": "Data periode ini sudah ada"}),
    );

    let err = api.submit_report(&[]).await.unwrap_err();
    assert_eq!(err.user_message("Gagal simpan"), "Data periode ini sudah ada");
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let api = client(MockTokenStore::with_token("t"));
    api.http.fail_with(ApiError::Transport("Failed to fetch".into()));

    let err = api.current_user().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_unmocked_endpoint_is_rejected() {
    let api = client(MockTokenStore::with_token("t"));
    let err = api.list_items().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 404,
            message: None
        }
    );
}

// =========================================================
// Session
// =========================================================

#[tokio::test]
async fn test_login_flow_order() {
    let api = client(MockTokenStore::primed_by_wait("login-token"));
    api.http
        .mock_empty(HttpMethod::Get, &url("/sanctum/csrf-cookie"), 204);
    api.http.mock_empty(HttpMethod::Post, &url("/login"), 204);
    api.http
        .mock_response(HttpMethod::Get, &url("/api/user"), 200, user_json());

    let user = api.login(&credentials()).await.unwrap();
    assert_eq!(user.name, "Admin");

    assert_eq!(
        api.http.calls(),
        vec![
            format!("GET {}", url("/sanctum/csrf-cookie")),
            format!("POST {}", url("/login")),
            format!("GET {}", url("/api/user")),
        ]
    );
    let requests = api.http.requests.borrow();
    assert_eq!(requests[1].header(HEADER_XSRF_TOKEN), Some("login-token"));
    let body: serde_json::Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["email"], "admin@example.com");
}

#[tokio::test]
async fn test_login_without_token_fails_before_posting() {
    let api = client(MockTokenStore::empty());
    api.http
        .mock_empty(HttpMethod::Get, &url("/sanctum/csrf-cookie"), 204);

    let err = api.login(&credentials()).await.unwrap_err();
    assert_eq!(err, ApiError::MissingToken);
    assert_eq!(err.user_message("Login gagal"), "CSRF token not found");
    assert_eq!(api.http.calls().len(), 1);
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let api = client(MockTokenStore::with_token("t"));
    api.http
        .mock_empty(HttpMethod::Get, &url("/sanctum/csrf-cookie"), 204);
    api.http.mock_response(
        HttpMethod::Post,
        &url("/login"),
        422,
        json!({"message": "These credentials do not match our records."}),
    );

    let err = api.login(&credentials()).await.unwrap_err();
    assert_eq!(
        err.user_message("Login gagal"),
        "These credentials do not match our records."
    );
    // 失败后不再获取用户信息
    assert!(!api.http.calls().iter().any(|c| c.ends_with("/api/user")));
}

#[tokio::test]
async fn test_probe_unauthorized() {
    let api = client(MockTokenStore::empty());
    api.http.mock_response(
        HttpMethod::Get,
        &url("/api/user"),
        401,
        json!({"message": "Unauthenticated."}),
    );

    assert_eq!(api.current_user().await.unwrap_err(), ApiError::Unauthorized);
}

// =========================================================
// Master data & reports
// =========================================================

#[tokio::test]
async fn test_load_master_data_fans_out() {
    let api = client(MockTokenStore::with_token("t"));
    api.http.mock_response(
        HttpMethod::Get,
        &url("/api/outlets"),
        200,
        json!([{"id": 1, "code": "OUT-001", "name": "Pasar Minggu"}]),
    );
    api.http.mock_response(
        HttpMethod::Get,
        &url("/api/items"),
        200,
        json!([{"id": 1, "code": "ITEM-A", "name": "Roti", "price": "15000.00"}]),
    );

    let master = api.load_master_data().await.unwrap();
    assert_eq!(master.outlets.len(), 1);
    assert_eq!(master.item_by_code("ITEM-A").and_then(|i| i.price), Some(15000.0));
    assert_eq!(api.http.calls().len(), 2);
}

#[tokio::test]
async fn test_load_master_data_fails_if_any_leg_fails() {
    let api = client(MockTokenStore::with_token("t"));
    api.http
        .mock_response(HttpMethod::Get, &url("/api/outlets"), 200, json!([]));
    api.http
        .mock_response(HttpMethod::Get, &url("/api/items"), 500, json!({}));

    assert!(api.load_master_data().await.is_err());
}

#[tokio::test]
async fn test_list_periods_drops_invalid_entries() {
    let api = client(MockTokenStore::with_token("t"));
    api.http.mock_response(
        HttpMethod::Get,
        &url("/api/sales-reports/periods"),
        200,
        json!([{"year": 2025, "month": 3}, {"year": 2025, "month": 1}, {"year": 2025, "month": 13}]),
    );

    let periods = api.list_periods().await.unwrap();
    assert_eq!(
        crate::calendar::group_periods(&periods),
        vec![(2025, vec![3, 1])]
    );
}

#[tokio::test]
async fn test_create_page_submit_end_to_end() {
    let api = client(MockTokenStore::with_token("t"));
    let period = Period::new(2025, 3).unwrap();
    api.http.mock_response(
        HttpMethod::Get,
        &url("/api/sales-reports?month=3&year=2025"),
        200,
        json!([]),
    );
    api.http.mock_response(
        HttpMethod::Get,
        &url("/api/items"),
        200,
        json!([{"id": 1, "code": "ITEM-A", "name": "Roti", "price": 15000}]),
    );
    api.http
        .mock_response(HttpMethod::Post, &url("/api/sales-reports"), 201, json!({"ok": true}));

    let master = MasterData {
        outlets: Vec::new(),
        items: api.list_items().await.unwrap(),
    };
    let mut form = ReportForm::new(FormMode::Create);
    form.load(&api.fetch_report(period).await.unwrap());
    assert!(!form.has_existing_data());

    let w1 = crate::calendar::Week::FIRST;
    form.update_cell(Weekday::Senin, w1, 0, RowField::OutletId, "OUT-001", &master);
    form.update_cell(Weekday::Senin, w1, 0, RowField::ItemId, "ITEM-A", &master);
    form.update_cell(Weekday::Senin, w1, 0, RowField::QtyOrder, "10", &master);
    form.update_cell(Weekday::Senin, w1, 0, RowField::QtySold, "4", &master);

    let rows = form.prepare_submit(period).unwrap();
    api.submit_report(&rows).await.unwrap();
    form.mark_submitted();

    let requests = api.http.requests.borrow();
    let body: serde_json::Value =
        serde_json::from_str(requests.last().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!([{
            "day_name": "senin", "week": 1, "month": 3, "year": 2025,
            "outlet_id": "OUT-001", "item_id": "ITEM-A",
            "qty_order": 10, "qty_sold": 4, "deposit": 60000.0
        }])
    );
    assert!(form.has_existing_data());
}

#[tokio::test]
async fn test_overwrite_posts_to_update_endpoint() {
    let api = client(MockTokenStore::with_token("t"));
    api.http.mock_response(
        HttpMethod::Post,
        &url("/api/sales-reports/update"),
        200,
        json!({"message": "ok"}),
    );

    let row = ReportPayload {
        day_name: "rabu".into(),
        week: 2,
        month: 1,
        year: 2025,
        outlet_id: "OUT-002".into(),
        item_id: "ITEM-B".into(),
        qty_order: 5,
        qty_sold: 5,
        deposit: 40000.0,
    };
    api.overwrite_report(&[row]).await.unwrap();
    assert_eq!(
        api.http.calls(),
        vec![format!("POST {}", url("/api/sales-reports/update"))]
    );
}
