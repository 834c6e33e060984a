use bipcard_lib::{BipCardClient, CoercionPolicy, PortalConfig};
use bipcard_server::{build_router, AppState};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Same pages as bipcard_lib/tests/fixtures; a portal layout change updates both sets.
fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

async fn spawn_app(portal: &MockServer) -> String {
    let client = BipCardClient::with_config(
        PortalConfig::with_base_url(&portal.uri()),
        CoercionPolicy::Strict,
    )
    .unwrap();
    let app = build_router(AppState::new(client));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });
    format!("http://{}", addr)
}

async fn mount_balance(portal: &MockServer, fixture: &str) {
    Mock::given(method("POST"))
        .and(path("/SesionPortalServlet"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture(fixture)))
        .mount(portal)
        .await;
}

#[tokio::test]
async fn info_endpoint_returns_card_info() {
    let portal = MockServer::start().await;
    mount_balance(&portal, "balance_v1.html").await;
    let base = spawn_app(&portal).await;

    let resp = reqwest::get(format!("{}/api/v1/bipcard/123456789012/info", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "cardNumber": "123456789012",
            "contractStatus": "VIGENTE",
            "cardBalance": 45000,
            "cardBalanceDate": "2024-01-01T10:00:00"
        })
    );
}

#[tokio::test]
async fn movements_endpoint_returns_rows_in_order() {
    let portal = MockServer::start().await;
    mount_balance(&portal, "balance_v1.html").await;
    Mock::given(method("POST"))
        .and(path("/ComercialesPortalServlet"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("movements_v1.html")))
        .expect(1)
        .mount(&portal)
        .await;
    let base = spawn_app(&portal).await;

    let resp = reqwest::get(format!("{}/api/v1/bipcard/123456789012/movements", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        json!({
            "movementId": 9131,
            "typeMovement": "Carga",
            "dateTime": "2024-01-02T08:12:00",
            "place": "Metro Los Héroes",
            "amount": 10000,
            "balance": 10700
        })
    );
    assert_eq!(rows[1]["movementId"], 9132);
    assert_eq!(rows[2]["movementId"], 9140);
}

#[tokio::test]
async fn info_endpoint_reports_drifted_page() {
    let portal = MockServer::start().await;
    mount_balance(&portal, "balance_drift_7_cells.html").await;
    let base = spawn_app(&portal).await;

    let resp = reqwest::get(format!("{}/api/v1/bipcard/123456789012/info", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let text = resp.text().await.unwrap();
    assert!(text.starts_with("scraping error: unexpected changes in webpage"), "{}", text);
}

#[tokio::test]
async fn movements_endpoint_fails_when_balance_page_drifted() {
    let portal = MockServer::start().await;
    // The drifted page still carries a KSI token, but its layout is not trusted.
    mount_balance(&portal, "balance_drift_7_cells.html").await;
    Mock::given(method("POST"))
        .and(path("/ComercialesPortalServlet"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&portal)
        .await;
    let base = spawn_app(&portal).await;

    let resp = reqwest::get(format!("{}/api/v1/bipcard/123456789012/movements", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let text = resp.text().await.unwrap();
    assert!(text.starts_with("scraping error: unexpected changes in webpage"), "{}", text);
}

#[tokio::test]
async fn blank_card_number_is_bad_request() {
    let portal = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&portal)
        .await;
    let base = spawn_app(&portal).await;

    for route in ["info", "movements"] {
        let resp = reqwest::get(format!("{}/api/v1/bipcard/%20%20/{}", base, route))
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(resp.text().await.unwrap(), "card number is required");
    }
}

#[tokio::test]
async fn empty_card_number_segment_is_not_found() {
    let portal = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&portal)
        .await;
    let base = spawn_app(&portal).await;

    for route in ["info", "movements"] {
        let resp = reqwest::get(format!("{}/api/v1/bipcard//{}", base, route))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }
}

#[tokio::test]
async fn portal_outage_is_internal_error() {
    let portal = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&portal)
        .await;
    let base = spawn_app(&portal).await;

    let resp = reqwest::get(format!("{}/api/v1/bipcard/123456789012/info", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    assert_eq!(resp.text().await.unwrap(), "portal request failed");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let portal = MockServer::start().await;
    let base = spawn_app(&portal).await;

    let resp = reqwest::get(format!("{}/api/v1/bipcard/123456789012/history", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
