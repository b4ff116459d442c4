// Integration tests for the refresh-and-retry cycle

use crate::common::{FRESH_COOKIE, create_test_client};
use assert_json_diff::assert_json_eq;
use intern_portal_client::prelude::*;
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn non_401_responses_pass_through_without_refresh() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/api/auth/refresh")
        .expect(0)
        .create_async()
        .await;
    let ok = server
        .mock("GET", "/api/ok")
        .with_status(200)
        .with_body(r#"{"value":1}"#)
        .create_async()
        .await;
    let broken = server
        .mock("GET", "/api/broken")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;
    let forbidden = server
        .mock("GET", "/api/forbidden")
        .with_status(403)
        .with_body(r#"{"error":"TOKEN_EXPIRED"}"#)
        .create_async()
        .await;

    let client = create_test_client(&server);

    let exchange = client
        .exchange(&RequestDescriptor::get("/api/ok"))
        .await
        .unwrap();
    assert_eq!(exchange.outcome, RequestOutcome::Success);
    assert_eq!(exchange.response.status(), StatusCode::OK);
    assert_eq!(exchange.response.text(), r#"{"value":1}"#);

    let response = client
        .request(&RequestDescriptor::get("/api/broken"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "boom");

    let response = client
        .request(&RequestDescriptor::get("/api/forbidden"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    ok.assert_async().await;
    broken.assert_async().await;
    forbidden.assert_async().await;
    refresh.assert_async().await;
    assert!(client.effects().effects().is_empty());
}

#[tokio::test]
async fn unauthorized_without_expiry_code_is_returned_unchanged() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/api/auth/refresh")
        .expect(0)
        .create_async()
        .await;
    let html = server
        .mock("GET", "/api/html")
        .with_status(401)
        .with_body("<h1>Unauthorized</h1>")
        .create_async()
        .await;
    let other = server
        .mock("GET", "/api/other")
        .with_status(401)
        .with_body(r#"{"error":"Missing or invalid Authorization header"}"#)
        .create_async()
        .await;

    let client = create_test_client(&server);

    let exchange = client
        .exchange(&RequestDescriptor::get("/api/html"))
        .await
        .unwrap();
    assert_eq!(exchange.outcome, RequestOutcome::NonExpiryError);
    assert_eq!(exchange.response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(exchange.response.text(), "<h1>Unauthorized</h1>");

    let response = client
        .request(&RequestDescriptor::get("/api/other"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // the speculative parse must leave the body readable
    let body: serde_json::Value = response.json().unwrap();
    assert_json_eq!(
        body,
        json!({"error": "Missing or invalid Authorization header"})
    );

    html.assert_async().await;
    other.assert_async().await;
    refresh.assert_async().await;
    assert!(client.effects().navigations().is_empty());
}

#[tokio::test]
async fn token_expired_refreshes_once_and_retries_original_request() {
    let mut server = Server::new_async().await;
    let payload = json!({"intern_id": 7, "project_id": 3, "role": "Member", "user_id": 0});

    let first = server
        .mock("POST", "/api/intern-project/assign")
        .match_body(Matcher::Json(payload.clone()))
        .with_status(401)
        .with_body(r#"{"error":"TOKEN_EXPIRED"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/auth/refresh")
        .with_status(200)
        .with_header("set-cookie", FRESH_COOKIE)
        .with_body(r#"{"message":"refreshed"}"#)
        .expect(1)
        .create_async()
        .await;
    let retry = server
        .mock("POST", "/api/intern-project/assign")
        .match_header("cookie", Matcher::Regex("access_token=fresh".to_string()))
        .match_header("x-requested-with", "portal")
        .match_body(Matcher::Json(payload.clone()))
        .with_status(200)
        .with_body(r#"{"assigned":true}"#)
        .expect(1)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let descriptor = RequestDescriptor::post("/api/intern-project/assign")
        .header("X-Requested-With", "portal")
        .unwrap()
        .json(&payload)
        .unwrap();

    let exchange = client.exchange(&descriptor).await.unwrap();
    assert_eq!(exchange.outcome, RequestOutcome::Retried);
    assert_eq!(exchange.response.status(), StatusCode::OK);
    assert_eq!(exchange.response.text(), r#"{"assigned":true}"#);

    first.assert_async().await;
    refresh.assert_async().await;
    retry.assert_async().await;
    assert!(client.effects().navigations().is_empty());
}

#[tokio::test]
async fn refresh_is_a_bare_post_carrying_the_session_cookie() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_header("set-cookie", "refresh_token=r1; Path=/; HttpOnly")
        .create_async()
        .await;
    let expired = server
        .mock("GET", "/api/interns/")
        .with_status(401)
        .with_body(r#"{"error":"TOKEN_EXPIRED"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/auth/refresh")
        .match_header("cookie", Matcher::Regex("refresh_token=r1".to_string()))
        .match_header("content-type", Matcher::Missing)
        .match_body("")
        .with_status(200)
        .with_header("set-cookie", FRESH_COOKIE)
        .expect(1)
        .create_async()
        .await;
    let retry = server
        .mock("GET", "/api/interns/")
        .match_header("cookie", Matcher::Regex("access_token=fresh".to_string()))
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = create_test_client(&server);
    client
        .request(&RequestDescriptor::post("/api/auth/login"))
        .await
        .unwrap();

    let exchange = client
        .exchange(&RequestDescriptor::get("/api/interns/"))
        .await
        .unwrap();
    assert_eq!(exchange.outcome, RequestOutcome::Retried);
    assert_eq!(exchange.response.status(), StatusCode::OK);

    login.assert_async().await;
    expired.assert_async().await;
    refresh.assert_async().await;
    retry.assert_async().await;
}

#[tokio::test]
async fn retry_that_is_still_unauthorized_is_surfaced() {
    let mut server = Server::new_async().await;
    let data = server
        .mock("GET", "/api/interns/")
        .with_status(401)
        .with_body(r#"{"error":"TOKEN_EXPIRED"}"#)
        .expect(2)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/auth/refresh")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let exchange = client
        .exchange(&RequestDescriptor::get("/api/interns/"))
        .await
        .unwrap();

    assert_eq!(exchange.outcome, RequestOutcome::Retried);
    assert_eq!(exchange.response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        expiry_signal(&exchange.response),
        Some(ExpiryCode::TokenExpired)
    );

    data.assert_async().await;
    refresh.assert_async().await;
    assert!(client.effects().navigations().is_empty());
}

#[tokio::test]
async fn failed_refresh_redirects_to_login_and_returns_refresh_response() {
    let mut server = Server::new_async().await;
    let data = server
        .mock("GET", "/api/projects/")
        .with_status(401)
        .with_body(r#"{"error":"SESSION_EXPIRED"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/api/auth/refresh")
        .with_status(403)
        .with_body(r#"{"error":"Refresh token revoked"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let exchange = client
        .exchange(&RequestDescriptor::get("/api/projects/"))
        .await
        .unwrap();

    assert_eq!(exchange.outcome, RequestOutcome::RefreshFailed);
    assert_eq!(exchange.response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        exchange.response.text(),
        r#"{"error":"Refresh token revoked"}"#
    );
    assert_eq!(client.effects().navigations(), vec!["/login"]);

    data.assert_async().await;
    refresh.assert_async().await;
}

#[tokio::test]
async fn default_content_type_is_json_and_overridable() {
    let mut server = Server::new_async().await;
    let json_mock = server
        .mock("GET", "/api/json")
        .match_header("content-type", "application/json")
        .with_status(200)
        .create_async()
        .await;
    let text_mock = server
        .mock("POST", "/api/text")
        .match_header("content-type", "text/plain")
        .match_body("hello")
        .with_status(200)
        .create_async()
        .await;

    let client = create_test_client(&server);
    client
        .request(&RequestDescriptor::get("/api/json"))
        .await
        .unwrap();
    let response = client
        .request(
            &RequestDescriptor::post("/api/text")
                .header("Content-Type", "text/plain")
                .unwrap()
                .body("hello"),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    json_mock.assert_async().await;
    text_mock.assert_async().await;
}

#[tokio::test]
async fn transport_failure_propagates_without_retry() {
    let client = AuthenticatedClient::with_effects(
        Config::with_base_url("http://127.0.0.1:1"),
        RecordingEffects::new(),
    )
    .unwrap();

    let err = client
        .request(&RequestDescriptor::get("/api/projects/"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Http(_)),
        "unexpected error: {err:?}"
    );
    assert!(client.effects().effects().is_empty());
}
