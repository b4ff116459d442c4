// Integration tests for the JSON convenience layer

use crate::common::{FRESH_COOKIE, create_test_client};
use assert_json_diff::assert_json_eq;
use intern_portal_client::prelude::*;
use mockito::{Matcher, Server};
use serde_json::{Value, json};

#[tokio::test]
async fn request_json_resolves_to_parsed_body_on_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/auth/me")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"user":{"id":1,"username":"mentor"},"permissions":["project.view"]}"#)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let data = client
        .request_json(&RequestDescriptor::get("/api/auth/me"))
        .await
        .unwrap();

    assert_json_eq!(
        data.unwrap(),
        json!({"user": {"id": 1, "username": "mentor"}, "permissions": ["project.view"]})
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn request_json_treats_unparsable_success_body_as_absent() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/projects/4")
        .with_status(204)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let data = client
        .request_json(&RequestDescriptor::new(Method::DELETE, "/api/projects/4"))
        .await
        .unwrap();
    assert!(data.is_none());

    let unit: Option<Value> = client.delete_json("/api/projects/4").await.unwrap();
    assert!(unit.is_none());
}

#[tokio::test]
async fn request_json_fails_with_status_and_data() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/api/projects/99")
        .with_status(404)
        .with_body(r#"{"error":"Project not found"}"#)
        .create_async()
        .await;
    let _crash = server
        .mock("GET", "/api/reports/")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let client = create_test_client(&server);

    let err = client
        .request_json(&RequestDescriptor::get("/api/projects/99"))
        .await
        .unwrap_err();
    match &err {
        AppError::RequestFailed { status, data } => {
            assert_eq!(*status, StatusCode::NOT_FOUND);
            assert_json_eq!(data.clone().unwrap(), json!({"error": "Project not found"}));
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    assert_eq!(err.server_message(), Some("Project not found"));
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let err = client
        .request_json(&RequestDescriptor::get("/api/reports/"))
        .await
        .unwrap_err();
    match err {
        AppError::RequestFailed { status, data } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(data.is_none());
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn request_json_resolves_after_transparent_refresh() {
    let mut server = Server::new_async().await;
    let _expired = server
        .mock("GET", "/api/projects/")
        .with_status(401)
        .with_body(r#"{"error":"SESSION_EXPIRED"}"#)
        .expect(1)
        .create_async()
        .await;
    let _refresh = server
        .mock("POST", "/api/auth/refresh")
        .with_status(200)
        .with_header("set-cookie", FRESH_COOKIE)
        .expect(1)
        .create_async()
        .await;
    let _fresh = server
        .mock("GET", "/api/projects/")
        .match_header("cookie", Matcher::Regex("access_token=fresh".to_string()))
        .with_status(200)
        .with_body(r#"[{"id":1,"title":"Portal"}]"#)
        .expect(1)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let projects: Vec<Project> = client.get_json("/api/projects/").await.unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "Portal");
}

#[tokio::test]
async fn request_json_judges_refresh_response_when_refresh_fails() {
    let mut server = Server::new_async().await;
    let _expired = server
        .mock("GET", "/api/projects/")
        .with_status(401)
        .with_body(r#"{"error":"TOKEN_EXPIRED"}"#)
        .create_async()
        .await;
    let _refresh = server
        .mock("POST", "/api/auth/refresh")
        .with_status(401)
        .with_body(r#"{"error":"Invalid refresh token"}"#)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let err = client
        .request_json(&RequestDescriptor::get("/api/projects/"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.server_message(), Some("Invalid refresh token"));
    assert_eq!(client.effects().navigations(), vec!["/login"]);
}

#[tokio::test]
async fn typed_helpers_report_shape_mismatch() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/projects/")
        .with_status(200)
        .with_body(r#"{"not":"a list"}"#)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let err = client
        .get_json::<Vec<Project>>("/api/projects/")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Deserialization(_)));
}

#[tokio::test]
async fn post_and_put_helpers_send_json_bodies() {
    let mut server = Server::new_async().await;
    let post = server
        .mock("POST", "/api/projects/")
        .match_body(Matcher::Json(json!({"title": "New"})))
        .with_status(201)
        .with_body(r#"{"id":9,"title":"New"}"#)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/api/projects/9")
        .match_body(Matcher::Json(json!({"title": "Renamed"})))
        .with_status(200)
        .with_body(r#"{"id":9,"title":"Renamed"}"#)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let created: Project = client
        .post_json("/api/projects/", &json!({"title": "New"}))
        .await
        .unwrap();
    let renamed: Project = client
        .put_json("/api/projects/9", &json!({"title": "Renamed"}))
        .await
        .unwrap();

    assert_eq!(created.id, 9);
    assert_eq!(renamed.title, "Renamed");
    post.assert_async().await;
    put.assert_async().await;
}
