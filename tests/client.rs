//
//  testrail-cli
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use mockito::{Matcher, Server};
use serde_json::{json, Value};

use testrail_cli::api::{ApiError, TestRailClient};
use testrail_cli::auth::AuthCredential;

fn client(server: &Server) -> TestRailClient {
    TestRailClient::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::api_key("user", "key"))
}

#[tokio::test]
async fn get_sends_basic_auth_and_json_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/index.php?/api/v2/get_case/1")
        .match_header("authorization", "Basic dXNlcjprZXk=")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(r#"{"id": 1, "title": "Print document history and attachments"}"#)
        .create_async()
        .await;

    let case: Value = client(&server).send_get("get_case/1").await.unwrap();

    assert_eq!(case["title"], "Print document history and attachments");
    mock.assert_async().await;
}

#[tokio::test]
async fn post_serializes_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/index.php?/api/v2/add_result/7")
        .match_header("authorization", "Basic dXNlcjprZXk=")
        .match_body(Matcher::Json(json!({"status_id": 1, "comment": "ok"})))
        .with_status(200)
        .with_body(r#"{"id": 99, "test_id": 7, "status_id": 1}"#)
        .create_async()
        .await;

    let result: Value = client(&server)
        .send_post("add_result/7", &json!({"status_id": 1, "comment": "ok"}))
        .await
        .unwrap();

    assert_eq!(result["id"], 99);
    mock.assert_async().await;
}

#[tokio::test]
async fn leading_slash_is_ignored() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/index.php?/api/v2/get_runs/1")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let runs: Vec<Value> = client(&server).send_get("/get_runs/1").await.unwrap();

    assert!(runs.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_carries_server_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/index.php?/api/v2/get_project/999")
        .with_status(400)
        .with_body(r#"{"error": "Field :project_id is not a valid or accessible project."}"#)
        .create_async()
        .await;

    let err = client(&server)
        .send_get::<Value>("get_project/999")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Http { status: 400, message: Some(ref m) }
            if m == "Field :project_id is not a valid or accessible project."
    ));
    assert_eq!(
        err.to_string(),
        "TestRail API returned HTTP 400 (\"Field :project_id is not a valid or accessible project.\")"
    );
}

#[tokio::test]
async fn error_status_without_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/index.php?/api/v2/get_projects")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let err = client(&server)
        .send_get::<Value>("get_projects")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.to_string(),
        "TestRail API returned HTTP 500 (No additional error message received)"
    );
}

#[tokio::test]
async fn unauthorized_is_an_auth_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/index.php?/api/v2/get_projects")
        .with_status(401)
        .with_body(r#"{"error": "Authentication failed: invalid or missing user/password or session cookie."}"#)
        .create_async()
        .await;

    let err = client(&server).get_projects().await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn empty_success_body_is_accepted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/index.php?/api/v2/delete_case/5")
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    client(&server).delete_case(5).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn list_follows_next_links() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/index.php?/api/v2/get_cases/1&suite_id=2")
        .with_status(200)
        .with_body(
            json!({
                "offset": 0,
                "limit": 2,
                "size": 2,
                "_links": {
                    "next": "/api/v2/get_cases/1&suite_id=2&limit=2&offset=2",
                    "prev": null
                },
                "cases": [
                    {"id": 1, "title": "First"},
                    {"id": 2, "title": "Second"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let second = server
        .mock("GET", "/index.php?/api/v2/get_cases/1&suite_id=2&limit=2&offset=2")
        .with_status(200)
        .with_body(
            json!({
                "offset": 2,
                "limit": 2,
                "size": 1,
                "_links": {"next": null, "prev": "/api/v2/get_cases/1&suite_id=2&limit=2&offset=0"},
                "cases": [{"id": 3, "title": "Third"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let cases = client(&server).get_cases(1, 2, None).await.unwrap();

    let ids: Vec<u64> = cases.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn list_stops_when_next_links_cycle() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/index.php?/api/v2/get_runs/1")
        .with_status(200)
        .with_body(
            json!({
                "_links": {"next": "/api/v2/get_runs/1&offset=1", "prev": null},
                "runs": [{"id": 1, "name": "Nightly"}]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/index.php?/api/v2/get_runs/1&offset=1")
        .with_status(200)
        .with_body(
            json!({
                "_links": {"next": "/api/v2/get_runs/1", "prev": null},
                "runs": [{"id": 2, "name": "Weekly"}]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let runs = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        client(&server).get_runs(1),
    )
    .await
    .expect("pagination did not terminate")
    .unwrap();

    let ids: Vec<u64> = runs.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn bare_array_lists_decode_like_envelopes() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/index.php?/api/v2/get_suites/1")
        .with_status(200)
        .with_body(r#"[{"id": 1, "name": "Setup & Installation", "project_id": 1}]"#)
        .create_async()
        .await;

    let suites = client(&server).get_suites(1).await.unwrap();
    assert_eq!(suites.len(), 1);
    assert_eq!(suites[0].name, "Setup & Installation");
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = TestRailClient::new("not a url").err().unwrap();
    assert!(matches!(err, ApiError::InvalidUrl { .. }));
}
