//
//  testrail-cli
//  tests/endpoints.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use mockito::{Matcher, Server};
use serde_json::json;

use testrail_cli::api::cases::CaseRequest;
use testrail_cli::api::results::{AddResult, ResultForCase, ResultForTest, ResultStatus};
use testrail_cli::api::runs::UpdateRun;
use testrail_cli::api::sections::AddSection;
use testrail_cli::api::TestRailClient;
use testrail_cli::auth::AuthCredential;

fn client(server: &Server) -> TestRailClient {
    TestRailClient::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::api_key("user", "key"))
}

#[tokio::test]
async fn add_results_for_cases_wraps_entries() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/index.php?/api/v2/add_results_for_cases/7")
        .match_body(Matcher::Json(json!({"results": [
            {"case_id": 1, "status_id": 5, "comment": "This test failed"},
            {"case_id": 2, "status_id": 1, "defects": "TR-7"}
        ]})))
        .with_status(200)
        .with_body(r#"[{"id": 100, "test_id": 11, "status_id": 5}, {"id": 101, "test_id": 12, "status_id": 1}]"#)
        .create_async()
        .await;

    let results = client(&server)
        .add_results_for_cases(
            7,
            &[
                ResultForCase {
                    case_id: 1,
                    result: AddResult::status(ResultStatus::Failed).comment("This test failed"),
                },
                ResultForCase {
                    case_id: 2,
                    result: AddResult {
                        status_id: Some(ResultStatus::Passed),
                        defects: Some("TR-7".into()),
                        ..Default::default()
                    },
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status_id, Some(ResultStatus::Failed));
    mock.assert_async().await;
}

#[tokio::test]
async fn add_results_keys_by_test_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/index.php?/api/v2/add_results/7")
        .match_body(Matcher::Json(json!({"results": [{"test_id": 11, "status_id": 4}]})))
        .with_status(200)
        .with_body(r#"[{"id": 100, "test_id": 11, "status_id": 4}]"#)
        .create_async()
        .await;

    let results = client(&server)
        .add_results(
            7,
            &[ResultForTest {
                test_id: 11,
                result: AddResult::status(ResultStatus::Retest),
            }],
        )
        .await
        .unwrap();

    assert_eq!(results[0].test_id, 11);
    mock.assert_async().await;
}

#[tokio::test]
async fn add_result_posts_to_test() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/index.php?/api/v2/add_result/11")
        .match_body(Matcher::Json(json!({"status_id": 1, "comment": "ok", "custom_browser": "firefox"})))
        .with_status(200)
        .with_body(r#"{"id": 5, "test_id": 11, "status_id": 1, "comment": "ok"}"#)
        .create_async()
        .await;

    let mut result = AddResult::status(ResultStatus::Passed).comment("ok");
    result.custom_fields.insert("custom_browser".into(), json!("firefox"));
    let recorded = client(&server).add_result(11, &result).await.unwrap();

    assert_eq!(recorded.comment.as_deref(), Some("ok"));
    mock.assert_async().await;
}

#[tokio::test]
async fn cases_filter_by_suite_and_section() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/index.php?/api/v2/get_cases/1&suite_id=2&section_id=3")
        .with_status(200)
        .with_body(r#"[{"id": 1, "title": "Open file", "custom_preconds": "none"}]"#)
        .create_async()
        .await;

    let cases = client(&server).get_cases(1, 2, Some(3)).await.unwrap();

    assert_eq!(cases[0].custom("custom_preconds"), Some(&json!("none")));
    mock.assert_async().await;
}

#[tokio::test]
async fn add_case_sends_custom_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/index.php?/api/v2/add_case/3")
        .match_body(Matcher::Json(json!({
            "title": "Login with SSO",
            "priority_id": 2,
            "custom_preconds": "User exists"
        })))
        .with_status(200)
        .with_body(r#"{"id": 40, "title": "Login with SSO", "section_id": 3}"#)
        .create_async()
        .await;

    let request = CaseRequest {
        priority_id: Some(2),
        ..CaseRequest::titled("Login with SSO")
    }
    .custom("custom_preconds", "User exists");
    let case = client(&server).add_case(3, &request).await.unwrap();

    assert_eq!(case.id, 40);
    assert_eq!(case.section_id, Some(3));
    mock.assert_async().await;
}

#[tokio::test]
async fn sections_filter_by_suite() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/index.php?/api/v2/get_sections/1&suite_id=4")
        .with_status(200)
        .with_body(r#"{"offset": 0, "limit": 250, "size": 2, "_links": {"next": null, "prev": null}, "sections": [{"id": 1, "name": "Root"}, {"id": 2, "name": "Child", "parent_id": 1, "depth": 1}]}"#)
        .create_async()
        .await;
    let add = server
        .mock("POST", "/index.php?/api/v2/add_section/1")
        .match_body(Matcher::Json(json!({"name": "Grandchild", "suite_id": 4, "parent_id": 2})))
        .with_status(200)
        .with_body(r#"{"id": 3, "name": "Grandchild", "parent_id": 2, "depth": 2}"#)
        .create_async()
        .await;

    let client = client(&server);
    let sections = client.get_sections(1, 4).await.unwrap();
    let added = client
        .add_section(
            1,
            &AddSection {
                name: "Grandchild".into(),
                suite_id: Some(4),
                parent_id: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[1].parent_id, Some(1));
    assert_eq!(added.depth, 2);
    list.assert_async().await;
    add.assert_async().await;
}

#[tokio::test]
async fn run_lifecycle_uses_post() {
    let mut server = Server::new_async().await;
    let update = server
        .mock("POST", "/index.php?/api/v2/update_run/9")
        .match_body(Matcher::Json(json!({"name": "Renamed"})))
        .with_status(200)
        .with_body(r#"{"id": 9, "name": "Renamed"}"#)
        .create_async()
        .await;
    let close = server
        .mock("POST", "/index.php?/api/v2/close_run/9")
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .with_body(r#"{"id": 9, "name": "Renamed", "is_completed": true, "completed_on": 1389968184}"#)
        .create_async()
        .await;
    let delete = server
        .mock("POST", "/index.php?/api/v2/delete_run/9")
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .create_async()
        .await;

    let client = client(&server);
    let renamed = client
        .update_run(
            9,
            &UpdateRun {
                name: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let closed = client.close_run(9).await.unwrap();
    client.delete_run(9).await.unwrap();

    assert_eq!(renamed.name, "Renamed");
    assert!(closed.is_completed);
    update.assert_async().await;
    close.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn delete_project_is_not_a_get() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", "/index.php?/api/v2/delete_project/3")
        .expect(0)
        .create_async()
        .await;
    let post = server
        .mock("POST", "/index.php?/api/v2/delete_project/3")
        .with_status(200)
        .create_async()
        .await;

    client(&server).delete_project(3).await.unwrap();

    get.assert_async().await;
    post.assert_async().await;
}
