//
//  testrail-cli
//  tests/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

use testrail_cli::api::runs::AddRun;
use testrail_cli::api::suites::SuiteRequest;
use testrail_cli::api::{ApiError, TestRailClient, TestRailSession};
use testrail_cli::auth::AuthCredential;

const PROJECTS: &str = r#"[
    {"id": 1, "name": "Datahub", "suite_mode": 3},
    {"id": 2, "name": "Website", "suite_mode": 3}
]"#;

async fn projects_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/index.php?/api/v2/get_projects")
        .with_status(200)
        .with_body(PROJECTS)
        .expect(1)
        .create_async()
        .await
}

async fn connect(server: &ServerGuard) -> TestRailSession {
    let client = TestRailClient::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::api_key("user", "key"));
    TestRailSession::connect(client).await.unwrap()
}

#[tokio::test]
async fn project_list_is_fetched_once() {
    let mut server = Server::new_async().await;
    let projects = projects_mock(&mut server).await;
    let runs = server
        .mock("GET", "/index.php?/api/v2/get_runs/2")
        .with_status(200)
        .with_body(r#"[{"id": 81, "name": "File Formats", "project_id": 2}]"#)
        .expect(2)
        .create_async()
        .await;

    let session = connect(&server).await;

    assert_eq!(session.project_id("Datahub").unwrap(), 1);
    assert_eq!(session.project_id("Website").unwrap(), 2);
    assert_eq!(session.project_id("Website").unwrap(), 2);
    assert_eq!(session.runs("Website").await.unwrap()[0].id, 81);
    assert_eq!(session.runs("Website").await.unwrap()[0].id, 81);

    projects.assert_async().await;
    runs.assert_async().await;
}

#[tokio::test]
async fn unknown_project_fails_without_a_request() {
    let mut server = Server::new_async().await;
    let projects = projects_mock(&mut server).await;
    let suites = server
        .mock("GET", Matcher::Regex("get_suites".into()))
        .expect(0)
        .create_async()
        .await;

    let session = connect(&server).await;
    let err = session.suites("Nonexistent").await.unwrap_err();

    assert!(matches!(err, ApiError::UnknownProject(ref name) if name == "Nonexistent"));
    assert!(err.is_not_found());
    projects.assert_async().await;
    suites.assert_async().await;
}

#[tokio::test]
async fn suite_names_and_ids_resolve_both_ways() {
    let mut server = Server::new_async().await;
    projects_mock(&mut server).await;
    server
        .mock("GET", "/index.php?/api/v2/get_suites/1")
        .with_status(200)
        .with_body(
            json!([
                {"id": 4, "name": "Smoke", "project_id": 1},
                {"id": 5, "name": "Regression", "project_id": 1}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let session = connect(&server).await;

    assert_eq!(session.suite_id_from_name("Datahub", "Regression").await.unwrap(), 5);
    assert_eq!(
        session.suite_name_from_id("Datahub", 4).await.unwrap().as_deref(),
        Some("Smoke")
    );
    assert_eq!(session.suite_name_from_id("Datahub", 6).await.unwrap(), None);

    let err = session.suite_id_from_name("Datahub", "Nightly").await.unwrap_err();
    assert!(matches!(err, ApiError::UnknownSuite { ref suite, .. } if suite == "Nightly"));
}

#[tokio::test]
async fn add_suite_posts_to_project_id() {
    let mut server = Server::new_async().await;
    projects_mock(&mut server).await;
    let add = server
        .mock("POST", "/index.php?/api/v2/add_suite/2")
        .match_body(Matcher::Json(json!({"name": "Checkout", "description": "Payment flows"})))
        .with_status(200)
        .with_body(r#"{"id": 9, "name": "Checkout", "project_id": 2}"#)
        .create_async()
        .await;

    let session = connect(&server).await;
    let suite = session
        .add_suite("Website", &SuiteRequest::new("Checkout", Some("Payment flows".into())))
        .await
        .unwrap();

    assert_eq!(suite.id, 9);
    add.assert_async().await;
}

#[tokio::test]
async fn add_run_posts_to_project_id() {
    let mut server = Server::new_async().await;
    projects_mock(&mut server).await;
    let add = server
        .mock("POST", "/index.php?/api/v2/add_run/1")
        .match_body(Matcher::Json(json!({
            "suite_id": 5,
            "name": "Nightly",
            "include_all": false,
            "case_ids": [1, 2]
        })))
        .with_status(200)
        .with_body(r#"{"id": 12, "name": "Nightly", "suite_id": 5, "project_id": 1}"#)
        .create_async()
        .await;

    let session = connect(&server).await;
    let run = session
        .add_run(
            "Datahub",
            &AddRun {
                suite_id: Some(5),
                name: "Nightly".into(),
                ..Default::default()
            }
            .with_cases(vec![1, 2]),
        )
        .await
        .unwrap();

    assert_eq!(run.id, 12);
    add.assert_async().await;
}

#[tokio::test]
async fn sections_and_cases_use_filters() {
    let mut server = Server::new_async().await;
    projects_mock(&mut server).await;
    let sections = server
        .mock("GET", "/index.php?/api/v2/get_sections/2&suite_id=5")
        .with_status(200)
        .with_body(r#"[{"id": 1, "name": "Prerequisites", "depth": 0}]"#)
        .create_async()
        .await;
    let cases = server
        .mock("GET", "/index.php?/api/v2/get_cases/2&suite_id=5&section_id=1")
        .with_status(200)
        .with_body(r#"{"offset": 0, "limit": 250, "size": 1, "_links": {"next": null, "prev": null}, "cases": [{"id": 3, "title": "Login"}]}"#)
        .create_async()
        .await;

    let session = connect(&server).await;

    assert_eq!(session.sections("Website", 5).await.unwrap()[0].name, "Prerequisites");
    assert_eq!(session.cases("Website", 5, Some(1)).await.unwrap()[0].title, "Login");
    sections.assert_async().await;
    cases.assert_async().await;
}
