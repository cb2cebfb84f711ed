//
//  codeship-client
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Client tests against a mock HTTP server.

use codeship_client::api::common::ApiError;
use codeship_client::{ClientConfig, CodeshipClient};
use mockito::{Matcher, Mock, Server, ServerGuard};
use reqwest::Method;
use serde_json::{json, Value};

const BASIC_U_P: &str = "Basic dTpw";
const BUILDS_PATH: &str = r"^/organizations/org-1/projects/p1/builds($|\?)";

fn client_for(server: &ServerGuard) -> CodeshipClient {
    CodeshipClient::new(
        ClientConfig::new("u", "p")
            .with_org_name("acme")
            .with_api_root(server.url()),
    )
    .unwrap()
}

async fn mock_auth(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("POST", "/auth")
        .match_header("authorization", BASIC_U_P)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "tok1",
                "organizations": [
                    {"uuid": "org-0", "name": "other", "scopes": []},
                    {"uuid": "org-1", "name": "acme", "scopes": ["build.read"]}
                ]
            })
            .to_string(),
        )
        .expect(hits)
        .create_async()
        .await
}

fn builds_page(range: std::ops::Range<u32>, page: u32, total: u64) -> String {
    let builds: Vec<Value> = range
        .map(|n| json!({"uuid": format!("b{n}"), "status": "success"}))
        .collect();
    json!({"builds": builds, "page": page, "per_page": 30, "total": total}).to_string()
}

async fn mock_builds_page(
    server: &mut ServerGuard,
    page: u32,
    range: std::ops::Range<u32>,
    total: u64,
) -> Mock {
    server
        .mock("GET", Matcher::Regex(BUILDS_PATH.to_string()))
        .match_header("authorization", "Bearer tok1")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "30".into()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(builds_page(range, page, total))
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn test_list_restart_flow() {
    let mut server = Server::new_async().await;
    let auth = mock_auth(&mut server, 1).await;
    let projects = server
        .mock("GET", "/organizations/org-1/projects")
        .match_header("authorization", "Bearer tok1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"projects": [{"uuid": "p1", "name": "web"}]}).to_string())
        .expect(1)
        .create_async()
        .await;
    let page1 = mock_builds_page(&mut server, 1, 0..30, 75).await;
    let page2 = mock_builds_page(&mut server, 2, 30..60, 75).await;
    let page3 = mock_builds_page(&mut server, 3, 60..75, 75).await;
    let restart = server
        .mock("POST", "/organizations/org-1/projects/p1/builds/b0/restart")
        .match_header("authorization", "Bearer tok1")
        .with_status(202)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);

    let listed = client.projects().list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name.as_deref(), Some("web"));
    assert_eq!(client.org_uuid().await.as_deref(), Some("org-1"));
    assert_eq!(client.org_name().await.as_deref(), Some("acme"));

    let builds = client.builds().list("p1").await.unwrap();
    assert_eq!(builds.len(), 75);
    assert_eq!(builds[0].uuid.as_deref(), Some("b0"));
    assert_eq!(builds[74].uuid.as_deref(), Some("b74"));

    // The listed project is remembered for the restart.
    client.builds().restart("b0", None).await.unwrap();
    assert_eq!(client.last_build_uuid().await.as_deref(), Some("b0"));

    auth.assert_async().await;
    projects.assert_async().await;
    page1.assert_async().await;
    page2.assert_async().await;
    page3.assert_async().await;
    restart.assert_async().await;
}

#[tokio::test]
async fn test_accepted_response_is_none() {
    let mut server = Server::new_async().await;
    let _auth = mock_auth(&mut server, 1).await;
    let _restart = server
        .mock("POST", "/organizations/org-1/projects/p1/builds/b1/restart")
        .with_status(202)
        .with_body("queued")
        .create_async()
        .await;

    let client = client_for(&server);
    let body = client
        .request(
            Method::POST,
            "/organizations/org-1/projects/p1/builds/b1/restart",
            None,
        )
        .await
        .unwrap();

    assert!(body.is_none());
}

#[tokio::test]
async fn test_error_body_is_returned_by_request() {
    let mut server = Server::new_async().await;
    let _auth = mock_auth(&mut server, 1).await;
    let _missing = server
        .mock("GET", "/organizations/org-1/projects/nope")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({"errors": ["Not Found"]}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);

    let body = client
        .request(Method::GET, "/organizations/org-1/projects/nope", None)
        .await
        .unwrap();
    assert_eq!(body, Some(json!({"errors": ["Not Found"]})));

    let err = client.projects().get("nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unknown_organization_stops_before_resource_request() {
    let mut server = Server::new_async().await;
    let _auth = server
        .mock("POST", "/auth")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"access_token": "tok1", "organizations": [{"uuid": "org-9", "name": "else"}]})
                .to_string(),
        )
        .create_async()
        .await;
    let projects = server
        .mock("GET", "/organizations/org-9/projects")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.projects().list().await.unwrap_err();

    assert!(matches!(err, ApiError::OrganizationNotFound { .. }));
    assert!(err.to_string().contains("name: acme"));
    assert!(client.session_token().await.is_none());
    projects.assert_async().await;
}

#[tokio::test]
async fn test_rejected_credentials_are_an_auth_error() {
    let mut server = Server::new_async().await;
    let _auth = server
        .mock("POST", "/auth")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({"errors": ["Unauthorized"]}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.authenticate().await.unwrap_err();

    assert!(matches!(err, ApiError::AuthFailed { .. }));
    assert!(err.is_auth_error());
    assert!(err.to_string().contains("Unauthorized"));
}

#[tokio::test]
async fn test_concurrent_first_requests_authenticate_once() {
    let mut server = Server::new_async().await;
    let auth = mock_auth(&mut server, 1).await;
    let _projects = server
        .mock("GET", "/organizations/org-1/projects")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"projects": []}).to_string())
        .expect(6)
        .create_async()
        .await;

    let client = client_for(&server);
    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.projects().list().await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().unwrap().is_empty());
    }

    auth.assert_async().await;
}
