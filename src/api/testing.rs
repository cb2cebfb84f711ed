//
//  codeship-client
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! A scripted in-memory [`Transport`] for unit tests.
//!
//! Responses are registered per route key, `"METHOD /path"` or
//! `"METHOD /path?query"`, relative to the default API root. A key with a more
//! specific query wins over the bare path. When a route has several queued
//! responses they are served in order and the last one repeats.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::common::{ApiError, Result};
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::config::DEFAULT_API_ROOT;

#[derive(Clone)]
enum Outcome {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<String, VecDeque<Outcome>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, key: &str, status: u16, body: Value) {
        self.respond_raw(key, status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, key: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.push(key, Outcome::Respond(HttpResponse::new(status, body)));
    }

    pub(crate) fn fail(&self, key: &str, message: &str) {
        self.push(key, Outcome::Fail(message.to_string()));
    }

    fn push(&self, key: &str, outcome: Outcome) {
        self.routes
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(outcome);
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `"METHOD /path"` of every request, query stripped.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, route_path(&r.url)))
            .collect()
    }

    /// `"METHOD /path?query"` of every request.
    pub(crate) fn full_calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, relative(&r.url)))
            .collect()
    }

    pub(crate) fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn next_outcome(&self, request: &HttpRequest) -> Option<Outcome> {
        let exact = format!("{} {}", request.method, relative(&request.url));
        let bare = format!("{} {}", request.method, route_path(&request.url));

        let mut routes = self.routes.lock().unwrap();
        let key = if routes.contains_key(&exact) { exact } else { bare };
        let queue = routes.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = self.next_outcome(&request);

        // Give concurrently spawned callers a chance to interleave.
        tokio::task::yield_now().await;

        match outcome {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::Fail(message)) => Err(ApiError::Transport(message)),
            None => Err(ApiError::Transport(format!(
                "no fake response for {} {}",
                request.method, request.url
            ))),
        }
    }
}

fn relative(url: &str) -> &str {
    url.strip_prefix(DEFAULT_API_ROOT).unwrap_or(url)
}

fn route_path(url: &str) -> &str {
    let route = relative(url);
    route.split_once('?').map_or(route, |(path, _)| path)
}

/// A `/auth` response body granting `token` for the given `(uuid, name)` organizations.
pub(crate) fn auth_body(token: &str, organizations: &[(&str, &str)]) -> Value {
    let organizations: Vec<Value> = organizations
        .iter()
        .map(|(uuid, name)| json!({"uuid": uuid, "name": name, "scopes": []}))
        .collect();
    json!({"access_token": token, "organizations": organizations})
}
