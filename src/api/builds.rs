//
//  codeship-client
//  api/builds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build operations and the build model.
//!
//! A build is a single CI run of a project. Builds are addressed below their
//! project:
//!
//! ```text
//! /organizations/{org}/projects/{project}/builds
//! /organizations/{org}/projects/{project}/builds/{build}
//! /organizations/{org}/projects/{project}/builds/{build}/restart   (POST, 202)
//! ```
//!
//! `get` and `restart` may omit the project; the client then uses the project
//! it touched last (through `projects().get` or `builds().list`).

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::client::CodeshipClient;
use super::common::{PageInfo, PageOptions, Result};

/// A Codeship build.
///
/// Only the commonly used fields are typed; everything else the server sends
/// is kept in `extra` and serialized back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Build {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_uuid: Option<String>,

    /// Git ref the build ran for, e.g. `heads/main`.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,

    /// `initiated`, `testing`, `success`, `error`, `stopped`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queued_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of `GET .../builds`.
#[derive(Debug, Clone, Deserialize)]
struct BuildPage {
    #[serde(default)]
    builds: Vec<Build>,

    #[serde(flatten)]
    info: PageInfo,
}

/// Build operations, borrowed from a [`CodeshipClient`] via
/// [`CodeshipClient::builds`].
#[derive(Debug, Clone, Copy)]
pub struct Builds<'a> {
    client: &'a CodeshipClient,
}

impl<'a> Builds<'a> {
    pub(crate) fn new(client: &'a CodeshipClient) -> Self {
        Self { client }
    }

    /// Fetches one build.
    ///
    /// Without `project_uuid` the last-touched project is used; if there is
    /// none, [`ApiError::MissingProjectContext`](super::common::ApiError::MissingProjectContext)
    /// is returned and nothing is sent.
    pub async fn get(&self, uuid: &str, project_uuid: Option<&str>) -> Result<Build> {
        self.client.ensure_authenticated().await?;
        let project = self.client.resolve_project(project_uuid).await?;
        self.client.touch_build(uuid).await;

        let path = format!(
            "{}/projects/{}/builds/{}",
            self.client.organization_path().await?,
            project,
            uuid
        );
        self.client.fetch_field(Method::GET, &path, "build").await
    }

    /// Lists every build of a project, following pagination to the end.
    pub async fn list(&self, project_uuid: &str) -> Result<Vec<Build>> {
        self.list_with(project_uuid, PageOptions::default()).await
    }

    /// Lists builds starting at `options.page`, `options.per_page` at a time,
    /// and keeps fetching until the server reports no further pages. Builds
    /// are returned in server order.
    pub async fn list_with(&self, project_uuid: &str, options: PageOptions) -> Result<Vec<Build>> {
        self.client.ensure_authenticated().await?;
        self.client.touch_project(project_uuid).await;

        let path = format!(
            "{}/projects/{}/builds",
            self.client.organization_path().await?,
            project_uuid
        );

        let mut builds = Vec::new();
        let mut options = options;
        loop {
            let query = options.to_query();
            let page: BuildPage = self.client.fetch(Method::GET, &path, Some(&query)).await?;
            debug!(
                project = project_uuid,
                page = page.info.page,
                per_page = page.info.per_page,
                total = page.info.total,
                received = page.builds.len(),
                "Fetched builds page"
            );

            builds.extend(page.builds);
            match page.info.next_after(options) {
                Some(next) => options = next,
                None => break,
            }
        }

        Ok(builds)
    }

    /// Asks Codeship to restart a build. The server acknowledges with
    /// `202 Accepted`; the restarted build runs asynchronously.
    pub async fn restart(&self, uuid: &str, project_uuid: Option<&str>) -> Result<()> {
        self.client.ensure_authenticated().await?;
        let project = self.client.resolve_project(project_uuid).await?;
        self.client.touch_build(uuid).await;

        let path = format!(
            "{}/projects/{}/builds/{}/restart",
            self.client.organization_path().await?,
            project,
            uuid
        );
        self.client.send_action(Method::POST, &path).await
    }
}
