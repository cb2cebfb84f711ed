//
//  codeship-client
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project operations and the project model.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::CodeshipClient;
use super::common::Result;

/// A Codeship project.
///
/// Fields the client does not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Numeric ID shown in the Codeship web UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `basic` or `pro`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project operations, borrowed from a [`CodeshipClient`] via
/// [`CodeshipClient::projects`].
#[derive(Debug, Clone, Copy)]
pub struct Projects<'a> {
    client: &'a CodeshipClient,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a CodeshipClient) -> Self {
        Self { client }
    }

    /// Fetches one project and remembers it as the last-touched project.
    pub async fn get(&self, uuid: &str) -> Result<Project> {
        self.client.ensure_authenticated().await?;
        self.client.touch_project(uuid).await;

        let path = format!("{}/projects/{}", self.client.organization_path().await?, uuid);
        self.client.fetch_field(Method::GET, &path, "project").await
    }

    /// Lists the organization's projects. This endpoint is not paginated.
    pub async fn list(&self) -> Result<Vec<Project>> {
        self.client.ensure_authenticated().await?;

        let path = format!("{}/projects", self.client.organization_path().await?);
        self.client.fetch_field(Method::GET, &path, "projects").await
    }
}
