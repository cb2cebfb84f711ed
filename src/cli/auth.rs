//
//  codeship-client
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands
//!
//! Codeship sessions are short-lived and never stored; `auth check` only
//! verifies that the configured credentials are accepted and that the
//! organization resolves.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::output::{print_field, print_header, TableOutput};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Authenticate and show the resolved organization
    #[command(visible_alias = "status")]
    Check,
}

#[derive(Debug, Serialize)]
struct AuthStatus {
    authenticated: bool,
    org_uuid: Option<String>,
    org_name: Option<String>,
}

impl TableOutput for AuthStatus {
    fn print_table(&self, color: bool) {
        print_header("Codeship");
        print_field("Organization", self.org_name.as_deref().unwrap_or("-"), color);
        print_field("UUID", self.org_uuid.as_deref().unwrap_or("-"), color);
    }
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Check => check(global).await,
        }
    }
}

async fn check(global: &GlobalOptions) -> Result<()> {
    let config = global.load_config()?;
    let client = global.client(&config)?;
    client.authenticate().await?;

    let status = AuthStatus {
        authenticated: true,
        org_uuid: client.org_uuid().await,
        org_name: client.org_name().await,
    };

    let writer = global.writer();
    if !global.json {
        writer.write_success("Credentials accepted");
    }
    writer.write(&status)
}
