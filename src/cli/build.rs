//
//  codeship-client
//  cli/build.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build commands.
//!
//! Every build command needs a project. It comes from `--project`, or else
//! from `defaults.project` in the config file.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::common::DEFAULT_PER_PAGE;
use crate::api::{ApiError, Build, PageOptions};
use crate::config::Config;
use crate::output::{
    cell, duration_between, format_duration, format_status, format_timestamp, print_field,
    print_header, truncate, TableOutput, TableRow, EMPTY_CELL,
};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(subcommand)]
    pub command: BuildSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BuildSubcommand {
    /// List a project's builds, newest first
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View one build
    View(BuildArgs),

    /// Restart a build
    Restart(BuildArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project UUID
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Builds requested per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: Option<u32>,

    /// Show at most this many builds
    #[arg(long, short = 'L')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build UUID
    pub uuid: String,

    /// Project UUID
    #[arg(long, short = 'p')]
    pub project: Option<String>,
}

fn project_or_default(explicit: Option<&str>, config: &Config) -> Option<String> {
    explicit
        .map(str::to_string)
        .or_else(|| config.defaults.project.clone())
}

fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

fn build_duration(build: &Build) -> Option<u64> {
    let start = build.allocated_at.as_deref().or(build.queued_at.as_deref())?;
    duration_between(start, build.finished_at.as_deref()?)
}

impl TableRow for Build {
    fn headers() -> &'static [&'static str] {
        &["UUID", "STATUS", "BRANCH", "COMMIT", "MESSAGE", "USER", "QUEUED", "DURATION"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            cell(self.uuid.as_deref()),
            format_status(self.status.as_deref().unwrap_or(EMPTY_CELL), color),
            cell(self.branch.as_deref()),
            cell(self.commit_sha.as_deref().map(short_sha)),
            self.commit_message
                .as_deref()
                .and_then(|m| m.lines().next())
                .map_or_else(|| EMPTY_CELL.to_string(), |m| truncate(m, 50)),
            cell(self.username.as_deref()),
            self.queued_at
                .as_deref()
                .map_or_else(|| EMPTY_CELL.to_string(), format_timestamp),
            build_duration(self).map_or_else(|| EMPTY_CELL.to_string(), format_duration),
        ]
    }
}

impl TableOutput for Build {
    fn print_table(&self, color: bool) {
        print_header(&format!("Build {}", self.uuid.as_deref().unwrap_or(EMPTY_CELL)));
        print_field(
            "Status",
            &format_status(self.status.as_deref().unwrap_or(EMPTY_CELL), color),
            color,
        );
        print_field("Project", &cell(self.project_uuid.as_deref()), color);
        print_field("Branch", &cell(self.branch.as_deref()), color);
        print_field("Ref", &cell(self.git_ref.as_deref()), color);
        print_field("Commit", &cell(self.commit_sha.as_deref()), color);
        print_field("Author", &cell(self.username.as_deref()), color);
        for (label, ts) in [
            ("Queued", &self.queued_at),
            ("Allocated", &self.allocated_at),
            ("Finished", &self.finished_at),
        ] {
            if let Some(ts) = ts {
                print_field(label, &format_timestamp(ts), color);
            }
        }
        if let Some(duration) = build_duration(self) {
            print_field("Duration", &format_duration(duration), color);
        }
        if let Some(message) = &self.commit_message {
            println!();
            println!("{}", message.trim_end());
        }
    }
}

impl BuildCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            BuildSubcommand::List(args) => self.list(args, global).await,
            BuildSubcommand::View(args) => self.view(args, global).await,
            BuildSubcommand::Restart(args) => self.restart(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let project = project_or_default(args.project.as_deref(), &config)
            .ok_or(ApiError::MissingProjectContext)?;
        let client = global.client(&config)?;

        let per_page = args
            .per_page
            .or(config.defaults.per_page)
            .unwrap_or(DEFAULT_PER_PAGE);
        let mut builds = client
            .builds()
            .list_with(&project, PageOptions::new(per_page, 1))
            .await?;
        if let Some(limit) = args.limit {
            builds.truncate(limit);
        }

        global.writer().write_list(&builds, "No builds found")
    }

    async fn view(&self, args: &BuildArgs, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let project = project_or_default(args.project.as_deref(), &config);
        let client = global.client(&config)?;

        let build = client.builds().get(&args.uuid, project.as_deref()).await?;
        global.writer().write(&build)
    }

    async fn restart(&self, args: &BuildArgs, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let project = project_or_default(args.project.as_deref(), &config);
        let client = global.client(&config)?;

        client.builds().restart(&args.uuid, project.as_deref()).await?;

        if global.json {
            let result = serde_json::json!({
                "restarted": true,
                "build_uuid": args.uuid,
                "project_uuid": client.last_project_uuid().await,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            global
                .writer()
                .write_success(&format!("Restarted build {}", args.uuid));
        }
        Ok(())
    }
}
