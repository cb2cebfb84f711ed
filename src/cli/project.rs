//
//  codeship-client
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::Project;
use crate::output::{
    cell, format_timestamp, print_field, print_header, TableOutput, TableRow, EMPTY_CELL,
};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List the organization's projects
    #[command(visible_alias = "ls")]
    List,

    /// View one project
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project UUID
    pub uuid: String,
}

impl TableRow for Project {
    fn headers() -> &'static [&'static str] {
        &["UUID", "ID", "NAME", "TYPE", "REPOSITORY"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            cell(self.uuid.as_deref()),
            self.id.map_or_else(|| EMPTY_CELL.to_string(), |id| id.to_string()),
            cell(self.name.as_deref()),
            cell(self.project_type.as_deref()),
            cell(self.repository_url.as_deref()),
        ]
    }
}

impl TableOutput for Project {
    fn print_table(&self, color: bool) {
        print_header(self.name.as_deref().unwrap_or("Project"));
        print_field("UUID", &cell(self.uuid.as_deref()), color);
        if let Some(id) = self.id {
            print_field("ID", &id.to_string(), color);
        }
        print_field("Type", &cell(self.project_type.as_deref()), color);
        print_field("Repository", &cell(self.repository_url.as_deref()), color);
        print_field("Provider", &cell(self.repository_provider.as_deref()), color);
        if let Some(created) = &self.created_at {
            print_field("Created", &format_timestamp(created), color);
        }
        if let Some(updated) = &self.updated_at {
            print_field("Updated", &format_timestamp(updated), color);
        }
    }
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List => self.list(global).await,
            ProjectSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let client = global.client(&config)?;

        let projects = client.projects().list().await?;
        global.writer().write_list(&projects, "No projects found")
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let client = global.client(&config)?;

        let project = client.projects().get(&args.uuid).await?;
        global.writer().write(&project)
    }
}
