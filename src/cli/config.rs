//
//  codeship-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! The config file is edited by hand; these commands show where it lives and
//! what the CLI reads from it.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the config file path
    Path,

    /// Print the loaded configuration with the password hidden
    Show,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Path => self.path(global),
            ConfigSubcommand::Show => self.show(global),
        }
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;

        if global.json {
            let result = serde_json::json!({
                "path": path,
                "exists": path.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }

    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let config = global.load_config()?.redacted();

        if global.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        if !path.exists() {
            println!(
                "{} {} does not exist; using defaults",
                style("note:").dim(),
                path.display()
            );
        }
        print!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    }
}
