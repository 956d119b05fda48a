//! `paas settings`: inspect and change persisted settings.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::commands::CommandContext;
use crate::cli::output::{output, CommandOutput};

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show the effective base URL and where settings are stored
    Show,
    /// Save a new solver base URL
    SetUrl {
        /// e.g. http://localhost:5001
        url: String,
    },
}

#[derive(Debug, Serialize)]
pub struct SettingsOutput {
    pub base_url: String,
    pub settings_path: String,
    pub saved: bool,
}

impl CommandOutput for SettingsOutput {
    fn to_human(&self) -> String {
        let verb = if self.saved { "Saved" } else { "Using" };
        format!(
            "{verb} base URL: {}\nSettings file: {}",
            self.base_url, self.settings_path
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SettingsArgs, mut ctx: CommandContext, json: bool) -> Result<()> {
    let saved = match args.command {
        SettingsCommands::Show => false,
        SettingsCommands::SetUrl { url } => {
            let url = url.trim().to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("Base URL must start with http:// or https://, got '{url}'");
            }
            ctx.session.set_base_url(url);
            ctx.session
                .persist(&ctx.settings)
                .await
                .context("Failed to save settings")?;
            true
        }
    };

    output(
        &SettingsOutput {
            base_url: ctx.session.base_url().to_string(),
            settings_path: ctx.settings.path().display().to_string(),
            saved,
        },
        json,
    );
    Ok(())
}
