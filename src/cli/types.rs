//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::browse::BrowseArgs;
use crate::cli::commands::packages::PackagesArgs;
use crate::cli::commands::settings::SettingsArgs;
use crate::cli::commands::solve::SolveArgs;
use crate::cli::commands::validate::ValidateArgs;

#[derive(Parser, Debug)]
#[command(name = "paas")]
#[command(about = "Submit planning problems to a Planning-as-a-Service solver", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Solver service base URL (overrides saved settings and config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Load configuration from this file instead of .paas/
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a domain/problem pair and print the plans
    Solve(SolveArgs),

    /// List solver packages and their parameters
    Packages(PackagesArgs),

    /// Browse the public planning.domains collections
    Browse(BrowseArgs),

    /// Run solve-and-validate over benchmark problems
    Validate(ValidateArgs),

    /// Show or change saved settings
    Settings(SettingsArgs),
}
