//! `paas packages`: list solver packages or show one package's parameters.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::commands::CommandContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{PackageManifest, ParameterSpec};
use crate::services::PackageCatalog;

#[derive(Args, Debug)]
pub struct PackagesArgs {
    /// Show the solve parameters of this package
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PackageListOutput {
    pub base_url: String,
    pub packages: Vec<PackageManifest>,
}

impl CommandOutput for PackageListOutput {
    fn to_human(&self) -> String {
        if self.packages.is_empty() {
            return format!("No packages offered by {}.", self.base_url);
        }
        format!(
            "{} package(s) at {}:\n{}",
            self.packages.len(),
            self.base_url,
            TableFormatter::new().format_packages(&self.packages)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct PackageParametersOutput {
    pub package: String,
    pub parameters: Vec<ParameterSpec>,
}

impl CommandOutput for PackageParametersOutput {
    fn to_human(&self) -> String {
        if self.parameters.is_empty() {
            return format!("{} takes no solve parameters.", self.package);
        }
        format!(
            "Solve parameters of {}:\n{}",
            self.package,
            TableFormatter::new().format_parameters(&self.parameters)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: PackagesArgs, ctx: CommandContext, json: bool) -> Result<()> {
    let catalog = PackageCatalog::new(ctx.solver()?);

    match args.name {
        Some(package) => {
            let parameters = catalog.solve_parameters(&package).await?;
            output(&PackageParametersOutput { package, parameters }, json);
        }
        None => {
            let packages = catalog.list().await?;
            output(
                &PackageListOutput {
                    base_url: ctx.session.base_url().to_string(),
                    packages,
                },
                json,
            );
        }
    }
    Ok(())
}
