//! `paas validate`: solve-and-validate benchmark problems one at a time.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::commands::CommandContext;
use crate::cli::output::progress::create_spinner;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{ValidationReport, DEFAULT_VALIDATION_PROBLEMS};
use crate::services::ValidationRunner;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Problem ids to validate (defaults to one problem per benchmark domain)
    pub problem_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct ValidationOutput {
    pub reports: Vec<ValidationReport>,
    pub valid: usize,
    pub total: usize,
}

impl CommandOutput for ValidationOutput {
    fn to_human(&self) -> String {
        format!(
            "{}\n{}/{} problems validated",
            TableFormatter::new().format_validation(&self.reports),
            self.valid,
            self.total
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ValidateArgs, ctx: CommandContext, json: bool) -> Result<()> {
    let ids = if args.problem_ids.is_empty() {
        DEFAULT_VALIDATION_PROBLEMS.to_vec()
    } else {
        args.problem_ids
    };

    let runner = ValidationRunner::new(ctx.solver()?);
    let spinner = (!json).then(create_spinner);
    let total = ids.len();
    let mut done = 0;

    let reports = runner
        .run_with(&ids, |report| {
            done += 1;
            if let Some(spinner) = &spinner {
                spinner.set_message(format!(
                    "[{done}/{total}] problem {}: {}",
                    report.problem_id,
                    report.summary()
                ));
            }
        })
        .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let valid = reports.iter().filter(|r| r.is_valid()).count();
    output(
        &ValidationOutput {
            reports,
            valid,
            total,
        },
        json,
    );

    if valid < total {
        bail!("{} of {total} problems did not validate", total - valid);
    }
    Ok(())
}
