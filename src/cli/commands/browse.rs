//! `paas browse`: explore the planning.domains collections.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::commands::CommandContext;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Collection, DomainEntry, ProblemEntry};
use crate::infrastructure::PlanningDomainsClient;
use crate::services::CollectionBrowser;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(subcommand)]
    pub command: BrowseCommands,
}

#[derive(Subcommand, Debug)]
pub enum BrowseCommands {
    /// List collections
    Collections,
    /// List domains
    Domains {
        /// Only domains of the collection with this name or id
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// List the problems of a domain
    Problems {
        /// Domain id
        domain_id: i64,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "listing", rename_all = "snake_case")]
pub enum BrowseOutput {
    Collections { collections: Vec<Collection> },
    Domains { domains: Vec<DomainEntry> },
    Problems { domain_id: i64, problems: Vec<ProblemEntry> },
}

impl CommandOutput for BrowseOutput {
    fn to_human(&self) -> String {
        let table = TableFormatter::new();
        match self {
            Self::Collections { collections } if collections.is_empty() => {
                "No collections found.".to_string()
            }
            Self::Collections { collections } => table.format_collections(collections),
            Self::Domains { domains } if domains.is_empty() => "No domains found.".to_string(),
            Self::Domains { domains } => table.format_domains(domains),
            Self::Problems { domain_id, problems } if problems.is_empty() => {
                format!("Domain {domain_id} has no problems.")
            }
            Self::Problems { problems, .. } => table.format_problems(problems),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: BrowseArgs, ctx: CommandContext, json: bool) -> Result<()> {
    let browser = CollectionBrowser::new(Arc::new(PlanningDomainsClient::from_config(
        &ctx.config.catalog,
    )?));

    let result = match args.command {
        BrowseCommands::Collections => BrowseOutput::Collections {
            collections: browser.collections().await?,
        },
        BrowseCommands::Domains { collection: None } => BrowseOutput::Domains {
            domains: browser.domains().await?,
        },
        BrowseCommands::Domains {
            collection: Some(wanted),
        } => {
            let collections = browser.collections().await?;
            let collection = collections
                .iter()
                .find(|c| {
                    c.collection_name.eq_ignore_ascii_case(&wanted)
                        || c.collection_id.is_some_and(|id| id.to_string() == wanted)
                })
                .ok_or_else(|| anyhow!("No collection named '{wanted}'"))?;
            BrowseOutput::Domains {
                domains: browser.domains_in(collection).await?,
            }
        }
        BrowseCommands::Problems { domain_id } => BrowseOutput::Problems {
            domain_id,
            problems: browser.problems(domain_id).await?,
        },
    };

    output(&result, json);
    Ok(())
}
