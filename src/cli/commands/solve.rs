//! `paas solve`: submit a domain/problem pair and wait for plans.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::commands::CommandContext;
use crate::cli::console::{CollectingRenderer, ConsoleNotifier, ConsoleRenderer};
use crate::cli::output::progress::{create_spinner_with_message, hidden_spinner};
use crate::cli::output::{output, CommandOutput};
use crate::domain::errors::SolveError;
use crate::domain::models::{ResultView, SolveOutcome, SolveRequest};
use crate::domain::ports::ResultRenderer;
use crate::infrastructure::{FileDocumentSource, PlanningDomainsClient};
use crate::services::{
    load_documents, select_pair, solve_request_for, CollectionBrowser, PackageCatalog,
    SolveAdapter,
};

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Planning documents to pick the domain and problem from
    pub files: Vec<String>,

    /// Domain document (file, or URL with --urls)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Problem document (file, or URL with --urls)
    #[arg(long)]
    pub problem: Option<String>,

    /// Solver package (defaults to service.default_package)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Solver parameter, repeatable
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Treat --domain and --problem as URLs the service fetches itself
    #[arg(long, conflicts_with = "catalog")]
    pub urls: bool,

    /// Solve a catalog problem, given as DOMAIN_ID/PROBLEM (name or id)
    #[arg(long, value_name = "DOMAIN_ID/PROBLEM")]
    pub catalog: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SolveOutput {
    pub package: String,
    pub base_url: String,
    #[serde(flatten)]
    pub outcome: SolveOutcome,
    pub views: Vec<ResultView>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CommandOutput for SolveOutput {
    fn to_human(&self) -> String {
        let elapsed = (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0;
        match &self.outcome {
            SolveOutcome::Succeeded { plans } => {
                format!("{} plan(s) from {} in {elapsed:.1}s", plans.len(), self.package)
            }
            SolveOutcome::Failed { .. } => format!("{} reported a planning error", self.package),
            SolveOutcome::TimedOut { attempts } => {
                format!("No result from {} after {attempts} status checks", self.package)
            }
            SolveOutcome::Cancelled => "Solve cancelled".to_string(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SolveArgs, mut ctx: CommandContext, json: bool) -> Result<()> {
    let started_at = Utc::now();
    let package = args
        .package
        .clone()
        .unwrap_or_else(|| ctx.config.service.default_package.clone());
    let solver = ctx.solver()?;

    let request = build_request(&args, &mut ctx).await?;

    let user_values: BTreeMap<String, String> = args.params.iter().cloned().collect();
    let catalog = PackageCatalog::new(solver.clone());
    let parameters = match catalog.resolve_parameters(&package, &user_values).await {
        Ok(resolved) => {
            if let Ok(index) = catalog.index().await {
                ctx.session.set_packages(index);
            }
            resolved
        }
        Err(SolveError::Catalog(err)) => {
            warn!(error = %err, "package listing unavailable, sending parameters unchecked");
            user_values
        }
        Err(err) => return Err(err.into()),
    };
    let request = request.with_parameters(parameters);

    let adapter = Arc::new(
        SolveAdapter::with_config(solver, &ctx.config.poll)
            .with_adaptor(ctx.config.service.adaptor.clone()),
    );

    let spinner = if json || !console::Term::stderr().is_term() {
        hidden_spinner()
    } else {
        create_spinner_with_message(format!("Submitting to {package}"))
    };
    let notifier = Arc::new(ConsoleNotifier::new(spinner));
    let collector = Arc::new(CollectingRenderer::default());
    let renderer: Arc<dyn ResultRenderer> = if json {
        collector.clone()
    } else {
        Arc::new(ConsoleRenderer)
    };

    info!(package = %package, base_url = %ctx.session.base_url(), "starting solve");
    let handle = adapter.spawn(package.clone(), request, notifier.clone(), renderer);

    let cancel = handle.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });
    let result = handle.join().await;
    interrupt.abort();
    notifier.finish();

    let outcome = result.context("Solve failed")?;
    let succeeded = matches!(outcome, SolveOutcome::Succeeded { .. } | SolveOutcome::Cancelled);
    let report = SolveOutput {
        package,
        base_url: ctx.session.base_url().to_string(),
        outcome,
        views: collector.take(),
        started_at,
        finished_at: Utc::now(),
    };
    output(&report, json);

    if succeeded {
        Ok(())
    } else {
        Err(anyhow!(report.to_human()))
    }
}

async fn build_request(args: &SolveArgs, ctx: &mut CommandContext) -> Result<SolveRequest> {
    if let Some(spec) = &args.catalog {
        let (domain_id, problem_name) = parse_catalog_ref(spec)?;
        let browser = CollectionBrowser::new(Arc::new(PlanningDomainsClient::from_config(
            &ctx.config.catalog,
        )?));
        let problems = browser
            .problems(domain_id)
            .await
            .with_context(|| format!("Failed to list problems of domain {domain_id}"))?;
        let problem = problems
            .iter()
            .find(|p| {
                p.problem == problem_name
                    || p.problem_id.is_some_and(|id| id.to_string() == problem_name)
            })
            .ok_or_else(|| anyhow!("No problem '{problem_name}' in domain {domain_id}"))?;
        return Ok(solve_request_for(problem));
    }

    if args.urls {
        let (Some(domain), Some(problem)) = (&args.domain, &args.problem) else {
            bail!("--urls needs both --domain and --problem");
        };
        return Ok(SolveRequest::from_urls(domain.clone(), problem.clone()));
    }

    let mut ids = args.files.clone();
    for explicit in [&args.domain, &args.problem].into_iter().flatten() {
        if !ids.contains(explicit) {
            ids.push(explicit.clone());
        }
    }

    let documents = load_documents(&FileDocumentSource::current_dir(), &ids).await?;
    let (domain, problem) =
        select_pair(&documents, args.domain.as_deref(), args.problem.as_deref())?;
    info!(domain = %domain.id, problem = %problem.id, "documents selected");
    ctx.session.remember_selection(domain.id.clone(), problem.id.clone());

    Ok(SolveRequest::new(domain.text.clone(), problem.text.clone()))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.trim().is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

fn parse_catalog_ref(raw: &str) -> Result<(i64, String)> {
    let (domain, problem) = raw
        .split_once('/')
        .ok_or_else(|| anyhow!("expected DOMAIN_ID/PROBLEM, got '{raw}'"))?;
    let domain_id = domain
        .parse()
        .with_context(|| format!("'{domain}' is not a domain id"))?;
    Ok((domain_id, problem.to_string()))
}
