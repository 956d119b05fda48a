//! Turns terminal solve outcomes into renderable views.

use crate::domain::models::{Plan, ResultView, SolveFailure, SolveOutcome};

/// Message shown when the planner was killed on the service side.
pub const PLANNER_TIMED_OUT: &str = "Planner Timed Out";

/// Views to hand to the renderer for a terminal outcome.
///
/// One view per plan, in order, for a success; a single diagnostic for a
/// failure; nothing for a timeout or cancellation.
pub fn views(outcome: &SolveOutcome) -> Vec<ResultView> {
    match outcome {
        SolveOutcome::Succeeded { plans } => plan_views(plans),
        SolveOutcome::Failed { failure } => vec![ResultView::Diagnostic {
            text: diagnostic_text(failure),
        }],
        SolveOutcome::TimedOut { .. } | SolveOutcome::Cancelled => Vec::new(),
    }
}

pub fn plan_views(plans: &[Plan]) -> Vec<ResultView> {
    let total = plans.len();
    plans
        .iter()
        .enumerate()
        .map(|(position, plan)| ResultView::Plan {
            index: position + 1,
            total,
            steps: plan.step_names().into_iter().map(str::to_string).collect(),
            output: plan.output.clone(),
        })
        .collect()
}

/// Best available diagnostic: killed flag, then error text, then raw JSON.
pub fn diagnostic_text(failure: &SolveFailure) -> String {
    if failure.killed {
        return PLANNER_TIMED_OUT.to_string();
    }
    if let Some(error) = &failure.error {
        return error.clone();
    }
    serde_json::to_string_pretty(&failure.payload).unwrap_or_else(|_| failure.payload.to_string())
}

/// Plain-text rendering of a view as a numbered step list or diagnostic block.
pub fn to_text(view: &ResultView) -> String {
    match view {
        ResultView::Plan {
            index,
            total,
            steps,
            output,
        } => {
            let mut lines = vec![format!("Plan {index}/{total} ({} steps)", steps.len())];
            lines.extend(
                steps
                    .iter()
                    .enumerate()
                    .map(|(position, step)| format!("  {}. {step}", position + 1)),
            );
            if let Some(output) = output.as_deref().filter(|text| !text.trim().is_empty()) {
                lines.push(String::new());
                lines.push("Planner output:".to_string());
                lines.push(output.trim_end().to_string());
            }
            lines.join("\n")
        }
        ResultView::Diagnostic { text } => text.clone(),
    }
}
