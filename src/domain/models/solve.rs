//! Solve request, task handle, poll attempt and result models.
//!
//! These types describe one round trip through a planning service: a
//! [`SolveRequest`] is submitted, the service answers with a [`TaskHandle`],
//! and each status check yields a [`SolveResult`] until the loop settles on a
//! terminal [`SolveOutcome`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Adaptor name sent with every status check unless configured otherwise.
pub const DEFAULT_ADAPTOR: &str = "planning_editor_adaptor";

/// Field names that the request body already uses for its own data.
const RESERVED_FIELDS: [&str; 3] = ["domain", "problem", "is_url"];

/// A domain/problem pair submitted to a solver package.
///
/// Serialises as `{"domain": .., "problem": .., ...extra}` with extra
/// parameters flattened to top-level fields. When the pair refers to
/// pre-hosted documents, `is_url` is set and the texts are URLs.
///
/// Non-emptiness of the texts is the caller's concern; nothing here checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveRequest {
    #[serde(rename = "domain")]
    domain_text: String,

    #[serde(rename = "problem")]
    problem_text: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_url: bool,

    #[serde(flatten)]
    extra_parameters: BTreeMap<String, String>,
}

impl SolveRequest {
    /// Create a request from inline domain and problem source text.
    pub fn new(domain_text: impl Into<String>, problem_text: impl Into<String>) -> Self {
        Self {
            domain_text: domain_text.into(),
            problem_text: problem_text.into(),
            is_url: false,
            extra_parameters: BTreeMap::new(),
        }
    }

    /// Create a request that points the service at pre-hosted documents.
    pub fn from_urls(domain_url: impl Into<String>, problem_url: impl Into<String>) -> Self {
        Self {
            is_url: true,
            ..Self::new(domain_url, problem_url)
        }
    }

    /// Add one solver-specific parameter.
    ///
    /// Names that collide with the request's own fields are ignored.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !RESERVED_FIELDS.contains(&name.as_str()) {
            self.extra_parameters.insert(name, value.into());
        }
        self
    }

    /// Add several solver-specific parameters.
    #[must_use]
    pub fn with_parameters<I, K, V>(self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        parameters
            .into_iter()
            .fold(self, |request, (name, value)| request.with_parameter(name, value))
    }

    pub fn domain_text(&self) -> &str {
        &self.domain_text
    }

    pub fn problem_text(&self) -> &str {
        &self.problem_text
    }

    pub const fn is_url(&self) -> bool {
        self.is_url
    }

    pub const fn extra_parameters(&self) -> &BTreeMap<String, String> {
        &self.extra_parameters
    }
}

/// URL of the solve endpoint for a package.
pub fn solve_url(base_url: &str, package: &str) -> String {
    format!("{}/package/{}/solve", base_url.trim_end_matches('/'), package)
}

/// Opaque identifier returned by the solve endpoint, used as the poll target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the status-check URL for this handle.
    ///
    /// Handles are usually path fragments such as `/check/abc` and are
    /// appended to the base URL. An absolute `http(s)://` handle is used
    /// as-is.
    pub fn poll_url(&self, base_url: &str) -> String {
        if self.0.starts_with("http://") || self.0.starts_with("https://") {
            return self.0.clone();
        }
        let base = base_url.trim_end_matches('/');
        if self.0.starts_with('/') {
            format!("{base}{}", self.0)
        } else {
            format!("{base}/{}", self.0)
        }
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scheduled status check of a running task.
///
/// Recreated on every retry; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollAttempt {
    pub task_handle: TaskHandle,
    pub attempt_number: u32,
    pub max_attempts: u32,
}

impl PollAttempt {
    /// The first attempt of a fresh poll loop.
    pub const fn first(task_handle: TaskHandle, max_attempts: u32) -> Self {
        Self {
            task_handle,
            attempt_number: 0,
            max_attempts,
        }
    }

    /// The attempt that follows a still-pending response.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            task_handle: self.task_handle.clone(),
            attempt_number: self.attempt_number.saturating_add(1),
            max_attempts: self.max_attempts,
        }
    }

    /// Whether the retry budget is used up.
    pub const fn is_exhausted(&self) -> bool {
        self.attempt_number >= self.max_attempts
    }
}

/// A single action in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub name: String,

    /// Structured action record when the service reports a full result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,
}

impl PlanStep {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: None,
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::named(name.clone()),
            Value::Object(record) => Self {
                name: record
                    .get("name")
                    .and_then(Value::as_str)
                    .map_or_else(|| value.to_string(), str::to_string),
                action: record.get("action").cloned(),
            },
            other => Self::named(other.to_string()),
        }
    }
}

/// One plan returned for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,

    /// Set when the service reported rich step records (`type: "full"`).
    #[serde(default)]
    pub full: bool,

    /// Raw planner output attached to the plan, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Plan {
    /// Build a plan from bare action names.
    pub fn from_actions<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: actions.into_iter().map(PlanStep::named).collect(),
            full: false,
            output: None,
        }
    }

    /// Read one entry of a `plans` array.
    ///
    /// Accepts a bare array of actions, the adaptor record
    /// `{status, result: {type, plan, output}}`, a record that carries
    /// `plan` directly, or raw plan text (one action per line). Anything
    /// else becomes a single raw step so that no entry is dropped.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self {
                steps: items.iter().map(PlanStep::from_value).collect(),
                full: items.iter().any(Value::is_object),
                output: None,
            },
            Value::Object(_) => {
                let record = value
                    .get("result")
                    .filter(|result| result.get("plan").is_some())
                    .unwrap_or(value);
                match record.get("plan").and_then(Value::as_array) {
                    Some(items) => Self {
                        steps: items.iter().map(PlanStep::from_value).collect(),
                        full: record.get("type").and_then(Value::as_str) == Some("full"),
                        output: record
                            .get("output")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    },
                    None => Self::from_actions([value.to_string()]),
                }
            }
            Value::String(text) => Self::from_actions(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string),
            ),
            other => Self::from_actions([other.to_string()]),
        }
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Diagnostic payload of a failed solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveFailure {
    /// The planner was killed (it ran out of time on the service side).
    pub killed: bool,

    /// Explicit error text reported by the service.
    pub error: Option<String>,

    /// The `result` object of the response, or the whole response.
    pub payload: Value,
}

impl SolveFailure {
    pub fn from_response(response: &Value) -> Self {
        let payload = response
            .get("result")
            .filter(|result| result.is_object())
            .cloned()
            .unwrap_or_else(|| response.clone());
        let killed = payload.get("killed").is_some_and(is_truthy);
        let error = payload.get("error").map(|error| {
            error
                .as_str()
                .map_or_else(|| error.to_string(), str::to_string)
        });
        Self {
            killed,
            error,
            payload,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

/// Interpretation of a single status-check response.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult {
    Ok(Vec<Plan>),
    Error(SolveFailure),
    Pending,
}

impl SolveResult {
    /// Classify a status-check response by its `status` field.
    ///
    /// Any status other than `ok` or `error`, including a missing one,
    /// means the task is still running.
    pub fn from_response(response: &Value) -> Self {
        match response.get("status").and_then(Value::as_str) {
            Some("ok") => Self::Ok(extract_plans(response)),
            Some("error") => Self::Error(SolveFailure::from_response(response)),
            _ => Self::Pending,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

fn extract_plans(response: &Value) -> Vec<Plan> {
    if let Some(plans) = response.get("plans").and_then(Value::as_array) {
        return plans.iter().map(Plan::from_value).collect();
    }
    // Synchronous responses carry a single plan under `result.plan`.
    match response.get("result") {
        Some(result) if result.get("plan").is_some() => vec![Plan::from_value(response)],
        _ => Vec::new(),
    }
}

/// Terminal state of a poll loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SolveOutcome {
    Succeeded { plans: Vec<Plan> },
    Failed { failure: SolveFailure },
    TimedOut { attempts: u32 },
    Cancelled,
}

impl SolveOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}
