use serde::Serialize;

/// A renderable value handed to the display collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultView {
    /// One plan, `index` counted from 1 out of `total`.
    Plan {
        index: usize,
        total: usize,
        steps: Vec<String>,
        output: Option<String>,
    },
    Diagnostic {
        text: String,
    },
}
