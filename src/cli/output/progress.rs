//! Spinner utilities using indicatif for terminal output
//!
//! Spinners draw to stderr, so they never mix with command output on stdout.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner for indeterminate operations
///
/// # Example
/// ```
/// use paas_client::cli::output::progress::create_spinner;
///
/// let spinner = create_spinner();
/// spinner.set_message("Waiting for planner...");
/// spinner.finish_and_clear();
/// ```
pub fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_draw_target(ProgressDrawTarget::stderr());
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .map(|style| style.tick_chars(SPINNER_CHARS))
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn create_spinner_with_message(message: impl Into<String>) -> ProgressBar {
    let spinner = create_spinner();
    spinner.set_message(message.into());
    spinner
}

/// A spinner that draws nothing, for JSON mode and non-terminals.
pub fn hidden_spinner() -> ProgressBar {
    ProgressBar::hidden()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_keeps_message() {
        let spinner = create_spinner_with_message("Solving");
        assert_eq!(spinner.message(), "Solving");
        spinner.finish_and_clear();
        assert!(spinner.is_finished());
    }

    #[test]
    fn test_hidden_spinner() {
        assert!(hidden_spinner().is_hidden());
    }
}
