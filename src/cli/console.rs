//! Terminal implementations of the notification and rendering ports.

use std::sync::{Mutex, PoisonError};

use console::style;
use indicatif::ProgressBar;

use crate::domain::models::ResultView;
use crate::domain::ports::{Notifier, ResultRenderer};
use crate::services::result_formatter;

/// Prints notifications to stderr, routing progress messages through a
/// spinner while a solve is running.
pub struct ConsoleNotifier {
    spinner: ProgressBar,
}

impl ConsoleNotifier {
    pub fn new(spinner: ProgressBar) -> Self {
        Self { spinner }
    }

    /// Stop the spinner and clear its line.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    fn print(&self, line: String) {
        if self.spinner.is_hidden() {
            eprintln!("{line}");
        } else {
            self.spinner.suspend(|| eprintln!("{line}"));
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        self.print(format!("{} {message}", style("✓").green().bold()));
    }

    fn notify_error(&self, message: &str) {
        self.print(format!("{} {message}", style("✗").red().bold()));
    }

    fn notify_info(&self, message: &str) {
        if self.spinner.is_hidden() {
            eprintln!("{} {message}", style("…").dim());
        } else {
            self.spinner.set_message(message.to_string());
        }
    }
}

/// Prints each view to stdout as it arrives.
#[derive(Default)]
pub struct ConsoleRenderer;

impl ResultRenderer for ConsoleRenderer {
    fn render(&self, view: &ResultView) {
        match view {
            ResultView::Plan { .. } => {
                println!("{}", result_formatter::to_text(view));
            }
            ResultView::Diagnostic { text } => {
                println!("{}", style("Planner diagnostic:").yellow().bold());
                println!("{text}");
            }
        }
    }
}

/// Keeps views in memory so they can be emitted as one JSON document.
#[derive(Default)]
pub struct CollectingRenderer {
    views: Mutex<Vec<ResultView>>,
}

impl CollectingRenderer {
    pub fn take(&self) -> Vec<ResultView> {
        let mut views = self.views.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *views)
    }
}

impl ResultRenderer for CollectingRenderer {
    fn render(&self, view: &ResultView) {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_renderer_keeps_order() {
        let renderer = CollectingRenderer::default();
        renderer.render(&ResultView::Diagnostic {
            text: "first".to_string(),
        });
        renderer.render(&ResultView::Diagnostic {
            text: "second".to_string(),
        });

        let views = renderer.take();
        assert_eq!(views.len(), 2);
        assert_eq!(
            views[1],
            ResultView::Diagnostic {
                text: "second".to_string()
            }
        );
        assert!(renderer.take().is_empty());
    }

    #[test]
    fn test_hidden_spinner_notifier_does_not_panic() {
        let notifier = ConsoleNotifier::new(ProgressBar::hidden());
        notifier.notify_info("Solving in progress");
        notifier.notify_success("Plan is ready");
        notifier.notify_error("Planning failed.");
        notifier.finish();
    }
}
