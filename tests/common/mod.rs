//! Common test utilities for integration tests
//!
//! Recording implementations of the output ports and helpers for building
//! clients against a mock server.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use paas_client::infrastructure::{PaasClient, PaasClientConfig};
use paas_client::services::{PollMachine, SolveAdapter};
use paas_client::{Notifier, ResultRenderer, ResultView};

/// One notification as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    Success(String),
    Error(String),
    Info(String),
}

/// Records every notification and rendered view.
#[derive(Default)]
pub struct Recorder {
    notes: Mutex<Vec<Note>>,
    views: Mutex<Vec<ResultView>>,
}

impl Recorder {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn views(&self) -> Vec<ResultView> {
        self.views.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notes()
            .into_iter()
            .filter_map(|note| match note {
                Note::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notes()
            .into_iter()
            .filter_map(|note| match note {
                Note::Success(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for Recorder {
    fn notify_success(&self, message: &str) {
        self.notes.lock().unwrap().push(Note::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.notes.lock().unwrap().push(Note::Error(message.to_string()));
    }

    fn notify_info(&self, message: &str) {
        self.notes.lock().unwrap().push(Note::Info(message.to_string()));
    }
}

impl ResultRenderer for Recorder {
    fn render(&self, view: &ResultView) {
        self.views.lock().unwrap().push(view.clone());
    }
}

/// Client pointed at `base_url` with a short request timeout.
pub fn client(base_url: impl Into<String>) -> Arc<PaasClient> {
    let config = PaasClientConfig {
        base_url: base_url.into(),
        timeout_secs: 5,
    };
    Arc::new(PaasClient::with_config(config).expect("Failed to create client"))
}

/// Adapter polling every `interval_ms` milliseconds, at most 5 times.
pub fn fast_adapter(base_url: impl Into<String>, interval_ms: u64) -> SolveAdapter {
    SolveAdapter::with_machine(
        client(base_url),
        PollMachine::new(Duration::from_millis(interval_ms), 5),
    )
}

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
