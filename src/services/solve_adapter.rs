//! Solve-submit-and-poll workflow.
//!
//! [`SolveAdapter`] submits a [`SolveRequest`] to a solver package, polls the
//! returned task until it settles, and dispatches the formatted result to a
//! [`ResultRenderer`]. Every poll loop observes a [`CancellationToken`], and
//! a task handle is polled by at most one loop of an adapter at a time.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::poll_machine::{PollMachine, PollTransition};
use super::result_formatter;
use crate::domain::errors::SolveError;
use crate::domain::models::{
    solve_url, PollConfig, SolveOutcome, SolveRequest, SolveResult, TaskHandle, DEFAULT_ADAPTOR,
};
use crate::domain::ports::{Notifier, ResultRenderer, SolverService};

pub const TASK_INITIATED: &str = "Task initiated!";
pub const PLAN_READY: &str = "Plan is ready";
pub const PLANNING_FAILED: &str = "Planning failed.";
pub const SOLVE_CANCELLED: &str = "Solve cancelled";

type ActiveHandles = Arc<Mutex<HashSet<TaskHandle>>>;

/// Drives solve requests through the submit/poll protocol.
pub struct SolveAdapter {
    service: Arc<dyn SolverService>,
    machine: PollMachine,
    adaptor: String,
    active: ActiveHandles,
}

impl SolveAdapter {
    /// Create an adapter with the default poll policy (5 checks, 5 s apart).
    pub fn new(service: Arc<dyn SolverService>) -> Self {
        Self::with_machine(service, PollMachine::default())
    }

    pub fn with_config(service: Arc<dyn SolverService>, poll: &PollConfig) -> Self {
        Self::with_machine(service, PollMachine::from_config(poll))
    }

    pub fn with_machine(service: Arc<dyn SolverService>, machine: PollMachine) -> Self {
        Self {
            service,
            machine,
            adaptor: DEFAULT_ADAPTOR.to_string(),
            active: Arc::default(),
        }
    }

    /// Override the adaptor name sent with status checks.
    #[must_use]
    pub fn with_adaptor(mut self, adaptor: impl Into<String>) -> Self {
        self.adaptor = adaptor.into();
        self
    }

    pub const fn machine(&self) -> &PollMachine {
        &self.machine
    }

    /// Whether a poll loop for `handle` is currently running.
    pub fn is_polling(&self, handle: &TaskHandle) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(handle)
    }

    /// Submit a request and return the task handle it was assigned.
    ///
    /// Issues exactly one request. A response without a task handle is an
    /// error; no poll loop can start from it.
    #[instrument(skip(self, request), fields(package = %package, is_url = request.is_url()))]
    pub async fn submit(
        &self,
        package: &str,
        request: &SolveRequest,
    ) -> Result<TaskHandle, SolveError> {
        let response = self
            .service
            .submit(package, request)
            .await
            .map_err(SolveError::Submission)?;

        match response.get("result") {
            Some(Value::String(handle)) if !handle.is_empty() => {
                info!(handle = %handle, "solve task submitted");
                Ok(TaskHandle::new(handle.clone()))
            }
            _ => {
                warn!(response = %response, "submit response carried no task handle");
                Err(SolveError::MissingTaskHandle {
                    url: solve_url(self.service.base_url(), package),
                })
            }
        }
    }

    /// Poll a task until it settles, times out or is cancelled.
    ///
    /// Each check is preceded by the machine's fixed delay. A transport
    /// failure ends the loop immediately.
    #[instrument(skip(self, cancel, notifier), fields(handle = %handle))]
    pub async fn poll(
        &self,
        handle: &TaskHandle,
        cancel: &CancellationToken,
        notifier: &dyn Notifier,
    ) -> Result<SolveOutcome, SolveError> {
        let _claim = ActiveClaim::acquire(&self.active, handle)?;
        let url = self.service.poll_url(handle);
        let mut attempt = self.machine.start(handle.clone());

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!(attempt = attempt.attempt_number, "poll loop cancelled");
                    return Ok(SolveOutcome::Cancelled);
                }
                () = tokio::time::sleep(self.machine.interval()) => {}
            }

            debug!(attempt = attempt.attempt_number, url = %url, "checking task status");
            let response = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!(attempt = attempt.attempt_number, "poll loop cancelled mid-request");
                    return Ok(SolveOutcome::Cancelled);
                }
                response = self.service.check(handle, &self.adaptor) => response,
            };
            let response = response.map_err(|source| {
                warn!(error = %source, "status check failed");
                SolveError::PollTransport {
                    url: url.clone(),
                    source,
                }
            })?;

            match self
                .machine
                .on_result(&attempt, SolveResult::from_response(&response))
            {
                PollTransition::Continue(next) => {
                    notifier.notify_info(&format!(
                        "Solving in progress, will check again in {}",
                        describe_interval(&self.machine)
                    ));
                    attempt = next;
                }
                PollTransition::Finished(outcome) => {
                    info!(
                        checks = attempt.attempt_number + 1,
                        success = outcome.is_success(),
                        "poll loop finished"
                    );
                    return Ok(outcome);
                }
            }
        }
    }

    /// Hand a terminal outcome to the user-facing collaborators.
    pub fn dispatch(
        &self,
        outcome: &SolveOutcome,
        notifier: &dyn Notifier,
        renderer: &dyn ResultRenderer,
    ) {
        match outcome {
            SolveOutcome::Succeeded { .. } => notifier.notify_success(PLAN_READY),
            SolveOutcome::Failed { .. } => notifier.notify_error(PLANNING_FAILED),
            SolveOutcome::TimedOut { attempts } => notifier.notify_error(&format!(
                "Timed out waiting for a plan after {attempts} status checks"
            )),
            SolveOutcome::Cancelled => notifier.notify_info(SOLVE_CANCELLED),
        }
        for view in result_formatter::views(outcome) {
            renderer.render(&view);
        }
    }

    /// Submit, poll and dispatch one request.
    ///
    /// Errors are reported through `notifier` before being returned.
    #[instrument(skip_all, fields(run_id = %Uuid::new_v4(), package = %package))]
    pub async fn run(
        &self,
        package: &str,
        request: SolveRequest,
        notifier: &dyn Notifier,
        renderer: &dyn ResultRenderer,
        cancel: &CancellationToken,
    ) -> Result<SolveOutcome, SolveError> {
        let result = self
            .submit_and_poll(package, &request, notifier, cancel)
            .await;
        match &result {
            Ok(outcome) => self.dispatch(outcome, notifier, renderer),
            Err(err) => notifier.notify_error(&err.to_string()),
        }
        result
    }

    async fn submit_and_poll(
        &self,
        package: &str,
        request: &SolveRequest,
        notifier: &dyn Notifier,
        cancel: &CancellationToken,
    ) -> Result<SolveOutcome, SolveError> {
        let handle = self.submit(package, request).await?;
        notifier.notify_success(TASK_INITIATED);
        self.poll(&handle, cancel, notifier).await
    }

    /// Run the workflow on a background task.
    ///
    /// The returned [`SolveHandle`] can cancel the poll loop or wait for it.
    pub fn spawn(
        self: &Arc<Self>,
        package: impl Into<String>,
        request: SolveRequest,
        notifier: Arc<dyn Notifier>,
        renderer: Arc<dyn ResultRenderer>,
    ) -> SolveHandle {
        let cancel = CancellationToken::new();
        let adapter = Arc::clone(self);
        let token = cancel.clone();
        let package = package.into();
        let join = tokio::spawn(async move {
            adapter
                .run(&package, request, notifier.as_ref(), renderer.as_ref(), &token)
                .await
        });
        SolveHandle { cancel, join }
    }
}

/// Handle to a solve running in the background.
pub struct SolveHandle {
    cancel: CancellationToken,
    join: JoinHandle<Result<SolveOutcome, SolveError>>,
}

impl SolveHandle {
    /// Stop the poll loop at its next suspension point.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the workflow to settle.
    pub async fn join(self) -> Result<SolveOutcome, SolveError> {
        self.join
            .await
            .map_err(|err| SolveError::Aborted(err.to_string()))?
    }
}

/// Registration of a handle in the adapter's active set, released on drop.
struct ActiveClaim {
    active: ActiveHandles,
    handle: TaskHandle,
}

impl ActiveClaim {
    fn acquire(active: &ActiveHandles, handle: &TaskHandle) -> Result<Self, SolveError> {
        let inserted = active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.clone());
        if !inserted {
            return Err(SolveError::AlreadyPolling(handle.to_string()));
        }
        Ok(Self {
            active: Arc::clone(active),
            handle: handle.clone(),
        })
    }
}

impl Drop for ActiveClaim {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.handle);
    }
}

fn describe_interval(machine: &PollMachine) -> String {
    let interval = machine.interval();
    if interval.subsec_millis() == 0 {
        format!("{}s", interval.as_secs())
    } else {
        format!("{}ms", interval.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ServiceError;
    use crate::domain::models::{PackageIndex, ResultView};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Scripted solver: a fixed submit response and a queue of check responses.
    struct ScriptedService {
        submit_response: Result<Value, ()>,
        checks: Mutex<VecDeque<Result<Value, ()>>>,
        check_times: Mutex<Vec<Instant>>,
        submits: Mutex<u32>,
    }

    impl ScriptedService {
        fn new(submit_response: Result<Value, ()>, checks: Vec<Result<Value, ()>>) -> Self {
            Self {
                submit_response,
                checks: Mutex::new(checks.into()),
                check_times: Mutex::new(Vec::new()),
                submits: Mutex::new(0),
            }
        }

        fn check_count(&self) -> usize {
            self.check_times.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SolverService for ScriptedService {
        fn base_url(&self) -> &str {
            "http://localhost:5001"
        }

        async fn list_packages(&self) -> Result<PackageIndex, ServiceError> {
            Ok(PackageIndex::new())
        }

        async fn submit(
            &self,
            package: &str,
            _request: &SolveRequest,
        ) -> Result<Value, ServiceError> {
            *self.submits.lock().unwrap() += 1;
            self.submit_response
                .clone()
                .map_err(|()| ServiceError::Transport {
                    url: solve_url(self.base_url(), package),
                    reason: "connection refused".to_string(),
                })
        }

        async fn check(&self, handle: &TaskHandle, _adaptor: &str) -> Result<Value, ServiceError> {
            self.check_times.lock().unwrap().push(Instant::now());
            let next = self
                .checks
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json!({"status": "pending"})));
            next.map_err(|()| ServiceError::Transport {
                url: self.poll_url(handle),
                reason: "connection reset".to_string(),
            })
        }

        async fn solve_and_validate(&self, _problem_id: i64) -> Result<Value, ServiceError> {
            Ok(json!({}))
        }
    }

    #[derive(Default)]
    struct Recorder {
        notes: Mutex<Vec<(String, String)>>,
        views: Mutex<Vec<ResultView>>,
    }

    impl Recorder {
        fn notes_of(&self, kind: &str) -> Vec<String> {
            self.notes
                .lock()
                .unwrap()
                .iter()
                .filter(|(k, _)| k == kind)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl Notifier for Recorder {
        fn notify_success(&self, message: &str) {
            self.notes.lock().unwrap().push(("success".into(), message.into()));
        }
        fn notify_error(&self, message: &str) {
            self.notes.lock().unwrap().push(("error".into(), message.into()));
        }
        fn notify_info(&self, message: &str) {
            self.notes.lock().unwrap().push(("info".into(), message.into()));
        }
    }

    impl ResultRenderer for Recorder {
        fn render(&self, view: &ResultView) {
            self.views.lock().unwrap().push(view.clone());
        }
    }

    fn adapter(service: Arc<ScriptedService>) -> SolveAdapter {
        SolveAdapter::new(service)
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_pending_ok_renders_one_plan() {
        let service = Arc::new(ScriptedService::new(
            Ok(json!({"result": "/t42"})),
            vec![
                Ok(json!({"status": "pending"})),
                Ok(json!({"status": "pending"})),
                Ok(json!({"status": "ok", "plans": [["pick-up a", "stack a b"]]})),
            ],
        ));
        let recorder = Recorder::default();
        let outcome = adapter(service.clone())
            .run(
                "lama-first",
                SolveRequest::new("(domain foo)", "(problem bar)"),
                &recorder,
                &recorder,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(service.check_count(), 3);
        let views = recorder.views.lock().unwrap();
        assert_eq!(views.len(), 1);
        assert!(matches!(&views[0], ResultView::Plan { steps, .. } if steps.len() == 2));
        assert_eq!(recorder.notes_of("info").len(), 2);
        assert_eq!(recorder.notes_of("success"), vec![TASK_INITIATED, PLAN_READY]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_pending_times_out_at_fixed_interval() {
        let service = Arc::new(ScriptedService::new(Ok(json!({"result": "/t42"})), vec![]));
        let recorder = Recorder::default();
        let started = Instant::now();

        let outcome = adapter(service.clone())
            .run(
                "lama-first",
                SolveRequest::new("(domain foo)", "(problem bar)"),
                &recorder,
                &recorder,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome, SolveOutcome::TimedOut { attempts: 5 });
        assert!(recorder.views.lock().unwrap().is_empty());
        assert!(recorder
            .notes_of("error")
            .iter()
            .any(|m| m.contains("Timed out")));

        let times = service.check_times.lock().unwrap();
        assert_eq!(times.len(), 5);
        let mut previous = started;
        for time in times.iter() {
            assert_eq!(*time - previous, Duration::from_millis(5_000));
            previous = *time;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_status_dispatches_once() {
        let service = Arc::new(ScriptedService::new(
            Ok(json!({"result": "/t1"})),
            vec![Ok(json!({"status": "error", "result": {"error": "no plan"}}))],
        ));
        let recorder = Recorder::default();
        let outcome = adapter(service.clone())
            .run(
                "lama",
                SolveRequest::new("d", "p"),
                &recorder,
                &recorder,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, SolveOutcome::Failed { .. }));
        assert_eq!(service.check_count(), 1);
        assert_eq!(
            *recorder.views.lock().unwrap(),
            vec![ResultView::Diagnostic {
                text: "no plan".to_string()
            }]
        );
        assert_eq!(recorder.notes_of("error"), vec![PLANNING_FAILED]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_transport_failure_skips_polling() {
        let service = Arc::new(ScriptedService::new(Err(()), vec![]));
        let recorder = Recorder::default();
        let result = adapter(service.clone())
            .run(
                "lama",
                SolveRequest::new("d", "p"),
                &recorder,
                &recorder,
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(result, Err(SolveError::Submission(_))));
        assert_eq!(*service.submits.lock().unwrap(), 1);
        assert_eq!(service.check_count(), 0);
        assert_eq!(recorder.notes_of("error").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_handle_is_explicit_error() {
        let service = Arc::new(ScriptedService::new(Ok(json!({"status": "queued"})), vec![]));
        let recorder = Recorder::default();
        let result = adapter(service.clone())
            .run(
                "lama",
                SolveRequest::new("d", "p"),
                &recorder,
                &recorder,
                &CancellationToken::new(),
            )
            .await;

        match result {
            Err(SolveError::MissingTaskHandle { url }) => {
                assert_eq!(url, "http://localhost:5001/package/lama/solve");
            }
            other => panic!("expected MissingTaskHandle, got {other:?}"),
        }
        assert_eq!(service.check_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_transport_failure_is_terminal() {
        let service = Arc::new(ScriptedService::new(
            Ok(json!({"result": "/t9"})),
            vec![Ok(json!({"status": "pending"})), Err(())],
        ));
        let recorder = Recorder::default();
        let result = adapter(service.clone())
            .run(
                "lama",
                SolveRequest::new("d", "p"),
                &recorder,
                &recorder,
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            result,
            Err(SolveError::PollTransport { ref url, .. }) if url == "http://localhost:5001/t9"
        ));
        assert_eq!(service.check_count(), 2);
        assert_eq!(
            recorder.notes_of("error"),
            vec!["Error: Malformed URL? http://localhost:5001/t9"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_polling() {
        let service = Arc::new(ScriptedService::new(Ok(json!({"result": "/t5"})), vec![]));
        let recorder = Arc::new(Recorder::default());
        let adapter = Arc::new(adapter(service.clone()));

        let handle = adapter.spawn(
            "lama",
            SolveRequest::new("d", "p"),
            recorder.clone(),
            recorder.clone(),
        );
        tokio::time::sleep(Duration::from_millis(7_500)).await;
        handle.cancel();
        let outcome = handle.join().await.unwrap();

        assert_eq!(outcome, SolveOutcome::Cancelled);
        assert_eq!(service.check_count(), 1);
        assert!(!adapter.is_polling(&TaskHandle::new("/t5")));
        assert_eq!(recorder.notes_of("info").last().unwrap(), SOLVE_CANCELLED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_loop_on_same_handle_rejected() {
        let service = Arc::new(ScriptedService::new(Ok(json!({"result": "/t7"})), vec![]));
        let adapter = Arc::new(adapter(service));
        let recorder = Arc::new(Recorder::default());
        let handle = TaskHandle::new("/t7");
        let cancel = CancellationToken::new();

        let first = {
            let adapter = Arc::clone(&adapter);
            let handle = handle.clone();
            let cancel = cancel.clone();
            let recorder = Arc::clone(&recorder);
            tokio::spawn(async move { adapter.poll(&handle, &cancel, recorder.as_ref()).await })
        };
        tokio::task::yield_now().await;
        assert!(adapter.is_polling(&handle));

        let second = adapter.poll(&handle, &cancel, recorder.as_ref()).await;
        assert!(matches!(second, Err(SolveError::AlreadyPolling(_))));

        cancel.cancel();
        assert_eq!(first.await.unwrap().unwrap(), SolveOutcome::Cancelled);
        assert!(!adapter.is_polling(&handle));
    }
}
