/// User-facing notification channel.
///
/// Every error of the solve workflow ends up here as a message; nothing is
/// surfaced as an uncaught failure.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);

    fn notify_error(&self, message: &str);

    fn notify_info(&self, message: &str);
}
