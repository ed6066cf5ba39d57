use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// `Logger` port backed by `tracing`.
///
/// Events go to the `chatbot` target and carry the owning component as a
/// structured field, so `RUST_LOG=chatbot=debug` isolates domain logs.
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "chatbot", component = self.component, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "chatbot", component = self.component, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "chatbot", component = self.component, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "chatbot", component = self.component, "{}", message);
    }
}
