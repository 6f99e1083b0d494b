use std::sync::Mutex;

/// Blocking user notification, the form's equivalent of `alert`.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Notifier that keeps every alert, for callers that render them later.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}
