use crate::domain::order::{Notification, Severity};
use crate::domain::ports::Notifier;
use async_trait::async_trait;
use tracing::{info, warn};

/// Sends notifications to the log instead of a UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Normal => {
                info!(title = %notification.title, "{}", notification.description)
            }
            Severity::Destructive => {
                warn!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}
