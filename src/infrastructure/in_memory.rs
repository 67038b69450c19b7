use crate::domain::order::{Notification, OrderPayload, OrderReceipt};
use crate::domain::ports::{Notifier, OrderSubmitter};
use crate::error::SubmissionError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Records every notification it receives.
///
/// Clones share the same buffer, so a test can keep one handle and give
/// another to a workflow.
#[derive(Default, Clone)]
pub struct InMemoryNotifier {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, notification: Notification) {
        let mut notifications = self.notifications.write().await;
        notifications.push(notification);
    }
}

/// Accepts every order immediately and keeps the payloads it was given.
#[derive(Default, Clone)]
pub struct InMemoryOrderLog {
    orders: Arc<RwLock<Vec<OrderPayload>>>,
}

impl InMemoryOrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn orders(&self) -> Vec<OrderPayload> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl OrderSubmitter for InMemoryOrderLog {
    async fn place_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, SubmissionError> {
        let mut orders = self.orders.write().await;
        orders.push(payload.clone());
        Ok(OrderReceipt {
            confirmation_id: format!("MEM-{}", orders.len()),
        })
    }
}
