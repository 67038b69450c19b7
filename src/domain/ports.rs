use super::order::{Notification, OrderPayload, OrderReceipt};
use crate::error::SubmissionError;
use async_trait::async_trait;

/// Places an order with the order-processing backend.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn place_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, SubmissionError>;
}

/// Delivers user-visible notifications to the presentation layer.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

pub type OrderSubmitterBox = Box<dyn OrderSubmitter>;
pub type NotifierBox = Box<dyn Notifier>;
pub type SubmitterFactory = Box<dyn Fn() -> OrderSubmitterBox + Send + Sync>;
pub type NotifierFactory = Box<dyn Fn() -> NotifierBox + Send + Sync>;
