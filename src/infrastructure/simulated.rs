use crate::domain::order::{OrderPayload, OrderReceipt};
use crate::domain::ports::OrderSubmitter;
use crate::error::SubmissionError;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

/// Stands in for the order-processing service.
///
/// Waits a fixed delay and then accepts the order. It never fails and the
/// wait cannot be cancelled once started. Clones share the id sequence.
#[derive(Debug, Clone)]
pub struct SimulatedOrderService {
    delay: Duration,
    next_id: Arc<AtomicU64>,
}

impl SimulatedOrderService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedOrderService {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl OrderSubmitter for SimulatedOrderService {
    async fn place_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, SubmissionError> {
        let delay_ms = self.delay.as_millis() as u64;
        debug!(package = %payload.package_id, delay_ms, "simulating order placement");
        tokio::time::sleep(self.delay).await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(OrderReceipt {
            confirmation_id: format!("GB-{id:06}"),
        })
    }
}
