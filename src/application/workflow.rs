use crate::domain::catalog::Catalog;
use crate::domain::form::{self, OrderFormState, ValidationErrors};
use crate::domain::order::{Confirmation, Notification, OrderPayload, OrderSummary};
pub use crate::domain::order::WorkflowState;
use crate::domain::ports::{NotifierBox, OrderSubmitterBox};
use crate::error::{OrderError, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Invoked with no arguments when the order dialog should close.
pub type CloseCallback = Box<dyn FnMut() + Send>;

/// One open session of the quick-order form.
///
/// Owns the form state exclusively. `submit` borrows the workflow mutably for
/// the whole round trip, so a started submission cannot be interrupted; a
/// `close` issued by the caller runs once it has finished. Observers follow
/// the state through `state_watch` while a submission is in flight.
pub struct OrderWorkflow {
    catalog: Arc<Catalog>,
    submitter: OrderSubmitterBox,
    notifier: NotifierBox,
    preselected: Option<String>,
    on_close: Option<CloseCallback>,
    form: OrderFormState,
    errors: ValidationErrors,
    state: watch::Sender<WorkflowState>,
    last_outcome: Option<WorkflowState>,
}

impl OrderWorkflow {
    /// Creates a workflow with an empty form.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Packages and payment methods the form may reference.
    /// * `submitter` - The backend that places validated orders.
    /// * `notifier` - Receives the success or failure notification.
    pub fn new(catalog: Arc<Catalog>, submitter: OrderSubmitterBox, notifier: NotifierBox) -> Self {
        Self {
            catalog,
            submitter,
            notifier,
            preselected: None,
            on_close: None,
            form: OrderFormState::default(),
            errors: ValidationErrors::new(),
            state: watch::Sender::new(WorkflowState::Editing),
            last_outcome: None,
        }
    }

    /// Pre-selects a package. An empty id means no pre-selection.
    pub fn with_preselected(mut self, package_id: impl Into<String>) -> Self {
        let package_id = package_id.into();
        self.preselected = (!package_id.is_empty()).then_some(package_id);
        self.form = OrderFormState::seeded(self.preselected.as_deref());
        self
    }

    pub fn on_close(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) {
        self.form.phone_number = phone_number.into();
    }

    pub fn select_package(&mut self, package_id: impl Into<String>) {
        self.form.package_id = package_id.into();
    }

    pub fn select_payment_method(&mut self, payment_method_id: impl Into<String>) {
        self.form.payment_method_id = payment_method_id.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    pub fn form(&self) -> &OrderFormState {
        &self.form
    }

    /// Errors from the most recent validation pass.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn state(&self) -> WorkflowState {
        *self.state.borrow()
    }

    /// A receiver that follows the current state, including `Submitting`.
    pub fn state_watch(&self) -> watch::Receiver<WorkflowState> {
        self.state.subscribe()
    }

    fn set_state(&self, state: WorkflowState) {
        self.state.send_replace(state);
    }

    /// `Succeeded` or `Failed` for the last submission that reached the backend.
    pub fn last_outcome(&self) -> Option<WorkflowState> {
        self.last_outcome
    }

    pub fn preselected(&self) -> Option<&str> {
        self.preselected.as_deref()
    }

    /// Recomputes the full error set from the current form.
    pub fn validate(&mut self) -> ValidationErrors {
        self.errors = form::validate(&self.form, &self.catalog);
        self.errors.clone()
    }

    /// The order summary, available once a known package is selected.
    pub fn summary(&self) -> Option<OrderSummary> {
        let package = self.catalog.package(&self.form.package_id)?;
        let phone_number = if self.form.phone_number.is_empty() {
            "—".to_string()
        } else {
            self.form.phone_number.clone()
        };
        Some(OrderSummary {
            package: package.label(),
            phone_number,
            payment_method: self
                .catalog
                .payment_method(&self.form.payment_method_id)
                .map(|m| m.name.clone()),
            amount_due: package.price,
            submitting: self.state() == WorkflowState::Submitting,
        })
    }

    /// Validates the form and, if it passes, places the order.
    ///
    /// On success the form is reset and the close callback fires. On a
    /// backend failure the form is left as is so the user can retry.
    pub async fn submit(&mut self) -> Result<Confirmation> {
        let errors = self.validate();
        if !errors.is_empty() {
            debug!(%errors, "order form rejected");
            return Err(OrderError::Validation(errors));
        }

        let package = self
            .catalog
            .package(&self.form.package_id)
            .cloned()
            .ok_or_else(|| {
                OrderError::Catalog(format!("unknown package '{}'", self.form.package_id))
            })?;
        let payment_method = self
            .catalog
            .payment_method(&self.form.payment_method_id)
            .cloned()
            .ok_or_else(|| {
                OrderError::Catalog(format!(
                    "unknown payment method '{}'",
                    self.form.payment_method_id
                ))
            })?;

        self.set_state(WorkflowState::Submitting);
        let payload = OrderPayload::from(&self.form);
        info!(
            package = %payload.package_id,
            payment_method = %payload.payment_method_id,
            "placing order"
        );

        match self.submitter.place_order(&payload).await {
            Ok(receipt) => {
                self.set_state(WorkflowState::Succeeded);
                self.last_outcome = Some(WorkflowState::Succeeded);
                let confirmation = Confirmation {
                    confirmation_id: receipt.confirmation_id,
                    package,
                    payment_method,
                };
                info!(confirmation_id = %confirmation.confirmation_id, "order placed");
                self.notifier.notify(confirmation.notification()).await;
                self.close();
                Ok(confirmation)
            }
            Err(e) => {
                self.set_state(WorkflowState::Failed);
                self.last_outcome = Some(WorkflowState::Failed);
                warn!(error = %e, "order submission failed");
                self.notifier.notify(Notification::order_failed()).await;
                self.set_state(WorkflowState::Editing);
                Err(e.into())
            }
        }
    }

    /// Resets the form to its initial values and signals closure.
    pub fn close(&mut self) {
        self.form = OrderFormState::seeded(self.preselected.as_deref());
        self.errors = ValidationErrors::new();
        self.set_state(WorkflowState::Editing);
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::FormField;
    use crate::error::SubmissionError;
    use crate::infrastructure::in_memory::InMemoryNotifier;
    use crate::infrastructure::simulated::SimulatedOrderService;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn workflow(notifier: &InMemoryNotifier) -> OrderWorkflow {
        OrderWorkflow::new(
            Arc::new(Catalog::builtin()),
            Box::new(SimulatedOrderService::new(Duration::ZERO)),
            Box::new(notifier.clone()),
        )
    }

    fn fill(workflow: &mut OrderWorkflow) {
        workflow.set_phone_number("+7 (999) 123-45-67");
        workflow.select_package("popular");
        workflow.select_payment_method("card");
        workflow.set_email("a@b.com");
    }

    struct Refusing;

    #[async_trait::async_trait]
    impl crate::domain::ports::OrderSubmitter for Refusing {
        async fn place_order(
            &self,
            _payload: &OrderPayload,
        ) -> std::result::Result<crate::domain::order::OrderReceipt, SubmissionError> {
            Err(SubmissionError::Unavailable("down".to_string()))
        }
    }

    struct Gated {
        release: Arc<tokio::sync::Notify>,
    }

    #[async_trait::async_trait]
    impl crate::domain::ports::OrderSubmitter for Gated {
        async fn place_order(
            &self,
            _payload: &OrderPayload,
        ) -> std::result::Result<crate::domain::order::OrderReceipt, SubmissionError> {
            self.release.notified().await;
            Ok(crate::domain::order::OrderReceipt {
                confirmation_id: "G-1".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_submitting_is_observable_in_flight() {
        let release = Arc::new(tokio::sync::Notify::new());
        let notifier = InMemoryNotifier::new();
        let mut workflow = OrderWorkflow::new(
            Arc::new(Catalog::builtin()),
            Box::new(Gated {
                release: release.clone(),
            }),
            Box::new(notifier.clone()),
        );
        fill(&mut workflow);
        let mut summary = workflow.summary().unwrap();
        let mut states = workflow.state_watch();

        let handle =
            tokio::spawn(async move { workflow.submit().await.map(|c| c.confirmation_id) });

        states
            .wait_for(|state| *state == WorkflowState::Submitting)
            .await
            .unwrap();
        summary.track(*states.borrow());
        assert_eq!(summary.submit_label(), "Оформляю заказ...");
        assert!(notifier.notifications().await.is_empty());

        release.notify_one();
        assert_eq!(handle.await.unwrap().unwrap(), "G-1");
        assert_eq!(*states.borrow(), WorkflowState::Editing);
        summary.track(*states.borrow());
        assert_eq!(summary.submit_label(), "Оплатить 200₽");
    }

    #[tokio::test]
    async fn test_successful_submission_resets_and_closes() {
        let notifier = InMemoryNotifier::new();
        let closed = Arc::new(AtomicUsize::new(0));
        let counter = closed.clone();
        let mut workflow = workflow(&notifier).on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        fill(&mut workflow);

        let confirmation = workflow.submit().await.unwrap();
        assert_eq!(confirmation.package.id, "popular");
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert_eq!(workflow.form(), &OrderFormState::default());
        assert_eq!(workflow.state(), WorkflowState::Editing);
        assert_eq!(workflow.last_outcome(), Some(WorkflowState::Succeeded));

        let sent = notifier.notifications().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].description.contains("Популярный"));
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_submitted() {
        let notifier = InMemoryNotifier::new();
        let mut workflow = workflow(&notifier);
        workflow.set_phone_number("123");

        let result = workflow.submit().await;
        match result {
            Err(OrderError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.contains(FormField::Phone));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(workflow.state(), WorkflowState::Editing);
        assert_eq!(workflow.last_outcome(), None);
        assert!(notifier.notifications().await.is_empty());
        assert_eq!(workflow.errors().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_form() {
        let notifier = InMemoryNotifier::new();
        let closed = Arc::new(AtomicUsize::new(0));
        let counter = closed.clone();
        let mut workflow = OrderWorkflow::new(
            Arc::new(Catalog::builtin()),
            Box::new(Refusing),
            Box::new(notifier.clone()),
        )
        .on_close(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        fill(&mut workflow);
        let before = workflow.form().clone();

        let result = workflow.submit().await;
        assert!(matches!(
            result,
            Err(OrderError::Submission(SubmissionError::Unavailable(_)))
        ));
        assert_eq!(workflow.form(), &before);
        assert_eq!(closed.load(Ordering::SeqCst), 0);
        assert_eq!(workflow.last_outcome(), Some(WorkflowState::Failed));
        assert_eq!(workflow.state(), WorkflowState::Editing);

        let sent = notifier.notifications().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].is_destructive());
    }

    #[test]
    fn test_preselection_survives_close() {
        let notifier = InMemoryNotifier::new();
        let mut workflow = workflow(&notifier).with_preselected("premium");
        assert_eq!(workflow.form().package_id, "premium");

        workflow.select_package("basic");
        workflow.set_email("x@y.z");
        workflow.close();
        assert_eq!(workflow.form(), &OrderFormState::seeded(Some("premium")));
    }

    #[test]
    fn test_empty_preselection_is_none() {
        let notifier = InMemoryNotifier::new();
        let workflow = workflow(&notifier).with_preselected("");
        assert_eq!(workflow.preselected(), None);
        assert!(workflow.form().package_id.is_empty());
    }

    #[test]
    fn test_summary_tracks_form() {
        let notifier = InMemoryNotifier::new();
        let mut workflow = workflow(&notifier);
        assert!(workflow.summary().is_none());

        workflow.select_package("basic");
        let summary = workflow.summary().unwrap();
        assert_eq!(summary.package, "Начальный (1 ГБ)");
        assert_eq!(summary.phone_number, "—");
        assert_eq!(summary.payment_method, None);
        assert_eq!(summary.submit_label(), "Оплатить 50₽");

        workflow.select_payment_method("qiwi");
        workflow.set_phone_number("89991234567");
        let summary = workflow.summary().unwrap();
        assert_eq!(summary.payment_method.as_deref(), Some("QIWI"));
        assert_eq!(summary.phone_number, "89991234567");
    }
}
