use super::workflow::OrderWorkflow;
use crate::domain::catalog::Catalog;
use crate::domain::ports::{NotifierFactory, SubmitterFactory};
use crate::error::{OrderError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// The landing page: the package cards, the payment-method list and the
/// quick-order dialog they open.
pub struct LandingView {
    catalog: Arc<Catalog>,
    submitter_factory: SubmitterFactory,
    notifier_factory: NotifierFactory,
    highlighted: Option<String>,
    selected_package_id: String,
    order: Option<OrderWorkflow>,
    order_open: Arc<AtomicBool>,
}

impl LandingView {
    /// Each opened dialog gets a fresh submitter and notifier from the factories.
    pub fn new(
        catalog: Arc<Catalog>,
        submitter_factory: SubmitterFactory,
        notifier_factory: NotifierFactory,
    ) -> Self {
        Self {
            catalog,
            submitter_factory,
            notifier_factory,
            highlighted: None,
            selected_package_id: String::new(),
            order: None,
            order_open: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Marks a package card as highlighted. Does not touch any order form.
    pub fn highlight(&mut self, package_id: &str) -> Result<()> {
        self.ensure_package(package_id)?;
        self.highlighted = Some(package_id.to_string());
        Ok(())
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// The "buy" button on a package card.
    pub fn buy(&mut self, package_id: &str) -> Result<&mut OrderWorkflow> {
        self.ensure_package(package_id)?;
        self.selected_package_id = package_id.to_string();
        Ok(self.open_order())
    }

    /// Opens the order dialog, pre-selecting the last package bought from a card.
    pub fn open_order(&mut self) -> &mut OrderWorkflow {
        debug!(package = %self.selected_package_id, "opening order dialog");
        let open = Arc::clone(&self.order_open);
        open.store(true, Ordering::SeqCst);

        let workflow = OrderWorkflow::new(
            Arc::clone(&self.catalog),
            (self.submitter_factory)(),
            (self.notifier_factory)(),
        )
        .with_preselected(self.selected_package_id.clone())
        .on_close(move || open.store(false, Ordering::SeqCst));

        self.order.insert(workflow)
    }

    pub fn is_order_open(&self) -> bool {
        self.order_open.load(Ordering::SeqCst)
    }

    /// The open dialog's workflow, if any.
    pub fn order_mut(&mut self) -> Option<&mut OrderWorkflow> {
        if !self.is_order_open() {
            self.order = None;
        }
        self.order.as_mut()
    }

    pub fn close_order(&mut self) {
        if let Some(mut workflow) = self.order.take() {
            workflow.close();
        }
        self.order_open.store(false, Ordering::SeqCst);
    }

    fn ensure_package(&self, package_id: &str) -> Result<()> {
        if self.catalog.package(package_id).is_some() {
            Ok(())
        } else {
            Err(OrderError::Catalog(format!("unknown package '{package_id}'")))
        }
    }
}
