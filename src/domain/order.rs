use super::catalog::{Package, PaymentMethod, Price};
use super::form::OrderFormState;
use serde::{Deserialize, Serialize};

pub const SUCCESS_TITLE: &str = "Заказ оформлен!";
pub const FAILURE_TITLE: &str = "Ошибка";
pub const FAILURE_DESCRIPTION: &str = "Не удалось оформить заказ. Попробуйте еще раз.";

/// The request sent to an order-processing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub phone_number: String,
    #[serde(rename = "package")]
    pub package_id: String,
    #[serde(rename = "payment_method")]
    pub payment_method_id: String,
    pub email: String,
}

impl From<&OrderFormState> for OrderPayload {
    fn from(form: &OrderFormState) -> Self {
        Self {
            phone_number: form.phone_number.clone(),
            package_id: form.package_id.clone(),
            payment_method_id: form.payment_method_id.clone(),
            email: form.email.clone(),
        }
    }
}

/// The service's answer to an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub confirmation_id: String,
}

/// A placed order, resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub confirmation_id: String,
    pub package: Package,
    pub payment_method: PaymentMethod,
}

impl Confirmation {
    /// `Пакет Популярный (5 ГБ) за 200₽. Способ оплаты: Банковская карта`
    pub fn message(&self) -> String {
        format!(
            "Пакет {} за {}. Способ оплаты: {}",
            self.package.label(),
            self.package.price,
            self.payment_method.name
        )
    }

    pub fn notification(&self) -> Notification {
        Notification::normal(SUCCESS_TITLE, self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Destructive,
}

/// A toast-style message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn normal(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    pub fn order_failed() -> Self {
        Self::destructive(FAILURE_TITLE, FAILURE_DESCRIPTION)
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Where a quick-order session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// The running total shown under the form once a package is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub package: String,
    pub phone_number: String,
    pub payment_method: Option<String>,
    pub amount_due: Price,
    pub submitting: bool,
}

impl OrderSummary {
    /// Follows a state change published by the workflow.
    pub fn track(&mut self, state: WorkflowState) {
        self.submitting = state == WorkflowState::Submitting;
    }

    pub fn submit_label(&self) -> String {
        if self.submitting {
            "Оформляю заказ...".to_string()
        } else {
            format!("Оплатить {}", self.amount_due)
        }
    }
}
