use super::catalog::Catalog;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

// Optional +7/8 prefix, optional parenthesised area code, 3-3-2-2 digit groups.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+7|8)?[\s\-]?\(?[0-9]{3}\)?[\s\-]?[0-9]{3}[\s\-]?[0-9]{2}[\s\-]?[0-9]{2}$")
        .expect("phone pattern is valid")
});

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    #[serde(rename = "phone_number")]
    Phone,
    Package,
    PaymentMethod,
    Email,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Phone => "phone_number",
            FormField::Package => "package",
            FormField::PaymentMethod => "payment_method",
            FormField::Email => "email",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The editable fields of the quick-order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFormState {
    pub phone_number: String,
    pub package_id: String,
    pub payment_method_id: String,
    pub email: String,
}

impl OrderFormState {
    /// Initial state, with the package optionally pre-selected.
    pub fn seeded(package_id: Option<&str>) -> Self {
        Self {
            package_id: package_id.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }
}

/// Field-level validation messages. Only failing fields have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks every field and reports all failures at once.
pub fn validate(form: &OrderFormState, catalog: &Catalog) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.phone_number.is_empty() {
        errors.insert(FormField::Phone, "Введите номер телефона");
    } else if !is_valid_phone(&form.phone_number) {
        errors.insert(FormField::Phone, "Неверный формат номера телефона");
    }

    if form.package_id.is_empty() {
        errors.insert(FormField::Package, "Выберите пакет гигабайт");
    } else if catalog.package(&form.package_id).is_none() {
        errors.insert(FormField::Package, "Неизвестный пакет");
    }

    if form.payment_method_id.is_empty() {
        errors.insert(FormField::PaymentMethod, "Выберите способ оплаты");
    } else if catalog.payment_method(&form.payment_method_id).is_none() {
        errors.insert(FormField::PaymentMethod, "Неизвестный способ оплаты");
    }

    if form.email.is_empty() {
        errors.insert(FormField::Email, "Введите email для получения чека");
    } else if !is_valid_email(&form.email) {
        errors.insert(FormField::Email, "Неверный формат email");
    }

    errors
}
