use crate::error::{OrderError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A positive price in rubles.
///
/// Wraps `rust_decimal::Decimal` so a package can never be priced at zero
/// or below.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(OrderError::Catalog("Price must be positive".to_string()))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = OrderError;

    fn try_from(value: Decimal) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}₽", self.0.normalize())
    }
}

/// A data package offered on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    pub name: String,
    /// Data allowance in gigabytes.
    pub gb: u32,
    pub price: Price,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Package {
    /// `Популярный (5 ГБ)`
    pub fn label(&self) -> String {
        format!("{} ({} ГБ)", self.name, self.gb)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The immutable package and payment-method listings.
///
/// Workflows receive it behind an `Arc`, so independent instances share the
/// data without sharing any mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    packages: Vec<Package>,
    payment_methods: Vec<PaymentMethod>,
}

#[derive(Deserialize)]
struct RawCatalog {
    packages: Vec<Package>,
    payment_methods: Vec<PaymentMethod>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = OrderError;

    fn try_from(raw: RawCatalog) -> std::result::Result<Self, Self::Error> {
        Catalog::new(raw.packages, raw.payment_methods)
    }
}

impl Catalog {
    /// Builds a catalog, rejecting empty or duplicate identifiers.
    pub fn new(packages: Vec<Package>, payment_methods: Vec<PaymentMethod>) -> Result<Self> {
        ensure_unique_ids("package", packages.iter().map(|p| p.id.as_str()))?;
        ensure_unique_ids(
            "payment method",
            payment_methods.iter().map(|m| m.id.as_str()),
        )?;
        Ok(Self {
            packages,
            payment_methods,
        })
    }

    /// The catalog shipped with the landing page.
    pub fn builtin() -> Self {
        let package =
            |id: &str, name: &str, gb: u32, price: Decimal, popular: bool, features: [&str; 3]| {
                Package {
                    id: id.to_string(),
                    name: name.to_string(),
                    gb,
                    price: Price(price),
                    popular,
                    features: features.iter().map(|f| f.to_string()).collect(),
                }
            };
        let method = |id: &str, name: &str, icon: &str, description: &str| PaymentMethod {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            description: Some(description.to_string()),
        };

        Self {
            packages: vec![
                package(
                    "basic",
                    "Начальный",
                    1,
                    dec!(50),
                    false,
                    ["Высокая скорость", "Без ограничений", "Мгновенная активация"],
                ),
                package(
                    "popular",
                    "Популярный",
                    5,
                    dec!(200),
                    true,
                    ["Лучшая цена", "Экономия 20%", "Приоритетная поддержка"],
                ),
                package(
                    "premium",
                    "Максимальный",
                    10,
                    dec!(350),
                    false,
                    ["Максимальный объем", "VIP поддержка", "Бонусные гигабайты"],
                ),
            ],
            payment_methods: vec![
                method("card", "Банковская карта", "CreditCard", "Visa, MasterCard, МИР"),
                method("yandex", "Яндекс.Деньги", "Wallet", "Быстрая оплата"),
                method("qiwi", "QIWI", "Smartphone", "Мгновенный перевод"),
                method("webmoney", "WebMoney", "Globe", "Безопасные платежи"),
                method("paypal", "PayPal", "DollarSign", "Международные платежи"),
                method("apple", "Apple Pay", "Zap", "Оплата одним касанием"),
            ],
        }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn payment_method(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn ensure_unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(OrderError::Catalog(format!("{kind} id cannot be empty")));
        }
        if !seen.insert(id) {
            return Err(OrderError::Catalog(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}
