//! Plain-text rendering of the landing catalog and the order summary.

use crate::domain::catalog::Catalog;
use crate::domain::order::OrderSummary;
use std::io::{self, Write};

/// Writes the package cards followed by the payment-method list.
///
/// The highlighted package, if any, is marked with `>`.
pub fn render_catalog<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    highlighted: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "Выберите пакет гигабайт")?;
    for package in catalog.packages() {
        let marker = if highlighted == Some(package.id.as_str()) { '>' } else { ' ' };
        let badge = if package.popular { " [Популярный]" } else { "" };
        writeln!(
            out,
            "{marker} {id:<10} {name}{badge}: {gb} ГБ за {price}",
            id = package.id,
            name = package.name,
            gb = package.gb,
            price = package.price,
        )?;
        for feature in &package.features {
            writeln!(out, "    ✓ {feature}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Способы оплаты")?;
    for method in catalog.payment_methods() {
        match &method.description {
            Some(description) => {
                writeln!(out, "  {:<10} {} ({description})", method.id, method.name)?
            }
            None => writeln!(out, "  {:<10} {}", method.id, method.name)?,
        }
    }
    Ok(())
}

pub fn render_summary<W: Write>(out: &mut W, summary: &OrderSummary) -> io::Result<()> {
    writeln!(out, "Итоговая информация:")?;
    writeln!(out, "  Пакет: {}", summary.package)?;
    writeln!(out, "  Номер телефона: {}", summary.phone_number)?;
    if let Some(method) = &summary.payment_method {
        writeln!(out, "  Способ оплаты: {method}")?;
    }
    writeln!(out, "  К оплате: {}", summary.amount_due)?;
    Ok(())
}
