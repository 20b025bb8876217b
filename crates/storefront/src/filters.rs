//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

use botica_core::Price;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a decimal amount as kwanza, e.g. `1999.50 Kz`.
///
/// Usage in templates: `{{ item.unit_price|kwanza }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn kwanza(amount: &Decimal, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(Price::kwanza(*amount).display())
}
