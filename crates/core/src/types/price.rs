//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts use [`Decimal`] rather than floating point so that unit prices
/// and cart subtotals stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., kwanzas, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the platform's default currency.
    #[must_use]
    pub const fn kwanza(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::AOA)
    }

    /// Format for display, e.g. `1999.50 Kz`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.2} {}", self.amount, self.currency_code.symbol())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Angolan kwanza, the platform default.
    #[default]
    AOA,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::AOA => "Kz",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// ISO 4217 code as a string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AOA => "AOA",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_kwanza() {
        let price = Price::kwanza(Decimal::new(1999_50, 2));
        assert_eq!(price.display(), "1999.50 Kz");
    }

    #[test]
    fn test_display_rounds_to_cents() {
        let price = Price::kwanza(Decimal::new(5, 0));
        assert_eq!(price.display(), "5.00 Kz");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(CurrencyCode::AOA.code(), "AOA");
        assert_eq!(CurrencyCode::AOA.symbol(), "Kz");
        assert_eq!(CurrencyCode::default(), CurrencyCode::AOA);
    }
}
