//! Currency type with ISO 4217 codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency codes.
///
/// Covers the currencies bonds on the ledger are denominated in. The
/// validator never converts between currencies; the tag exists so that
/// amounts in different currencies cannot be silently combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum Currency {
    /// United States Dollar
    #[default]
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Canadian Dollar
    CAD,
    /// Australian Dollar
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
        }
    }

    /// Returns the standard number of decimal places for the currency.
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0, // Yen has no decimal places
            _ => 2,
        }
    }

    /// Parses a currency from a string code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CHF" => Some(Currency::CHF),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::GBP.code(), "GBP");
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(Currency::GBP.symbol(), "£");
        assert_eq!(Currency::EUR.symbol(), "€");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Currency::from_code("gbp"), Some(Currency::GBP));
        assert_eq!(Currency::from_code("EUR"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("XXX"), None);
        assert_eq!(Currency::from_code(""), None);
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(Currency::GBP.decimal_places(), 2);
        assert_eq!(Currency::JPY.decimal_places(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Currency::USD), "USD");
    }

    #[test]
    fn test_serde() {
        let currency = Currency::GBP;
        let json = serde_json::to_string(&currency).unwrap();
        let parsed: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(currency, parsed);
    }
}
