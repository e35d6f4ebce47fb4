//! Currency-tagged decimal amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::Currency;
use crate::error::{CoreError, CoreResult};

/// A monetary amount in a single currency.
///
/// This is the opaque fungible-amount abstraction the ledger settles cash
/// in. Amounts only combine within one currency; crossing currencies is an
/// error, never an implicit conversion.
///
/// # Example
///
/// ```rust
/// use covenant_core::types::{Amount, Currency};
/// use rust_decimal_macros::dec;
///
/// let principal = Amount::new(dec!(1000), Currency::GBP);
/// let paid = Amount::new(dec!(1000.00), Currency::GBP);
/// assert_eq!(principal, paid); // decimal equality is by value, not scale
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// Quantity in currency units
    value: Decimal,
    /// Currency of the amount
    currency: Currency,
}

impl Amount {
    /// Creates a new amount.
    #[must_use]
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Creates a zero amount in the given currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            value: Decimal::ZERO,
            currency,
        }
    }

    /// Returns the decimal quantity.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Returns true if both amounts share a currency.
    #[must_use]
    pub fn same_currency(&self, other: &Self) -> bool {
        self.currency == other.currency
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CurrencyMismatch` if the currencies differ.
    pub fn checked_add(&self, other: &Self) -> CoreResult<Self> {
        if self.currency != other.currency {
            return Err(CoreError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            });
        }
        Ok(Self {
            value: self.value + other.value,
            currency: self.currency,
        })
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            None // Can't compare amounts in different currencies
        } else {
            self.value.partial_cmp(&other.value)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
