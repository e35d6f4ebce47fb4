//! Error types for bond records and transition validation.
//!
//! Rejection reasons are structured: the top-level [`VerifyError`] carries
//! one violation variant per rule clause, and its `Display` output is the
//! human-readable reason the platform surfaces verbatim to the proposer.

use rust_decimal::Decimal;
use thiserror::Error;

use covenant_core::error::CoreError;
use covenant_core::types::{Amount, Currency, Date};

/// A specialized Result type for bond record operations.
pub type LedgerResult<T> = Result<T, BondError>;

/// Errors that can occur constructing bond records.
#[derive(Error, Debug, Clone)]
pub enum BondError {
    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl BondError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }
}

/// The result of validating a proposed transition.
///
/// `Ok(())` is acceptance; the error carries the first violated clause.
pub type VerifyResult = Result<(), VerifyError>;

/// Rejection of a proposed transition.
///
/// All failures are terminal for the transition attempt — nothing is retried
/// here; the platform decides whether to re-propose a corrected transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The transaction does not carry exactly one bond command.
    #[error("A transaction must carry exactly one bond command, found {count}.")]
    MalformedTransaction {
        /// Number of commands attached to the transaction.
        count: usize,
    },

    /// A command name outside the bond command family.
    #[error("Unrecognized bond command: {name}.")]
    UnrecognizedCommand {
        /// The unrecognized command name.
        name: String,
    },

    /// An issue rule was violated.
    #[error("{0}")]
    Issue(#[from] IssueViolation),

    /// A transfer rule was violated.
    #[error("{0}")]
    Transfer(#[from] TransferViolation),

    /// A settlement rule was violated.
    #[error("{0}")]
    Settle(#[from] SettleViolation),
}

/// Violations of the issue rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueViolation {
    /// Inputs were consumed by an issuance.
    #[error("No inputs should be consumed when issuing a bond, found {count}.")]
    InputsNotEmpty {
        /// Number of inputs present.
        count: usize,
    },

    /// The outputs are not a single bond.
    #[error("There should be one output state of type bond, found {bonds} bond output(s) among {outputs} output(s).")]
    OutputNotSingleBond {
        /// Number of bond outputs.
        bonds: usize,
        /// Total number of outputs.
        outputs: usize,
    },

    /// Issuer and owner are the same party.
    #[error("The issuer and owner must be different entities.")]
    IssuerIsOwner,

    /// The issue date lies in the future.
    #[error("The issue date {issue_date} must not be after the current date {now}.")]
    FutureDated {
        /// Proposed issue date.
        issue_date: Date,
        /// The clock the validator was given.
        now: Date,
    },

    /// The maturity date does not follow the issue date.
    #[error("The maturity date {maturity_date} must be after the issue date {issue_date}.")]
    MaturityNotAfterIssue {
        /// Proposed issue date.
        issue_date: Date,
        /// Proposed maturity date.
        maturity_date: Date,
    },

    /// The principal is zero or negative.
    #[error("The principal value {principal} must be greater than 0.")]
    NonPositivePrincipal {
        /// The offending principal.
        principal: Amount,
    },

    /// The coupon rate lies outside `[0, 1]`.
    #[error("Coupon rate {rate} must be a number between 0 and 1.")]
    CouponRateOutOfRange {
        /// The offending rate.
        rate: Decimal,
    },

    /// The signer set does not contain exactly two keys.
    #[error("Two parties must sign, found {count} distinct key(s).")]
    SignerCount {
        /// Number of distinct signer keys.
        count: usize,
    },

    /// The issuer's key is missing from the signer set.
    #[error("The issuer must be one of the signers.")]
    IssuerNotSigner,

    /// The owner's key is missing from the signer set.
    #[error("The buyer must be one of the signers.")]
    OwnerNotSigner,
}

/// Violations of the transfer rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferViolation {
    /// The inputs are not a single bond.
    #[error("There should be one input state of type bond, found {bonds} bond input(s) among {inputs} input(s).")]
    InputNotSingleBond {
        /// Number of bond inputs.
        bonds: usize,
        /// Total number of inputs.
        inputs: usize,
    },

    /// The outputs are not a single bond.
    #[error("There should be one output state of type bond, found {bonds} bond output(s) among {outputs} output(s).")]
    OutputNotSingleBond {
        /// Number of bond outputs.
        bonds: usize,
        /// Total number of outputs.
        outputs: usize,
    },

    /// Input and output owner are the same party.
    #[error("The owner of the bond must change after the transfer; {owner} still owns it.")]
    OwnerUnchanged {
        /// Name of the unchanged owner.
        owner: String,
    },

    /// The signer set does not contain exactly two keys.
    #[error("Two parties must sign, found {count} distinct key(s).")]
    SignerCount {
        /// Number of distinct signer keys.
        count: usize,
    },

    /// The previous owner's key is missing from the signer set.
    #[error("Previous owner must be one of the signers.")]
    PreviousOwnerNotSigner,

    /// The new owner's key is missing from the signer set.
    #[error("New owner must be one of the signers.")]
    NewOwnerNotSigner,
}

/// Violations of the settlement rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettleViolation {
    /// The inputs are not a single bond.
    #[error("There should be one input state of type bond, found {bonds} bond input(s) among {inputs} input(s).")]
    InputNotSingleBond {
        /// Number of bond inputs.
        bonds: usize,
        /// Total number of inputs.
        inputs: usize,
    },

    /// The bond reappears among the outputs instead of being extinguished.
    #[error("A settled bond must be extinguished, found {bonds} bond output(s).")]
    BondNotExtinguished {
        /// Number of bond outputs.
        bonds: usize,
    },

    /// No cash output is present.
    #[error("The output states must include cash.")]
    NoCashOutput,

    /// No cash output is payable to the bond's owner.
    #[error("The cash must be paid to {owner}, the owner of the bond.")]
    NoCashPayableToOwner {
        /// Name of the bond's owner.
        owner: String,
    },

    /// Cash payable to the owner mixes currencies.
    #[error("Cash paid to the owner must be denominated in {expected}, found {found}.")]
    SettledCurrencyMismatch {
        /// The principal's currency.
        expected: Currency,
        /// The offending cash currency.
        found: Currency,
    },

    /// The owner-payable cash does not equal the principal exactly.
    #[error("The amount settled ({paid}) must be equal to the bond principal ({principal}).")]
    SettledAmountMismatch {
        /// The bond principal.
        principal: Amount,
        /// Total cash payable to the owner.
        paid: Amount,
    },

    /// The signer set does not contain exactly two keys.
    #[error("Two parties must sign, found {count} distinct key(s).")]
    SignerCount {
        /// Number of distinct signer keys.
        count: usize,
    },

    /// The issuer's key is missing from the signer set.
    #[error("One of the signers must be the issuer of the bond.")]
    IssuerNotSigner,

    /// The owner's key is missing from the signer set.
    #[error("One of the signers must be the owner of the bond.")]
    OwnerNotSigner,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_verify_error_display_is_actionable() {
        let err = VerifyError::from(IssueViolation::CouponRateOutOfRange { rate: dec!(1.5) });
        assert!(err.to_string().contains("between 0 and 1"));
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_malformed_transaction_display() {
        let err = VerifyError::MalformedTransaction { count: 2 };
        assert!(err.to_string().contains("exactly one"));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_bond_error_from_core() {
        let err: BondError = CoreError::invalid_date("bad").into();
        assert!(err.to_string().contains("Core error"));
    }
}
