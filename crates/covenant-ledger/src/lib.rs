//! # Covenant Ledger
//!
//! Bond state transitions and the deterministic validator for the Covenant
//! ledger contract.
//!
//! This crate provides:
//!
//! - **Records**: [`BondRecord`], the immutable per-version bond state
//! - **Coupons**: deterministic coupon schedule generation and lookup
//! - **Transactions**: the read-only [`TransactionView`] a proposed
//!   transition is validated against
//! - **Validation**: [`verify`], the pure accept/reject predicate every
//!   party runs independently over the same view
//! - **Proposals**: builders assembling candidate views for the four
//!   transitions
//!
//! Every party holding a copy of the ledger re-runs [`verify`] over the same
//! view and must reach the identical verdict; the validator therefore does
//! no I/O, holds no state, and takes its clock as a parameter.
//!
//! ## Example
//!
//! ```rust,ignore
//! use covenant_ledger::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bond = BondRecord::builder()
//!     .issuer(alice)
//!     .owner(bob)
//!     .issue_date(Date::from_ymd(2025, 6, 15)?)
//!     .maturity_date(Date::from_ymd(2030, 6, 15)?)
//!     .principal(Amount::new(dec!(1000), Currency::GBP))
//!     .coupon_rate(dec!(0.05))
//!     .coupon_frequency(CouponFrequency::Annual)
//!     .build()?;
//!
//! let view = proposals::build_issue(&bond);
//! verify(&view, Date::from_ymd(2025, 6, 15)?)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::match_same_arms)]

pub mod bond;
pub mod coupon;
pub mod error;
pub mod proposals;
pub mod transaction;
pub mod validator;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bond::{BondRecord, BondRecordBuilder, LinearId};
    pub use crate::coupon::{Coupon, CouponFrequency, CouponSchedule};
    pub use crate::error::{
        BondError, IssueViolation, LedgerResult, SettleViolation, TransferViolation, VerifyError,
        VerifyResult,
    };
    pub use crate::proposals;
    pub use crate::transaction::{
        CashState, Command, CommandKind, LedgerState, TransactionView, TransactionViewBuilder,
    };
    pub use crate::validator::verify;
    pub use covenant_core::types::{Amount, Currency, Date, Party, PublicKey};
}

pub use bond::{BondRecord, BondRecordBuilder, LinearId};
pub use coupon::{Coupon, CouponFrequency, CouponSchedule};
pub use error::{BondError, LedgerResult, VerifyError, VerifyResult};
pub use transaction::{CashState, Command, CommandKind, LedgerState, TransactionView};
pub use validator::verify;
