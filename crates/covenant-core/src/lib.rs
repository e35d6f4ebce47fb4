//! # Covenant Core
//!
//! Core domain types for the Covenant bond ledger contract.
//!
//! This crate provides the foundational building blocks used throughout
//! Covenant:
//!
//! - **Types**: Domain-specific types like `Date`, `Amount`, `Currency`,
//!   `Party`, `PublicKey`
//! - **Calendar arithmetic**: Day-clamped month and year stepping for
//!   schedule generation
//! - **Errors**: Structured error types shared by the ledger crates
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing incompatible values
//! - **Determinism**: Every operation is pure; identical inputs always
//!   produce identical results, which is what lets independent parties
//!   re-verify the same transition byte-for-byte
//! - **Explicit Over Implicit**: Clear, self-documenting APIs
//!
//! ## Example
//!
//! ```rust
//! use covenant_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let principal = Amount::new(dec!(1000), Currency::GBP);
//! let issue = Date::from_ymd(2025, 6, 15).unwrap();
//! assert!(principal.is_positive());
//! assert_eq!(issue.add_months(6).unwrap(), Date::from_ymd(2025, 12, 15).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Amount, Currency, Date, Party, PublicKey};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Amount, Currency, Date, Party, PublicKey};
