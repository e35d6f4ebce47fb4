//! The bond record and its lifetime identity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use covenant_core::types::{Amount, Date, Party};

use crate::coupon::{Coupon, CouponFrequency, CouponSchedule};
use crate::error::{BondError, LedgerResult};

/// The identifier shared by every version of one bond.
///
/// Minted once at issuance and preserved through transfers until
/// settlement; the chain of record versions under one id is the bond's full
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearId(Uuid);

impl LinearId {
    /// Mints a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing identifier.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LinearId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LinearId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One version of a bond's state on the ledger.
///
/// Records are immutable values: a transition never mutates a record in
/// place, it consumes one version and produces the next. Only
/// [`with_new_owner`](BondRecord::with_new_owner) derives a successor, and
/// it preserves the [`LinearId`].
///
/// Construction is deliberately permissive about the economic invariants
/// (positive principal, rate bounds, date ordering) — those are transition
/// rules, enforced by the validator at issuance so that every party rejects
/// a malformed bond identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondRecord {
    /// The party that issued the bond and owes the principal
    issuer: Party,
    /// The party currently holding the bond
    owner: Party,
    /// Date the bond was issued
    issue_date: Date,
    /// Date the principal falls due
    maturity_date: Date,
    /// Face value owed at settlement
    principal: Amount,
    /// Coupon rate as a fraction (0.05 for 5%)
    coupon_rate: Decimal,
    /// Coupon payment frequency
    coupon_frequency: CouponFrequency,
    /// Identity shared across all versions of this bond
    linear_id: LinearId,
}

impl BondRecord {
    /// Creates a new builder for bond records.
    #[must_use]
    pub fn builder() -> BondRecordBuilder {
        BondRecordBuilder::default()
    }

    /// Returns the issuing party.
    #[must_use]
    pub fn issuer(&self) -> &Party {
        &self.issuer
    }

    /// Returns the current owner.
    #[must_use]
    pub fn owner(&self) -> &Party {
        &self.owner
    }

    /// Returns the issue date.
    #[must_use]
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Returns the principal.
    #[must_use]
    pub fn principal(&self) -> &Amount {
        &self.principal
    }

    /// Returns the coupon rate.
    #[must_use]
    pub fn coupon_rate(&self) -> Decimal {
        self.coupon_rate
    }

    /// Returns the coupon frequency.
    #[must_use]
    pub fn coupon_frequency(&self) -> CouponFrequency {
        self.coupon_frequency
    }

    /// Returns the bond's lifetime identity.
    #[must_use]
    pub fn linear_id(&self) -> LinearId {
        self.linear_id
    }

    /// Returns the parties with a stake in this version: issuer and owner.
    #[must_use]
    pub fn participants(&self) -> [&Party; 2] {
        [&self.issuer, &self.owner]
    }

    /// Derives the next version of this bond with a new owner.
    ///
    /// Every other field, including the [`LinearId`], is preserved.
    #[must_use]
    pub fn with_new_owner(&self, new_owner: Party) -> Self {
        Self {
            owner: new_owner,
            ..self.clone()
        }
    }

    /// Generates this bond's coupon schedule.
    ///
    /// Recomputed on every call; generation is cheap and pure, so there is
    /// no cached copy to keep consistent.
    #[must_use]
    pub fn coupon_schedule(&self) -> CouponSchedule {
        CouponSchedule::generate(
            self.issue_date,
            self.maturity_date,
            self.coupon_frequency,
            &self.principal,
            self.coupon_rate,
        )
    }

    /// Returns the first coupon redeemable strictly after `date`, if any.
    #[must_use]
    pub fn next_payable_coupon(&self, date: Date) -> Option<Coupon> {
        self.coupon_schedule().next_payable(date).copied()
    }
}

impl fmt::Display for BondRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bond {} issued by {}, owned by {}",
            self.linear_id, self.issuer, self.owner
        )
    }
}

/// Builder for [`BondRecord`].
///
/// All fields except the linear id are required; a fresh id is minted when
/// none is supplied (first issuance), and transfers carry the id forward via
/// [`BondRecord::with_new_owner`].
#[derive(Debug, Clone, Default)]
pub struct BondRecordBuilder {
    issuer: Option<Party>,
    owner: Option<Party>,
    issue_date: Option<Date>,
    maturity_date: Option<Date>,
    principal: Option<Amount>,
    coupon_rate: Option<Decimal>,
    coupon_frequency: Option<CouponFrequency>,
    linear_id: Option<LinearId>,
}

impl BondRecordBuilder {
    /// Creates a new builder with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issuing party.
    #[must_use]
    pub fn issuer(mut self, issuer: Party) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Sets the owning party.
    #[must_use]
    pub fn owner(mut self, owner: Party) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the principal.
    #[must_use]
    pub fn principal(mut self, principal: Amount) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Sets the coupon rate as a fraction (0.05 for 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: Decimal) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn coupon_frequency(mut self, frequency: CouponFrequency) -> Self {
        self.coupon_frequency = Some(frequency);
        self
    }

    /// Sets an explicit linear id (reconstructing an existing bond).
    #[must_use]
    pub fn linear_id(mut self, id: LinearId) -> Self {
        self.linear_id = Some(id);
        self
    }

    /// Builds the record.
    ///
    /// # Errors
    ///
    /// Returns `BondError::MissingField` if a required field is absent.
    pub fn build(self) -> LedgerResult<BondRecord> {
        Ok(BondRecord {
            issuer: self.issuer.ok_or_else(|| BondError::missing_field("issuer"))?,
            owner: self.owner.ok_or_else(|| BondError::missing_field("owner"))?,
            issue_date: self
                .issue_date
                .ok_or_else(|| BondError::missing_field("issue_date"))?,
            maturity_date: self
                .maturity_date
                .ok_or_else(|| BondError::missing_field("maturity_date"))?,
            principal: self
                .principal
                .ok_or_else(|| BondError::missing_field("principal"))?,
            coupon_rate: self
                .coupon_rate
                .ok_or_else(|| BondError::missing_field("coupon_rate"))?,
            coupon_frequency: self
                .coupon_frequency
                .ok_or_else(|| BondError::missing_field("coupon_frequency"))?,
            linear_id: self.linear_id.unwrap_or_default(),
        })
    }
}
