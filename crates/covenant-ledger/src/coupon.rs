//! Coupon schedule generation and lookup.
//!
//! The schedule is the deterministic heart of the contract: every party
//! recomputes it independently and must land on byte-identical coupons.
//! Generation is pure and total — a degenerate date range produces an empty
//! schedule, never an error; the validator's issuance checks are where date
//! ordering is enforced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use covenant_core::error::CoreResult;
use covenant_core::types::{Amount, Date};

/// How often a bond pays its coupon.
///
/// Each frequency advances a date by a real calendar step — weeks step by
/// days, everything else by calendar months or years with day-of-month
/// clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouponFrequency {
    /// One coupon per week
    Weekly,
    /// One coupon per month
    Monthly,
    /// One coupon every three months
    Quarterly,
    /// One coupon every six months
    SemiAnnual,
    /// One coupon per year
    Annual,
}

impl CouponFrequency {
    /// Advances a date by one coupon period.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` only when the stepped date falls
    /// outside the representable calendar range.
    pub fn advance(&self, date: Date) -> CoreResult<Date> {
        match self {
            CouponFrequency::Weekly => Ok(date.add_weeks(1)),
            CouponFrequency::Monthly => date.add_months(1),
            CouponFrequency::Quarterly => date.add_months(3),
            CouponFrequency::SemiAnnual => date.add_months(6),
            CouponFrequency::Annual => date.add_years(1),
        }
    }

    /// Returns the number of coupon periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CouponFrequency::Weekly => 52,
            CouponFrequency::Monthly => 12,
            CouponFrequency::Quarterly => 4,
            CouponFrequency::SemiAnnual => 2,
            CouponFrequency::Annual => 1,
        }
    }
}

impl fmt::Display for CouponFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CouponFrequency::Weekly => "Weekly",
            CouponFrequency::Monthly => "Monthly",
            CouponFrequency::Quarterly => "Quarterly",
            CouponFrequency::SemiAnnual => "Semi-Annual",
            CouponFrequency::Annual => "Annual",
        };
        write!(f, "{name}")
    }
}

/// A single coupon redemption event.
///
/// Coupons are derived values: they exist only inside a generated schedule
/// and are never persisted or mutated. `value` is the principal quantity
/// multiplied by the coupon rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Frequency of the schedule this coupon belongs to
    frequency: CouponFrequency,
    /// Coupon rate as a fraction (0.05 for 5%)
    rate: Decimal,
    /// Payment value in principal currency units
    value: Decimal,
    /// Date the coupon becomes redeemable
    redemption_date: Date,
}

impl Coupon {
    /// Creates a new coupon.
    #[must_use]
    pub fn new(frequency: CouponFrequency, rate: Decimal, value: Decimal, redemption_date: Date) -> Self {
        Self {
            frequency,
            rate,
            value,
            redemption_date,
        }
    }

    /// Returns the schedule frequency.
    #[must_use]
    pub fn frequency(&self) -> CouponFrequency {
        self.frequency
    }

    /// Returns the coupon rate.
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the payment value.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the redemption date.
    #[must_use]
    pub fn redemption_date(&self) -> Date {
        self.redemption_date
    }
}

impl fmt::Display for Coupon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.redemption_date, self.value, self.frequency)
    }
}

/// The ordered sequence of coupons a bond pays over its lifetime.
///
/// Generation starts a running date at the issue date and, while that date
/// is still before maturity, advances it by one coupon period and appends a
/// coupon at the advanced date. The final coupon therefore lands on maturity
/// when the periods divide evenly, or just past it when day clamping has
/// shifted the cycle.
///
/// # Example
///
/// ```rust
/// use covenant_core::types::{Amount, Currency, Date};
/// use covenant_ledger::coupon::{CouponFrequency, CouponSchedule};
/// use rust_decimal_macros::dec;
///
/// let issue = Date::from_ymd(2025, 6, 15).unwrap();
/// let maturity = Date::from_ymd(2026, 6, 15).unwrap();
/// let principal = Amount::new(dec!(1000), Currency::GBP);
///
/// let schedule =
///     CouponSchedule::generate(issue, maturity, CouponFrequency::Annual, &principal, dec!(0.05));
/// assert_eq!(schedule.len(), 1);
/// assert_eq!(schedule.as_slice()[0].value(), dec!(50.00));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponSchedule {
    /// Ordered coupon events
    coupons: Vec<Coupon>,
}

impl CouponSchedule {
    /// Generates the schedule for the given bond terms.
    ///
    /// Deterministic and total: identical inputs always yield identical
    /// sequences, and a maturity at or before the issue date yields an
    /// empty schedule.
    #[must_use]
    pub fn generate(
        issue_date: Date,
        maturity_date: Date,
        frequency: CouponFrequency,
        principal: &Amount,
        coupon_rate: Decimal,
    ) -> Self {
        let value = principal.value() * coupon_rate;
        let mut coupons = Vec::new();
        let mut redemption_date = issue_date;

        while redemption_date < maturity_date {
            let Ok(next) = frequency.advance(redemption_date) else {
                break;
            };
            redemption_date = next;
            coupons.push(Coupon::new(frequency, coupon_rate, value, redemption_date));
        }

        Self { coupons }
    }

    /// Returns the first coupon redeemable strictly after `date`, if any.
    #[must_use]
    pub fn next_payable(&self, date: Date) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.redemption_date() > date)
    }

    /// Returns the coupons as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Returns the number of coupons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Returns true if the schedule has no coupons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    /// Returns an iterator over the coupons.
    pub fn iter(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter()
    }

    /// Returns the sum of all coupon values.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.coupons.iter().map(Coupon::value).sum()
    }
}

impl IntoIterator for CouponSchedule {
    type Item = Coupon;
    type IntoIter = std::vec::IntoIter<Coupon>;

    fn into_iter(self) -> Self::IntoIter {
        self.coupons.into_iter()
    }
}

impl<'a> IntoIterator for &'a CouponSchedule {
    type Item = &'a Coupon;
    type IntoIter = std::slice::Iter<'a, Coupon>;

    fn into_iter(self) -> Self::IntoIter {
        self.coupons.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::types::Currency;
    use rust_decimal_macros::dec;

    fn gbp(value: Decimal) -> Amount {
        Amount::new(value, Currency::GBP)
    }

    #[test]
    fn test_annual_one_year_has_single_coupon_at_maturity() {
        let issue = Date::from_ymd(2025, 6, 15).unwrap();
        let maturity = issue.add_years(1).unwrap();
        let schedule = CouponSchedule::generate(
            issue,
            maturity,
            CouponFrequency::Annual,
            &gbp(dec!(1000)),
            dec!(0.05),
        );

        assert_eq!(schedule.len(), 1);
        let coupon = &schedule.as_slice()[0];
        assert_eq!(coupon.redemption_date(), maturity);
        assert_eq!(coupon.value(), dec!(50.00));
    }

    #[test]
    fn test_weekly_six_weeks_has_six_coupons() {
        let issue = Date::from_ymd(2025, 1, 6).unwrap();
        let maturity = issue.add_weeks(6);
        let schedule = CouponSchedule::generate(
            issue,
            maturity,
            CouponFrequency::Weekly,
            &gbp(dec!(1000)),
            dec!(0.05),
        );

        assert_eq!(schedule.len(), 6);
        for (i, coupon) in schedule.iter().enumerate() {
            assert_eq!(coupon.redemption_date(), issue.add_weeks(i as i64 + 1));
        }
    }

    #[test]
    fn test_schedule_counts_by_frequency() {
        let issue = Date::from_ymd(2020, 3, 1).unwrap();
        let principal = gbp(dec!(1000));

        let count = |years: i32, freq: CouponFrequency| {
            let maturity = issue.add_years(years).unwrap();
            CouponSchedule::generate(issue, maturity, freq, &principal, dec!(0.05)).len()
        };

        assert_eq!(count(10, CouponFrequency::Annual), 10);
        assert_eq!(count(10, CouponFrequency::SemiAnnual), 20);
        assert_eq!(count(5, CouponFrequency::Quarterly), 20);
        assert_eq!(count(25, CouponFrequency::Monthly), 300);
    }

    #[test]
    fn test_degenerate_range_yields_empty_schedule() {
        let issue = Date::from_ymd(2025, 6, 15).unwrap();
        let schedule = CouponSchedule::generate(
            issue,
            issue,
            CouponFrequency::Monthly,
            &gbp(dec!(1000)),
            dec!(0.05),
        );
        assert!(schedule.is_empty());

        let inverted = CouponSchedule::generate(
            issue,
            issue - 30,
            CouponFrequency::Monthly,
            &gbp(dec!(1000)),
            dec!(0.05),
        );
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_month_end_clamping_drifts_to_shorter_day() {
        // Jan 31 monthly: Feb clamps to 28 and the cycle stays on the 28th
        let issue = Date::from_ymd(2025, 1, 31).unwrap();
        let maturity = Date::from_ymd(2025, 5, 1).unwrap();
        let schedule = CouponSchedule::generate(
            issue,
            maturity,
            CouponFrequency::Monthly,
            &gbp(dec!(1000)),
            dec!(0.05),
        );

        let dates: Vec<Date> = schedule.iter().map(|c| c.redemption_date()).collect();
        assert_eq!(
            dates,
            vec![
                Date::from_ymd(2025, 2, 28).unwrap(),
                Date::from_ymd(2025, 3, 28).unwrap(),
                Date::from_ymd(2025, 4, 28).unwrap(),
                Date::from_ymd(2025, 5, 28).unwrap(),
            ]
        );
    }

    #[test]
    fn test_next_payable() {
        let issue = Date::from_ymd(2025, 6, 15).unwrap();
        let maturity = issue.add_years(1).unwrap();
        let schedule = CouponSchedule::generate(
            issue,
            maturity,
            CouponFrequency::Annual,
            &gbp(dec!(1000)),
            dec!(0.05),
        );

        let next = schedule.next_payable(issue + 1).unwrap();
        assert_eq!(next.redemption_date(), maturity);

        assert!(schedule.next_payable(issue.add_years(2).unwrap()).is_none());
        assert!(schedule.next_payable(maturity).is_none());
    }

    #[test]
    fn test_total_value() {
        let issue = Date::from_ymd(2020, 3, 1).unwrap();
        let maturity = issue.add_years(10).unwrap();
        let schedule = CouponSchedule::generate(
            issue,
            maturity,
            CouponFrequency::Annual,
            &gbp(dec!(1000)),
            dec!(0.05),
        );
        assert_eq!(schedule.total_value(), dec!(500.00));
    }

    #[test]
    fn test_serde_round_trip() {
        let issue = Date::from_ymd(2025, 6, 15).unwrap();
        let maturity = issue.add_years(2).unwrap();
        let schedule = CouponSchedule::generate(
            issue,
            maturity,
            CouponFrequency::SemiAnnual,
            &gbp(dec!(500)),
            dec!(0.03),
        );

        let json = serde_json::to_string(&schedule).unwrap();
        let parsed: CouponSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(schedule, parsed);
    }
}
