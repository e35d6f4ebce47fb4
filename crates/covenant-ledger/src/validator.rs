//! The transition validator.
//!
//! [`verify`] is the predicate every party runs over a proposed transition
//! before counter-signing it. It is pure: no I/O, no shared state, no
//! ambient clock — the caller supplies `now` — so concurrent and redundant
//! invocations over the same view always reach the identical verdict. The
//! platform's notary guarantees each input version is consumed once; this
//! module never re-implements that mutual exclusion.
//!
//! Each rule set checks its clauses in order and rejects on the first
//! violation, carrying the violated clause as structured data.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use covenant_core::types::{Amount, Date, PublicKey};

use crate::error::{IssueViolation, SettleViolation, TransferViolation, VerifyResult};
use crate::transaction::{CommandKind, TransactionView};

/// Validates a proposed transition.
///
/// Accepts with `Ok(())` or rejects with the first violated clause. The
/// view must carry exactly one command; dispatch over the command kind is
/// exhaustive — the rule set is closed by design.
pub fn verify(view: &TransactionView, now: Date) -> VerifyResult {
    let command = view.single_command()?;
    log::debug!(
        "verifying {} command with {} signer key(s)",
        command.kind(),
        command.signers().len()
    );

    match command.kind() {
        CommandKind::Issue => verify_issue(view, command.signers(), now),
        CommandKind::Transfer => verify_transfer(view, command.signers()),
        CommandKind::PayCoupon => verify_pay_coupon(view),
        CommandKind::Settle => verify_settle(view, command.signers()),
    }
}

fn verify_issue(view: &TransactionView, signers: &BTreeSet<PublicKey>, now: Date) -> VerifyResult {
    if !view.inputs().is_empty() {
        return Err(IssueViolation::InputsNotEmpty {
            count: view.inputs().len(),
        }
        .into());
    }

    let bonds = view.bond_outputs();
    if view.outputs().len() != 1 || bonds.len() != 1 {
        return Err(IssueViolation::OutputNotSingleBond {
            bonds: bonds.len(),
            outputs: view.outputs().len(),
        }
        .into());
    }
    let bond = bonds[0];

    if bond.issuer() == bond.owner() {
        return Err(IssueViolation::IssuerIsOwner.into());
    }
    if bond.issue_date() > now {
        return Err(IssueViolation::FutureDated {
            issue_date: bond.issue_date(),
            now,
        }
        .into());
    }
    if bond.maturity_date() <= bond.issue_date() {
        return Err(IssueViolation::MaturityNotAfterIssue {
            issue_date: bond.issue_date(),
            maturity_date: bond.maturity_date(),
        }
        .into());
    }
    if !bond.principal().is_positive() {
        return Err(IssueViolation::NonPositivePrincipal {
            principal: *bond.principal(),
        }
        .into());
    }
    if bond.coupon_rate() < Decimal::ZERO || bond.coupon_rate() > Decimal::ONE {
        return Err(IssueViolation::CouponRateOutOfRange {
            rate: bond.coupon_rate(),
        }
        .into());
    }

    if signers.len() != 2 {
        return Err(IssueViolation::SignerCount {
            count: signers.len(),
        }
        .into());
    }
    if !signers.contains(bond.issuer().key()) {
        return Err(IssueViolation::IssuerNotSigner.into());
    }
    if !signers.contains(bond.owner().key()) {
        return Err(IssueViolation::OwnerNotSigner.into());
    }

    Ok(())
}

fn verify_transfer(view: &TransactionView, signers: &BTreeSet<PublicKey>) -> VerifyResult {
    let input_bonds = view.bond_inputs();
    if view.inputs().len() != 1 || input_bonds.len() != 1 {
        return Err(TransferViolation::InputNotSingleBond {
            bonds: input_bonds.len(),
            inputs: view.inputs().len(),
        }
        .into());
    }
    let output_bonds = view.bond_outputs();
    if view.outputs().len() != 1 || output_bonds.len() != 1 {
        return Err(TransferViolation::OutputNotSingleBond {
            bonds: output_bonds.len(),
            outputs: view.outputs().len(),
        }
        .into());
    }

    let input = input_bonds[0];
    let output = output_bonds[0];

    // Only the ownership change and the signer set are checked; the other
    // fields of input and output are not compared.
    if input.owner() == output.owner() {
        return Err(TransferViolation::OwnerUnchanged {
            owner: input.owner().name().to_string(),
        }
        .into());
    }

    if signers.len() != 2 {
        return Err(TransferViolation::SignerCount {
            count: signers.len(),
        }
        .into());
    }
    if !signers.contains(input.owner().key()) {
        return Err(TransferViolation::PreviousOwnerNotSigner.into());
    }
    if !signers.contains(output.owner().key()) {
        return Err(TransferViolation::NewOwnerNotSigner.into());
    }

    Ok(())
}

/// Periodic coupon payment is intentionally unconstrained.
fn verify_pay_coupon(_view: &TransactionView) -> VerifyResult {
    Ok(())
}

fn verify_settle(view: &TransactionView, signers: &BTreeSet<PublicKey>) -> VerifyResult {
    let input_bonds = view.bond_inputs();
    if view.inputs().len() != 1 || input_bonds.len() != 1 {
        return Err(SettleViolation::InputNotSingleBond {
            bonds: input_bonds.len(),
            inputs: view.inputs().len(),
        }
        .into());
    }
    let bond = input_bonds[0];

    let bond_outputs = view.bond_outputs();
    if !bond_outputs.is_empty() {
        return Err(SettleViolation::BondNotExtinguished {
            bonds: bond_outputs.len(),
        }
        .into());
    }

    let cash = view.cash_outputs();
    if cash.is_empty() {
        return Err(SettleViolation::NoCashOutput.into());
    }

    let payable: Vec<_> = cash
        .iter()
        .filter(|c| c.owner() == bond.owner())
        .collect();
    if payable.is_empty() {
        return Err(SettleViolation::NoCashPayableToOwner {
            owner: bond.owner().name().to_string(),
        }
        .into());
    }

    let principal = bond.principal();
    let mut paid = Amount::zero(principal.currency());
    for state in &payable {
        paid = paid.checked_add(state.amount()).map_err(|_| {
            SettleViolation::SettledCurrencyMismatch {
                expected: principal.currency(),
                found: state.amount().currency(),
            }
        })?;
    }
    if paid != *principal {
        return Err(SettleViolation::SettledAmountMismatch {
            principal: *principal,
            paid,
        }
        .into());
    }

    if signers.len() != 2 {
        return Err(SettleViolation::SignerCount {
            count: signers.len(),
        }
        .into());
    }
    if !signers.contains(bond.issuer().key()) {
        return Err(SettleViolation::IssuerNotSigner.into());
    }
    if !signers.contains(bond.owner().key()) {
        return Err(SettleViolation::OwnerNotSigner.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::types::{Amount, Currency, Party};
    use rust_decimal_macros::dec;

    use crate::bond::BondRecord;
    use crate::coupon::CouponFrequency;
    use crate::error::VerifyError;
    use crate::transaction::{CashState, Command, TransactionView};

    fn party(name: &str, seed: u8) -> Party {
        Party::new(name, PublicKey::from_bytes([seed; 32]))
    }

    fn now() -> Date {
        Date::from_ymd(2025, 6, 15).unwrap()
    }

    fn sample_bond() -> BondRecord {
        BondRecord::builder()
            .issuer(party("Alice Corp", 1))
            .owner(party("Bob Ltd", 2))
            .issue_date(now())
            .maturity_date(now().add_years(5).unwrap())
            .principal(Amount::new(dec!(1000), Currency::GBP))
            .coupon_rate(dec!(0.05))
            .coupon_frequency(CouponFrequency::SemiAnnual)
            .build()
            .unwrap()
    }

    fn both_keys(bond: &BondRecord) -> Vec<PublicKey> {
        vec![*bond.issuer().key(), *bond.owner().key()]
    }

    #[test]
    fn test_rejects_view_without_command() {
        let view = TransactionView::builder().build();
        assert!(matches!(
            verify(&view, now()),
            Err(VerifyError::MalformedTransaction { count: 0 })
        ));
    }

    #[test]
    fn test_rejects_view_with_two_commands() {
        let bond = sample_bond();
        let view = TransactionView::builder()
            .add_output(bond.clone())
            .add_command(Command::new(CommandKind::Issue, both_keys(&bond)))
            .add_command(Command::new(CommandKind::PayCoupon, both_keys(&bond)))
            .build();
        assert!(matches!(
            verify(&view, now()),
            Err(VerifyError::MalformedTransaction { count: 2 })
        ));
    }

    #[test]
    fn test_issue_short_circuits_on_first_violation() {
        // Same party on both sides AND a bad rate: the party clause fires first
        let alice = party("Alice Corp", 1);
        let bond = BondRecord::builder()
            .issuer(alice.clone())
            .owner(alice)
            .issue_date(now())
            .maturity_date(now().add_years(1).unwrap())
            .principal(Amount::new(dec!(1000), Currency::GBP))
            .coupon_rate(dec!(1.5))
            .coupon_frequency(CouponFrequency::Annual)
            .build()
            .unwrap();
        let view = TransactionView::builder()
            .add_output(bond.clone())
            .add_command(Command::new(CommandKind::Issue, both_keys(&bond)))
            .build();

        assert_eq!(
            verify(&view, now()),
            Err(VerifyError::Issue(IssueViolation::IssuerIsOwner))
        );
    }

    #[test]
    fn test_issue_rejects_extra_output() {
        let bond = sample_bond();
        let view = TransactionView::builder()
            .add_output(bond.clone())
            .add_output(CashState::new(
                party("Bob Ltd", 2),
                Amount::new(dec!(1), Currency::GBP),
            ))
            .add_command(Command::new(CommandKind::Issue, both_keys(&bond)))
            .build();

        assert!(matches!(
            verify(&view, now()),
            Err(VerifyError::Issue(IssueViolation::OutputNotSingleBond {
                bonds: 1,
                outputs: 2
            }))
        ));
    }

    #[test]
    fn test_pay_coupon_is_pass_through() {
        let view = TransactionView::builder()
            .add_command(Command::new(CommandKind::PayCoupon, vec![]))
            .build();
        assert_eq!(verify(&view, now()), Ok(()));
    }

    #[test]
    fn test_settle_mixed_currency_is_rejected() {
        let bond = sample_bond();
        let owner = bond.owner().clone();
        let view = TransactionView::builder()
            .add_input(bond.clone())
            .add_output(CashState::new(
                owner.clone(),
                Amount::new(dec!(500), Currency::GBP),
            ))
            .add_output(CashState::new(owner, Amount::new(dec!(500), Currency::USD)))
            .add_command(Command::new(CommandKind::Settle, both_keys(&bond)))
            .build();

        assert!(matches!(
            verify(&view, now()),
            Err(VerifyError::Settle(
                SettleViolation::SettledCurrencyMismatch {
                    expected: Currency::GBP,
                    found: Currency::USD,
                }
            ))
        ));
    }
}
