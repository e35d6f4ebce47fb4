//! Candidate-transaction assembly for the four transitions.
//!
//! An orchestrator proposing a transition assembles the same view every
//! counterparty will validate. These builders cover the assembly step only:
//! collecting counter-signatures, notarization, and storage belong to the
//! platform. Each builder keys its command with exactly the parties the
//! validator will demand, so a well-formed proposal verifies cleanly.

use covenant_core::types::{Amount, Party};

use crate::bond::BondRecord;
use crate::coupon::Coupon;
use crate::transaction::{CashState, Command, CommandKind, TransactionView};

/// Assembles an issuance: no inputs, the bond as sole output, keyed by
/// issuer and owner.
#[must_use]
pub fn build_issue(bond: &BondRecord) -> TransactionView {
    log::debug!("proposing issue of {}", bond);
    TransactionView::builder()
        .add_output(bond.clone())
        .add_command(Command::new(
            CommandKind::Issue,
            bond.participants().map(|p| *p.key()),
        ))
        .build()
}

/// Assembles an ownership transfer.
///
/// Derives the successor version via [`BondRecord::with_new_owner`] and
/// returns it alongside the view; the command is keyed by the old and new
/// owners.
#[must_use]
pub fn build_transfer(bond: &BondRecord, new_owner: &Party) -> (BondRecord, TransactionView) {
    log::debug!("proposing transfer of {} to {}", bond, new_owner);
    let transferred = bond.with_new_owner(new_owner.clone());
    let view = TransactionView::builder()
        .add_input(bond.clone())
        .add_output(transferred.clone())
        .add_command(Command::new(
            CommandKind::Transfer,
            [*bond.owner().key(), *new_owner.key()],
        ))
        .build();
    (transferred, view)
}

/// Assembles a coupon payment: the coupon's value as cash payable to the
/// bond's owner.
#[must_use]
pub fn build_coupon_payment(bond: &BondRecord, coupon: &Coupon) -> TransactionView {
    log::debug!(
        "proposing coupon payment of {} on {}",
        coupon.value(),
        bond
    );
    let cash = CashState::new(
        bond.owner().clone(),
        Amount::new(coupon.value(), bond.principal().currency()),
    );
    TransactionView::builder()
        .add_output(cash)
        .add_command(Command::new(
            CommandKind::PayCoupon,
            bond.participants().map(|p| *p.key()),
        ))
        .build()
}

/// Assembles a settlement: the bond is consumed against a cash payment of
/// exactly the principal to its owner, keyed by issuer and owner.
#[must_use]
pub fn build_settlement(bond: &BondRecord) -> TransactionView {
    log::debug!("proposing settlement of {}", bond);
    let cash = CashState::new(bond.owner().clone(), *bond.principal());
    TransactionView::builder()
        .add_input(bond.clone())
        .add_output(cash)
        .add_command(Command::new(
            CommandKind::Settle,
            bond.participants().map(|p| *p.key()),
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::types::{Currency, Date, PublicKey};
    use rust_decimal_macros::dec;

    use crate::coupon::CouponFrequency;

    fn party(name: &str, seed: u8) -> Party {
        Party::new(name, PublicKey::from_bytes([seed; 32]))
    }

    fn sample_bond() -> BondRecord {
        BondRecord::builder()
            .issuer(party("Alice Corp", 1))
            .owner(party("Bob Ltd", 2))
            .issue_date(Date::from_ymd(2025, 6, 15).unwrap())
            .maturity_date(Date::from_ymd(2030, 6, 15).unwrap())
            .principal(Amount::new(dec!(1000), Currency::GBP))
            .coupon_rate(dec!(0.05))
            .coupon_frequency(CouponFrequency::Annual)
            .build()
            .unwrap()
    }

    #[test]
    fn test_issue_shape() {
        let bond = sample_bond();
        let view = build_issue(&bond);

        assert!(view.inputs().is_empty());
        assert_eq!(view.bond_outputs(), vec![&bond]);
        let command = view.single_command().unwrap();
        assert_eq!(command.kind(), CommandKind::Issue);
        assert_eq!(command.signers().len(), 2);
    }

    #[test]
    fn test_transfer_shape() {
        let bond = sample_bond();
        let charlie = party("Charlie Plc", 3);
        let (transferred, view) = build_transfer(&bond, &charlie);

        assert_eq!(transferred.owner(), &charlie);
        assert_eq!(transferred.linear_id(), bond.linear_id());
        assert_eq!(view.bond_inputs(), vec![&bond]);
        assert_eq!(view.bond_outputs(), vec![&transferred]);
        let command = view.single_command().unwrap();
        assert_eq!(command.kind(), CommandKind::Transfer);
        assert!(command.signers().contains(bond.owner().key()));
        assert!(command.signers().contains(charlie.key()));
    }

    #[test]
    fn test_coupon_payment_shape() {
        let bond = sample_bond();
        let coupon = bond.next_payable_coupon(bond.issue_date()).unwrap();
        let view = build_coupon_payment(&bond, &coupon);

        let cash = view.cash_outputs();
        assert_eq!(cash.len(), 1);
        assert_eq!(cash[0].owner(), bond.owner());
        assert_eq!(
            cash[0].amount(),
            &Amount::new(dec!(50.00), Currency::GBP)
        );
    }

    #[test]
    fn test_settlement_shape() {
        let bond = sample_bond();
        let view = build_settlement(&bond);

        assert_eq!(view.bond_inputs(), vec![&bond]);
        assert!(view.bond_outputs().is_empty());
        let cash = view.cash_outputs();
        assert_eq!(cash.len(), 1);
        assert_eq!(cash[0].amount(), bond.principal());
        assert_eq!(
            view.single_command().unwrap().kind(),
            CommandKind::Settle
        );
    }
}
