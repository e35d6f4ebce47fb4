//! The read-only transaction view the validator consumes.
//!
//! The external platform assembles a candidate transition — consumed
//! inputs, produced outputs, one command, the keys that signed — and hands
//! it to [`verify`](crate::validator::verify) as a [`TransactionView`]. The
//! view is a projection, not a live object: constructed immediately before
//! validation, discarded after, never cached or mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use covenant_core::types::{Amount, Party, PublicKey};

use crate::bond::BondRecord;
use crate::error::VerifyError;

/// A cash holding payable to one party.
///
/// Stand-in for the platform's fungible cash state; the validator only ever
/// reads the payee and the amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashState {
    /// The party the cash is payable to
    owner: Party,
    /// The amount of cash
    amount: Amount,
}

impl CashState {
    /// Creates a new cash state.
    #[must_use]
    pub fn new(owner: Party, amount: Amount) -> Self {
        Self { owner, amount }
    }

    /// Returns the payee.
    #[must_use]
    pub fn owner(&self) -> &Party {
        &self.owner
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> &Amount {
        &self.amount
    }
}

impl fmt::Display for CashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.amount, self.owner)
    }
}

/// A state consumed or produced by a transition.
///
/// The rule set is closed, so the state universe is a tagged union rather
/// than an open trait: a state is either a bond version or cash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerState {
    /// One version of a bond
    Bond(BondRecord),
    /// A fungible cash holding
    Cash(CashState),
}

impl LedgerState {
    /// Returns the bond record, if this state is one.
    #[must_use]
    pub fn as_bond(&self) -> Option<&BondRecord> {
        match self {
            LedgerState::Bond(bond) => Some(bond),
            LedgerState::Cash(_) => None,
        }
    }

    /// Returns the cash state, if this state is one.
    #[must_use]
    pub fn as_cash(&self) -> Option<&CashState> {
        match self {
            LedgerState::Cash(cash) => Some(cash),
            LedgerState::Bond(_) => None,
        }
    }
}

impl From<BondRecord> for LedgerState {
    fn from(bond: BondRecord) -> Self {
        LedgerState::Bond(bond)
    }
}

impl From<CashState> for LedgerState {
    fn from(cash: CashState) -> Self {
        LedgerState::Cash(cash)
    }
}

/// The four transitions a bond can undergo.
///
/// Commands carry no payload — the states themselves hold all transition
/// data. The enum is intentionally closed: the validator's dispatch is a
/// single exhaustive match with no extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Create a bond on the ledger
    Issue,
    /// Move ownership to another party
    Transfer,
    /// Pay a periodic coupon
    PayCoupon,
    /// Extinguish the bond against a cash payment of the principal
    Settle,
}

impl CommandKind {
    /// Returns the command's wire name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Issue => "Issue",
            CommandKind::Transfer => "Transfer",
            CommandKind::PayCoupon => "PayCoupon",
            CommandKind::Settle => "Settle",
        }
    }
}

impl FromStr for CommandKind {
    type Err = VerifyError;

    /// Parses a platform command name.
    ///
    /// This is the adapter seam where an out-of-family command becomes
    /// [`VerifyError::UnrecognizedCommand`]; past this point the command
    /// universe is closed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Issue" => Ok(CommandKind::Issue),
            "Transfer" => Ok(CommandKind::Transfer),
            "PayCoupon" => Ok(CommandKind::PayCoupon),
            "Settle" => Ok(CommandKind::Settle),
            other => Err(VerifyError::UnrecognizedCommand {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A transition command together with the keys that signed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Which transition is proposed
    kind: CommandKind,
    /// De-duplicated signer keys
    signers: BTreeSet<PublicKey>,
}

impl Command {
    /// Creates a command; duplicate keys collapse into the set.
    #[must_use]
    pub fn new(kind: CommandKind, signers: impl IntoIterator<Item = PublicKey>) -> Self {
        Self {
            kind,
            signers: signers.into_iter().collect(),
        }
    }

    /// Returns the command kind.
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Returns the de-duplicated signer key set.
    #[must_use]
    pub fn signers(&self) -> &BTreeSet<PublicKey> {
        &self.signers
    }
}

/// A proposed transition as presented to the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionView {
    /// States consumed by the transition
    inputs: Vec<LedgerState>,
    /// States produced by the transition
    outputs: Vec<LedgerState>,
    /// Attached commands; a well-formed view carries exactly one
    commands: Vec<Command>,
}

impl TransactionView {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> TransactionViewBuilder {
        TransactionViewBuilder::default()
    }

    /// Returns the consumed input states.
    #[must_use]
    pub fn inputs(&self) -> &[LedgerState] {
        &self.inputs
    }

    /// Returns the produced output states.
    #[must_use]
    pub fn outputs(&self) -> &[LedgerState] {
        &self.outputs
    }

    /// Returns the attached commands.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns the bond records among the inputs.
    #[must_use]
    pub fn bond_inputs(&self) -> Vec<&BondRecord> {
        self.inputs.iter().filter_map(LedgerState::as_bond).collect()
    }

    /// Returns the bond records among the outputs.
    #[must_use]
    pub fn bond_outputs(&self) -> Vec<&BondRecord> {
        self.outputs.iter().filter_map(LedgerState::as_bond).collect()
    }

    /// Returns the cash states among the outputs.
    #[must_use]
    pub fn cash_outputs(&self) -> Vec<&CashState> {
        self.outputs.iter().filter_map(LedgerState::as_cash).collect()
    }

    /// Returns the single attached command.
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::MalformedTransaction` when the view carries
    /// zero or several commands.
    pub fn single_command(&self) -> Result<&Command, VerifyError> {
        match self.commands.as_slice() {
            [command] => Ok(command),
            other => Err(VerifyError::MalformedTransaction { count: other.len() }),
        }
    }
}

/// Builder for [`TransactionView`].
#[derive(Debug, Clone, Default)]
pub struct TransactionViewBuilder {
    inputs: Vec<LedgerState>,
    outputs: Vec<LedgerState>,
    commands: Vec<Command>,
}

impl TransactionViewBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a consumed input state.
    #[must_use]
    pub fn add_input(mut self, state: impl Into<LedgerState>) -> Self {
        self.inputs.push(state.into());
        self
    }

    /// Adds a produced output state.
    #[must_use]
    pub fn add_output(mut self, state: impl Into<LedgerState>) -> Self {
        self.outputs.push(state.into());
        self
    }

    /// Attaches a command.
    #[must_use]
    pub fn add_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Builds the view.
    #[must_use]
    pub fn build(self) -> TransactionView {
        TransactionView {
            inputs: self.inputs,
            outputs: self.outputs,
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::types::{Currency, Date};
    use crate::coupon::CouponFrequency;
    use rust_decimal_macros::dec;

    fn party(name: &str, seed: u8) -> Party {
        Party::new(name, PublicKey::from_bytes([seed; 32]))
    }

    fn sample_bond() -> BondRecord {
        BondRecord::builder()
            .issuer(party("Alice Corp", 1))
            .owner(party("Bob Ltd", 2))
            .issue_date(Date::from_ymd(2025, 6, 15).unwrap())
            .maturity_date(Date::from_ymd(2026, 6, 15).unwrap())
            .principal(Amount::new(dec!(1000), Currency::GBP))
            .coupon_rate(dec!(0.05))
            .coupon_frequency(CouponFrequency::Annual)
            .build()
            .unwrap()
    }

    #[test]
    fn test_command_kind_parsing() {
        assert_eq!("Issue".parse::<CommandKind>().unwrap(), CommandKind::Issue);
        assert_eq!("Settle".parse::<CommandKind>().unwrap(), CommandKind::Settle);

        let err = "Redeem".parse::<CommandKind>().unwrap_err();
        assert!(
            matches!(err, VerifyError::UnrecognizedCommand { ref name } if name == "Redeem")
        );
    }

    #[test]
    fn test_command_deduplicates_signers() {
        let key = PublicKey::from_bytes([5u8; 32]);
        let command = Command::new(CommandKind::Issue, vec![key, key, key]);
        assert_eq!(command.signers().len(), 1);
    }

    #[test]
    fn test_typed_output_access() {
        let bond = sample_bond();
        let cash = CashState::new(
            party("Bob Ltd", 2),
            Amount::new(dec!(50), Currency::GBP),
        );
        let view = TransactionView::builder()
            .add_output(bond.clone())
            .add_output(cash.clone())
            .build();

        assert_eq!(view.outputs().len(), 2);
        assert_eq!(view.bond_outputs(), vec![&bond]);
        assert_eq!(view.cash_outputs(), vec![&cash]);
        assert!(view.bond_inputs().is_empty());
    }

    #[test]
    fn test_single_command_gate() {
        let empty = TransactionView::builder().build();
        assert!(matches!(
            empty.single_command(),
            Err(VerifyError::MalformedTransaction { count: 0 })
        ));

        let doubled = TransactionView::builder()
            .add_command(Command::new(CommandKind::Issue, vec![]))
            .add_command(Command::new(CommandKind::Transfer, vec![]))
            .build();
        assert!(matches!(
            doubled.single_command(),
            Err(VerifyError::MalformedTransaction { count: 2 })
        ));

        let single = TransactionView::builder()
            .add_command(Command::new(CommandKind::PayCoupon, vec![]))
            .build();
        assert_eq!(single.single_command().unwrap().kind(), CommandKind::PayCoupon);
    }

    #[test]
    fn test_serde_round_trip() {
        let view = TransactionView::builder()
            .add_input(sample_bond())
            .add_command(Command::new(
                CommandKind::Settle,
                vec![PublicKey::from_bytes([1u8; 32]), PublicKey::from_bytes([2u8; 32])],
            ))
            .build();

        let json = serde_json::to_string(&view).unwrap();
        let parsed: TransactionView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, parsed);
    }
}
