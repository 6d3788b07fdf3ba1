//! Account variants and their balance-mutation rules.
use thiserror::Error;

use crate::bank::types::{AccountNumber, Money, display_money};

/// Interest applied to savings balances, in basis points (2%).
const SAVINGS_INTEREST_BPS: i128 = 200;
const BPS_SCALE: i128 = 10_000;

/// The variant tag of an account, carrying variant-specific state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Checking,
    Savings,
    Credit { credit_limit: Money },
}

impl AccountKind {
    /// The variant name as it appears in audit records and type lookups.
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking",
            AccountKind::Savings => "Savings",
            AccountKind::Credit { .. } => "Credit",
        }
    }

    /// Case-insensitive match against the variant name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A balance-holding account owned by exactly one customer.
///
/// The balance is mutated only through the operations below; every failed
/// operation leaves it untouched. Checking and Savings balances never drop
/// below zero, a Credit balance never drops below the negated credit limit.
#[derive(Debug, Clone)]
pub struct Account {
    /// The unique account number associated with this account.
    number: AccountNumber,

    /// The current balance of the account.
    balance: Money,

    /// The variant of this account.
    kind: AccountKind,
}

impl Account {
    /// Creates a new checking account with an initial balance.
    pub fn checking(number: AccountNumber, balance: Money) -> Self {
        Account {
            number,
            balance,
            kind: AccountKind::Checking,
        }
    }

    /// Creates a new savings account with an initial balance.
    pub fn savings(number: AccountNumber, balance: Money) -> Self {
        Account {
            number,
            balance,
            kind: AccountKind::Savings,
        }
    }

    /// Creates a new credit account with a credit limit and an initial balance.
    pub fn credit(number: AccountNumber, credit_limit: Money, balance: Money) -> Self {
        Account {
            number,
            balance,
            kind: AccountKind::Credit { credit_limit },
        }
    }

    /// Gets the account number.
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// Gets the current balance.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Gets the variant tag of this account.
    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Gets the credit limit for a credit account, `None` for other variants.
    pub fn credit_limit(&self) -> Option<Money> {
        match self.kind {
            AccountKind::Credit { credit_limit } => Some(credit_limit),
            _ => None,
        }
    }

    /// The minimum permissible balance for this account's variant.
    fn floor(&self) -> Money {
        match self.kind {
            AccountKind::Credit { credit_limit } => -credit_limit,
            _ => 0,
        }
    }

    /// Deposits the specified amount into the account.
    /// The amount must be strictly positive.
    pub fn deposit(&mut self, amount: Money) -> Result<(), TransactionError> {
        if amount <= 0 {
            return Err(TransactionError::InvalidAmount);
        }
        self.balance += amount;
        Ok(())
    }

    /// Withdraws the specified amount from the account.
    ///
    /// The amount must be strictly positive and the resulting balance must
    /// respect the variant's floor.
    pub fn withdraw(&mut self, amount: Money) -> Result<(), TransactionError> {
        if amount <= 0 {
            return Err(TransactionError::InvalidAmount);
        }
        if self.balance - amount < self.floor() {
            return Err(TransactionError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(())
    }

    /// Moves the specified amount from this account into `target`.
    ///
    /// Composed as withdraw-then-deposit: if the withdrawal fails neither
    /// account changes, and once it succeeds the deposit cannot fail since
    /// the amount is already known to be positive.
    pub fn transfer(&mut self, target: &mut Account, amount: Money) -> Result<(), TransactionError> {
        self.withdraw(amount)?;
        target.deposit(amount)
    }

    /// Pays the specified amount from this credit account into `target`.
    /// Returns an error without touching either account if this is not a
    /// credit account or the payment would exceed the credit limit.
    pub fn pay(&mut self, target: &mut Account, amount: Money) -> Result<(), TransactionError> {
        if !matches!(self.kind, AccountKind::Credit { .. }) {
            return Err(TransactionError::WrongAccountType);
        }
        self.transfer(target, amount)
    }

    /// Adds the fixed 2% interest step to a savings balance.
    /// Repeated calls compound.
    pub fn add_interest(&mut self) -> Result<(), TransactionError> {
        if !matches!(self.kind, AccountKind::Savings) {
            return Err(TransactionError::WrongAccountType);
        }
        let earned = (self.balance as i128 * SAVINGS_INTEREST_BPS / BPS_SCALE) as Money;
        self.balance += earned;
        Ok(())
    }

    /// Returns a formatted description of the account: variant, number and
    /// balance, plus the credit limit for credit accounts.
    pub fn details(&self) -> String {
        let base = format!(
            "{} Account - Account Number: {}, Balance: {}",
            self.kind.name(),
            self.number,
            display_money(self.balance),
        );
        match self.kind {
            AccountKind::Credit { credit_limit } => {
                format!("{base}, Credit Limit: {}", display_money(credit_limit))
            }
            _ => base,
        }
    }
}

/// Errors that can occur while processing a ledger operation.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Customer not found")]
    CustomerNotFound,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Insufficient funds for transaction")]
    InsufficientFunds,
    #[error("Invalid account type for this operation")]
    WrongAccountType,
    #[error("Duplicate account number")]
    DuplicateAccount,
    #[error("Operation is missing a required field")]
    MissingField,
}
