//! Audit records for completed operations and the append-only transaction log.
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::bank::{
    AccountKind,
    types::{AccountNumber, Money, display_money},
};

/// The audit-relevant outcome of one completed operation.
///
/// The `Display` impl is the audit formatter: it renders who acted, what
/// they did, how much money moved, which account(s) were touched and the
/// resulting balance(s), in the same narrative shape for every kind.
#[derive(Debug, Clone)]
pub enum AuditEvent {
    Inquiry {
        actor: String,
        kind: AccountKind,
        number: AccountNumber,
        balance: Money,
    },
    Deposit {
        actor: String,
        kind: AccountKind,
        number: AccountNumber,
        amount: Money,
        balance: Money,
    },
    Withdrawal {
        actor: String,
        kind: AccountKind,
        number: AccountNumber,
        amount: Money,
        balance: Money,
    },
    Transfer {
        actor: String,
        recipient: String,
        source_kind: AccountKind,
        source_number: AccountNumber,
        target_kind: AccountKind,
        target_number: AccountNumber,
        amount: Money,
        source_balance: Money,
        target_balance: Money,
    },
    Payment {
        actor: String,
        recipient: String,
        kind: AccountKind,
        number: AccountNumber,
        amount: Money,
        balance: Money,
    },
    Interest {
        actor: String,
        kind: AccountKind,
        number: AccountNumber,
        balance: Money,
    },
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEvent::Inquiry {
                actor,
                kind,
                number,
                balance,
            } => write!(
                f,
                "{actor} made a balance inquiry on {kind}-{number}. \
                 {actor}'s Balance for {kind}-{number}: ${}",
                display_money(*balance),
            ),
            AuditEvent::Deposit {
                actor,
                kind,
                number,
                amount,
                balance,
            } => write!(
                f,
                "{actor} deposited ${} to {kind}-{number}. \
                 {actor}'s New Balance for {kind}-{number}: ${}",
                display_money(*amount),
                display_money(*balance),
            ),
            AuditEvent::Withdrawal {
                actor,
                kind,
                number,
                amount,
                balance,
            } => write!(
                f,
                "{actor} withdrew ${} in cash from {kind}-{number}. \
                 {actor}'s Balance for {kind}-{number}: ${}",
                display_money(*amount),
                display_money(*balance),
            ),
            AuditEvent::Transfer {
                actor,
                recipient,
                source_kind,
                source_number,
                target_kind,
                target_number,
                amount,
                source_balance,
                target_balance,
            } => write!(
                f,
                "{actor} transferred ${} from {source_kind}-{source_number} \
                 to {recipient}'s {target_kind}-{target_number}. \
                 {actor}'s New Balance for {source_kind}-{source_number}: ${}. \
                 {recipient}'s New Balance for {target_kind}-{target_number}: ${}",
                display_money(*amount),
                display_money(*source_balance),
                display_money(*target_balance),
            ),
            AuditEvent::Payment {
                actor,
                recipient,
                kind,
                number,
                amount,
                balance,
            } => write!(
                f,
                "{actor} paid {recipient} ${} from {kind}-{number}. \
                 {actor}'s New Balance for {kind}-{number}: ${}",
                display_money(*amount),
                display_money(*balance),
            ),
            AuditEvent::Interest {
                actor,
                kind,
                number,
                balance,
            } => write!(
                f,
                "{actor} earned interest on {kind}-{number}. \
                 {actor}'s New Balance for {kind}-{number}: ${}",
                display_money(*balance),
            ),
        }
    }
}

/// The append-only transaction log.
///
/// One formatted line is appended per completed operation; failed
/// operations never reach the log.
pub struct AuditLog {
    out: Box<dyn Write + Send>,
}

impl AuditLog {
    /// Opens the log file in append mode, creating it if necessary.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(AuditLog {
            out: Box::new(file),
        })
    }

    /// A log that discards everything appended to it.
    #[cfg(test)]
    pub fn discard() -> Self {
        AuditLog {
            out: Box::new(io::sink()),
        }
    }

    /// Appends one formatted audit record and flushes it to the backing file.
    pub fn append(&mut self, event: &AuditEvent) -> io::Result<()> {
        writeln!(self.out, "{event}")?;
        self.out.flush()
    }
}
