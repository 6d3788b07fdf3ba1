//! The ledger: the customer registry, operation dispatch, and the
//! sequential processing loop.
use tokio::sync::mpsc;

use crate::bank::{
    Account, AccountKind, AuditEvent, AuditLog, Customer, Operation, OperationType,
    TransactionError,
    types::{CustomerId, Money},
};

/// The ledger for one run: every customer, the operation receiver, and the
/// transaction log the completed operations are appended to.
pub struct Ledger {
    /// All customers, in load order.
    customers: Vec<Customer>,
    /// A channel receiver for incoming operations.
    receiver: mpsc::Receiver<Operation>,
    /// The transaction log collaborator.
    audit: AuditLog,
}

impl Ledger {
    /// Creates a new ledger over the loaded customers.
    pub fn new(
        customers: Vec<Customer>,
        receiver: mpsc::Receiver<Operation>,
        audit: AuditLog,
    ) -> Self {
        Ledger {
            customers,
            receiver,
            audit,
        }
    }

    /// Gets all customers, in load order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    fn customer_index(&self, id: CustomerId) -> Result<usize, TransactionError> {
        self.customers
            .iter()
            .position(|c| c.id() == id)
            .ok_or(TransactionError::CustomerNotFound)
    }

    fn require_amount(operation: &Operation) -> Result<Money, TransactionError> {
        operation.amount().ok_or(TransactionError::MissingField)
    }

    /// Applies one operation to the ledger.
    ///
    /// Resolution failures and account-rule failures are returned without
    /// any state change; on success the returned event describes the
    /// completed operation for the transaction log.
    pub fn process_operation(
        &mut self,
        operation: &Operation,
    ) -> Result<AuditEvent, TransactionError> {
        match operation.op_type() {
            OperationType::Inquiry => self.inquire(operation),
            OperationType::Deposit => self.deposit(operation),
            OperationType::Withdrawal => self.withdraw(operation),
            OperationType::Transfer => self.transfer(operation),
            OperationType::Payment => self.pay(operation),
            OperationType::Interest => self.add_interest(operation),
        }
    }

    fn inquire(&self, operation: &Operation) -> Result<AuditEvent, TransactionError> {
        let index = self.customer_index(operation.customer_id())?;
        let customer = &self.customers[index];
        let account = customer
            .account_by_number(operation.account_number())
            .ok_or(TransactionError::AccountNotFound)?;
        Ok(AuditEvent::Inquiry {
            actor: customer.full_name(),
            kind: account.kind(),
            number: account.number(),
            balance: account.balance(),
        })
    }

    fn deposit(&mut self, operation: &Operation) -> Result<AuditEvent, TransactionError> {
        let amount = Self::require_amount(operation)?;
        let index = self.customer_index(operation.customer_id())?;
        let customer = &mut self.customers[index];
        let actor = customer.full_name();
        let account = customer
            .account_by_number_mut(operation.account_number())
            .ok_or(TransactionError::AccountNotFound)?;
        account.deposit(amount)?;
        Ok(AuditEvent::Deposit {
            actor,
            kind: account.kind(),
            number: account.number(),
            amount,
            balance: account.balance(),
        })
    }

    fn withdraw(&mut self, operation: &Operation) -> Result<AuditEvent, TransactionError> {
        let amount = Self::require_amount(operation)?;
        let index = self.customer_index(operation.customer_id())?;
        let customer = &mut self.customers[index];
        let actor = customer.full_name();
        let account = customer
            .account_by_number_mut(operation.account_number())
            .ok_or(TransactionError::AccountNotFound)?;
        account.withdraw(amount)?;
        Ok(AuditEvent::Withdrawal {
            actor,
            kind: account.kind(),
            number: account.number(),
            amount,
            balance: account.balance(),
        })
    }

    fn transfer(&mut self, operation: &Operation) -> Result<AuditEvent, TransactionError> {
        let amount = Self::require_amount(operation)?;
        let target_number = operation
            .target_account_number()
            .ok_or(TransactionError::MissingField)?;
        // A transfer with no target customer stays within the acting
        // customer's own accounts.
        let target_customer_id = operation
            .target_customer_id()
            .unwrap_or(operation.customer_id());

        let source_customer = self.customer_index(operation.customer_id())?;
        let target_customer = self.customer_index(target_customer_id)?;
        let source_account = self.customers[source_customer]
            .account_index(operation.account_number())
            .ok_or(TransactionError::AccountNotFound)?;
        let target_account = self.customers[target_customer]
            .account_index(target_number)
            .ok_or(TransactionError::AccountNotFound)?;

        if source_customer == target_customer && source_account == target_account {
            // A transfer onto the same account still has to pass
            // validation; its net effect on the balance is zero.
            let account = &mut self.customers[source_customer].accounts_mut()[source_account];
            account.withdraw(amount)?;
            account.deposit(amount)?;
        } else {
            let (source, target) = account_pair_mut(
                &mut self.customers,
                (source_customer, source_account),
                (target_customer, target_account),
            );
            source.transfer(target, amount)?;
        }

        let source = &self.customers[source_customer].accounts()[source_account];
        let target = &self.customers[target_customer].accounts()[target_account];
        Ok(AuditEvent::Transfer {
            actor: self.customers[source_customer].full_name(),
            recipient: self.customers[target_customer].full_name(),
            source_kind: source.kind(),
            source_number: source.number(),
            target_kind: target.kind(),
            target_number: target.number(),
            amount,
            source_balance: source.balance(),
            target_balance: target.balance(),
        })
    }

    fn pay(&mut self, operation: &Operation) -> Result<AuditEvent, TransactionError> {
        let amount = Self::require_amount(operation)?;
        let receiver_id = operation
            .target_customer_id()
            .ok_or(TransactionError::MissingField)?;

        let payer = self.customer_index(operation.customer_id())?;
        let receiver = self.customer_index(receiver_id)?;
        let payer_account = self.customers[payer]
            .account_index(operation.account_number())
            .ok_or(TransactionError::AccountNotFound)?;
        // The receiver account is explicit when given; otherwise the
        // payment lands in the receiver's first-listed account.
        let receiver_account = match operation.target_account_number() {
            Some(number) => self.customers[receiver]
                .account_index(number)
                .ok_or(TransactionError::AccountNotFound)?,
            None if self.customers[receiver].accounts().is_empty() => {
                return Err(TransactionError::AccountNotFound);
            }
            None => 0,
        };

        if !matches!(
            self.customers[payer].accounts()[payer_account].kind(),
            AccountKind::Credit { .. }
        ) {
            return Err(TransactionError::WrongAccountType);
        }

        if payer == receiver && payer_account == receiver_account {
            let account = &mut self.customers[payer].accounts_mut()[payer_account];
            account.withdraw(amount)?;
            account.deposit(amount)?;
        } else {
            let (source, target) = account_pair_mut(
                &mut self.customers,
                (payer, payer_account),
                (receiver, receiver_account),
            );
            source.pay(target, amount)?;
        }

        let source = &self.customers[payer].accounts()[payer_account];
        Ok(AuditEvent::Payment {
            actor: self.customers[payer].full_name(),
            recipient: self.customers[receiver].full_name(),
            kind: source.kind(),
            number: source.number(),
            amount,
            balance: source.balance(),
        })
    }

    fn add_interest(&mut self, operation: &Operation) -> Result<AuditEvent, TransactionError> {
        let index = self.customer_index(operation.customer_id())?;
        let customer = &mut self.customers[index];
        let actor = customer.full_name();
        let account = customer
            .account_by_number_mut(operation.account_number())
            .ok_or(TransactionError::AccountNotFound)?;
        account.add_interest()?;
        Ok(AuditEvent::Interest {
            actor,
            kind: account.kind(),
            number: account.number(),
            balance: account.balance(),
        })
    }

    /// The account description echoed to stdout for balance inquiries.
    fn inquiry_details(&self, operation: &Operation) -> Option<String> {
        if operation.op_type() != OperationType::Inquiry {
            return None;
        }
        let customer = self
            .customers
            .iter()
            .find(|c| c.id() == operation.customer_id())?;
        Some(customer.account_by_number(operation.account_number())?.details())
    }

    /// Runs the processing loop: operations are applied one at a time in
    /// arrival order, and each success is appended to the transaction log.
    pub async fn run(&mut self) {
        while let Some(operation) = self.receiver.recv().await {
            match self.process_operation(&operation) {
                Ok(event) => {
                    if let Some(details) = self.inquiry_details(&operation) {
                        println!("{details}");
                    }
                    if let Err(e) = self.audit.append(&event) {
                        eprintln!("Error writing audit record: {e}");
                    }
                }
                Err(e) => eprintln!("Error processing operation: {e}"),
            }
        }
    }
}

/// Mutable references to two distinct accounts in the registry.
/// Callers must have checked that the two positions differ.
fn account_pair_mut(
    customers: &mut [Customer],
    source: (usize, usize),
    target: (usize, usize),
) -> (&mut Account, &mut Account) {
    debug_assert_ne!(source, target);
    if source.0 == target.0 {
        let accounts = customers[source.0].accounts_mut();
        if source.1 < target.1 {
            let (left, right) = accounts.split_at_mut(target.1);
            (&mut left[source.1], &mut right[0])
        } else {
            let (left, right) = accounts.split_at_mut(source.1);
            (&mut right[0], &mut left[target.1])
        }
    } else if source.0 < target.0 {
        let (left, right) = customers.split_at_mut(target.0);
        (
            &mut left[source.0].accounts_mut()[source.1],
            &mut right[0].accounts_mut()[target.1],
        )
    } else {
        let (left, right) = customers.split_at_mut(source.0);
        (
            &mut right[0].accounts_mut()[source.1],
            &mut left[target.0].accounts_mut()[target.1],
        )
    }
}
