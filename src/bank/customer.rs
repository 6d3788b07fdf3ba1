//! Customer identity and account ownership.
use crate::bank::{
    Account, TransactionError,
    types::{AccountNumber, CustomerId},
};

/// A bank customer owning an ordered collection of accounts.
#[derive(Debug, Clone)]
pub struct Customer {
    /// The unique ID of the customer.
    id: CustomerId,

    first_name: String,
    last_name: String,

    /// The birth date in the format YYYY-MM-DD.
    birth_date: String,

    address: String,
    phone_number: String,

    /// The accounts owned by this customer, in attachment order.
    accounts: Vec<Account>,
}

impl Customer {
    /// Creates a new customer with no accounts attached.
    pub fn new(
        id: CustomerId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: impl Into<String>,
        address: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Customer {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: birth_date.into(),
            address: address.into(),
            phone_number: phone_number.into(),
            accounts: Vec::new(),
        }
    }

    /// Gets the customer ID.
    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// The customer's full name, as it appears in audit records.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Gets the accounts owned by this customer.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub(crate) fn accounts_mut(&mut self) -> &mut [Account] {
        &mut self.accounts
    }

    /// Attaches an account to this customer.
    /// Rejects an account number already in use by this customer.
    pub fn add_account(&mut self, account: Account) -> Result<(), TransactionError> {
        if self.accounts.iter().any(|a| a.number() == account.number()) {
            return Err(TransactionError::DuplicateAccount);
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Finds an account by its number.
    pub fn account_by_number(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number() == number)
    }

    /// Finds an account by its number, for mutation.
    pub fn account_by_number_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number() == number)
    }

    /// Finds the first account whose variant name matches `name`,
    /// case-insensitively.
    pub fn account_by_type(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.kind().matches_name(name))
    }

    pub(crate) fn account_index(&self, number: AccountNumber) -> Option<usize> {
        self.accounts.iter().position(|a| a.number() == number)
    }
}

#[cfg(test)]
mod tests {
    use super::Customer;
    use crate::bank::{Account, TransactionError};

    fn sample_customer() -> Customer {
        let mut customer = Customer::new(
            1,
            "Alice",
            "Anderson",
            "1990-04-12",
            "123 Main St, El Paso, TX",
            "915-555-0100",
        );
        customer.add_account(Account::checking(100, 50_000)).unwrap();
        customer.add_account(Account::savings(101, 0)).unwrap();
        customer.add_account(Account::credit(102, 3_000_000, 0)).unwrap();
        customer
    }

    #[test]
    fn test_account_by_number() {
        let customer = sample_customer();
        assert_eq!(customer.account_by_number(101).unwrap().number(), 101);
        assert!(customer.account_by_number(999).is_none());
    }

    #[test]
    fn test_account_by_type_is_case_insensitive() {
        let customer = sample_customer();
        assert_eq!(customer.account_by_type("checking").unwrap().number(), 100);
        assert_eq!(customer.account_by_type("SAVINGS").unwrap().number(), 101);
        assert_eq!(customer.account_by_type("Credit").unwrap().number(), 102);
        assert!(customer.account_by_type("brokerage").is_none());
    }

    #[test]
    fn test_add_account_rejects_duplicate_number() {
        let mut customer = sample_customer();
        assert!(matches!(
            customer.add_account(Account::savings(100, 0)),
            Err(TransactionError::DuplicateAccount)
        ));
        assert_eq!(customer.accounts().len(), 3);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample_customer().full_name(), "Alice Anderson");
    }
}
