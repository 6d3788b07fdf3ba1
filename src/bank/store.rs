//! Loading and saving the delimited customer records file.
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize, Serializer, de};
use thiserror::Error;

use crate::bank::{
    Account, Customer, TransactionError,
    types::{AccountNumber, CustomerId, DECIMAL_PRECISION, Money},
};

/// Errors raised while loading or saving customer records.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read or write customer records: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid customer record: {0}")]
    Record(#[from] TransactionError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Identifier deserializer with the loader's tolerance policy: an
/// unparseable field becomes zero instead of failing the whole record.
fn deserialize_number_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().parse().unwrap_or_default())
}

/// Monetary deserializer with the same tolerance policy, converting to
/// fixed-point representation.
fn deserialize_money_or_default<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    let parsed: f64 = value.trim().parse().unwrap_or_default();
    Ok((parsed * DECIMAL_PRECISION) as Money)
}

fn serialize_money<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    (*money as f64 / DECIMAL_PRECISION).serialize(serializer)
}

/// One row of the persisted customers file: identity fields followed by
/// the checking, savings and credit account columns.
#[derive(Deserialize, Serialize, Debug)]
pub struct CustomerRecord {
    #[serde(
        rename = "Identification Number",
        deserialize_with = "deserialize_number_or_default"
    )]
    id: CustomerId,

    #[serde(rename = "First Name")]
    first_name: String,

    #[serde(rename = "Last Name")]
    last_name: String,

    #[serde(rename = "Date of Birth")]
    birth_date: String,

    #[serde(rename = "Address")]
    address: String,

    #[serde(rename = "Phone Number")]
    phone_number: String,

    #[serde(
        rename = "Checking Account Number",
        deserialize_with = "deserialize_number_or_default"
    )]
    checking_number: AccountNumber,

    #[serde(
        rename = "Checking Starting Balance",
        deserialize_with = "deserialize_money_or_default",
        serialize_with = "serialize_money"
    )]
    checking_balance: Money,

    #[serde(
        rename = "Savings Account Number",
        deserialize_with = "deserialize_number_or_default"
    )]
    savings_number: AccountNumber,

    #[serde(
        rename = "Savings Starting Balance",
        deserialize_with = "deserialize_money_or_default",
        serialize_with = "serialize_money"
    )]
    savings_balance: Money,

    #[serde(
        rename = "Credit Account Number",
        deserialize_with = "deserialize_number_or_default"
    )]
    credit_number: AccountNumber,

    #[serde(
        rename = "Credit Max",
        deserialize_with = "deserialize_money_or_default",
        serialize_with = "serialize_money"
    )]
    credit_limit: Money,

    #[serde(
        rename = "Credit Starting Balance",
        deserialize_with = "deserialize_money_or_default",
        serialize_with = "serialize_money"
    )]
    credit_balance: Money,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = TransactionError;

    /// Builds one customer with the checking, savings and credit accounts
    /// attached in that order.
    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        let mut customer = Customer::new(
            record.id,
            record.first_name,
            record.last_name,
            record.birth_date,
            record.address,
            record.phone_number,
        );
        customer.add_account(Account::checking(
            record.checking_number,
            record.checking_balance,
        ))?;
        customer.add_account(Account::savings(
            record.savings_number,
            record.savings_balance,
        ))?;
        customer.add_account(Account::credit(
            record.credit_number,
            record.credit_limit,
            record.credit_balance,
        ))?;
        Ok(customer)
    }
}

impl From<&Customer> for CustomerRecord {
    /// Reads current balances and the credit limit back out of the
    /// accounts, with zeros standing in for an absent account.
    fn from(customer: &Customer) -> Self {
        let checking = customer.account_by_type("Checking");
        let savings = customer.account_by_type("Savings");
        let credit = customer.account_by_type("Credit");
        CustomerRecord {
            id: customer.id(),
            first_name: customer.first_name().to_owned(),
            last_name: customer.last_name().to_owned(),
            birth_date: customer.birth_date().to_owned(),
            address: customer.address().to_owned(),
            phone_number: customer.phone_number().to_owned(),
            checking_number: checking.map_or(0, Account::number),
            checking_balance: checking.map_or(0, Account::balance),
            savings_number: savings.map_or(0, Account::number),
            savings_balance: savings.map_or(0, Account::balance),
            credit_number: credit.map_or(0, Account::number),
            credit_limit: credit.and_then(Account::credit_limit).unwrap_or_default(),
            credit_balance: credit.map_or(0, Account::balance),
        }
    }
}

/// Reads customer records, constructing one customer per row.
pub fn read_customers<R: Read>(reader: R) -> Result<Vec<Customer>, StoreError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut customers = Vec::new();
    for record in csv_reader.deserialize::<CustomerRecord>() {
        customers.push(Customer::try_from(record?)?);
    }
    Ok(customers)
}

/// Writes customer records to any writer, one row per customer.
pub fn write_customers<W: Write>(writer: W, customers: &[Customer]) -> Result<(), StoreError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for customer in customers {
        csv_writer.serialize(CustomerRecord::from(customer))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Saves customer records to a file.
pub fn save_customers(path: impl AsRef<Path>, customers: &[Customer]) -> Result<(), StoreError> {
    write_customers(std::fs::File::create(path)?, customers)
}

#[cfg(test)]
mod tests {
    use super::{StoreError, read_customers, write_customers};
    use crate::bank::{AccountKind, TransactionError};

    const HEADER: &str = "Identification Number,First Name,Last Name,Date of Birth,Address,\
                          Phone Number,Checking Account Number,Checking Starting Balance,\
                          Savings Account Number,Savings Starting Balance,\
                          Credit Account Number,Credit Max,Credit Starting Balance";

    #[test]
    fn test_read_one_record() {
        let data = format!(
            "{HEADER}\n1,Alice,Anderson,1990-04-12,\"123 Main St, El Paso, TX\",\
             915-555-0100,100,500.00,101,25.50,200,300.00,-250.00\n"
        );
        let customers = read_customers(data.as_bytes()).unwrap();
        assert_eq!(customers.len(), 1);

        let customer = &customers[0];
        assert_eq!(customer.id(), 1);
        assert_eq!(customer.address(), "123 Main St, El Paso, TX");
        assert_eq!(customer.accounts().len(), 3);

        let checking = customer.account_by_type("Checking").unwrap();
        assert_eq!(checking.number(), 100);
        assert_eq!(checking.balance(), 5_000_000);

        let savings = customer.account_by_type("Savings").unwrap();
        assert_eq!(savings.balance(), 255_000);

        let credit = customer.account_by_type("Credit").unwrap();
        assert_eq!(credit.kind(), AccountKind::Credit { credit_limit: 3_000_000 });
        assert_eq!(credit.balance(), -2_500_000);
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        let data = format!(
            "{HEADER}\n1,Alice,Anderson,1990-04-12,123 Main St,\
             915-555-0100,100,oops,101,25.50,200,,-250.00\n"
        );
        let customers = read_customers(data.as_bytes()).unwrap();
        let customer = &customers[0];
        assert_eq!(customer.account_by_number(100).unwrap().balance(), 0);
        assert_eq!(
            customer.account_by_number(200).unwrap().kind(),
            AccountKind::Credit { credit_limit: 0 }
        );
    }

    #[test]
    fn test_duplicate_account_numbers_fail_the_load() {
        let data = format!(
            "{HEADER}\n1,Alice,Anderson,1990-04-12,123 Main St,\
             915-555-0100,100,500.00,100,25.50,200,300.00,0\n"
        );
        assert!(matches!(
            read_customers(data.as_bytes()),
            Err(StoreError::Record(TransactionError::DuplicateAccount))
        ));
    }

    #[test]
    fn test_round_trip() {
        let data = format!(
            "{HEADER}\n1,Alice,Anderson,1990-04-12,\"123 Main St, El Paso, TX\",\
             915-555-0100,100,500.00,101,25.50,200,300.00,-250.00\n\
             2,Bob,Brown,1985-09-30,456 Oak Ave,915-555-0101,300,10.00,301,5.00,400,500.00,0\n"
        );
        let customers = read_customers(data.as_bytes()).unwrap();

        let mut buffer = Vec::new();
        write_customers(&mut buffer, &customers).unwrap();
        let reloaded = read_customers(buffer.as_slice()).unwrap();

        assert_eq!(reloaded.len(), customers.len());
        for (before, after) in customers.iter().zip(&reloaded) {
            assert_eq!(before.id(), after.id());
            assert_eq!(before.address(), after.address());
            for (a, b) in before.accounts().iter().zip(after.accounts()) {
                assert_eq!(a.number(), b.number());
                assert_eq!(a.balance(), b.balance());
                assert_eq!(a.kind(), b.kind());
            }
        }
    }
}
