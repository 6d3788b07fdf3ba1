//! Operation records submitted by a driver, one per ledger transaction.
use serde::{Deserialize, de};

use crate::bank::types::{AccountNumber, CustomerId, DECIMAL_PRECISION, Money};

/// Enum representing the kind of ledger operation.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Inquiry,
    Deposit,
    Withdrawal,
    Transfer,
    Payment,
    Interest,
}

/// Custom deserializer for monetary values to handle fixed-point representation.
fn deserialize_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| (v * DECIMAL_PRECISION) as Money))
}

/// Represents one ledger operation.
///
/// The target fields are used by transfers and payments; a transfer with no
/// target customer stays within the acting customer's own accounts.
#[derive(Deserialize, Debug, Clone)]
pub struct Operation {
    /// The kind of operation to perform.
    #[serde(rename = "type")]
    op_type: OperationType,

    /// The ID of the customer acting on their own account.
    #[serde(rename = "customer")]
    customer_id: CustomerId,

    /// The number of the account the operation acts on.
    #[serde(rename = "account")]
    account_number: AccountNumber,

    /// The ID of the counterparty customer, if any.
    #[serde(rename = "to_customer", default)]
    target_customer_id: Option<CustomerId>,

    /// The number of the counterparty account, if any.
    #[serde(rename = "to_account", default)]
    target_account_number: Option<AccountNumber>,

    /// The amount involved in the operation, if applicable.
    #[serde(rename = "amount", deserialize_with = "deserialize_money", default)]
    amount: Option<Money>,
}

impl Operation {
    /// Gets the kind of this operation.
    pub fn op_type(&self) -> OperationType {
        self.op_type
    }

    /// Gets the acting customer's ID.
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Gets the acted-on account number.
    pub fn account_number(&self) -> AccountNumber {
        self.account_number
    }

    /// Gets the counterparty customer ID, if any.
    pub fn target_customer_id(&self) -> Option<CustomerId> {
        self.target_customer_id
    }

    /// Gets the counterparty account number, if any.
    pub fn target_account_number(&self) -> Option<AccountNumber> {
        self.target_account_number
    }

    /// Gets the amount of the operation, if applicable.
    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    #[cfg(test)]
    pub fn new(
        op_type: OperationType,
        customer_id: CustomerId,
        account_number: AccountNumber,
        target_customer_id: Option<CustomerId>,
        target_account_number: Option<AccountNumber>,
        amount: Option<Money>,
    ) -> Self {
        Operation {
            op_type,
            customer_id,
            account_number,
            target_customer_id,
            target_account_number,
            amount,
        }
    }
}
