//! Banking module for handling customers, accounts, ledger operations,
//! auditing, and persistence.
mod account;
mod audit;
mod customer;
mod ledger;
mod store;
mod transaction;
mod types;

pub use account::*;
pub use audit::*;
pub use customer::*;
pub use ledger::*;
pub use store::*;
pub use transaction::*;
pub use types::*;
