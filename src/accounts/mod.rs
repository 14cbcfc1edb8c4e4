//! Scenario account metadata and loading

mod data;
pub mod loader;

pub use data::{account_name, vesting_account_ids, Account, AccountId, AccountType, TaxWrapper};
pub use loader::{load_accounts, load_accounts_from_reader};
