//! Load scenario accounts from the backend's JSON export
//!
//! Accepts either a bare array of accounts or a scenario object carrying an
//! `accounts` array.

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::Account;
use crate::error::Result;

#[derive(Deserialize)]
#[serde(untagged)]
enum AccountsDocument {
    Bare(Vec<Account>),
    Scenario { accounts: Vec<Account> },
}

/// Load accounts from a JSON file
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<Account>> {
    let file = File::open(path)?;
    load_accounts_from_reader(BufReader::new(file))
}

/// Load accounts from any reader
pub fn load_accounts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Account>> {
    let document: AccountsDocument = serde_json::from_reader(reader)?;
    let accounts = match document {
        AccountsDocument::Bare(accounts) => accounts,
        AccountsDocument::Scenario { accounts } => accounts,
    };

    log::info!("Loaded {} accounts", accounts.len());
    Ok(accounts)
}
