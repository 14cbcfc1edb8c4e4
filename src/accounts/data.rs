//! Account metadata as exported by the scenario backend

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::money;

/// Identifier of an account within a scenario
pub type AccountId = u32;

/// Kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Cash,
    Investment,
    Pension,
    Property,
    Mortgage,
    Loan,
    /// Unvested equity grant
    #[serde(rename = "RSU Grant")]
    RsuGrant,
}

impl AccountType {
    /// Illiquid account kinds whose balance cannot be freely withdrawn
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            AccountType::Property | AccountType::Mortgage | AccountType::Loan | AccountType::RsuGrant
        )
    }

    pub fn is_debt(&self) -> bool {
        matches!(self, AccountType::Mortgage | AccountType::Loan)
    }

    /// Vesting equity, excluded from net worth until it vests
    pub fn is_vesting_equity(&self) -> bool {
        matches!(self, AccountType::RsuGrant)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Cash => "Cash",
            AccountType::Investment => "Investment",
            AccountType::Pension => "Pension",
            AccountType::Property => "Property",
            AccountType::Mortgage => "Mortgage",
            AccountType::Loan => "Loan",
            AccountType::RsuGrant => "RSU Grant",
        }
    }
}

/// Tax treatment of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxWrapper {
    None,
    #[serde(rename = "ISA")]
    Isa,
    #[serde(rename = "Lifetime ISA")]
    LifetimeIsa,
    #[serde(rename = "Junior ISA")]
    JuniorIsa,
    Pension,
    #[serde(rename = "GIA")]
    Gia,
}

impl TaxWrapper {
    /// Wrappers that lock funds until a qualifying age or purchase
    pub fn is_locked(&self) -> bool {
        matches!(self, TaxWrapper::Pension | TaxWrapper::LifetimeIsa | TaxWrapper::JuniorIsa)
    }
}

/// A scenario account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub tax_wrapper: Option<TaxWrapper>,
    /// Opening balance in minor units; liabilities are negative
    #[serde(default)]
    pub starting_balance: i64,
}

impl Account {
    pub fn new(id: AccountId, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id,
            name: name.into(),
            account_type,
            tax_wrapper: None,
            starting_balance: 0,
        }
    }

    pub fn with_wrapper(mut self, wrapper: TaxWrapper) -> Self {
        self.tax_wrapper = Some(wrapper);
        self
    }

    pub fn with_starting_balance(mut self, minor_units: i64) -> Self {
        self.starting_balance = minor_units;
        self
    }

    /// Opening balance in major units
    pub fn starting_balance_major(&self) -> f64 {
        money::to_major(self.starting_balance)
    }

    /// Locked either by its type or by its tax wrapper
    pub fn is_locked(&self) -> bool {
        self.account_type.is_locked() || self.tax_wrapper.is_some_and(|w| w.is_locked())
    }

    /// Cash or investments outside a pension wrapper
    pub fn is_liquid(&self) -> bool {
        matches!(self.account_type, AccountType::Cash | AccountType::Investment)
            && self.tax_wrapper != Some(TaxWrapper::Pension)
    }
}

/// Ids of all vesting-equity accounts, the usual net-worth exclusion set
pub fn vesting_account_ids(accounts: &[Account]) -> HashSet<AccountId> {
    accounts
        .iter()
        .filter(|a| a.account_type.is_vesting_equity())
        .map(|a| a.id)
        .collect()
}

/// Display name for an account id, falling back to a generic label
pub fn account_name(accounts: &[Account], id: AccountId) -> String {
    accounts
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| format!("Account {}", id))
}
