//! Startup configuration for the bank service

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::store::DEFAULT_LOG_CAPACITY;
use crate::types::*;

/// Largest per-account log capacity a configuration may request
pub const MAX_LOG_CAPACITY: usize = 100_000;

/// Settings injected into [`Bank`](crate::bank::Bank) at construction
///
/// Every field has a default, so a partial JSON/TOML document is enough to
/// override single values. There is no built-in admin password: admin access
/// stays disabled until one is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Password for the admin views; `None` disables them
    pub admin_password: Option<String>,
    /// Capacity of each account's transaction log
    pub log_capacity: usize,
    /// Deposits and withdrawals must be strictly greater than this
    pub min_transaction_amount: BigDecimal,
    /// Lowest account number the allocator hands out
    pub account_number_min: AccountId,
    /// Highest account number the allocator hands out
    pub account_number_max: AccountId,
    /// Shortest accepted password, in characters
    pub password_min_len: usize,
    /// Longest accepted password, in characters
    pub password_max_len: usize,
    /// Seed for account numbers and settlement delays; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            admin_password: None,
            log_capacity: DEFAULT_LOG_CAPACITY,
            min_transaction_amount: BigDecimal::from(100),
            account_number_min: 1000,
            account_number_max: 9999,
            password_min_len: 5,
            password_max_len: 8,
            seed: None,
        }
    }
}

impl BankConfig {
    /// Set the admin password
    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = Some(password.into());
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn account_number_range(&self) -> RangeInclusive<AccountId> {
        self.account_number_min..=self.account_number_max
    }

    pub fn password_length(&self) -> RangeInclusive<usize> {
        self.password_min_len..=self.password_max_len
    }

    /// Check that the ranges are non-empty and the log capacity is bounded
    pub fn validate(&self) -> BankResult<()> {
        if self.log_capacity > MAX_LOG_CAPACITY {
            return Err(BankError::Validation(format!(
                "Log capacity {} exceeds the maximum of {MAX_LOG_CAPACITY}",
                self.log_capacity
            )));
        }
        if self.account_number_min > self.account_number_max {
            return Err(BankError::Validation(format!(
                "Account number range {}..={} is empty",
                self.account_number_min, self.account_number_max
            )));
        }
        if self.password_min_len > self.password_max_len {
            return Err(BankError::Validation(format!(
                "Password length range {}..={} is empty",
                self.password_min_len, self.password_max_len
            )));
        }
        Ok(())
    }
}
