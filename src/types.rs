//! Core types and data structures for the bank record store

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account number as handed out by the allocator
pub type AccountId = u32;

/// Sentinel returned by `describe_loan` when no loan is pending
pub const NO_LOAN: &str = "No loan requested.";

/// Message callers render for an account whose ledger is empty
pub const NO_LOAN_HISTORY: &str = "No loan history available.";

/// Message callers render for an account whose log is empty
pub const NO_TRANSACTIONS: &str = "No transactions yet.";

/// Snapshot of a single loan request, stored in an account's loan ledger
///
/// The owner fields are copied at append time so that the ledger stays
/// self-describing even if the owning record changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    /// Requested amount
    pub amount: BigDecimal,
    /// Free-form reason given with the request
    pub reason: String,
    /// Name of the account holder at the time of the request
    pub owner_name: String,
    /// Account number of the requesting account
    pub owner_id: AccountId,
}

impl LoanRecord {
    /// Create a new loan record
    pub fn new(amount: BigDecimal, reason: String, owner_name: String, owner_id: AccountId) -> Self {
        Self {
            amount,
            reason,
            owner_name,
            owner_id,
        }
    }
}

impl fmt::Display for LoanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account Number: {}, Customer Name: {}, Loan Amount: {}, Reason: {}",
            self.owner_id, self.owner_name, self.amount, self.reason
        )
    }
}

/// One row of the sorted account listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub owner_name: String,
    pub balance: BigDecimal,
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| Account Number: {} | Customer Name: {} | Balance: {} |",
            self.id, self.owner_name, self.balance
        )
    }
}

/// Loan state of one account, as shown in the admin overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOverview {
    pub id: AccountId,
    pub owner_name: String,
    pub loan_details: String,
}

/// Reasons a customer may pick when requesting a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanReason {
    MedicalEmergency,
    Education,
    HomeRenovation,
    BusinessInvestment,
    CarPurchase,
}

impl LoanReason {
    /// All reasons, in menu order
    pub const ALL: [LoanReason; 5] = [
        LoanReason::MedicalEmergency,
        LoanReason::Education,
        LoanReason::HomeRenovation,
        LoanReason::BusinessInvestment,
        LoanReason::CarPurchase,
    ];

    /// Human-readable label stored in the loan fields and ledger
    pub fn label(&self) -> &'static str {
        match self {
            LoanReason::MedicalEmergency => "Medical Emergency",
            LoanReason::Education => "Education",
            LoanReason::HomeRenovation => "Home Renovation",
            LoanReason::BusinessInvestment => "Business Investment",
            LoanReason::CarPurchase => "Car Purchase",
        }
    }
}

impl fmt::Display for LoanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur in the record store and the bank service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BankError {
    #[error("Log capacity of {capacity} entries exceeded")]
    CapacityExceeded { capacity: usize },
    #[error("Container is empty: {0}")]
    EmptyContainer(&'static str),
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("No account found with name: {0}")]
    NameNotFound(String),
    #[error("An account with name '{0}' already exists")]
    DuplicateName(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Admin access is not configured")]
    AdminDisabled,
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error("Account {requested} does not belong to the logged-in user")]
    AccountMismatch { requested: AccountId },
    #[error("Insufficient funds: balance = {balance}, requested = {requested}")]
    InsufficientFunds {
        balance: BigDecimal,
        requested: BigDecimal,
    },
    #[error("Loan request denied: {0}")]
    LoanDenied(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for bank operations
pub type BankResult<T> = Result<T, BankError>;
