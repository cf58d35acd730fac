//! # Bank Records
//!
//! An in-memory record store for bank accounts, plus a small service layer
//! that drives it.
//!
//! ## Features
//!
//! - **Account index**: unbalanced binary search tree keyed by account number,
//!   with exact lookup, sorted and level-order enumeration, and search by name
//! - **Transaction log**: bounded, newest-first log of timestamped entries per account
//! - **Loan ledger**: append-only history of loan requests per account
//! - **Bank service**: signup, login, deposits, withdrawals, policy-checked loans
//!   and admin views, configured through [`BankConfig`]
//!
//! ## Quick Start
//!
//! ```rust
//! use bank_records::{AccountIndex, AccountRecord};
//! use bigdecimal::BigDecimal;
//!
//! let mut index = AccountIndex::new();
//! for id in [50, 30, 70] {
//!     index.insert(AccountRecord::new(
//!         id,
//!         format!("customer {id}"),
//!         BigDecimal::from(1000),
//!         "secret".to_string(),
//!     ));
//! }
//!
//! index.lookup_mut(30).unwrap().request_loan(BigDecimal::from(500), "Education");
//!
//! let ids: Vec<u32> = index.in_order().map(|r| r.id()).collect();
//! assert_eq!(ids, vec![30, 50, 70]);
//! assert!(index.lookup(30).unwrap().describe_loan().contains("Education"));
//! ```

pub mod bank;
pub mod store;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use bank::*;
pub use store::*;
pub use traits::*;
pub use types::*;
