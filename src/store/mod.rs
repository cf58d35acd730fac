//! Storage layer: account records, their logs and ledgers, and the ordered index

pub mod account;
pub mod index;
pub mod loan_ledger;
pub mod log_stack;
pub(crate) mod queue;

pub use account::*;
pub use index::*;
pub use loan_ledger::{Iter as LoanIter, LoanLedger};
pub use log_stack::*;
pub(crate) use queue::LinkedQueue;
