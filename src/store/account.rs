//! Account records and their per-account history

use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::store::{BoundedLogStack, LoanLedger};
use crate::types::*;

/// Format used for the timestamp prefix of log entries
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest settlement delay, in seconds, added per logged transaction
pub const MAX_SETTLEMENT_DELAY_SECS: i64 = 60;

/// Source of the per-transaction settlement delay
///
/// Each logged transaction moves the account's activity clock forward by
/// 1..=60 seconds. Seeding the generator makes the resulting timestamps
/// reproducible.
#[derive(Debug, Clone)]
pub struct SettlementDelay {
    rng: StdRng,
}

impl SettlementDelay {
    /// Generator with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw the next delay
    pub fn next_delay(&mut self) -> Duration {
        Duration::seconds(self.rng.gen_range(1..=MAX_SETTLEMENT_DELAY_SECS))
    }
}

impl Default for SettlementDelay {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Plain-text account password; never printed by `Debug`
#[derive(Clone, PartialEq, Eq)]
struct Credential(String);

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// In-memory state of one bank account
#[derive(Debug, Clone)]
pub struct AccountRecord {
    id: AccountId,
    owner_name: String,
    balance: BigDecimal,
    password: Credential,
    loan_amount: BigDecimal,
    loan_reason: String,
    loan_pending: bool,
    log: BoundedLogStack,
    ledger: LoanLedger,
    last_activity: NaiveDateTime,
    delay: SettlementDelay,
}

impl AccountRecord {
    /// Create a new account record opened now
    pub fn new(
        id: AccountId,
        owner_name: String,
        initial_balance: BigDecimal,
        password: String,
    ) -> Self {
        Self {
            id,
            owner_name,
            balance: initial_balance,
            password: Credential(password),
            loan_amount: BigDecimal::from(0),
            loan_reason: String::new(),
            loan_pending: false,
            log: BoundedLogStack::new(),
            ledger: LoanLedger::new(),
            last_activity: chrono::Utc::now().naive_utc(),
            delay: SettlementDelay::default(),
        }
    }

    /// Replace the settlement delay generator
    pub fn with_delay(mut self, delay: SettlementDelay) -> Self {
        self.delay = delay;
        self
    }

    /// Set the starting point of the activity clock
    pub fn opened_at(mut self, timestamp: NaiveDateTime) -> Self {
        self.last_activity = timestamp;
        self
    }

    /// Use a log with the given capacity; entries already logged are discarded
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log = BoundedLogStack::with_capacity(capacity);
        self
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> &BigDecimal {
        &self.balance
    }

    pub fn loan_amount(&self) -> &BigDecimal {
        &self.loan_amount
    }

    pub fn loan_reason(&self) -> &str {
        &self.loan_reason
    }

    pub fn is_loan_pending(&self) -> bool {
        self.loan_pending
    }

    /// Timestamp of the most recent logged transaction
    pub fn last_activity(&self) -> NaiveDateTime {
        self.last_activity
    }

    /// Transaction log, newest entry on top
    pub fn log(&self) -> &BoundedLogStack {
        &self.log
    }

    /// Loan history, oldest first
    pub fn ledger(&self) -> &LoanLedger {
        &self.ledger
    }

    /// Exact, case-sensitive comparison against the stored password
    pub fn check_password(&self, candidate: &str) -> bool {
        self.password.0 == candidate
    }

    /// Advance the activity clock and push a timestamped entry to the log
    pub fn record_transaction(&mut self, description: &str) {
        self.last_activity += self.delay.next_delay();
        let entry = format!(
            "{} - {}",
            self.last_activity.format(LOG_TIMESTAMP_FORMAT),
            description
        );
        self.log.push(entry);
    }

    /// Add to the balance and log a deposit
    pub fn deposit(&mut self, amount: &BigDecimal) {
        self.balance += amount;
        self.record_transaction(&format!("Deposit: {}", amount));
    }

    /// Subtract from the balance and log a withdrawal
    ///
    /// No overdraft check happens here.
    pub fn withdraw(&mut self, amount: &BigDecimal) {
        self.balance -= amount;
        self.record_transaction(&format!("Withdraw: {}", amount));
    }

    /// Record a loan request, replacing any pending one
    pub fn request_loan(&mut self, amount: BigDecimal, reason: &str) {
        self.loan_amount = amount.clone();
        self.loan_reason = reason.to_string();
        self.loan_pending = true;
        self.record_transaction(&format!(
            "Loan requested: {} for reason: {}",
            amount, reason
        ));
        self.ledger
            .append(amount, reason.to_string(), self.owner_name.clone(), self.id);
    }

    /// Reset the pending loan; the ledger keeps its history
    pub fn clear_loan(&mut self) {
        self.loan_amount = BigDecimal::from(0);
        self.loan_reason.clear();
        self.loan_pending = false;
        self.record_transaction("Loan cleared.");
    }

    fn has_loan(&self) -> bool {
        // A zero amount reads as "no loan" even if the pending flag is set.
        self.loan_amount > BigDecimal::from(0)
    }

    /// Pending loan summary, or [`NO_LOAN`]
    pub fn describe_loan(&self) -> String {
        if self.has_loan() {
            format!(
                "Loan Amount: {}, Reason: {}",
                self.loan_amount, self.loan_reason
            )
        } else {
            NO_LOAN.to_string()
        }
    }

    /// Multi-line account summary including a positive pending loan
    pub fn describe_account(&self) -> String {
        let mut info = format!(
            "Account Number: {}\nCustomer Name: {}\nBalance: {}",
            self.id, self.owner_name, self.balance
        );
        if self.has_loan() {
            info.push('\n');
            info.push_str(&self.describe_loan());
        }
        info
    }

    /// Row for the sorted account listing
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            owner_name: self.owner_name.clone(),
            balance: self.balance.clone(),
        }
    }
}
