//! Bank service that coordinates the account index with business rules

use bigdecimal::BigDecimal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::bank::BankConfig;
use crate::store::{AccountIndex, AccountRecord, RecordHandle, SettlementDelay};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::*;

/// Main bank system: signup, login, money movement, loans and admin views
pub struct Bank {
    accounts: AccountIndex,
    config: BankConfig,
    loan_policy: Box<dyn LoanPolicy>,
    allocator: Box<dyn AccountNumberAllocator>,
    rng: StdRng,
    current_user: Option<RecordHandle>,
}

impl Bank {
    /// Create a bank with the default tiered loan policy
    pub fn new(config: BankConfig) -> BankResult<Self> {
        Self::with_policy(config, Box::new(TieredLoanPolicy::default()))
    }

    /// Create a bank with a custom loan policy
    pub fn with_policy(config: BankConfig, loan_policy: Box<dyn LoanPolicy>) -> BankResult<Self> {
        config.validate()?;
        let (allocator, rng) = match config.seed {
            Some(seed) => (
                RandomAllocator::seeded(config.account_number_range(), seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (
                RandomAllocator::new(config.account_number_range()),
                StdRng::from_entropy(),
            ),
        };
        Ok(Self {
            accounts: AccountIndex::new(),
            config,
            loan_policy,
            allocator: Box::new(allocator),
            rng,
            current_user: None,
        })
    }

    /// Replace the account number allocator
    pub fn with_allocator(mut self, allocator: Box<dyn AccountNumberAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Read-only access to the account index
    pub fn accounts(&self) -> &AccountIndex {
        &self.accounts
    }

    // Session operations
    /// Open a new account and return its number
    ///
    /// Names must be unused. The allocator is not asked to avoid numbers
    /// already in the index.
    pub fn signup(
        &mut self,
        name: &str,
        initial_balance: BigDecimal,
        password: &str,
    ) -> BankResult<AccountId> {
        validate_customer_name(name)?;
        if self.accounts.find_by_name(name).is_some() {
            return Err(BankError::DuplicateName(name.to_string()));
        }
        validate_password(password, &self.config.password_length())?;

        let id = self.allocator.allocate();
        let delay = SettlementDelay::seeded(self.rng.gen());
        let record = AccountRecord::new(
            id,
            name.to_string(),
            initial_balance,
            password.to_string(),
        )
        .with_log_capacity(self.config.log_capacity)
        .with_delay(delay);

        if self.accounts.lookup(id).is_some() {
            debug!(account_id = id, "account number already in use, inserting duplicate");
        }
        self.accounts.insert(record);
        info!(account_id = id, "account created");
        Ok(id)
    }

    /// Log in by customer name and password
    ///
    /// The session is bound to the matched record, not to its account number.
    pub fn login(&mut self, name: &str, password: &str) -> BankResult<AccountId> {
        let handle = self
            .accounts
            .handle_by_name(name)
            .ok_or_else(|| BankError::NameNotFound(name.to_string()))?;
        let record = self
            .accounts
            .get(handle)
            .ok_or_else(|| BankError::NameNotFound(name.to_string()))?;

        if !record.check_password(password) {
            warn!(account_id = record.id(), "login rejected");
            return Err(BankError::InvalidCredentials);
        }

        let id = record.id();
        self.current_user = Some(handle);
        info!(account_id = id, "logged in");
        Ok(id)
    }

    /// End the current session
    pub fn logout(&mut self) {
        if let Some(id) = self.current_user() {
            info!(account_id = id, "logged out");
        }
        self.current_user = None;
    }

    /// Account number of the logged-in user
    pub fn current_user(&self) -> Option<AccountId> {
        self.session_record().ok().map(AccountRecord::id)
    }

    fn session_record(&self) -> BankResult<&AccountRecord> {
        let handle = self.current_user.ok_or(BankError::NotLoggedIn)?;
        self.accounts.get(handle).ok_or(BankError::NotLoggedIn)
    }

    /// Logged-in record, provided it carries the requested account number
    fn ensure_session(&self, account_id: AccountId) -> BankResult<&AccountRecord> {
        let record = self.session_record()?;
        if record.id() != account_id {
            return Err(BankError::AccountMismatch {
                requested: account_id,
            });
        }
        Ok(record)
    }

    fn authorized_record(&self, account_id: AccountId, password: &str) -> BankResult<&AccountRecord> {
        let record = self.ensure_session(account_id)?;
        if !record.check_password(password) {
            warn!(account_id, "password check failed");
            return Err(BankError::InvalidCredentials);
        }
        Ok(record)
    }

    fn session_record_mut(&mut self) -> BankResult<&mut AccountRecord> {
        let handle = self.current_user.ok_or(BankError::NotLoggedIn)?;
        self.accounts.get_mut(handle).ok_or(BankError::NotLoggedIn)
    }

    // Money movement
    /// Deposit into the logged-in user's account; returns the new balance
    pub fn deposit(&mut self, account_id: AccountId, amount: BigDecimal) -> BankResult<BigDecimal> {
        self.ensure_session(account_id)?;
        validate_transaction_amount(&amount, &self.config.min_transaction_amount)?;

        let record = self.session_record_mut()?;
        record.deposit(&amount);
        info!(account_id, %amount, "deposit");
        Ok(record.balance().clone())
    }

    /// Withdraw from the logged-in user's account; returns the new balance
    pub fn withdraw(
        &mut self,
        account_id: AccountId,
        password: &str,
        amount: BigDecimal,
    ) -> BankResult<BigDecimal> {
        let balance = self.authorized_record(account_id, password)?.balance().clone();
        validate_transaction_amount(&amount, &self.config.min_transaction_amount)?;

        if balance < amount {
            return Err(BankError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        let record = self.session_record_mut()?;
        record.withdraw(&amount);
        info!(account_id, %amount, "withdrawal");
        Ok(record.balance().clone())
    }

    // Loans
    /// Request a loan for the logged-in user, subject to the loan policy
    pub fn request_loan(
        &mut self,
        account_id: AccountId,
        password: &str,
        reason: LoanReason,
        amount: BigDecimal,
    ) -> BankResult<()> {
        let balance = self.authorized_record(account_id, password)?.balance().clone();

        if let Err(err) = self.loan_policy.evaluate(&balance, &amount) {
            warn!(account_id, %amount, "loan request denied");
            return Err(err);
        }

        self.session_record_mut()?
            .request_loan(amount.clone(), reason.label());
        info!(account_id, %amount, reason = reason.label(), "loan approved");
        Ok(())
    }

    /// Pending loan description of the logged-in user
    pub fn loan_details(&self) -> BankResult<String> {
        Ok(self.session_record()?.describe_loan())
    }

    /// Account description of the logged-in user
    pub fn account_info(&self) -> BankResult<String> {
        Ok(self.session_record()?.describe_account())
    }

    /// Transaction log of the logged-in user, newest first
    pub fn transaction_history(&self) -> BankResult<Vec<String>> {
        Ok(self
            .session_record()?
            .log()
            .iter()
            .map(str::to_string)
            .collect())
    }

    // Admin operations
    /// Authenticate against the configured admin password
    pub fn admin(&self, password: &str) -> BankResult<AdminView<'_>> {
        let expected = self
            .config
            .admin_password
            .as_deref()
            .ok_or(BankError::AdminDisabled)?;
        if expected != password {
            warn!("admin login rejected");
            return Err(BankError::InvalidCredentials);
        }
        Ok(AdminView {
            accounts: &self.accounts,
        })
    }
}

/// Read-only admin views over every account
pub struct AdminView<'a> {
    accounts: &'a AccountIndex,
}

impl AdminView<'_> {
    /// All accounts sorted by account number
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts.in_order().map(AccountRecord::summary).collect()
    }

    /// Description of a single account
    pub fn account_info(&self, account_id: AccountId) -> BankResult<String> {
        self.accounts
            .lookup(account_id)
            .map(AccountRecord::describe_account)
            .ok_or(BankError::AccountNotFound(account_id))
    }

    /// Loan history of a single account, oldest first
    pub fn loan_history(&self, account_id: AccountId) -> BankResult<Vec<LoanRecord>> {
        self.accounts
            .lookup(account_id)
            .map(|record| record.ledger().iter().cloned().collect())
            .ok_or(BankError::AccountNotFound(account_id))
    }

    /// Pending loan state of every account, in level order of the index
    pub fn loan_overview(&self) -> Vec<LoanOverview> {
        self.accounts
            .breadth_first()
            .map(|record| LoanOverview {
                id: record.id(),
                owner_name: record.owner_name().to_string(),
                loan_details: record.describe_loan(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> Bank {
        Bank::new(BankConfig::default().with_admin_password("admin-pw").with_seed(11)).unwrap()
    }

    #[test]
    fn test_signup_and_login() {
        let mut bank = bank();
        let id = bank.signup("Ada", BigDecimal::from(1000), "secret1").unwrap();

        assert!((1000..=9999).contains(&id));
        assert_eq!(bank.current_user(), None);
        assert_eq!(bank.login("Ada", "secret1").unwrap(), id);
        assert_eq!(bank.current_user(), Some(id));

        bank.logout();
        assert_eq!(bank.current_user(), None);
    }

    #[test]
    fn test_signup_rejects_duplicate_name_and_bad_password() {
        let mut bank = bank();
        bank.signup("Ada", BigDecimal::from(1000), "secret1").unwrap();

        assert_eq!(
            bank.signup("Ada", BigDecimal::from(5), "other12"),
            Err(BankError::DuplicateName("Ada".to_string()))
        );
        assert!(matches!(
            bank.signup("Bob", BigDecimal::from(5), "abc"),
            Err(BankError::Validation(_))
        ));
        assert!(matches!(
            bank.signup("Bob", BigDecimal::from(5), "abcdefghij"),
            Err(BankError::Validation(_))
        ));
        assert_eq!(bank.accounts().len(), 1);
    }

    #[test]
    fn test_login_failures() {
        let mut bank = bank();
        bank.signup("Ada", BigDecimal::from(1000), "secret1").unwrap();

        assert_eq!(
            bank.login("Nobody", "secret1"),
            Err(BankError::NameNotFound("Nobody".to_string()))
        );
        assert_eq!(bank.login("Ada", "SECRET1"), Err(BankError::InvalidCredentials));
        assert_eq!(bank.current_user(), None);
    }

    #[test]
    fn test_seeded_banks_allocate_identical_numbers() {
        let mut first = bank();
        let mut second = bank();
        for name in ["a", "b", "c"] {
            assert_eq!(
                first.signup(name, BigDecimal::from(0), "12345").unwrap(),
                second.signup(name, BigDecimal::from(0), "12345").unwrap()
            );
        }
    }

    #[test]
    fn test_deposit_requires_matching_session() {
        let mut bank = bank();
        let id = bank.signup("Ada", BigDecimal::from(1000), "secret1").unwrap();

        assert_eq!(bank.deposit(id, BigDecimal::from(500)), Err(BankError::NotLoggedIn));

        bank.login("Ada", "secret1").unwrap();
        let other = if id == 9999 { 1000 } else { id + 1 };
        assert_eq!(
            bank.deposit(other, BigDecimal::from(500)),
            Err(BankError::AccountMismatch { requested: other })
        );
        assert!(matches!(
            bank.deposit(id, BigDecimal::from(100)),
            Err(BankError::Validation(_))
        ));
        assert_eq!(bank.deposit(id, BigDecimal::from(500)), Ok(BigDecimal::from(1500)));
    }

    #[test]
    fn test_withdraw_checks_password_and_funds() {
        let mut bank = bank();
        let id = bank.signup("Ada", BigDecimal::from(1000), "secret1").unwrap();
        bank.login("Ada", "secret1").unwrap();

        assert_eq!(
            bank.withdraw(id, "wrong", BigDecimal::from(200)),
            Err(BankError::InvalidCredentials)
        );
        assert!(matches!(
            bank.withdraw(id, "secret1", BigDecimal::from(5000)),
            Err(BankError::InsufficientFunds { .. })
        ));
        assert_eq!(
            bank.withdraw(id, "secret1", BigDecimal::from(400)),
            Ok(BigDecimal::from(600))
        );

        let history = bank.transaction_history().unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].ends_with("Withdraw: 400"));
    }

    #[test]
    fn test_loan_request_goes_through_policy() {
        let mut bank = bank();
        let id = bank.signup("Ada", BigDecimal::from(60_000), "secret1").unwrap();
        bank.login("Ada", "secret1").unwrap();

        assert!(matches!(
            bank.request_loan(id, "secret1", LoanReason::Education, BigDecimal::from(9_000)),
            Err(BankError::LoanDenied(_))
        ));
        assert_eq!(bank.loan_details().unwrap(), NO_LOAN);

        bank.request_loan(id, "secret1", LoanReason::Education, BigDecimal::from(8_000))
            .unwrap();
        assert_eq!(
            bank.loan_details().unwrap(),
            "Loan Amount: 8000, Reason: Education"
        );
        assert!(bank.account_info().unwrap().contains("Loan Amount: 8000"));
    }

    #[test]
    fn test_custom_policy() {
        let config = BankConfig::default().with_seed(3);
        let mut bank = Bank::with_policy(config, Box::new(ApproveAllPolicy)).unwrap();
        let id = bank.signup("Rich", BigDecimal::from(1_000_000), "secret1").unwrap();
        bank.login("Rich", "secret1").unwrap();

        assert!(bank
            .request_loan(id, "secret1", LoanReason::CarPurchase, BigDecimal::from(500_000))
            .is_ok());
    }

    #[test]
    fn test_admin_access() {
        let bank = bank();
        assert!(bank.admin("admin-pw").is_ok());
        assert!(matches!(bank.admin("nope"), Err(BankError::InvalidCredentials)));

        let unconfigured = Bank::new(BankConfig::default()).unwrap();
        assert!(matches!(unconfigured.admin("admin-pw"), Err(BankError::AdminDisabled)));
    }

    #[test]
    fn test_admin_views() {
        let mut bank = bank().with_allocator(Box::new(SequentialAllocator::starting_at(2000)));
        let ada = bank.signup("Ada", BigDecimal::from(1000), "secret1").unwrap();
        let bob = bank.signup("Bob", BigDecimal::from(2000), "secret2").unwrap();
        bank.login("Bob", "secret2").unwrap();
        bank.request_loan(bob, "secret2", LoanReason::HomeRenovation, BigDecimal::from(700))
            .unwrap();

        let admin = bank.admin("admin-pw").unwrap();
        let listing = admin.list_accounts();
        assert_eq!(listing.len(), 2);
        assert!(listing.windows(2).all(|w| w[0].id <= w[1].id));

        let history = admin.loan_history(bob).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].reason, "Home Renovation");
        assert!(admin.loan_history(ada).unwrap().is_empty());

        let overview = admin.loan_overview();
        assert_eq!(overview.len(), 2);
        let bob_row = overview.iter().find(|row| row.owner_name == "Bob").unwrap();
        assert_eq!(bob_row.loan_details, "Loan Amount: 700, Reason: Home Renovation");
        assert!(admin.account_info(ada).unwrap().contains("Customer Name: Ada"));
    }

    struct FixedAllocator(AccountId);

    impl AccountNumberAllocator for FixedAllocator {
        fn allocate(&mut self) -> AccountId {
            self.0
        }
    }

    #[test]
    fn test_colliding_account_numbers_are_accepted() {
        let mut bank = bank().with_allocator(Box::new(FixedAllocator(4242)));
        assert_eq!(bank.signup("Ada", BigDecimal::from(1), "secret1"), Ok(4242));
        assert_eq!(bank.signup("Bob", BigDecimal::from(2), "secret2"), Ok(4242));

        assert_eq!(bank.accounts().len(), 2);
        assert_eq!(bank.accounts().lookup(4242).map(|r| r.owner_name()), Some("Ada"));
        assert_eq!(bank.accounts().find_by_name("Bob").map(|r| r.id()), Some(4242));
    }

    #[test]
    fn test_session_stays_on_its_own_record_when_numbers_collide() {
        let mut bank = bank().with_allocator(Box::new(FixedAllocator(4242)));
        bank.signup("Ada", BigDecimal::from(1000), "adapw1").unwrap();
        bank.signup("Bob", BigDecimal::from(2000), "bobpw1").unwrap();

        assert_eq!(bank.login("Bob", "bobpw1"), Ok(4242));
        assert_eq!(bank.current_user(), Some(4242));
        assert_eq!(
            bank.deposit(4242, BigDecimal::from(500)),
            Ok(BigDecimal::from(2500))
        );
        assert_eq!(
            bank.withdraw(4242, "bobpw1", BigDecimal::from(300)),
            Ok(BigDecimal::from(2200))
        );
        bank.request_loan(4242, "bobpw1", LoanReason::Education, BigDecimal::from(150))
            .unwrap();
        assert!(bank.account_info().unwrap().contains("Customer Name: Bob"));
        assert_eq!(bank.transaction_history().unwrap().len(), 3);

        let accounts = bank.accounts();
        assert_eq!(
            accounts.find_by_name("Ada").map(|r| r.balance().clone()),
            Some(BigDecimal::from(1000))
        );
        assert!(accounts.find_by_name("Ada").unwrap().log().is_empty());
        assert!(!accounts.find_by_name("Ada").unwrap().is_loan_pending());
        assert_eq!(
            accounts.find_by_name("Bob").map(|r| r.balance().clone()),
            Some(BigDecimal::from(2200))
        );
    }

    #[test]
    fn test_oversized_log_capacity_fails_construction() {
        let config: BankConfig =
            serde_json::from_str(r#"{ "log_capacity": 18446744073709551615, "seed": 1 }"#).unwrap();
        assert!(matches!(Bank::new(config), Err(BankError::Validation(_))));
    }

    #[test]
    fn test_config_is_rejected_when_invalid() {
        let config = BankConfig {
            password_min_len: 9,
            password_max_len: 8,
            ..BankConfig::default()
        };
        assert!(Bank::new(config).is_err());
    }
}
