//! Basic bank usage example

use bank_records::{Bank, BankConfig, LoanReason, NO_LOAN_HISTORY, NO_TRANSACTIONS};
use bigdecimal::BigDecimal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Bank Records - Basic Bank Example\n");

    let admin_password = std::env::var("BANK_ADMIN_PASSWORD").unwrap_or_else(|_| "demo-admin".to_string());
    let config = BankConfig::default()
        .with_admin_password(admin_password.clone())
        .with_seed(7);
    let mut bank = Bank::new(config)?;

    // 1. Open a few accounts
    println!("Opening accounts...");
    let ada = bank.signup("Ada Lovelace", BigDecimal::from(12_000), "engine1")?;
    let alan = bank.signup("Alan Turing", BigDecimal::from(64_000), "enigma")?;
    let grace = bank.signup("Grace Hopper", BigDecimal::from(250), "cobol")?;
    println!("  Created accounts {ada}, {alan} and {grace}\n");

    // 2. Ada moves some money and asks for a loan
    bank.login("Ada Lovelace", "engine1")?;
    bank.deposit(ada, BigDecimal::from(2_500))?;
    bank.withdraw(ada, "engine1", BigDecimal::from(700))?;
    bank.request_loan(ada, "engine1", LoanReason::Education, BigDecimal::from(30_000))?;
    println!("{}\n", bank.account_info()?);

    println!("Transaction History for Account: {ada}");
    let history = bank.transaction_history()?;
    if history.is_empty() {
        println!("{NO_TRANSACTIONS}");
    }
    for entry in history {
        println!("  {entry}");
    }
    bank.logout();

    // 3. Alan is in the upper balance tier and asks for too much
    bank.login("Alan Turing", "enigma")?;
    if let Err(err) = bank.request_loan(alan, "enigma", LoanReason::CarPurchase, BigDecimal::from(9_000)) {
        println!("\n{err}");
    }
    bank.logout();

    // 4. Admin views
    let admin = bank.admin(&admin_password)?;
    println!("\n--- Accounts Sorted by Account Number ---");
    for row in admin.list_accounts() {
        println!("{row}");
    }

    println!("\n--- Loan Details of All Customers ---");
    for row in admin.loan_overview() {
        println!("Account Number: {}", row.id);
        println!("Customer Name: {}", row.owner_name);
        println!("Loan Details: {}", row.loan_details);
        println!("---------------------------------------");
    }

    for id in [ada, grace] {
        println!("\nLoan History for {id}:");
        let history = admin.loan_history(id)?;
        if history.is_empty() {
            println!("{NO_LOAN_HISTORY}");
        }
        for loan in history {
            println!("{loan}");
        }
    }

    Ok(())
}
