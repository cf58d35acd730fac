//! Validation utilities for values entering the bank service

use bigdecimal::BigDecimal;
use std::ops::RangeInclusive;

use crate::types::*;

/// Validate that a customer name is usable as a login key
pub fn validate_customer_name(name: &str) -> BankResult<()> {
    if name.trim().is_empty() {
        return Err(BankError::Validation(
            "Customer name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(BankError::Validation(
            "Customer name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a password length falls inside the allowed range
pub fn validate_password(password: &str, length: &RangeInclusive<usize>) -> BankResult<()> {
    let chars = password.chars().count();
    if !length.contains(&chars) {
        return Err(BankError::Validation(format!(
            "Password must be between {} and {} characters long",
            length.start(),
            length.end()
        )));
    }
    Ok(())
}

/// Validate that a deposit or withdrawal amount is strictly above the minimum
pub fn validate_transaction_amount(amount: &BigDecimal, minimum: &BigDecimal) -> BankResult<()> {
    if amount <= minimum {
        Err(BankError::Validation(format!(
            "Amount must be greater than {}",
            minimum
        )))
    } else {
        Ok(())
    }
}
