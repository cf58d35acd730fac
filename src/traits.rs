//! Traits for pluggable business rules

use bigdecimal::BigDecimal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::types::*;

/// Hands out account numbers at signup
///
/// Allocators are not required to avoid numbers already in use; the index
/// accepts duplicate keys.
pub trait AccountNumberAllocator: Send {
    /// Produce the number for the next account
    fn allocate(&mut self) -> AccountId;
}

/// Uniformly random numbers from a fixed range, without collision checks
#[derive(Debug, Clone)]
pub struct RandomAllocator {
    rng: StdRng,
    range: RangeInclusive<AccountId>,
}

impl RandomAllocator {
    /// Allocator seeded from OS entropy
    pub fn new(range: RangeInclusive<AccountId>) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            range,
        }
    }

    /// Allocator with a fixed seed
    pub fn seeded(range: RangeInclusive<AccountId>, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            range,
        }
    }
}

impl AccountNumberAllocator for RandomAllocator {
    fn allocate(&mut self) -> AccountId {
        self.rng.gen_range(self.range.clone())
    }
}

/// Consecutive numbers starting from a given value
#[derive(Debug, Clone)]
pub struct SequentialAllocator {
    next: AccountId,
}

impl SequentialAllocator {
    pub fn starting_at(first: AccountId) -> Self {
        Self { next: first }
    }
}

impl AccountNumberAllocator for SequentialAllocator {
    fn allocate(&mut self) -> AccountId {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Decides whether a loan request may be granted
///
/// The record store itself never approves or rejects loans; the bank
/// service consults a policy before calling `AccountRecord::request_loan`.
pub trait LoanPolicy: Send + Sync {
    /// Approve or deny a request given the account's current balance
    fn evaluate(&self, balance: &BigDecimal, amount: &BigDecimal) -> BankResult<()>;
}

/// Balance-tiered loan limits
///
/// - balance below `lower_tier_ceiling`: up to `lower_tier_limit`
/// - balance within `lower_tier_ceiling..=upper_tier_ceiling`: up to `upper_tier_limit`
/// - anything above is denied
#[derive(Debug, Clone, PartialEq)]
pub struct TieredLoanPolicy {
    pub lower_tier_ceiling: BigDecimal,
    pub lower_tier_limit: BigDecimal,
    pub upper_tier_ceiling: BigDecimal,
    pub upper_tier_limit: BigDecimal,
}

impl Default for TieredLoanPolicy {
    fn default() -> Self {
        Self {
            lower_tier_ceiling: BigDecimal::from(50_000),
            lower_tier_limit: BigDecimal::from(100_000),
            upper_tier_ceiling: BigDecimal::from(100_000),
            upper_tier_limit: BigDecimal::from(8_000),
        }
    }
}

impl LoanPolicy for TieredLoanPolicy {
    fn evaluate(&self, balance: &BigDecimal, amount: &BigDecimal) -> BankResult<()> {
        let approved = if *balance < self.lower_tier_ceiling {
            *amount <= self.lower_tier_limit
        } else if *balance <= self.upper_tier_ceiling {
            *amount <= self.upper_tier_limit
        } else {
            false
        };

        if approved {
            Ok(())
        } else {
            Err(BankError::LoanDenied(
                "Requested amount exceeds the allowed limit for your balance range".to_string(),
            ))
        }
    }
}

/// Policy that grants every request
pub struct ApproveAllPolicy;

impl LoanPolicy for ApproveAllPolicy {
    fn evaluate(&self, _balance: &BigDecimal, _amount: &BigDecimal) -> BankResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(balance: i64, amount: i64) -> BankResult<()> {
        TieredLoanPolicy::default().evaluate(&BigDecimal::from(balance), &BigDecimal::from(amount))
    }

    #[test]
    fn test_lower_tier() {
        assert!(evaluate(10_000, 100_000).is_ok());
        assert!(matches!(evaluate(49_999, 100_001), Err(BankError::LoanDenied(_))));
    }

    #[test]
    fn test_upper_tier() {
        assert!(evaluate(50_000, 8_000).is_ok());
        assert!(evaluate(100_000, 8_000).is_ok());
        assert!(evaluate(75_000, 8_001).is_err());
    }

    #[test]
    fn test_above_upper_tier_is_denied() {
        assert!(evaluate(100_001, 1).is_err());
    }

    #[test]
    fn test_random_allocator_stays_in_range_and_is_reproducible() {
        let mut first = RandomAllocator::seeded(1000..=9999, 5);
        let mut second = RandomAllocator::seeded(1000..=9999, 5);
        for _ in 0..100 {
            let id = first.allocate();
            assert!((1000..=9999).contains(&id));
            assert_eq!(id, second.allocate());
        }
    }

    #[test]
    fn test_sequential_allocator() {
        let mut allocator = SequentialAllocator::starting_at(7);
        assert_eq!(allocator.allocate(), 7);
        assert_eq!(allocator.allocate(), 8);
    }

    #[test]
    fn test_approve_all() {
        assert!(ApproveAllPolicy
            .evaluate(&BigDecimal::from(1_000_000), &BigDecimal::from(1_000_000))
            .is_ok());
    }
}
