//! Category name rewrites shared by the gateways and the domain cascade.
//!
//! Matching is exact and case-sensitive.

use shared::{Budget, Transaction};

/// Move every transaction filed under `from` to `to`, returning how many moved
pub fn rewrite_transactions(transactions: &mut [Transaction], from: &str, to: &str) -> usize {
    let mut rewritten = 0;
    for transaction in transactions.iter_mut().filter(|t| t.category == from) {
        transaction.category = to.to_string();
        rewritten += 1;
    }
    rewritten
}

pub fn rewrite_budgets(budgets: &mut [Budget], from: &str, to: &str) -> usize {
    let mut rewritten = 0;
    for budget in budgets.iter_mut().filter(|b| b.category == from) {
        budget.category = to.to_string();
        rewritten += 1;
    }
    rewritten
}
