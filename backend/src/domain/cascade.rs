//! Category cascade rules.
//!
//! Transactions and budgets reference categories by name, so renaming or
//! deleting a category means rewriting those names. Matching here is exact and
//! case-sensitive: a transaction filed under "food" does not follow a rename
//! of "Food". Existence checks on transaction entry are case-insensitive
//! instead (see [`find_category_ignore_case`]); both behaviours are kept as-is.

use shared::{Budget, Category, Transaction};

pub use crate::storage::rewrite::{rewrite_budgets, rewrite_transactions};

/// Name of the fallback category created on demand when deleting with migration
pub const FALLBACK_CATEGORY: &str = "Others";

/// Number of records rewritten by a cascade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeCount {
    pub transactions: usize,
    pub budgets: usize,
}

impl CascadeCount {
    pub fn total(&self) -> usize {
        self.transactions + self.budgets
    }
}

/// Rewrite every transaction and budget filed under `from` to `to`
pub fn rewrite_category_references(
    transactions: &mut [Transaction],
    budgets: &mut [Budget],
    from: &str,
    to: &str,
) -> CascadeCount {
    CascadeCount {
        transactions: rewrite_transactions(transactions, from, to),
        budgets: rewrite_budgets(budgets, from, to),
    }
}

/// Case-insensitive lookup used when logging a transaction
pub fn find_category_ignore_case<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let wanted = name.to_lowercase();
    categories.iter().find(|c| c.name.to_lowercase() == wanted)
}

/// Whether the fallback category has to be synthesized before migrating to `target`
pub fn needs_fallback_category(categories: &[Category], target: &str) -> bool {
    target == FALLBACK_CATEGORY && !categories.iter().any(|c| c.name == FALLBACK_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Currency, TransactionType};

    fn transaction(id: &str, category: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount: -10.0,
            currency: Currency::Eur,
            category: category.to_string(),
            date: "2025-01-15".to_string(),
            description: "test".to_string(),
            merchant: None,
            transaction_type: TransactionType::Expense,
            notes: None,
        }
    }

    fn budget(category: &str) -> Budget {
        Budget {
            category: category.to_string(),
            limit: 200.0,
            spent: 0.0,
        }
    }

    #[test]
    fn test_rewrite_is_case_sensitive() {
        let mut transactions = vec![
            transaction("1", "Food"),
            transaction("2", "food"),
            transaction("3", "Rent"),
            transaction("4", "Food"),
        ];
        let mut budgets = vec![budget("Food"), budget("FOOD")];

        let count = rewrite_category_references(&mut transactions, &mut budgets, "Food", "Groceries");

        assert_eq!(count, CascadeCount { transactions: 2, budgets: 1 });
        assert_eq!(count.total(), 3);
        let categories: Vec<&str> = transactions.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(categories, vec!["Groceries", "food", "Rent", "Groceries"]);
        assert_eq!(budgets[0].category, "Groceries");
        assert_eq!(budgets[1].category, "FOOD");
    }

    #[test]
    fn test_find_category_ignores_case() {
        let categories = vec![Category {
            id: "1".to_string(),
            name: "Food".to_string(),
            is_default: false,
        }];

        assert!(find_category_ignore_case(&categories, "FOOD").is_some());
        assert!(find_category_ignore_case(&categories, "food").is_some());
        assert!(find_category_ignore_case(&categories, "Foods").is_none());
    }

    #[test]
    fn test_fallback_needed_only_for_missing_others() {
        let mut categories = vec![Category::new("Rent")];
        assert!(needs_fallback_category(&categories, FALLBACK_CATEGORY));
        assert!(!needs_fallback_category(&categories, "Food"));

        categories.push(Category::new("others"));
        assert!(needs_fallback_category(&categories, FALLBACK_CATEGORY));

        categories.push(Category::new(FALLBACK_CATEGORY));
        assert!(!needs_fallback_category(&categories, FALLBACK_CATEGORY));
    }
}
