//! # Storage Traits
//!
//! Per-collection persistence contracts. The domain layer only talks to these
//! traits (bundled in [`Gateway`](super::Gateway)), so the CSV files and the
//! in-memory store can be swapped without touching any service.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Budget, Category, GuideCache, QuickShortcut, SavingsGoal, Transaction};

use super::Gateway;

/// Trait defining the interface for transaction storage operations
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// List every stored transaction in insertion order
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// Store a new transaction
    async fn add_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Replace the transaction with the same id
    async fn update_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Delete a transaction by id
    async fn delete_transaction(&self, transaction_id: &str) -> Result<()>;
}

/// Trait defining the interface for category storage operations
#[async_trait]
pub trait CategoryStorage: Send + Sync {
    /// List stored categories, seeding `defaults` when nothing is stored yet
    async fn list_categories(&self, defaults: &[Category]) -> Result<Vec<Category>>;

    async fn add_category(&self, category: &Category) -> Result<()>;

    /// Rename a category. Records referencing the old name are left alone.
    async fn update_category(&self, category_id: &str, new_name: &str) -> Result<()>;

    /// Delete a category. When `migrate_to` is set, the storage may move its own
    /// copies of records filed under `old_name` to the target.
    async fn delete_category(
        &self,
        category_id: &str,
        old_name: &str,
        migrate_to: Option<&str>,
    ) -> Result<()>;
}

/// Trait defining the interface for budget storage operations
#[async_trait]
pub trait BudgetStorage: Send + Sync {
    async fn list_budgets(&self) -> Result<Vec<Budget>>;

    async fn add_budget(&self, budget: &Budget) -> Result<()>;
}

/// Trait defining the interface for savings goal storage operations
#[async_trait]
pub trait GoalStorage: Send + Sync {
    async fn list_goals(&self) -> Result<Vec<SavingsGoal>>;

    async fn add_goal(&self, goal: &SavingsGoal) -> Result<()>;

    async fn delete_goal(&self, goal_id: &str) -> Result<()>;
}

/// Trait defining the interface for quick shortcut storage operations
#[async_trait]
pub trait ShortcutStorage: Send + Sync {
    /// List stored shortcuts, seeding `defaults` when nothing is stored yet
    async fn list_shortcuts(&self, defaults: &[QuickShortcut]) -> Result<Vec<QuickShortcut>>;

    async fn add_shortcut(&self, shortcut: &QuickShortcut) -> Result<()>;

    async fn update_shortcut(&self, shortcut: &QuickShortcut) -> Result<()>;

    async fn delete_shortcut(&self, shortcut_id: &str) -> Result<()>;
}

/// Trait defining the interface for singleton settings: selected country and guide cache
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    async fn get_country(&self) -> Result<Option<String>>;

    async fn set_country(&self, country: &str) -> Result<()>;

    async fn get_guide_cache(&self) -> Result<GuideCache>;

    /// Replace the whole stored guide cache
    async fn set_guide_cache(&self, cache: &GuideCache) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// A connection is a factory for the repositories of one storage backend,
/// handed to the domain layer as a [`Gateway`].
pub trait Connection: Send + Sync {
    fn create_gateway(&self) -> Gateway;
}
