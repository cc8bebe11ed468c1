//! In-memory gateway.
//!
//! Keeps every collection in `tokio::sync::RwLock`s. Used when the server runs
//! with `storage: memory` and by the service tests. Tests build it with
//! [`MemoryGateway::recording`] and use the call log and the failure switches
//! to observe the write-through protocol; the server keeps no log.

use anyhow::{bail, Result};
use async_trait::async_trait;
use shared::{Budget, Category, GuideCache, QuickShortcut, SavingsGoal, Transaction};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::*;
use super::Gateway;
use super::rewrite;

#[derive(Default)]
pub struct MemoryGateway {
    transactions: RwLock<Vec<Transaction>>,
    categories: RwLock<Vec<Category>>,
    budgets: RwLock<Vec<Budget>>,
    goals: RwLock<Vec<SavingsGoal>>,
    shortcuts: RwLock<Vec<QuickShortcut>>,
    country: RwLock<Option<String>>,
    guide_cache: RwLock<GuideCache>,
    record_calls: bool,
    calls: RwLock<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that logs every operation for [`calls`](Self::calls)
    pub fn recording() -> Self {
        Self {
            record_calls: true,
            ..Self::default()
        }
    }

    /// Wrap in an `Arc` and expose as a [`Gateway`], keeping a handle for inspection
    pub fn into_gateway(self) -> (Arc<Self>, Gateway) {
        let shared = Arc::new(self);
        let gateway = Gateway::from_shared(shared.clone());
        (shared, gateway)
    }

    pub fn with_transactions(self, transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            ..self
        }
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        Self {
            categories: RwLock::new(categories),
            ..self
        }
    }

    pub fn with_budgets(self, budgets: Vec<Budget>) -> Self {
        Self {
            budgets: RwLock::new(budgets),
            ..self
        }
    }

    pub fn with_country(self, country: &str) -> Self {
        Self {
            country: RwLock::new(Some(country.to_string())),
            ..self
        }
    }

    pub fn with_guide_cache(self, cache: GuideCache) -> Self {
        Self {
            guide_cache: RwLock::new(cache),
            ..self
        }
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Operations received so far, e.g. `"add_category:Pets"`. Always empty
    /// unless built with [`recording`](Self::recording).
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    /// Number of write operations received, failed ones included
    pub async fn write_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| !call.starts_with("list_") && !call.starts_with("get_"))
            .count()
    }

    pub async fn stored_transactions(&self) -> Vec<Transaction> {
        self.transactions.read().await.clone()
    }

    pub async fn stored_categories(&self) -> Vec<Category> {
        self.categories.read().await.clone()
    }

    pub async fn stored_budgets(&self) -> Vec<Budget> {
        self.budgets.read().await.clone()
    }

    pub async fn stored_goals(&self) -> Vec<SavingsGoal> {
        self.goals.read().await.clone()
    }

    pub async fn stored_shortcuts(&self) -> Vec<QuickShortcut> {
        self.shortcuts.read().await.clone()
    }

    pub async fn stored_country(&self) -> Option<String> {
        self.country.read().await.clone()
    }

    pub async fn stored_guide_cache(&self) -> GuideCache {
        self.guide_cache.read().await.clone()
    }

    async fn record(&self, operation: &str) {
        if self.record_calls {
            self.calls.write().await.push(operation.to_string());
        }
    }

    async fn read(&self, operation: &str) -> Result<()> {
        self.record(operation).await;
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("memory gateway: read '{}' rejected", operation);
        }
        Ok(())
    }

    async fn write(&self, operation: String) -> Result<()> {
        debug!("memory gateway write: {}", operation);
        self.record(&operation).await;
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("memory gateway: write '{}' rejected", operation);
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionStorage for MemoryGateway {
    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.read("list_transactions").await?;
        Ok(self.transactions.read().await.clone())
    }

    async fn add_transaction(&self, transaction: &Transaction) -> Result<()> {
        self.write(format!("add_transaction:{}", transaction.id)).await?;
        self.transactions.write().await.push(transaction.clone());
        Ok(())
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        self.write(format!("update_transaction:{}", transaction.id)).await?;
        let mut transactions = self.transactions.write().await;
        if let Some(existing) = transactions.iter_mut().find(|t| t.id == transaction.id) {
            *existing = transaction.clone();
        }
        Ok(())
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<()> {
        self.write(format!("delete_transaction:{}", transaction_id)).await?;
        self.transactions.write().await.retain(|t| t.id != transaction_id);
        Ok(())
    }
}

#[async_trait]
impl CategoryStorage for MemoryGateway {
    async fn list_categories(&self, defaults: &[Category]) -> Result<Vec<Category>> {
        self.read("list_categories").await?;
        let mut categories = self.categories.write().await;
        if categories.is_empty() {
            *categories = defaults.to_vec();
        }
        Ok(categories.clone())
    }

    async fn add_category(&self, category: &Category) -> Result<()> {
        self.write(format!("add_category:{}", category.name)).await?;
        self.categories.write().await.push(category.clone());
        Ok(())
    }

    async fn update_category(&self, category_id: &str, new_name: &str) -> Result<()> {
        self.write(format!("update_category:{}:{}", category_id, new_name)).await?;
        let mut categories = self.categories.write().await;
        if let Some(category) = categories.iter_mut().find(|c| c.id == category_id) {
            category.name = new_name.to_string();
        }
        Ok(())
    }

    async fn delete_category(
        &self,
        category_id: &str,
        old_name: &str,
        migrate_to: Option<&str>,
    ) -> Result<()> {
        self.write(format!(
            "delete_category:{}:{}",
            category_id,
            migrate_to.unwrap_or("-")
        ))
        .await?;
        self.categories.write().await.retain(|c| c.id != category_id);
        if let Some(target) = migrate_to {
            rewrite::rewrite_transactions(&mut self.transactions.write().await, old_name, target);
            rewrite::rewrite_budgets(&mut self.budgets.write().await, old_name, target);
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetStorage for MemoryGateway {
    async fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.read("list_budgets").await?;
        Ok(self.budgets.read().await.clone())
    }

    async fn add_budget(&self, budget: &Budget) -> Result<()> {
        self.write(format!("add_budget:{}", budget.category)).await?;
        self.budgets.write().await.push(budget.clone());
        Ok(())
    }
}

#[async_trait]
impl GoalStorage for MemoryGateway {
    async fn list_goals(&self) -> Result<Vec<SavingsGoal>> {
        self.read("list_goals").await?;
        Ok(self.goals.read().await.clone())
    }

    async fn add_goal(&self, goal: &SavingsGoal) -> Result<()> {
        self.write(format!("add_goal:{}", goal.id)).await?;
        self.goals.write().await.push(goal.clone());
        Ok(())
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        self.write(format!("delete_goal:{}", goal_id)).await?;
        self.goals.write().await.retain(|g| g.id != goal_id);
        Ok(())
    }
}

#[async_trait]
impl ShortcutStorage for MemoryGateway {
    async fn list_shortcuts(&self, defaults: &[QuickShortcut]) -> Result<Vec<QuickShortcut>> {
        self.read("list_shortcuts").await?;
        let mut shortcuts = self.shortcuts.write().await;
        if shortcuts.is_empty() {
            *shortcuts = defaults.to_vec();
        }
        Ok(shortcuts.clone())
    }

    async fn add_shortcut(&self, shortcut: &QuickShortcut) -> Result<()> {
        self.write(format!("add_shortcut:{}", shortcut.id)).await?;
        self.shortcuts.write().await.push(shortcut.clone());
        Ok(())
    }

    async fn update_shortcut(&self, shortcut: &QuickShortcut) -> Result<()> {
        self.write(format!("update_shortcut:{}", shortcut.id)).await?;
        let mut shortcuts = self.shortcuts.write().await;
        if let Some(existing) = shortcuts.iter_mut().find(|s| s.id == shortcut.id) {
            *existing = shortcut.clone();
        }
        Ok(())
    }

    async fn delete_shortcut(&self, shortcut_id: &str) -> Result<()> {
        self.write(format!("delete_shortcut:{}", shortcut_id)).await?;
        self.shortcuts.write().await.retain(|s| s.id != shortcut_id);
        Ok(())
    }
}

#[async_trait]
impl SettingsStorage for MemoryGateway {
    async fn get_country(&self) -> Result<Option<String>> {
        self.read("get_country").await?;
        Ok(self.country.read().await.clone())
    }

    async fn set_country(&self, country: &str) -> Result<()> {
        self.write(format!("set_country:{}", country)).await?;
        *self.country.write().await = Some(country.to_string());
        Ok(())
    }

    async fn get_guide_cache(&self) -> Result<GuideCache> {
        self.read("get_guide_cache").await?;
        Ok(self.guide_cache.read().await.clone())
    }

    async fn set_guide_cache(&self, cache: &GuideCache) -> Result<()> {
        self.write(format!("set_guide_cache:{}", cache.len())).await?;
        *self.guide_cache.write().await = cache.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_categories_seeds_defaults_once() {
        let gateway = MemoryGateway::new();
        let defaults = vec![Category::new("Food")];

        let first = gateway.list_categories(&defaults).await.unwrap();
        assert_eq!(first, defaults);

        gateway.add_category(&Category::new("Pets")).await.unwrap();
        let second = gateway.list_categories(&[]).await.unwrap();
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_is_logged_but_not_applied() {
        let gateway = MemoryGateway::recording();
        gateway.fail_writes(true);

        let result = gateway.set_country("Japan").await;
        assert!(result.is_err());
        assert_eq!(gateway.stored_country().await, None);
        assert_eq!(gateway.calls().await, vec!["set_country:Japan".to_string()]);
        assert_eq!(gateway.write_count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_category_cascades_only_with_target() {
        let rent = Category::new("Rent");
        let gateway = MemoryGateway::new()
            .with_categories(vec![rent.clone()])
            .with_budgets(vec![Budget {
                category: "Rent".to_string(),
                limit: 900.0,
                spent: 0.0,
            }]);

        gateway.delete_category(&rent.id, "Rent", Some("Others")).await.unwrap();

        assert!(gateway.stored_categories().await.is_empty());
        assert_eq!(gateway.stored_budgets().await[0].category, "Others");
    }

    #[tokio::test]
    async fn test_plain_gateway_keeps_no_call_log() {
        let gateway = MemoryGateway::new();

        for i in 0..100 {
            gateway.set_country(&format!("Country {}", i)).await.unwrap();
            gateway.get_country().await.unwrap();
        }

        assert!(gateway.calls().await.is_empty());
        assert_eq!(gateway.write_count().await, 0);
        assert_eq!(gateway.stored_country().await.as_deref(), Some("Country 99"));
    }
}
