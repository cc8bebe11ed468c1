//! # CSV Category Repository
//!
//! Categories live in `{data_directory}/categories.csv`:
//!
//! ```csv
//! id,name,is_default
//! 1,Food,false
//! ```
//!
//! Deleting a category with a migration target also moves the stored
//! transactions and budgets to the target, since this repository owns the
//! durable copies of those files too. Renames are not propagated here.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::Category;
use tracing::{debug, info};

use super::budget_repository::BudgetRepository;
use super::connection::CsvConnection;
use super::transaction_repository::TransactionRepository;
use crate::storage::rewrite;
use crate::storage::CategoryStorage;

const CATEGORIES_FILE: &str = "categories.csv";
const CATEGORIES_HEADER: &str = "id,name,is_default";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryRecord {
    id: String,
    name: String,
    is_default: bool,
}

impl From<&Category> for CategoryRecord {
    fn from(category: &Category) -> Self {
        CategoryRecord {
            id: category.id.clone(),
            name: category.name.clone(),
            is_default: category.is_default,
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category {
            id: record.id,
            name: record.name,
            is_default: record.is_default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    connection: CsvConnection,
    transaction_repository: TransactionRepository,
    budget_repository: BudgetRepository,
}

impl CategoryRepository {
    pub fn new(
        connection: CsvConnection,
        transaction_repository: TransactionRepository,
        budget_repository: BudgetRepository,
    ) -> Self {
        Self {
            connection,
            transaction_repository,
            budget_repository,
        }
    }

    fn read_categories(&self) -> Result<Vec<Category>> {
        let records: Vec<CategoryRecord> = self
            .connection
            .read_records(CATEGORIES_FILE, CATEGORIES_HEADER)?;
        Ok(records.into_iter().map(Category::from).collect())
    }

    fn write_categories(&self, categories: &[Category]) -> Result<()> {
        let records: Vec<CategoryRecord> = categories.iter().map(CategoryRecord::from).collect();
        self.connection
            .write_records(CATEGORIES_FILE, CATEGORIES_HEADER, &records)
    }

    fn migrate_stored_records(&self, old_name: &str, target: &str) -> Result<()> {
        let mut transactions = self.transaction_repository.read_all()?;
        let moved = rewrite::rewrite_transactions(&mut transactions, old_name, target);
        if moved > 0 {
            self.transaction_repository.write_all(&transactions)?;
        }

        let mut budgets = self.budget_repository.read_all()?;
        let moved_budgets = rewrite::rewrite_budgets(&mut budgets, old_name, target);
        if moved_budgets > 0 {
            self.budget_repository.write_all(&budgets)?;
        }

        info!(
            "Moved {} stored transactions and {} budgets from '{}' to '{}'",
            moved, moved_budgets, old_name, target
        );
        Ok(())
    }
}

#[async_trait]
impl CategoryStorage for CategoryRepository {
    async fn list_categories(&self, defaults: &[Category]) -> Result<Vec<Category>> {
        let _guard = self.connection.lock_writes().await;
        let categories = self.read_categories()?;
        if categories.is_empty() && !defaults.is_empty() {
            info!("No categories stored yet, seeding {} defaults", defaults.len());
            self.write_categories(defaults)?;
            return Ok(defaults.to_vec());
        }
        Ok(categories)
    }

    async fn add_category(&self, category: &Category) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut categories = self.read_categories()?;
        categories.push(category.clone());
        self.write_categories(&categories)?;
        debug!("Stored category {} ({})", category.name, category.id);
        Ok(())
    }

    async fn update_category(&self, category_id: &str, new_name: &str) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut categories = self.read_categories()?;
        if let Some(category) = categories.iter_mut().find(|c| c.id == category_id) {
            category.name = new_name.to_string();
        }
        self.write_categories(&categories)
    }

    async fn delete_category(
        &self,
        category_id: &str,
        old_name: &str,
        migrate_to: Option<&str>,
    ) -> Result<()> {
        // One guard covers the category file and the migrated records
        let _guard = self.connection.lock_writes().await;
        let mut categories = self.read_categories()?;
        categories.retain(|c| c.id != category_id);
        self.write_categories(&categories)?;

        if let Some(target) = migrate_to {
            self.migrate_stored_records(old_name, target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::default_categories;
    use crate::storage::{BudgetStorage, TransactionStorage};
    use shared::{Budget, Currency, Transaction, TransactionType};
    use tempfile::TempDir;

    fn setup() -> (CategoryRepository, TransactionRepository, BudgetRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let transactions = TransactionRepository::new(connection.clone());
        let budgets = BudgetRepository::new(connection.clone());
        let categories = CategoryRepository::new(connection, transactions.clone(), budgets.clone());
        (categories, transactions, budgets, temp_dir)
    }

    fn rent_payment(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount: -950.0,
            currency: Currency::Eur,
            category: "Rent".to_string(),
            date: "2025-03-01".to_string(),
            description: "March rent".to_string(),
            merchant: None,
            transaction_type: TransactionType::Expense,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_seeds_defaults_only_when_empty() {
        let (repo, _transactions, _budgets, _temp_dir) = setup();

        let seeded = repo.list_categories(&default_categories()).await.unwrap();
        assert_eq!(seeded, default_categories());

        repo.add_category(&Category::new("Pets")).await.unwrap();
        let listed = repo.list_categories(&default_categories()).await.unwrap();
        assert_eq!(listed.len(), default_categories().len() + 1);
    }

    #[tokio::test]
    async fn test_rename_does_not_touch_stored_transactions() {
        let (repo, transactions, _budgets, _temp_dir) = setup();
        repo.list_categories(&default_categories()).await.unwrap();
        transactions.add_transaction(&rent_payment("t1")).await.unwrap();

        repo.update_category("3", "Housing").await.unwrap();

        let categories = repo.list_categories(&[]).await.unwrap();
        assert!(categories.iter().any(|c| c.id == "3" && c.name == "Housing"));
        assert_eq!(transactions.list_transactions().await.unwrap()[0].category, "Rent");
    }

    #[tokio::test]
    async fn test_delete_with_target_migrates_stored_records() {
        let (repo, transactions, budgets, _temp_dir) = setup();
        repo.list_categories(&default_categories()).await.unwrap();
        transactions.add_transaction(&rent_payment("t1")).await.unwrap();
        budgets
            .add_budget(&Budget { category: "Rent".to_string(), limit: 1000.0, spent: 950.0 })
            .await
            .unwrap();

        repo.delete_category("3", "Rent", Some("Others")).await.unwrap();

        let categories = repo.list_categories(&[]).await.unwrap();
        assert!(categories.iter().all(|c| c.name != "Rent"));
        assert_eq!(transactions.list_transactions().await.unwrap()[0].category, "Others");
        assert_eq!(budgets.list_budgets().await.unwrap()[0].category, "Others");
    }

    #[tokio::test]
    async fn test_delete_without_target_leaves_orphans() {
        let (repo, transactions, _budgets, _temp_dir) = setup();
        repo.list_categories(&default_categories()).await.unwrap();
        transactions.add_transaction(&rent_payment("t1")).await.unwrap();

        repo.delete_category("3", "Rent", None).await.unwrap();

        assert_eq!(transactions.list_transactions().await.unwrap()[0].category, "Rent");
    }
}
