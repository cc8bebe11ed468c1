//! Category service domain logic for the finance tracker.
//!
//! Categories are the join key for transactions and budgets, which store the
//! category *name*. Renaming a category rewrites those names in memory; only
//! the rename itself goes through the gateway. Deleting with a migration
//! target moves the affected records, creating the "Others" fallback first
//! when it is the target and does not exist yet.

use anyhow::Result;
use shared::Category;
use tracing::{info, warn};

use super::cascade::{self, CascadeCount};
use super::store::{log_write_failure, EntityStore};

/// Outcome of a rename request
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryRename {
    /// Unknown id, blank name, or the name did not change
    Unchanged,
    Renamed {
        old_name: String,
        new_name: String,
        cascade: CascadeCount,
    },
}

/// Outcome of a delete request
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDeletion {
    NotFound,
    Deleted {
        name: String,
        migrated_to: Option<String>,
        /// Fallback category synthesized for the migration
        created_fallback: Option<Category>,
        cascade: CascadeCount,
    },
}

#[derive(Clone)]
pub struct CategoryService {
    store: EntityStore,
}

impl CategoryService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list_categories(&self) -> Vec<Category> {
        self.store.read(|data| data.categories.clone()).await
    }

    pub async fn add_category(&self, category: Category) -> Category {
        info!("Adding category '{}'", category.name);

        self.store.mutate(|data| data.categories.push(category.clone())).await;

        let result = self.store.gateway().categories.add_category(&category).await;
        log_write_failure("add category", result);
        category
    }

    pub async fn update_category(&self, category_id: &str, new_name: &str) -> CategoryRename {
        let new_name = new_name.trim();

        let outcome = self
            .store
            .mutate(|data| {
                let Some(category) = data.categories.iter_mut().find(|c| c.id == category_id) else {
                    return CategoryRename::Unchanged;
                };
                if new_name.is_empty() || category.name == new_name {
                    return CategoryRename::Unchanged;
                }

                let old_name = std::mem::replace(&mut category.name, new_name.to_string());
                let cascade = cascade::rewrite_category_references(
                    &mut data.transactions,
                    &mut data.budgets,
                    &old_name,
                    new_name,
                );
                CategoryRename::Renamed {
                    old_name,
                    new_name: new_name.to_string(),
                    cascade,
                }
            })
            .await;

        match &outcome {
            CategoryRename::Unchanged => {
                info!("Category {} not renamed: unknown id or unchanged name", category_id);
            }
            CategoryRename::Renamed {
                old_name,
                new_name,
                cascade,
            } => {
                info!(
                    "Renamed category '{}' to '{}' ({} transactions, {} budgets)",
                    old_name, new_name, cascade.transactions, cascade.budgets
                );
                let result = self
                    .store
                    .gateway()
                    .categories
                    .update_category(category_id, new_name)
                    .await;
                log_write_failure("update category", result);
            }
        }

        outcome
    }

    pub async fn delete_category(&self, category_id: &str, migrate_to: Option<&str>) -> CategoryDeletion {
        let migrate_to = migrate_to.filter(|target| !target.is_empty());

        // Step 1: resolve the category and synthesize the fallback if needed
        let resolved = self
            .store
            .mutate(|data| {
                let name = data
                    .categories
                    .iter()
                    .find(|c| c.id == category_id)
                    .map(|c| c.name.clone())?;

                let fallback = match migrate_to {
                    Some(target) if cascade::needs_fallback_category(&data.categories, target) => {
                        let fallback = Category::new(cascade::FALLBACK_CATEGORY);
                        data.categories.push(fallback.clone());
                        Some(fallback)
                    }
                    _ => None,
                };
                Some((name, fallback))
            })
            .await;

        let Some((name, created_fallback)) = resolved else {
            warn!("Cannot delete category {}: not found", category_id);
            return CategoryDeletion::NotFound;
        };

        if let Some(fallback) = &created_fallback {
            info!("Creating fallback category '{}'", fallback.name);
            let result = self.store.gateway().categories.add_category(fallback).await;
            log_write_failure("add fallback category", result);
        }

        // Step 2: move references and drop the category
        let cascade = self
            .store
            .mutate(|data| {
                let cascade = match migrate_to {
                    Some(target) => cascade::rewrite_category_references(
                        &mut data.transactions,
                        &mut data.budgets,
                        &name,
                        target,
                    ),
                    None => CascadeCount::default(),
                };
                data.categories.retain(|c| c.id != category_id);
                cascade
            })
            .await;

        match migrate_to {
            Some(target) => info!(
                "Deleted category '{}', moved {} records to '{}'",
                name,
                cascade.total(),
                target
            ),
            None => info!("Deleted category '{}' without migration", name),
        }

        let gateway = self.store.gateway();
        let result: Result<()> = gateway
            .categories
            .delete_category(category_id, &name, migrate_to)
            .await;
        log_write_failure("delete category", result);

        CategoryDeletion::Deleted {
            name,
            migrated_to: migrate_to.map(str::to_string),
            created_fallback,
            cascade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::countries::CountryTable;
    use crate::domain::store::AppData;
    use crate::storage::MemoryGateway;
    use shared::{Budget, Currency, Transaction, TransactionType};
    use std::sync::Arc;

    fn transaction(id: &str, category: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount: -20.0,
            currency: Currency::Eur,
            category: category.to_string(),
            date: "2025-03-01".to_string(),
            description: "Test".to_string(),
            merchant: None,
            transaction_type: TransactionType::Expense,
            notes: None,
        }
    }

    fn budget(category: &str) -> Budget {
        Budget {
            category: category.to_string(),
            limit: 300.0,
            spent: 0.0,
        }
    }

    fn create_test_service() -> (CategoryService, EntityStore, Arc<MemoryGateway>) {
        let (memory, gateway) = MemoryGateway::recording().into_gateway();
        let mut data = AppData::with_defaults(&CountryTable::default(), "Germany");
        data.transactions = vec![
            transaction("t1", "Food"),
            transaction("t2", "food"),
            transaction("t3", "Rent"),
        ];
        data.budgets = vec![budget("Food"), budget("Rent")];
        let store = EntityStore::new(gateway, data);
        (CategoryService::new(store.clone()), store, memory)
    }

    #[tokio::test]
    async fn test_rename_rewrites_exact_matches_only() {
        let (service, store, memory) = create_test_service();

        // "1" is Food in the seed data
        let outcome = service.update_category("1", "  Groceries ").await;

        assert_eq!(
            outcome,
            CategoryRename::Renamed {
                old_name: "Food".to_string(),
                new_name: "Groceries".to_string(),
                cascade: CascadeCount {
                    transactions: 1,
                    budgets: 1
                },
            }
        );

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.categories[0].name, "Groceries");
        assert_eq!(snapshot.transactions[0].category, "Groceries");
        assert_eq!(snapshot.transactions[1].category, "food");
        assert_eq!(snapshot.budgets[0].category, "Groceries");
        // Only the rename is persisted
        assert_eq!(memory.calls().await, vec!["update_category:1:Groceries".to_string()]);
    }

    #[tokio::test]
    async fn test_rename_noops() {
        let (service, store, memory) = create_test_service();
        let before = store.snapshot().await;

        assert_eq!(service.update_category("1", "Food").await, CategoryRename::Unchanged);
        assert_eq!(service.update_category("1", "   ").await, CategoryRename::Unchanged);
        // Padding around the current name is not a rename
        assert_eq!(service.update_category("1", "  Food ").await, CategoryRename::Unchanged);
        assert_eq!(service.update_category("1", "\tFood\n").await, CategoryRename::Unchanged);
        assert_eq!(service.update_category("missing", "Groceries").await, CategoryRename::Unchanged);

        assert_eq!(store.snapshot().await, before);
        assert_eq!(memory.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_delete_with_others_creates_fallback_once() {
        let (service, store, memory) = create_test_service();

        // "3" is Rent in the seed data
        let outcome = service.delete_category("3", Some("Others")).await;

        let CategoryDeletion::Deleted {
            name,
            created_fallback,
            cascade,
            ..
        } = outcome
        else {
            panic!("expected deletion");
        };
        assert_eq!(name, "Rent");
        let fallback = created_fallback.expect("fallback should be created");
        assert_eq!(cascade, CascadeCount { transactions: 1, budgets: 1 });

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.categories.iter().filter(|c| c.name == "Others").count(), 1);
        assert!(!snapshot.categories.iter().any(|c| c.name == "Rent"));
        assert_eq!(snapshot.transactions[2].category, "Others");
        assert_eq!(snapshot.budgets[1].category, "Others");

        assert_eq!(
            memory.calls().await,
            vec![
                "add_category:Others".to_string(),
                "delete_category:3:Others".to_string()
            ]
        );
        assert!(memory.stored_categories().await.contains(&fallback));

        // Second deletion reuses the existing fallback
        service.delete_category("1", Some("Others")).await;
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.categories.iter().filter(|c| c.name == "Others").count(), 1);
    }

    #[tokio::test]
    async fn test_delete_without_target_orphans_records() {
        let (service, store, memory) = create_test_service();

        let outcome = service.delete_category("3", None).await;

        assert!(matches!(
            outcome,
            CategoryDeletion::Deleted { migrated_to: None, created_fallback: None, .. }
        ));
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.transactions[2].category, "Rent");
        assert_eq!(snapshot.budgets[1].category, "Rent");
        assert_eq!(memory.calls().await, vec!["delete_category:3:-".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_empty_target_is_no_target() {
        let (service, store, _memory) = create_test_service();

        service.delete_category("3", Some("")).await;

        assert_eq!(store.snapshot().await.transactions[2].category, "Rent");
    }

    #[tokio::test]
    async fn test_delete_unknown_is_noop() {
        let (service, _store, memory) = create_test_service();

        assert_eq!(service.delete_category("nope", Some("Others")).await, CategoryDeletion::NotFound);
        assert_eq!(memory.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_delete_with_failing_gateway_still_applies() {
        let (service, store, memory) = create_test_service();
        memory.fail_writes(true);

        service.delete_category("3", Some("Others")).await;

        let snapshot = store.snapshot().await;
        assert!(!snapshot.categories.iter().any(|c| c.name == "Rent"));
        assert_eq!(snapshot.transactions[2].category, "Others");
        // Both writes were still attempted
        assert_eq!(memory.write_count().await, 2);
    }

    #[tokio::test]
    async fn test_add_category_persists() {
        let (service, store, memory) = create_test_service();

        let pets = service.add_category(Category::new("Pets")).await;

        assert!(store.snapshot().await.categories.contains(&pets));
        assert_eq!(memory.stored_categories().await, vec![pets]);
    }
}
