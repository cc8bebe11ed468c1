//! Transaction service domain logic for the finance tracker.
//!
//! Logging a transaction whose category is unknown creates that category on
//! the fly. The existence check ignores case, so "food" files under an
//! existing "Food" without creating anything.

use anyhow::Result;
use shared::{Category, Transaction};
use tracing::info;

use super::cascade;
use super::store::{log_write_failure, EntityStore};

/// Outcome of logging a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct AddedTransaction {
    pub transaction: Transaction,
    /// Category created because no existing one matched the transaction's category
    pub created_category: Option<Category>,
}

#[derive(Clone)]
pub struct TransactionService {
    store: EntityStore,
}

impl TransactionService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.store.read(|data| data.transactions.clone()).await
    }

    pub async fn add_transaction(&self, transaction: Transaction) -> AddedTransaction {
        info!("Adding transaction {} in category '{}'", transaction.id, transaction.category);

        let created_category = self
            .store
            .mutate(|data| {
                data.transactions.push(transaction.clone());
                if cascade::find_category_ignore_case(&data.categories, &transaction.category).is_some() {
                    return None;
                }
                let category = Category::new(transaction.category.clone());
                data.categories.push(category.clone());
                Some(category)
            })
            .await;

        if let Some(category) = &created_category {
            info!("Created category '{}' for new transaction", category.name);
        }

        // A failed category write skips the transaction write, like one try block
        let gateway = self.store.gateway();
        let result: Result<()> = async {
            if let Some(category) = &created_category {
                gateway.categories.add_category(category).await?;
            }
            gateway.transactions.add_transaction(&transaction).await?;
            Ok(())
        }
        .await;
        log_write_failure("add transaction", result);

        AddedTransaction {
            transaction,
            created_category,
        }
    }

    /// Replace the transaction with the same id
    pub async fn update_transaction(&self, transaction: Transaction) {
        info!("Updating transaction {}", transaction.id);

        self.store
            .mutate(|data| {
                if let Some(existing) = data.transactions.iter_mut().find(|t| t.id == transaction.id) {
                    *existing = transaction.clone();
                }
            })
            .await;

        let result = self.store.gateway().transactions.update_transaction(&transaction).await;
        log_write_failure("update transaction", result);
    }

    pub async fn delete_transaction(&self, transaction_id: &str) {
        info!("Deleting transaction {}", transaction_id);

        self.store
            .mutate(|data| data.transactions.retain(|t| t.id != transaction_id))
            .await;

        let result = self.store.gateway().transactions.delete_transaction(transaction_id).await;
        log_write_failure("delete transaction", result);
    }
}
