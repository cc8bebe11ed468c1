//! Budget service: spending limits per category.
//!
//! Budgets have no id of their own; they are keyed by category name and only
//! ever appended. Nothing prevents two budgets for the same category.

use shared::Budget;
use tracing::info;

use super::store::{log_write_failure, EntityStore};

#[derive(Clone)]
pub struct BudgetService {
    store: EntityStore,
}

impl BudgetService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list_budgets(&self) -> Vec<Budget> {
        self.store.read(|data| data.budgets.clone()).await
    }

    pub async fn add_budget(&self, budget: Budget) -> Budget {
        info!("Adding budget for '{}' with limit {:.2}", budget.category, budget.limit);

        self.store.mutate(|data| data.budgets.push(budget.clone())).await;

        let result = self.store.gateway().budgets.add_budget(&budget).await;
        log_write_failure("add budget", result);
        budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::countries::CountryTable;
    use crate::domain::store::AppData;
    use crate::storage::MemoryGateway;

    #[tokio::test]
    async fn test_duplicate_category_budgets_are_kept() {
        let (memory, gateway) = MemoryGateway::recording().into_gateway();
        let service = BudgetService::new(EntityStore::new(
            gateway,
            AppData::with_defaults(&CountryTable::default(), "Germany"),
        ));
        let food = Budget {
            category: "Food".to_string(),
            limit: 250.0,
            spent: 40.0,
        };

        service.add_budget(food.clone()).await;
        service.add_budget(food.clone()).await;

        assert_eq!(service.list_budgets().await, vec![food.clone(), food]);
        assert_eq!(memory.stored_budgets().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_budget() {
        let (memory, gateway) = MemoryGateway::recording().into_gateway();
        memory.fail_writes(true);
        let service = BudgetService::new(EntityStore::new(
            gateway,
            AppData::with_defaults(&CountryTable::default(), "Germany"),
        ));

        service
            .add_budget(Budget {
                category: "Rent".to_string(),
                limit: 900.0,
                spent: 0.0,
            })
            .await;

        assert_eq!(service.list_budgets().await.len(), 1);
        assert!(memory.stored_budgets().await.is_empty());
    }
}
