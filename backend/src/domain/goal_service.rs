//! Goal service domain logic for the finance tracker.
//!
//! Savings goals can be created and deleted. Progress (`current_amount`) is
//! whatever the client sends; no projection happens here.

use shared::SavingsGoal;
use tracing::info;

use super::store::{log_write_failure, EntityStore};

/// Service for managing savings goals
#[derive(Clone)]
pub struct GoalService {
    store: EntityStore,
}

impl GoalService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list_goals(&self) -> Vec<SavingsGoal> {
        self.store.read(|data| data.goals.clone()).await
    }

    /// Create a new goal
    pub async fn add_goal(&self, goal: SavingsGoal) -> SavingsGoal {
        info!("Adding savings goal '{}' ({:.2} target)", goal.name, goal.target_amount);

        self.store.mutate(|data| data.goals.push(goal.clone())).await;

        let result = self.store.gateway().goals.add_goal(&goal).await;
        log_write_failure("add goal", result);
        goal
    }

    pub async fn delete_goal(&self, goal_id: &str) {
        info!("Deleting savings goal {}", goal_id);

        self.store.mutate(|data| data.goals.retain(|g| g.id != goal_id)).await;

        let result = self.store.gateway().goals.delete_goal(goal_id).await;
        log_write_failure("delete goal", result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::countries::CountryTable;
    use crate::domain::store::AppData;
    use crate::storage::MemoryGateway;

    fn goal(id: &str, name: &str) -> SavingsGoal {
        SavingsGoal {
            id: id.to_string(),
            name: name.to_string(),
            target_amount: 1200.0,
            current_amount: 150.0,
            deadline: Some("2025-12-31".to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_and_delete_goal() {
        let (memory, gateway) = MemoryGateway::recording().into_gateway();
        let service = GoalService::new(EntityStore::new(
            gateway,
            AppData::with_defaults(&CountryTable::default(), "Germany"),
        ));

        service.add_goal(goal("g1", "Bike")).await;
        service.add_goal(goal("g2", "Laptop")).await;
        service.delete_goal("g1").await;

        assert_eq!(service.list_goals().await, vec![goal("g2", "Laptop")]);
        assert_eq!(memory.stored_goals().await, vec![goal("g2", "Laptop")]);
        assert_eq!(
            memory.calls().await,
            vec!["add_goal:g1", "add_goal:g2", "delete_goal:g1"]
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_goal_still_reaches_gateway() {
        let (memory, gateway) = MemoryGateway::recording().into_gateway();
        let service = GoalService::new(EntityStore::new(
            gateway,
            AppData::with_defaults(&CountryTable::default(), "Germany"),
        ));

        service.delete_goal("missing").await;

        assert!(service.list_goals().await.is_empty());
        assert_eq!(memory.write_count().await, 1);
    }
}
