//! # CSV Goal Repository
//!
//! Savings goals live in `{data_directory}/goals.csv`:
//!
//! ```csv
//! id,name,target_amount,current_amount,deadline
//! g1,Emergency fund,3000.0,450.0,2025-12-31
//! ```

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::SavingsGoal;
use tracing::debug;

use super::connection::CsvConnection;
use crate::storage::GoalStorage;

const GOALS_FILE: &str = "goals.csv";
const GOALS_HEADER: &str = "id,name,target_amount,current_amount,deadline";

/// CSV record structure for goals
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GoalRecord {
    id: String,
    name: String,
    target_amount: f64,
    current_amount: f64,
    deadline: Option<String>,
}

impl From<&SavingsGoal> for GoalRecord {
    fn from(goal: &SavingsGoal) -> Self {
        GoalRecord {
            id: goal.id.clone(),
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline.clone(),
        }
    }
}

impl From<GoalRecord> for SavingsGoal {
    fn from(record: GoalRecord) -> Self {
        SavingsGoal {
            id: record.id,
            name: record.name,
            target_amount: record.target_amount,
            current_amount: record.current_amount,
            deadline: record.deadline,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoalRepository {
    connection: CsvConnection,
}

impl GoalRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_goals(&self) -> Result<Vec<SavingsGoal>> {
        let records: Vec<GoalRecord> = self.connection.read_records(GOALS_FILE, GOALS_HEADER)?;
        Ok(records.into_iter().map(SavingsGoal::from).collect())
    }

    fn write_goals(&self, goals: &[SavingsGoal]) -> Result<()> {
        let records: Vec<GoalRecord> = goals.iter().map(GoalRecord::from).collect();
        self.connection.write_records(GOALS_FILE, GOALS_HEADER, &records)
    }
}

#[async_trait]
impl GoalStorage for GoalRepository {
    async fn list_goals(&self) -> Result<Vec<SavingsGoal>> {
        self.read_goals()
    }

    async fn add_goal(&self, goal: &SavingsGoal) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut goals = self.read_goals()?;
        goals.push(goal.clone());
        self.write_goals(&goals)?;
        debug!("Stored goal {}", goal.id);
        Ok(())
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut goals = self.read_goals()?;
        goals.retain(|g| g.id != goal_id);
        self.write_goals(&goals)
    }
}
