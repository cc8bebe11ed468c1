//! CSV budget repository, `{data_directory}/budgets.csv`.

use anyhow::Result;
use async_trait::async_trait;
use shared::Budget;

use super::connection::CsvConnection;
use crate::storage::BudgetStorage;

pub(super) const BUDGETS_FILE: &str = "budgets.csv";
const BUDGETS_HEADER: &str = "category,limit,spent";

#[derive(Debug, Clone)]
pub struct BudgetRepository {
    connection: CsvConnection,
}

impl BudgetRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    pub(super) fn read_all(&self) -> Result<Vec<Budget>> {
        self.connection.read_records(BUDGETS_FILE, BUDGETS_HEADER)
    }

    pub(super) fn write_all(&self, budgets: &[Budget]) -> Result<()> {
        self.connection.write_records(BUDGETS_FILE, BUDGETS_HEADER, budgets)
    }
}

#[async_trait]
impl BudgetStorage for BudgetRepository {
    async fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.read_all()
    }

    async fn add_budget(&self, budget: &Budget) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut budgets = self.read_all()?;
        budgets.push(budget.clone());
        self.write_all(&budgets)
    }
}
