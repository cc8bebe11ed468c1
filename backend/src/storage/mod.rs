//! # Storage Module
//!
//! Persistence gateway for the finance tracker.
//!
//! The domain layer keeps every collection in memory and writes changes
//! through to a [`Gateway`]; it never reads back after the initial load.
//! Two backends are provided:
//!
//! - **csv**: CSV files per collection plus YAML files for settings and the
//!   survival guide cache, all under one data directory
//! - **memory**: process-local collections, used for ephemeral runs and tests

pub mod csv;
pub mod memory;
pub mod rewrite;
pub mod traits;

use std::sync::Arc;

pub use self::csv::CsvConnection;
pub use memory::MemoryGateway;
pub use traits::*;

/// Bundle of per-collection repositories the domain services write through
#[derive(Clone)]
pub struct Gateway {
    pub transactions: Arc<dyn TransactionStorage>,
    pub categories: Arc<dyn CategoryStorage>,
    pub budgets: Arc<dyn BudgetStorage>,
    pub goals: Arc<dyn GoalStorage>,
    pub shortcuts: Arc<dyn ShortcutStorage>,
    pub settings: Arc<dyn SettingsStorage>,
}

impl Gateway {
    /// Build a gateway where one value serves every collection
    pub fn from_shared<S>(storage: Arc<S>) -> Self
    where
        S: TransactionStorage
            + CategoryStorage
            + BudgetStorage
            + GoalStorage
            + ShortcutStorage
            + SettingsStorage
            + 'static,
    {
        Self {
            transactions: storage.clone(),
            categories: storage.clone(),
            budgets: storage.clone(),
            goals: storage.clone(),
            shortcuts: storage.clone(),
            settings: storage,
        }
    }
}
