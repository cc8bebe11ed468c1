//! Entity store.
//!
//! Owns the in-memory copy of every collection. Services mutate it through
//! [`EntityStore::mutate`], which holds the write lock only for the synchronous
//! closure; gateway calls happen afterwards, with no lock held. A gateway
//! failure is logged by [`log_write_failure`] and the in-memory change stays.

use shared::{
    Budget, Category, Currency, GuideCache, QuickShortcut, SavingsGoal, StateSnapshot,
    SurvivalGuide, Transaction,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

use super::countries::CountryTable;
use super::defaults::{default_categories, default_shortcuts};
use crate::storage::Gateway;

/// Every collection and flag the application keeps in memory
#[derive(Debug, Clone, PartialEq)]
pub struct AppData {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<SavingsGoal>,
    pub categories: Vec<Category>,
    pub shortcuts: Vec<QuickShortcut>,
    pub country: String,
    pub currency: Currency,
    pub guide_cache: GuideCache,
    /// Guide currently on display in the tips view
    pub survival_guide: Option<SurvivalGuide>,
    pub is_guide_loading: bool,
    /// Set once the initial load has finished, successfully or not
    pub is_loaded: bool,
}

impl AppData {
    /// State before anything was loaded: seed categories and shortcuts, empty collections
    pub fn with_defaults(countries: &CountryTable, default_country: &str) -> Self {
        let currency = countries
            .currency_of(default_country)
            .unwrap_or(Currency::Eur);
        Self {
            transactions: Vec::new(),
            budgets: Vec::new(),
            goals: Vec::new(),
            categories: default_categories(),
            shortcuts: default_shortcuts(),
            country: default_country.to_string(),
            currency,
            guide_cache: GuideCache::new(),
            survival_guide: None,
            is_guide_loading: false,
            is_loaded: false,
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            transactions: self.transactions.clone(),
            budgets: self.budgets.clone(),
            goals: self.goals.clone(),
            categories: self.categories.clone(),
            shortcuts: self.shortcuts.clone(),
            country: self.country.clone(),
            currency: self.currency,
            survival_guide: self.survival_guide.clone(),
            is_guide_loading: self.is_guide_loading,
            is_loaded: self.is_loaded,
        }
    }
}

/// Shared handle on the application state and the gateway it writes through to
#[derive(Clone)]
pub struct EntityStore {
    state: Arc<RwLock<AppData>>,
    gateway: Gateway,
}

impl EntityStore {
    pub fn new(gateway: Gateway, initial: AppData) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            gateway,
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Apply a synchronous change to the in-memory state
    pub async fn mutate<R>(&self, change: impl FnOnce(&mut AppData) -> R) -> R {
        let mut state = self.state.write().await;
        change(&mut state)
    }

    pub async fn read<R>(&self, view: impl FnOnce(&AppData) -> R) -> R {
        let state = self.state.read().await;
        view(&state)
    }

    pub async fn snapshot(&self) -> StateSnapshot {
        self.read(AppData::snapshot).await
    }

    /// Swap in freshly loaded state
    pub async fn replace(&self, data: AppData) {
        *self.state.write().await = data;
    }
}

/// Log a failed write-through. In-memory state is intentionally left as is.
pub fn log_write_failure(operation: &str, result: anyhow::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to {}: {:#}. Keeping in-memory state.", operation, e);
            false
        }
    }
}
