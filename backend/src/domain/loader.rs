//! Initial state load.
//!
//! Every collection is read concurrently. Any failure falls back to the
//! default state; either way the result is marked loaded, so the views leave
//! the loading screen.

use anyhow::Result;
use tracing::{error, info, warn};

use super::countries::CountryTable;
use super::defaults::{default_categories, default_shortcuts};
use super::store::AppData;
use crate::storage::Gateway;

pub async fn load_initial_state(gateway: &Gateway, countries: &CountryTable, default_country: &str) -> AppData {
    let mut data = AppData::with_defaults(countries, default_country);

    match read_all(gateway, countries, &mut data).await {
        Ok(()) => info!(
            "Loaded {} transactions, {} categories, {} budgets, {} goals, {} cached guides",
            data.transactions.len(),
            data.categories.len(),
            data.budgets.len(),
            data.goals.len(),
            data.guide_cache.len()
        ),
        Err(e) => {
            error!("Failed to load stored data: {:#}. Starting with defaults.", e);
            data = AppData::with_defaults(countries, default_country);
        }
    }

    data.is_loaded = true;
    data
}

async fn read_all(gateway: &Gateway, countries: &CountryTable, data: &mut AppData) -> Result<()> {
    let default_categories = default_categories();
    let default_shortcuts = default_shortcuts();

    let (transactions, budgets, goals, categories, shortcuts, guide_cache) = tokio::try_join!(
        gateway.transactions.list_transactions(),
        gateway.budgets.list_budgets(),
        gateway.goals.list_goals(),
        gateway.categories.list_categories(&default_categories),
        gateway.shortcuts.list_shortcuts(&default_shortcuts),
        gateway.settings.get_guide_cache(),
    )?;

    data.transactions = transactions;
    data.budgets = budgets;
    data.goals = goals;
    data.categories = categories;
    data.shortcuts = shortcuts;
    data.guide_cache = guide_cache;

    if let Some(country) = gateway.settings.get_country().await? {
        match countries.get(&country) {
            Some(info) => {
                data.country = info.name.clone();
                data.currency = info.currency;
            }
            None => warn!("Ignoring saved country '{}': not in the country table", country),
        }
    }

    Ok(())
}
