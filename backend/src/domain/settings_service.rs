//! Settings service: the selected country and its currency.

use shared::{CountryInfo, Currency};
use std::sync::Arc;
use tracing::{info, warn};

use super::countries::CountryTable;
use super::store::{log_write_failure, EntityStore};

#[derive(Clone)]
pub struct SettingsService {
    store: EntityStore,
    countries: Arc<CountryTable>,
}

impl SettingsService {
    pub fn new(store: EntityStore, countries: Arc<CountryTable>) -> Self {
        Self { store, countries }
    }

    pub fn countries(&self) -> &CountryTable {
        &self.countries
    }

    /// Currently selected country with its currency
    pub async fn current_country(&self) -> (String, Currency) {
        self.store
            .read(|data| (data.country.clone(), data.currency))
            .await
    }

    /// Switch country and currency. Unknown countries are rejected with `None`
    /// and leave state untouched.
    pub async fn select_country(&self, country: &str) -> Option<CountryInfo> {
        let Some(info) = self.countries.get(country).cloned() else {
            warn!("Ignoring selection of unknown country '{}'", country);
            return None;
        };

        info!("Selecting country {} ({})", info.name, info.currency);
        self.store
            .mutate(|data| {
                data.country = info.name.clone();
                data.currency = info.currency;
            })
            .await;

        let result = self.store.gateway().settings.set_country(&info.name).await;
        log_write_failure("save country", result);
        Some(info)
    }
}
