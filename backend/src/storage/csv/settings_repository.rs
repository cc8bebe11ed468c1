//! # Settings Repository
//!
//! Singleton values stored as YAML at the root of the data directory:
//!
//! ```text
//! data/
//! ├── settings.yaml      ← selected country
//! └── guide_cache.yaml   ← generated survival guides by country
//! ```
//!
//! ## YAML Format
//!
//! ```yaml
//! country: "Japan"
//! data_format_version: "1.0"
//! created_at: "2025-01-21T19:30:00Z"
//! updated_at: "2025-01-21T19:35:00Z"
//! ```

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::GuideCache;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::storage::SettingsStorage;

const SETTINGS_FILE: &str = "settings.yaml";
const GUIDE_CACHE_FILE: &str = "guide_cache.yaml";

/// Contents of `settings.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSettings {
    /// Last selected country (None until the user picks one)
    pub country: Option<String>,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for StoredSettings {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            country: None,
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    connection: CsvConnection,
}

impl SettingsRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    pub fn get_settings(&self) -> Result<StoredSettings> {
        Ok(self
            .connection
            .read_yaml::<StoredSettings>(SETTINGS_FILE)?
            .unwrap_or_default())
    }
}

#[async_trait]
impl SettingsStorage for SettingsRepository {
    async fn get_country(&self) -> Result<Option<String>> {
        Ok(self.get_settings()?.country)
    }

    async fn set_country(&self, country: &str) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        let mut settings = self.get_settings()?;
        settings.country = Some(country.to_string());
        settings.updated_at = Utc::now().to_rfc3339();
        self.connection.write_yaml(SETTINGS_FILE, &settings)?;
        info!("Saved selected country: {}", country);
        Ok(())
    }

    async fn get_guide_cache(&self) -> Result<GuideCache> {
        Ok(self
            .connection
            .read_yaml::<GuideCache>(GUIDE_CACHE_FILE)?
            .unwrap_or_default())
    }

    async fn set_guide_cache(&self, cache: &GuideCache) -> Result<()> {
        let _guard = self.connection.lock_writes().await;
        self.connection.write_yaml(GUIDE_CACHE_FILE, cache)?;
        debug!("Saved guide cache with {} countries", cache.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SurvivalGuide;
    use tempfile::TempDir;

    fn setup() -> (SettingsRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (SettingsRepository::new(connection), temp_dir)
    }

    #[tokio::test]
    async fn test_country_defaults_to_none() {
        let (repo, _temp_dir) = setup();
        assert_eq!(repo.get_country().await.unwrap(), None);

        repo.set_country("Canada").await.unwrap();
        repo.set_country("Japan").await.unwrap();
        assert_eq!(repo.get_country().await.unwrap(), Some("Japan".to_string()));
        assert_eq!(repo.get_settings().unwrap().data_format_version, "1.0");
    }

    #[tokio::test]
    async fn test_guide_cache_replaced_wholesale() {
        let (repo, _temp_dir) = setup();
        assert!(repo.get_guide_cache().await.unwrap().is_empty());

        let mut cache = GuideCache::new();
        cache.insert(
            "Germany".to_string(),
            SurvivalGuide {
                shopping_guide: "Aldi and Lidl for staples.\nBring your own bags.".to_string(),
                survival_tips: "Sundays: shops are closed.".to_string(),
            },
        );
        repo.set_guide_cache(&cache).await.unwrap();

        assert_eq!(repo.get_guide_cache().await.unwrap(), cache);
    }
}
