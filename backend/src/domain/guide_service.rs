//! Survival guide cache.
//!
//! Generated guides are memoized per country, in memory and through the
//! gateway, and never invalidated. A cached country is served without calling
//! the generator. On a miss the loading flag is raised and the displayed guide
//! cleared until the generator answers.
//!
//! Overlapping requests are not cancelled. Whichever generation resolves last
//! also becomes the displayed guide, even if the user has since picked another
//! country.

use async_trait::async_trait;
use shared::{GuideResponse, SurvivalGuide};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::store::{log_write_failure, EntityStore};

/// Errors produced while generating a guide
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    #[error("No API key configured for guide generation")]
    MissingApiKey,
    #[error("Guide request failed: {0}")]
    Request(String),
    #[error("Guide service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Guide service returned no content")]
    EmptyResponse,
    #[error("Guide content is not a valid guide: {0}")]
    Malformed(String),
}

/// External guide generation, one request per call
#[async_trait]
pub trait GuideGenerator: Send + Sync {
    async fn generate_guide(&self, country: &str) -> Result<SurvivalGuide, GuideError>;
}

/// What a preload ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum GuideLoad {
    /// Initial load has not finished; nothing was done
    NotReady,
    Cached(SurvivalGuide),
    Generated(SurvivalGuide),
    /// Generation failed; nothing was cached
    Failed,
}

enum Lookup {
    NotReady,
    Hit(SurvivalGuide),
    Miss,
}

#[derive(Clone)]
pub struct GuideService {
    store: EntityStore,
    generator: Arc<dyn GuideGenerator>,
    // Cache snapshots are taken and saved under this lock, so the last save
    // always carries every generated guide
    persist_lock: Arc<Mutex<()>>,
}

impl GuideService {
    pub fn new(store: EntityStore, generator: Arc<dyn GuideGenerator>) -> Self {
        Self {
            store,
            generator,
            persist_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Guide currently on display for the selected country
    pub async fn current_guide(&self) -> GuideResponse {
        self.store
            .read(|data| GuideResponse {
                country: data.country.clone(),
                guide: data.survival_guide.clone(),
                loading: data.is_guide_loading,
            })
            .await
    }

    pub async fn preload(&self, country: &str) -> GuideLoad {
        let lookup = self
            .store
            .mutate(|data| {
                if !data.is_loaded {
                    return Lookup::NotReady;
                }
                if let Some(guide) = data.guide_cache.get(country) {
                    data.survival_guide = Some(guide.clone());
                    data.is_guide_loading = false;
                    return Lookup::Hit(guide.clone());
                }
                data.survival_guide = None;
                data.is_guide_loading = true;
                Lookup::Miss
            })
            .await;

        match lookup {
            Lookup::NotReady => {
                debug!("Skipping guide preload for {}: state not loaded yet", country);
                GuideLoad::NotReady
            }
            Lookup::Hit(guide) => {
                debug!("Serving cached guide for {}", country);
                GuideLoad::Cached(guide)
            }
            Lookup::Miss => self.generate(country).await,
        }
    }

    /// Run [`preload`](Self::preload) as an independent task
    pub fn spawn_preload(&self, country: String) -> JoinHandle<GuideLoad> {
        let service = self.clone();
        tokio::spawn(async move { service.preload(&country).await })
    }

    async fn generate(&self, country: &str) -> GuideLoad {
        info!("Generating survival guide for {}", country);

        match self.generator.generate_guide(country).await {
            Ok(guide) => {
                self.store
                    .mutate(|data| {
                        data.guide_cache.insert(country.to_string(), guide.clone());
                        data.survival_guide = Some(guide.clone());
                        data.is_guide_loading = false;
                    })
                    .await;

                self.save_cache().await;
                GuideLoad::Generated(guide)
            }
            Err(e) => {
                error!("Failed to generate survival guide for {}: {}", country, e);
                self.store.mutate(|data| data.is_guide_loading = false).await;
                GuideLoad::Failed
            }
        }
    }

    async fn save_cache(&self) {
        let _guard = self.persist_lock.lock().await;
        let cache = self.store.read(|data| data.guide_cache.clone()).await;
        let result = self.store.gateway().settings.set_guide_cache(&cache).await;
        log_write_failure("save guide cache", result);
    }
}
