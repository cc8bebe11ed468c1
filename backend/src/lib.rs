//! # Finance Tracker Backend
//!
//! Contains all non-UI logic for the finance tracker.
//!
//! This crate is the orchestration layer that brings together:
//! - **Domain**: entity store, services, category cascade, guide cache, view router
//! - **Storage**: the persistence gateway (CSV/YAML files or in-memory)
//! - **IO**: the REST API and the survival guide client
//!
//! ## Architecture
//!
//! ```text
//! Web frontend
//!     ↓
//! IO Layer (REST API, guide client)
//!     ↓
//! Domain Layer (EntityStore, services)
//!     ↓
//! Storage Layer (Gateway: CSV files or memory)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Load the stored state once at startup and hand it to the entity store
//! - Wire the services to one shared store and gateway
//! - Set up the router with CORS, request tracing and optional static files

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;
pub mod test_utils;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, StorageMode};
use crate::domain::{
    load_initial_state, BudgetService, CategoryService, CountryTable, EntityStore, GoalService,
    GuideGenerator, GuideService, SettingsService, ShortcutService, TransactionService,
};
use crate::io::GeminiGuideClient;
use crate::storage::{Connection, CsvConnection, Gateway, MemoryGateway};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub store: EntityStore,
    pub transaction_service: TransactionService,
    pub category_service: CategoryService,
    pub budget_service: BudgetService,
    pub goal_service: GoalService,
    pub shortcut_service: ShortcutService,
    pub settings_service: SettingsService,
    pub guide_service: GuideService,
}

/// Load stored state through `gateway` and wire every service to it
pub async fn build_state(
    gateway: Gateway,
    generator: Arc<dyn GuideGenerator>,
    countries: CountryTable,
    default_country: &str,
) -> AppState {
    let data = load_initial_state(&gateway, &countries, default_country).await;
    let store = EntityStore::new(gateway, data);
    let countries = Arc::new(countries);

    AppState {
        transaction_service: TransactionService::new(store.clone()),
        category_service: CategoryService::new(store.clone()),
        budget_service: BudgetService::new(store.clone()),
        goal_service: GoalService::new(store.clone()),
        shortcut_service: ShortcutService::new(store.clone()),
        settings_service: SettingsService::new(store.clone(), countries),
        guide_service: GuideService::new(store.clone(), generator),
        store,
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage ({:?})", config.storage);
    let gateway = match config.storage {
        StorageMode::Csv => {
            let data_directory = config.data_directory()?;
            info!("Using data directory {}", data_directory.display());
            CsvConnection::new(data_directory)?.create_gateway()
        }
        StorageMode::Memory => MemoryGateway::new().into_gateway().1,
    };

    info!("Setting up guide client ({})", config.gemini.model);
    let generator = GeminiGuideClient::new(config.gemini.clone()).context("Failed to build guide client")?;

    info!("Loading stored state");
    let state = build_state(
        gateway,
        Arc::new(generator),
        config.country_table()?,
        &config.default_country,
    )
    .await;

    // Same as selecting the restored country
    let (country, _) = state.settings_service.current_country().await;
    state.guide_service.spawn_preload(country);

    Ok(state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: &str, static_dir: Option<PathBuf>) -> Result<Router> {
    // CORS setup to allow frontend to make requests
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin '{}'", allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let mut router = Router::new().nest("/api", io::api_router());
    if let Some(dir) = static_dir {
        info!("Serving frontend from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    Ok(router
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(app_state))
}
