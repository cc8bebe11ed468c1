//! # REST API for Country Selection and Survival Guides
//!
//! Selecting a country answers immediately; the guide for that country is
//! loaded by a background task and polled through `GET /api/guide`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{CountryListResponse, CountryResponse, SelectCountryRequest};
use tracing::info;

use super::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/country", get(get_country).put(select_country))
        .route("/countries", get(list_countries))
        .route("/guide", get(get_guide))
}

pub async fn get_country(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/country");

    let (country, currency) = state.settings_service.current_country().await;
    (StatusCode::OK, Json(CountryResponse { country, currency })).into_response()
}

/// Switch country and kick off the guide preload
pub async fn select_country(
    State(state): State<AppState>,
    Json(request): Json<SelectCountryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/country - {}", request.country);

    let info = state
        .settings_service
        .select_country(&request.country)
        .await
        .ok_or_else(|| ApiError::UnknownCountry(request.country.clone()))?;

    state.guide_service.spawn_preload(info.name.clone());

    Ok((
        StatusCode::OK,
        Json(CountryResponse {
            country: info.name,
            currency: info.currency,
        }),
    ))
}

pub async fn list_countries(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/countries");

    let countries = state.settings_service.countries().countries().to_vec();
    (StatusCode::OK, Json(CountryListResponse { countries })).into_response()
}

pub async fn get_guide(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/guide");
    (StatusCode::OK, Json(state.guide_service.current_guide().await)).into_response()
}
