//! # Survival Guide Client
//!
//! [`GuideGenerator`] backed by the Gemini `generateContent` endpoint. The
//! model is asked for a JSON object with `shoppingGuide` and `survivalTips`,
//! which is parsed straight into a [`SurvivalGuide`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use shared::SurvivalGuide;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::GeminiConfig;
use crate::domain::{GuideError, GuideGenerator};

pub struct GeminiGuideClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiGuideClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GuideError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GuideError::Request(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

fn guide_prompt(country: &str) -> String {
    format!(
        "You are helping someone who just moved to {country} manage a tight budget. \
         Respond with a JSON object with two string fields. \
         \"shoppingGuide\": where to buy groceries and everyday items cheaply in {country}, \
         as a short markdown list. \
         \"survivalTips\": practical money-saving tips for daily life in {country}, \
         as a short markdown list."
    )
}

fn request_body(country: &str) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": guide_prompt(country) }] }],
        "generationConfig": { "responseMimeType": "application/json" }
    })
}

/// Pull the guide out of a `generateContent` response body
fn parse_guide(response: GenerateContentResponse) -> Result<SurvivalGuide, GuideError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(GuideError::EmptyResponse)?;

    serde_json::from_str(text.trim()).map_err(|e| GuideError::Malformed(e.to_string()))
}

#[async_trait]
impl GuideGenerator for GeminiGuideClient {
    async fn generate_guide(&self, country: &str) -> Result<SurvivalGuide, GuideError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(GuideError::MissingApiKey)?;

        info!("Requesting survival guide for {} from {}", country, self.config.model);
        let response = self
            .client
            .post(self.url())
            .query(&[("key", api_key)])
            .json(&request_body(country))
            .send()
            .await
            .map_err(|e| GuideError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GuideError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GuideError::Malformed(e.to_string()))?;
        debug!("Received {} candidates for {}", payload.candidates.len(), country);
        parse_guide(payload)
    }
}
