//! HTTP surface.
//!
//! Handlers always answer with a success status; failures are reported in
//! the `success` and `error` fields of the body.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::batch::{BatchResult, transcripts_for_urls};
use crate::config::{Config, Source};
use crate::scrape::{ScrapeResult, Scraper};
use crate::transcript::{TranscriptProvider, TranscriptResult, transcript_for_url};

pub const SERVICE_NAME: &str = "sift";

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub scraper: Scraper,
    pub provider: Arc<dyn TranscriptProvider>,
    pub default_languages: Arc<Vec<String>>,
    pub sources: Arc<Vec<Source>>,
    pub batch_concurrency: usize,
}

impl AppState {
    pub fn new(config: &Config, scraper: Scraper, provider: Arc<dyn TranscriptProvider>) -> Self {
        Self {
            scraper,
            provider,
            default_languages: Arc::new(config.default_languages.clone()),
            sources: Arc::new(config.sources.clone()),
            batch_concurrency: config.batch_concurrency,
        }
    }

    fn languages(&self, requested: Option<Vec<String>>) -> Vec<String> {
        requested.unwrap_or_else(|| self.default_languages.as_ref().clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    pub selector: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub url: String,
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct BatchTranscriptRequest {
    pub urls: Vec<String>,
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<Source>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/scrape/url", post(scrape_url))
        .route("/scrape/sources", get(scrape_sources))
        .route("/youtube/transcript", post(youtube_transcript))
        .route("/youtube/batch", post(youtube_batch))
        .with_state(state)
}

/// CORS for the listed origins; invalid entries are skipped
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {o:?}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": SERVICE_NAME}))
}

async fn scrape_url(State(state): State<AppState>, Json(req): Json<ScrapeRequest>) -> Json<ScrapeResult> {
    debug!("POST /scrape/url url={} selector={:?}", req.url, req.selector);
    Json(state.scraper.scrape_url(&req.url, req.selector.as_deref()).await)
}

async fn scrape_sources(State(state): State<AppState>) -> Json<SourcesResponse> {
    Json(SourcesResponse {
        sources: state.sources.as_ref().clone(),
    })
}

async fn youtube_transcript(
    State(state): State<AppState>,
    Json(req): Json<TranscriptRequest>,
) -> Json<TranscriptResult> {
    let languages = state.languages(req.languages);
    debug!("POST /youtube/transcript url={} languages={languages:?}", req.url);
    Json(transcript_for_url(state.provider.as_ref(), &req.url, &languages).await)
}

async fn youtube_batch(State(state): State<AppState>, Json(req): Json<BatchTranscriptRequest>) -> Json<BatchResult> {
    let languages = state.languages(req.languages);
    debug!("POST /youtube/batch urls={} languages={languages:?}", req.urls.len());
    Json(transcripts_for_urls(state.provider.as_ref(), &req.urls, &languages, state.batch_concurrency).await)
}
