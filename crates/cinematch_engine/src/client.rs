use std::time::Instant;

use cinematch_core::RecommendationResponse;
use engine_logging::{engine_error, engine_info, engine_warn};
use serde::Deserialize;

use crate::request::build_request;
use crate::response::decode_generate_content;
use crate::{ServiceError, ServiceErrorKind, ServiceSettings};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[async_trait::async_trait]
pub trait RecommendationClient: Send + Sync {
    async fn fetch_recommendations(
        &self,
        query: &str,
    ) -> Result<RecommendationResponse, ServiceError>;
}

/// Calls the Gemini `generateContent` endpoint with search grounding and a strict
/// output schema. One attempt per call; no retry.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    settings: ServiceSettings,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(ServiceErrorKind::Network, err.to_string()))?;
        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl RecommendationClient for GeminiClient {
    async fn fetch_recommendations(
        &self,
        query: &str,
    ) -> Result<RecommendationResponse, ServiceError> {
        let started = Instant::now();
        let endpoint = self.settings.endpoint();
        engine_info!(
            "generateContent model={} query_len={}",
            self.settings.model,
            query.len()
        );

        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(&build_request(query))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            engine_warn!(
                "generateContent failed status={} elapsed_ms={}",
                status.as_u16(),
                started.elapsed().as_millis()
            );
            return Err(ServiceError::new(
                ServiceErrorKind::HttpStatus(status.as_u16()),
                api_error_message(&body).unwrap_or_default(),
            ));
        }

        let decoded = decode_generate_content(&body);
        match &decoded {
            Ok(recommendations) => engine_info!(
                "generateContent ok movies={} sources={} elapsed_ms={}",
                recommendations.movies.len(),
                recommendations
                    .grounding_chunks
                    .as_ref()
                    .map_or(0, Vec::len),
                started.elapsed().as_millis()
            ),
            Err(err) => engine_error!("Failed to parse recommendation response: {}", err),
        }
        decoded
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error.message)
        .filter(|message| !message.trim().is_empty())
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(ServiceErrorKind::Timeout, err.to_string());
    }
    ServiceError::new(ServiceErrorKind::Network, err.to_string())
}
