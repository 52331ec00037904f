// ABOUTME: OpenAI chat completions client used for plan generation and coach chat
// ABOUTME: Works against any OpenAI-compatible endpoint via a configurable base URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! # `OpenAI` Provider
//!
//! Speaks the `OpenAI` chat completions API. Point `base_url` at a
//! compatible server (vLLM, `LocalAI`, a proxy) to swap the backend
//! without code changes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::errors::{AppError, ErrorCode};

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for all coach features
pub const DEFAULT_MODEL: &str = "gpt-5";

/// Connection timeout for the completions endpoint
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Request timeout; plan generation responses can be large
const REQUEST_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ApiResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ApiResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for ApiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI` provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base URL, without the trailing `/chat/completions`
    pub base_url: String,
    /// Bearer token; optional for keyless compatible servers
    pub api_key: Option<String>,
    /// Model used when a request does not name one
    pub default_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            default_model: DEFAULT_MODEL.to_owned(),
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI` chat completions client
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Creates a provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        serde_json::from_str::<ApiErrorResponse>(body).map_or_else(
            |_| {
                AppError::external_service(
                    "OpenAI",
                    format!(
                        "API error ({}): {}",
                        status,
                        body.chars().take(200).collect::<String>()
                    ),
                )
            },
            |error_response| {
                let detail = error_response.error;
                match status.as_u16() {
                    401 => AppError::new(
                        ErrorCode::ExternalAuthFailed,
                        format!("API authentication failed: {}", detail.message),
                    ),
                    429 => AppError::new(
                        ErrorCode::ExternalRateLimited,
                        format!("API rate limit reached: {}", detail.message),
                    ),
                    400 => AppError::invalid_input(format!(
                        "API validation error: {}",
                        detail.message
                    )),
                    404 => {
                        AppError::not_found(format!("Model or endpoint ({})", detail.message))
                    }
                    _ => AppError::external_service(
                        "OpenAI",
                        format!(
                            "{} - {}",
                            detail.error_type.unwrap_or_else(|| "unknown".to_owned()),
                            detail.message
                        ),
                    ),
                }
            },
        )
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn display_name(&self) -> &'static str {
        "OpenAI"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let api_request = ApiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(ApiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_output.then_some(ApiResponseFormat {
                format_type: "json_object",
            }),
        };

        debug!(
            model = %model,
            messages = api_request.messages.len(),
            json_output = request.json_output,
            "Sending chat completion request"
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&api_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to OpenAI: {e}");
                if e.is_connect() {
                    AppError::external_service(
                        "OpenAI",
                        format!("Cannot connect to {}", self.config.base_url),
                    )
                } else {
                    AppError::external_service("OpenAI", format!("Failed to connect: {e}"))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {e}");
            AppError::external_service("OpenAI", format!("Failed to read response: {e}"))
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let api_response: ApiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse API response: {} - body: {}",
                e,
                body.chars().take(500).collect::<String>()
            );
            AppError::external_service("OpenAI", format!("Failed to parse response: {e}"))
        })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("OpenAI", "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();
        debug!(
            content_len = content.len(),
            finish_reason = ?choice.finish_reason,
            "Received chat completion"
        );

        Ok(ChatResponse {
            content,
            model: api_response.model,
            usage: api_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        let request = self.client.get(self.api_url("models"));
        let response = self
            .add_auth_header(request)
            .send()
            .await
            .map_err(|e| AppError::external_service("OpenAI", format!("Health check failed: {e}")))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with_base(base_url: &str) -> OpenAiProvider {
        OpenAiProvider::new(OpenAiConfig {
            base_url: base_url.to_owned(),
            api_key: Some("test-key".to_owned()),
            default_model: "gpt-5".to_owned(),
        })
        .unwrap()
    }

    #[test]
    fn api_url_handles_trailing_slash() {
        let provider = provider_with_base("https://api.openai.com/v1/");
        assert_eq!(
            provider.api_url("chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn json_output_requests_a_json_object() {
        let api_request = ApiRequest {
            model: "gpt-5".to_owned(),
            messages: vec![],
            temperature: None,
            max_tokens: Some(2000),
            response_format: Some(ApiResponseFormat {
                format_type: "json_object",
            }),
        };

        let json = serde_json::to_string(&api_request).unwrap();
        assert!(json.contains("\"response_format\":{\"type\":\"json_object\"}"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn auth_errors_map_to_external_auth_failure() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let err =
            OpenAiProvider::parse_error_response(reqwest::StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.http_status(), 503);

        let err =
            OpenAiProvider::parse_error_response(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(err.http_status(), 503);
    }

    #[test]
    fn unparseable_error_bodies_become_external_service_errors() {
        let err = OpenAiProvider::parse_error_response(
            reqwest::StatusCode::BAD_GATEWAY,
            "<html>upstream down</html>",
        );
        assert_eq!(err.http_status(), 502);
    }
}
