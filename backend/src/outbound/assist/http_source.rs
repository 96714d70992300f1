//! Reqwest-backed hosted-model suggestion adapter.
//!
//! This adapter owns transport details only: request body construction,
//! bearer authentication, timeout and HTTP error mapping, and
//! schema-validated decoding of the model output into suggestion types.
//! Prompts and wire formats never leak past this module.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;
use serde::de::DeserializeOwned;

use crate::domain::ports::{SuggestionSource, SuggestionSourceError};
use crate::domain::{AwardCategorySuggestion, InvoiceExtraction};

use super::dto::{
    ChatCompletionRequestDto, ChatCompletionResponseDto, ChatMessageDto, ResponseFormatDto,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const AWARD_CATEGORY_INSTRUCTION: &str = "You classify award items for a sports \
conference operations office. Given an award description, respond with a single \
JSON object: {\"category\": string, \"subcategory\": string or null, \"tags\": \
array of strings, \"confidence\": number between 0 and 1}. No prose.";

const INVOICE_EXTRACTION_INSTRUCTION: &str = "You extract invoice fields for a \
sports conference operations office. Given free-form invoice text, respond with \
a single JSON object: {\"invoiceNumber\": string or null, \"vendorName\": string \
or null, \"invoiceDate\": ISO date string or null, \"amountCents\": integer \
minor currency units or null, \"lineItems\": array of {\"description\": string, \
\"amountCents\": integer or null}}. Omit nothing; use null where the text is \
silent. No prose.";

/// Credentials and routing for the hosted-model endpoint.
#[derive(Debug, Clone)]
pub struct AssistCredentials {
    /// Base URL of the chat-completions API.
    pub base_url: Url,
    /// Bearer token.
    pub api_key: String,
    /// Model identifier to request.
    pub model: String,
}

/// Suggestion adapter performing HTTP POST requests against one
/// chat-completions endpoint.
pub struct AssistHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl AssistHttpSource {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint URL cannot be derived from the
    /// base URL or the reqwest client cannot be constructed.
    pub fn new(credentials: AssistCredentials) -> Result<Self, AssistHttpSourceBuildError> {
        Self::with_timeout(credentials, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint URL cannot be derived from the
    /// base URL or the reqwest client cannot be constructed.
    pub fn with_timeout(
        credentials: AssistCredentials,
        timeout: Duration,
    ) -> Result<Self, AssistHttpSourceBuildError> {
        let endpoint = credentials
            .base_url
            .join("chat/completions")
            .map_err(|error| AssistHttpSourceBuildError::Endpoint {
                message: error.to_string(),
            })?;
        let client = Client::builder().timeout(timeout).build().map_err(|error| {
            AssistHttpSourceBuildError::Client {
                message: error.to_string(),
            }
        })?;
        Ok(Self {
            client,
            endpoint,
            api_key: credentials.api_key,
            model: credentials.model,
        })
    }

    async fn complete<T>(
        &self,
        instruction: &'static str,
        input: &str,
    ) -> Result<T, SuggestionSourceError>
    where
        T: DeserializeOwned,
    {
        let body = ChatCompletionRequestDto {
            model: &self.model,
            messages: vec![
                ChatMessageDto {
                    role: "system",
                    content: instruction,
                },
                ChatMessageDto {
                    role: "user",
                    content: input,
                },
            ],
            response_format: ResponseFormatDto {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        let content = decode_content(bytes.as_ref())?;
        serde_json::from_str(&content).map_err(|error| {
            SuggestionSourceError::decode(format!("model output failed validation: {error}"))
        })
    }
}

/// Failures building the adapter; reported at startup, not per request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistHttpSourceBuildError {
    /// The completions endpoint could not be derived from the base URL.
    #[error("invalid assist endpoint: {message}")]
    Endpoint { message: String },
    /// The HTTP client could not be constructed.
    #[error("failed to build assist client: {message}")]
    Client { message: String },
}

#[async_trait]
impl SuggestionSource for AssistHttpSource {
    async fn categorise_award(
        &self,
        description: &str,
    ) -> Result<AwardCategorySuggestion, SuggestionSourceError> {
        let mut suggestion: AwardCategorySuggestion = self
            .complete(AWARD_CATEGORY_INSTRUCTION, description)
            .await?;
        suggestion.confidence = clamp_confidence(suggestion.confidence);
        Ok(suggestion)
    }

    async fn extract_invoice(
        &self,
        text: &str,
    ) -> Result<InvoiceExtraction, SuggestionSourceError> {
        self.complete(INVOICE_EXTRACTION_INSTRUCTION, text).await
    }
}

fn decode_content(body: &[u8]) -> Result<String, SuggestionSourceError> {
    let envelope: ChatCompletionResponseDto = serde_json::from_slice(body).map_err(|error| {
        SuggestionSourceError::decode(format!("invalid completion envelope: {error}"))
    })?;
    envelope.into_content().map_err(SuggestionSourceError::decode)
}

/// Model confidence values outside [0, 1] are reined in rather than
/// rejected; the suggestion is still usable.
fn clamp_confidence(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn map_transport_error(error: reqwest::Error) -> SuggestionSourceError {
    SuggestionSourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SuggestionSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    SuggestionSourceError::status(message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
