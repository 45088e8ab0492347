//! Gemini `generateContent` analyzer.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analyzer::{AnalysisResult, Analyzer};
use crate::error::AnalyzeError;
use crate::image::EncodedImage;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variables checked for an API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// The first non-empty API key found in [`API_KEY_ENV_VARS`].
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
}

const USER_AGENT: &str = concat!("rosba/", env!("CARGO_PKG_VERSION"));

const PROMPT: &str = "Analisis foto kitab pesantren ini. Identifikasi judul kitab yang tertera pada cover. \
Berikan detail dalam format JSON: name (judul kitab lengkap), \
category (Fiqh/Hadits/Tafsir/Aqidah/Nahwu/Tasawuf/Adab/Lainnya), \
description (deskripsi produk yang menarik untuk jualan di Shopee, sebutkan keunggulan cetakan), \
price (estimasi harga eceran pasar dalam angka saja), \
wholesalePrice (80% dari harga eceran).";

/// Connection settings for [`GeminiAnalyzer`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base, without a trailing slash.
    pub endpoint: String,
    /// Model name (e.g., "gemini-3-flash-preview").
    pub model: String,
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Total timeout per request.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Create a config with default endpoint, model and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full `generateContent` URL for the configured model.
    pub fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Analyzer backed by the Gemini REST API.
///
/// Sends the photo inline with a fixed Indonesian prompt and a JSON response
/// schema, then parses the model's JSON text into an [`AnalysisResult`].
pub struct GeminiAnalyzer {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiAnalyzer {
    pub fn new(config: GeminiConfig) -> Result<Self, AnalyzeError> {
        if config.api_key.is_empty() {
            return Err(AnalyzeError::MissingApiKey);
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.timeout / 4)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalyzeError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, image: &EncodedImage) -> Result<AnalysisResult, AnalyzeError> {
        tracing::debug!(
            file = %image.file_name,
            mime = %image.mime_type,
            model = %self.config.model,
            "Querying Gemini"
        );

        let response = self
            .http_client
            .post(self.config.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(image))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzeError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        parse_response(body)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Build the `generateContent` request body for one image.
pub fn build_request(image: &EncodedImage) -> serde_json::Value {
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "data": image.base64, "mimeType": image.mime_type } },
                { "text": PROMPT }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING" },
                    "category": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "price": { "type": "NUMBER" },
                    "wholesalePrice": { "type": "NUMBER" }
                },
                "required": ["name", "category", "description", "price", "wholesalePrice"]
            }
        }
    })
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Parse the model's JSON text.
///
/// Blank text counts as `{}` and yields an all-default result; a literal
/// `null` yields [`AnalyzeError::EmptyResult`].
pub fn parse_response(body: GenerateContentResponse) -> Result<AnalysisResult, AnalyzeError> {
    let text = body.text();
    let text = text.trim();
    if text.is_empty() {
        return Ok(AnalysisResult::default());
    }

    let parsed: Option<AnalysisResult> = serde_json::from_str(strip_code_fence(text))?;
    parsed.ok_or(AnalyzeError::EmptyResult)
}

/// Drop a surrounding ```json fence if the model added one.
fn strip_code_fence(text: &str) -> &str {
    text.strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(text)
}

/// Pull `error.message` out of a Gemini error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> GenerateContentResponse {
        serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_request_shape() {
        let image = EncodedImage::from_bytes("cover.jpg", b"hello");
        let body = build_request(&image);

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert!(parts[1]["text"].as_str().unwrap().contains("wholesalePrice"));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["price"]["type"],
            "NUMBER"
        );
    }

    #[test]
    fn test_parse_full_response() {
        let body = response_with_text(
            r#"{"name":"Fathul Qorib","category":"Fiqh","description":"Cetakan lama","price":45000,"wholesalePrice":36000}"#,
        );
        let result = parse_response(body).unwrap();
        assert_eq!(result.name.as_deref(), Some("Fathul Qorib"));
        assert_eq!(result.wholesale_price, Some(36000.0));
    }

    #[test]
    fn test_blank_text_is_empty_object() {
        let body = GenerateContentResponse { candidates: vec![] };
        assert_eq!(parse_response(body).unwrap(), AnalysisResult::default());
    }

    #[test]
    fn test_null_text_is_empty_result() {
        let err = parse_response(response_with_text("null")).unwrap_err();
        assert!(matches!(err, AnalyzeError::EmptyResult));
    }

    #[test]
    fn test_malformed_text_is_error() {
        let err = parse_response(response_with_text("Maaf, saya tidak yakin.")).unwrap_err();
        assert!(matches!(err, AnalyzeError::Deserialization(_)));
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let body = response_with_text("```json\n{\"name\": \"Jurumiyah\"}\n```");
        assert_eq!(parse_response(body).unwrap().name.as_deref(), Some("Jurumiyah"));
    }

    #[test]
    fn test_split_text_parts_are_joined() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"name\": " }, { "text": "\"Alfiyah\"}" }] }
            }]
        }))
        .unwrap();
        assert_eq!(parse_response(body).unwrap().name.as_deref(), Some("Alfiyah"));
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid.");
        assert_eq!(error_message("plain"), "plain");
    }

    #[test]
    fn test_generate_url() {
        let config = GeminiConfig::new("k")
            .with_endpoint("http://localhost:8080/v1beta/")
            .with_model("gemini-2.5-flash");
        assert_eq!(
            config.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let err = GeminiAnalyzer::new(GeminiConfig::new("")).err().unwrap();
        assert!(matches!(err, AnalyzeError::MissingApiKey));
    }
}
