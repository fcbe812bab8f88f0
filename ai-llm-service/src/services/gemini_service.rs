//! Gemini service for text generation.
//!
//! Minimal, non-streaming client around the Generative Language REST API:
//! - `POST {endpoint}/v1beta/models/{model}:generateContent`
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! The API key travels in the `x-goog-api-key` header, never in the URL, so
//! URLs are safe to log.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet,
    },
    generator::{Attachment, TextGenerator},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Thin client for the Gemini API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (timeout and auth header baked in).
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    timeout: Duration,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::new(cfg.provider, ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                cfg.provider,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        let mut key_value = header::HeaderValue::from_str(&api_key).map_err(|e| {
            ProviderError::new(
                cfg.provider,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        key_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .build()?;

        let url_generate = generate_url(endpoint, &cfg.model);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            timeout,
        })
    }

    /// Performs a single **non-streaming** `generateContent` call.
    ///
    /// The prompt is sent as the first part; an attachment, when given, follows
    /// as base64 `inlineData`.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::Timeout`] when the request exceeds the client timeout
    /// - [`AiLlmError::HttpTransport`] for other client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    pub async fn generate_content(
        &self,
        prompt: &str,
        attachment: Option<&Attachment>,
    ) -> Result<Option<String>, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt, attachment);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            attachment_bytes = attachment.map(|a| a.bytes.len()).unwrap_or(0),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = upstream_message(&text).unwrap_or_else(|| make_snippet(&text));

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(
                self.cfg.provider,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: GenerateContentResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) if e.is_timeout() => return Err(AiLlmError::Timeout(self.timeout)),
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode generateContent response"
                );
                return Err(ProviderError::new(
                    self.cfg.provider,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `candidates[0].content.parts[].text`"
                    )),
                )
                .into());
            }
        };

        if let Some(reason) = out
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            warn!(model = %self.cfg.model, block_reason = reason, "prompt was blocked by provider");
        }

        let text = out.first_text();

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            has_text = text.is_some(),
            "generateContent completed"
        );

        Ok(text)
    }

    fn transport_error(&self, e: reqwest::Error) -> AiLlmError {
        if e.is_timeout() {
            warn!(model = %self.cfg.model, timeout_secs = self.timeout.as_secs(), "Gemini request timed out");
            AiLlmError::Timeout(self.timeout)
        } else {
            error!(model = %self.cfg.model, error = %e, "Gemini transport failure");
            AiLlmError::HttpTransport(e)
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiService {
    async fn generate(
        &self,
        prompt: &str,
        attachment: Option<&Attachment>,
    ) -> Result<Option<String>, AiLlmError> {
        self.generate_content(prompt, attachment).await
    }
}

/// Builds `{base}/v1beta/models/{model}:generateContent`, accepting model ids
/// with or without the `models/` prefix.
fn generate_url(endpoint: &str, model: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    let model = model.trim().trim_start_matches("models/");
    format!("{base}/v1beta/models/{model}:generateContent")
}

/// Pulls `error.message` out of a Gemini error body.
fn upstream_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `:generateContent` (non-streaming).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str, attachment: Option<&Attachment>) -> Self {
        let mut parts = Vec::with_capacity(2);
        parts.push(Part::Text { text: prompt });
        if let Some(att) = attachment {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: att.media_type.clone(),
                    data: STANDARD.encode(&att.bytes),
                },
            });
        }

        let generation_config =
            if cfg.temperature.is_some() || cfg.top_p.is_some() || cfg.max_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: cfg.temperature,
                    top_p: cfg.top_p,
                    max_output_tokens: cfg.max_tokens,
                })
            } else {
                None
            };

        Self {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    /// Base64 (standard alphabet, padded).
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Minimal response for `:generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, trimmed; `None` if blank.
    fn first_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let joined: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::llm_provider::LlmProvider;
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use serde_json::{Value, json};

    fn cfg(endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-test".into(),
            endpoint: endpoint.into(),
            api_key: Some("test-key".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    /// Fake `generateContent`: echoes the prompt and reports whether an
    /// attachment arrived; `fail-model` answers 400 with a Gemini error body;
    /// `empty-model` answers with no candidates.
    async fn fake_generate(
        Path(action): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({"error": {"code": 403, "message": "bad key"}})),
            );
        }
        match action.as_str() {
            "fail-model:generateContent" => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": 400, "message": "Request payload size exceeds the limit", "status": "INVALID_ARGUMENT"}})),
            ),
            "empty-model:generateContent" => (
                StatusCode::OK,
                Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
            ),
            _ => {
                let parts = &body["contents"][0]["parts"];
                let prompt = parts[0]["text"].as_str().unwrap_or_default();
                let mime = parts[1]["inlineData"]["mimeType"].as_str().unwrap_or("none");
                (
                    StatusCode::OK,
                    Json(json!({
                        "candidates": [{
                            "content": {"parts": [{"text": format!("  echo: {prompt}")}, {"text": format!(" [{mime}]\n")}]},
                            "finishReason": "STOP"
                        }]
                    })),
                )
            }
        }
    }

    async fn spawn_fake() -> String {
        let app = Router::new().route("/v1beta/models/{action}", post(fake_generate));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn url_strips_models_prefix_and_trailing_slash() {
        assert_eq!(
            generate_url("https://host/", "models/gemini-2.0-flash"),
            "https://host/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn request_body_carries_inline_data_as_base64() {
        let mut c = cfg("http://x");
        c.max_tokens = Some(64);
        let att = Attachment::new("application/pdf", b"%PDF-1.4".to_vec());
        let body = GenerateContentRequest::from_cfg(&c, "Summarize", Some(&att));
        let v = serde_json::to_value(&body).unwrap();

        assert_eq!(v["contents"][0]["role"], "user");
        assert_eq!(v["contents"][0]["parts"][0]["text"], "Summarize");
        assert_eq!(
            v["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "application/pdf"
        );
        assert_eq!(v["contents"][0]["parts"][1]["inlineData"]["data"], "JVBERi0xLjQ=");
        assert_eq!(v["generationConfig"]["maxOutputTokens"], 64);
        assert!(v["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn text_only_request_has_single_part_and_no_generation_config() {
        let c = cfg("http://x");
        let v = serde_json::to_value(GenerateContentRequest::from_cfg(&c, "hi", None)).unwrap();
        assert_eq!(v["contents"][0]["parts"].as_array().unwrap().len(), 1);
        assert!(v.get("generationConfig").is_none());
    }

    #[test]
    fn missing_text_is_absent_not_error() {
        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.first_text(), None);

        let blank: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}}]
        }))
        .unwrap();
        assert_eq!(blank.first_text(), None);

        let no_content: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(no_content.first_text(), None);
    }

    #[test]
    fn constructor_requires_key_and_http_endpoint() {
        let mut no_key = cfg("http://x");
        no_key.api_key = None;
        assert!(matches!(
            GeminiService::new(no_key),
            Err(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::MissingApiKey,
                ..
            }))
        ));
        assert!(GeminiService::new(cfg("localhost:1234")).is_err());
    }

    #[tokio::test]
    async fn generate_round_trips_through_fake_server() {
        let base = spawn_fake().await;
        let svc = GeminiService::new(cfg(&base)).unwrap();

        let text = svc.generate("hello", None).await.unwrap();
        assert_eq!(text.as_deref(), Some("echo: hello [none]"));

        let att = Attachment::new("application/pdf", vec![1, 2, 3]);
        let text = svc.generate("doc", Some(&att)).await.unwrap();
        assert_eq!(text.as_deref(), Some("echo: doc [application/pdf]"));
    }

    #[tokio::test]
    async fn upstream_error_message_is_forwarded() {
        let base = spawn_fake().await;
        let mut c = cfg(&base);
        c.model = "fail-model".into();
        let svc = GeminiService::new(c).unwrap();

        let err = svc.generate("x", None).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Request payload size exceeds the limit"), "{msg}");
        assert!(msg.contains("400"), "{msg}");
    }

    #[tokio::test]
    async fn blocked_prompt_yields_none() {
        let base = spawn_fake().await;
        let mut c = cfg(&base);
        c.model = "empty-model".into();
        let svc = GeminiService::new(c).unwrap();
        assert_eq!(svc.generate("x", None).await.unwrap(), None);
    }
}
