//! Google Gemini `generateContent` client.

use crate::config::AnalyzerConfig;
use crate::credential::Credential;
use crate::error::GenerationError;
use crate::generation::{GenerationRequest, GenerationService};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Blocking client for one model of the Gemini API.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    credential: Credential,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiClient {
    /// Create a client for `config.model` at `config.endpoint`.
    pub fn new(credential: Credential, config: &AnalyzerConfig) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            credential,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl GenerationService for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = build_body(request);
        let url = self.url();

        info!(model = %self.model, prompt_chars = request.prompt.chars().count(), "requesting generation");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.credential.expose())
            .json(&body)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(GenerationError::Service {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        let output = response_text(parsed)?;
        debug!(chars = output.len(), "generation returned");
        Ok(output)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn build_body(request: &GenerationRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![Part {
                text: Some(request.prompt.clone()),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: request.response_mime_type.clone(),
            response_schema: wire_schema(&request.response_schema),
        },
    }
}

/// Gemini spells schema types as enum constants (`OBJECT`, `STRING`).
/// Only string-valued `type` keys change; a property named `type` is a map
/// and is recursed into instead.
fn wire_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| match (k.as_str(), v) {
                    ("type", Value::String(t)) => (k.clone(), Value::String(t.to_uppercase())),
                    _ => (k.clone(), wire_schema(v)),
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(wire_schema).collect()),
        other => other.clone(),
    }
}

/// Text of the first candidate, all parts concatenated.
fn response_text(resp: GenerateContentResponse) -> Result<String, GenerationError> {
    let block_reason = resp.prompt_feedback.and_then(|f| f.block_reason);
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyResponse {
            reason: block_reason.unwrap_or_else(|| "no candidates returned".into()),
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse {
            reason: candidate
                .finish_reason
                .unwrap_or_else(|| "candidate has no text".into()),
        });
    }
    Ok(text)
}
