// src/llm/gemini.rs
// Google Gemini API client for commit-message rewriting

use super::{Length, TextGenerator, prompt};
use crate::error::{MuseError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    // No request timeout on purpose: the confirmation loop blocks on one
    // outstanding call at a time and the user can always interrupt.
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        persona: &str,
        mood: &str,
        length: Length,
        source: &str,
    ) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();

        info!(
            request_id = %request_id,
            persona = %persona,
            mood = %mood,
            length = %length,
            model = %self.model,
            "Starting Gemini rewrite request"
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt::rewrite_prompt(persona, mood, length, source),
                }],
            }],
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        // Transport failures (DNS, refused connection, TLS) surface the same
        // way as API failures: as a generation error carrying the cause.
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| MuseError::Generation(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MuseError::Generation(e.to_string()))?;

        if !status.is_success() {
            return Err(MuseError::Generation(format!(
                "Gemini API error ({status}): {body}"
            )));
        }

        let data: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| MuseError::Generation(format!("unparseable Gemini response: {e}")))?;

        let text = data
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(MuseError::Generation(
                "Gemini returned an empty candidate".to_string(),
            ));
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        debug!(
            request_id = %request_id,
            duration_ms,
            chars = text.len(),
            "Gemini rewrite complete"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        assert_eq!(DEFAULT_MODEL, "gemini-2.0-flash");
    }

    #[test]
    fn test_api_base() {
        assert!(GEMINI_API_BASE.contains("googleapis.com"));
    }

    #[test]
    fn test_client_new_uses_default_model() {
        let client = GeminiClient::new("test-key".to_string());
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_client_with_model() {
        let client = GeminiClient::with_model("k".to_string(), "gemini-exp".to_string());
        assert_eq!(client.model, "gemini-exp");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  Do or do not.  "}],"role":"model"}}]}"#;
        let data: GenerateResponse = serde_json::from_str(body).unwrap();
        let text = data.candidates[0].content.parts[0].text.trim();
        assert_eq!(text, "Do or do not.");
    }

    #[test]
    fn test_response_parsing_no_candidates() {
        let data: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(data.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_connection_failure_is_generation_error() {
        // Port 9 (discard) has no listener; the connection is refused before
        // any HTTP exchange happens.
        let client = GeminiClient {
            api_key: "k".to_string(),
            model: "m".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            http: reqwest::Client::new(),
        };
        let err = client
            .generate("yoda", "epic", Length::Short, "fix the thing")
            .await
            .unwrap_err();
        assert!(matches!(err, MuseError::Generation(_)));
    }
}
