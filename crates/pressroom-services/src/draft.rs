//! Draft Generator: generative rewrite of extracted or raw text.
//!
//! Deliberately fail-open: the generator always returns *some* draft text.
//! Without a configured credential it returns a fixed mock string; on any
//! backend failure it returns a fixed error marker. A bad draft is visible
//! to a reviewer, a missing record is not.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Returned when no generative backend credential is configured.
pub const MOCK_DRAFT_RESPONSE: &str =
    "This is a mock draft response because no generative backend credential was set.";

/// Returned when the generative backend call fails.
pub const GENERATION_FAILURE_TEXT: &str = "Error generating content. Please check logs.";

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Generative-text backend seam. Implemented by [`GeminiClient`] in
/// production and by in-memory fakes in tests.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini generateContent API.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        endpoint_override: Option<String>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint_override
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            api_key,
        })
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Generative request");

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Generative backend returned {}: {}", status, body);
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            anyhow::bail!("Generative backend returned no text");
        }

        Ok(text)
    }
}

/// Fail-open wrapper around the generative backend.
pub struct DraftGenerator {
    backend: Option<Arc<dyn GenerativeBackend>>,
    max_input_chars: usize,
}

impl DraftGenerator {
    pub fn new(backend: Option<Arc<dyn GenerativeBackend>>, max_input_chars: usize) -> Self {
        Self {
            backend,
            max_input_chars,
        }
    }

    /// Rewrite the given text into a news draft. Always returns a non-empty
    /// string; never errors.
    pub async fn generate(&self, text: &str) -> String {
        let truncated = truncate_chars(text, self.max_input_chars);

        let Some(backend) = &self.backend else {
            tracing::warn!("No generative backend credential configured, returning mock draft");
            return MOCK_DRAFT_RESPONSE.to_string();
        };

        match backend.complete(&build_prompt(truncated)).await {
            Ok(draft) => {
                tracing::info!(draft_chars = draft.len(), "Draft generated");
                draft
            }
            Err(e) => {
                tracing::error!(error = %e, "Draft generation failed, substituting marker text");
                GENERATION_FAILURE_TEXT.to_string()
            }
        }
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        "You are an expert news editor. Rewrite the following press release into a \
         professional, journalistic news article. Focus on facts, clarity, and AP style.\n\n\
         Original Text:\n{}",
        text
    )
}

/// Truncate to a character budget without splitting a UTF-8 code point.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeBackend {
        calls: AtomicUsize,
        result: Result<String, String>,
    }

    #[async_trait]
    impl GenerativeBackend for FakeBackend {
        async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(prompt.contains("expert news editor"));
            match &self.result {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(anyhow::anyhow!("{}", msg)),
            }
        }
    }

    #[tokio::test]
    async fn test_no_credential_returns_fixed_mock_string() {
        let generator = DraftGenerator::new(None, 30_000);
        assert_eq!(generator.generate("anything").await, MOCK_DRAFT_RESPONSE);
        // Deterministic: same result on every call
        assert_eq!(generator.generate("other").await, MOCK_DRAFT_RESPONSE);
    }

    #[tokio::test]
    async fn test_backend_failure_returns_marker_text() {
        let backend = Arc::new(FakeBackend {
            calls: AtomicUsize::new(0),
            result: Err("quota exceeded".to_string()),
        });
        let generator = DraftGenerator::new(Some(backend.clone()), 30_000);

        let draft = generator.generate("press release body").await;
        assert_eq!(draft, GENERATION_FAILURE_TEXT);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_successful_generation_passes_through() {
        let backend = Arc::new(FakeBackend {
            calls: AtomicUsize::new(0),
            result: Ok("Rewritten article.".to_string()),
        });
        let generator = DraftGenerator::new(Some(backend), 30_000);

        assert_eq!(generator.generate("body").await, "Rewritten article.");
    }

    #[tokio::test]
    async fn test_input_is_truncated_to_budget() {
        struct CapturingBackend {
            max_expected: usize,
        }

        #[async_trait]
        impl GenerativeBackend for CapturingBackend {
            async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
                let body = prompt.split("Original Text:\n").nth(1).unwrap_or("");
                assert!(
                    body.chars().count() <= self.max_expected,
                    "prompt body exceeded char budget: {}",
                    body.chars().count()
                );
                Ok("ok".to_string())
            }
        }

        let generator =
            DraftGenerator::new(Some(Arc::new(CapturingBackend { max_expected: 100 })), 100);
        let oversized = "x".repeat(5000);
        generator.generate(&oversized).await;
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let text = "héllo wörld";
        let truncated = truncate_chars(text, 3);
        assert_eq!(truncated, "hél");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_response_parsing_joins_parts() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "First. " }, { "text": "Second." }] }
            }]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
            .unwrap_or_default();
        assert_eq!(text, "First. Second.");
    }
}
