use crate::core::parser::parse_sermon;
use crate::core::prompt::{build_user_prompt, DEFAULT_SYSTEM_INSTRUCTION};
use crate::domain::model::{BlogPost, NewsletterContent};
use crate::domain::ports::CompletionClient;
use crate::utils::error::{Result, SermonError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
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
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    system_instruction: String,
}

impl GeminiClient {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    async fn complete(&self, newsletter: &NewsletterContent) -> Result<String> {
        let prompt = build_user_prompt(newsletter);
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &self.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &prompt }],
            }],
        };

        tracing::debug!("Requesting completion from model {}", self.model);
        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SermonError::generation(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SermonError::generation(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
                Ok(envelope) => envelope.error.message,
                Err(_) => format!("HTTP {}: {}", status.as_u16(), body),
            };
            return Err(SermonError::generation(message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| SermonError::generation(format!("Unexpected response: {}", e)))?;

        parsed
            .text()
            .ok_or_else(|| SermonError::generation("Response contained no text"))
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn generate(&self, newsletter: &NewsletterContent) -> Result<BlogPost> {
        match self.complete(newsletter).await {
            Ok(text) => Ok(parse_sermon(&text)),
            Err(e) => {
                tracing::error!("Error generating blog post: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(Client::new(), server.base_url(), DEFAULT_MODEL, "test-key")
            .with_system_instruction("You are OMEGA.")
    }

    fn reply(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn test_generate_sends_instruction_and_prompt() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path(PATH)
                .header("x-goog-api-key", "test-key")
                .json_body(serde_json::json!({
                    "systemInstruction": { "parts": [{ "text": "You are OMEGA." }] },
                    "contents": [{
                        "role": "user",
                        "parts": [{ "text": "USER QUERY: Based on the following daily newsletter content, please generate the OMEGA blog sermon as per your system instructions.\n\n---\n\nTop story: X happened.\n" }]
                    }]
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(reply("## The Serpent's Bite\nBeloved seekers, ...\n"));
        });

        let post = client_for(&server)
            .generate(&NewsletterContent::new("Top story: X happened.\n"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(post, BlogPost::new("The Serpent's Bite", "Beloved seekers, ..."));
    }

    #[tokio::test]
    async fn test_generate_concatenates_parts() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).json_body(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "# Title\nFirst " }, { "text": "second" }] }
                }]
            }));
        });

        let post = client_for(&server)
            .generate(&NewsletterContent::new("news"))
            .await
            .unwrap();

        assert_eq!(post.title, "Title");
        assert_eq!(post.body, "First second");
    }

    #[tokio::test]
    async fn test_api_error_message_is_wrapped() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(400).json_body(serde_json::json!({
                "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            }));
        });

        let err = client_for(&server)
            .generate(&NewsletterContent::new("news"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to generate spiritual sermon. Details: API key not valid."
        );
    }

    #[tokio::test]
    async fn test_non_json_error_keeps_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(503).body("upstream unavailable");
        });

        let err = client_for(&server)
            .generate(&NewsletterContent::new("news"))
            .await
            .unwrap_err();

        assert!(matches!(err, SermonError::Generation { .. }));
        assert!(err.to_string().contains("HTTP 503: upstream unavailable"));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_generation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).json_body(serde_json::json!({ "candidates": [] }));
        });

        let err = client_for(&server)
            .generate(&NewsletterContent::new("news"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Response contained no text"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_generation_error() {
        let client = GeminiClient::new(Client::new(), "http://127.0.0.1:1", DEFAULT_MODEL, "k");
        let err = client
            .generate(&NewsletterContent::new("news"))
            .await
            .unwrap_err();

        assert!(matches!(err, SermonError::Generation { .. }));
    }
}
