//! OpenAI-compatible chat completion client
//!
//! Sends one system message and one user message to
//! `{base_url}/chat/completions` and waits for the whole (non-streamed) body.
//! Every outcome, including transport failures, comes back as a
//! [`CompletionResult`]; nothing is retried.

use super::settings::CompletionSettings;
use crate::config::ConfigError;
use async_trait::async_trait;
use persona_application::CompletionClient;
use persona_domain::util::preview;
use persona_domain::{CompletionRequest, CompletionResult, Role};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub struct OpenAiCompletionClient {
    http: Client,
    settings: CompletionSettings,
}

impl OpenAiCompletionClient {
    pub fn new(settings: CompletionSettings) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    fn network_error(&self, err: reqwest::Error) -> CompletionResult {
        let detail = if err.is_timeout() {
            format!(
                "Request timed out after {}s",
                self.settings.timeout.as_secs_f32()
            )
        } else {
            format!("Request failed: {err}")
        };
        warn!("{}", detail);
        CompletionResult::network(detail)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> CompletionResult {
        let body = ChatCompletionRequest {
            model: &request.model_id,
            messages: [
                ChatMessage {
                    role: Role::System,
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: Role::User,
                    content: &request.user_text,
                },
            ],
            temperature: request.temperature,
            stream: false,
        };

        debug!(
            model = %request.model_id,
            "Sending completion request: {}",
            preview(&request.user_text, 60)
        );

        let response = match self
            .http
            .post(self.settings.chat_completions_url())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return self.network_error(err),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return self.network_error(err),
        };

        if !status.is_success() {
            let detail = api_error_detail(status, &text);
            warn!(%status, "Completion API error: {}", detail);
            return CompletionResult::api(detail);
        }

        match serde_json::from_str::<ChatCompletionResponse>(&text) {
            Ok(parsed) => CompletionResult::Text(parsed.into_text()),
            Err(err) => {
                warn!("Undecodable completion response: {}", err);
                CompletionResult::api(format!("Failed to parse completion response: {err}"))
            }
        }
    }
}

/// The API's own `error.message` when present, the raw body otherwise
fn api_error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(body) {
        return parsed.error.message;
    }
    if body.trim().is_empty() {
        return format!("HTTP {status}");
    }
    body.to_string()
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_domain::ErrorKind;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str, timeout: Duration) -> OpenAiCompletionClient {
        OpenAiCompletionClient::new(CompletionSettings {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            model_id: "test-model".to_string(),
            timeout,
        })
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new("You are Kiki.", "hello", "test-model")
    }

    fn reply(content: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
        }))
    }

    #[tokio::test]
    async fn sends_system_and_user_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "stream": false,
                "messages": [
                    { "role": "system", "content": "You are Kiki." },
                    { "role": "user", "content": "hello" }
                ]
            })))
            .respond_with(reply(json!("hi there!")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.complete(request()).await;

        assert_eq!(result, CompletionResult::Text("hi there!".to_string()));
    }

    #[tokio::test]
    async fn api_error_uses_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.complete(request()).await;

        assert_eq!(
            result,
            CompletionResult::Error(ErrorKind::Api, "Incorrect API key provided".to_string())
        );
    }

    #[tokio::test]
    async fn api_error_falls_back_to_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.complete(request()).await;

        assert_eq!(
            result,
            CompletionResult::Error(ErrorKind::Api, "upstream unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn undecodable_success_body_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        let result = client.complete(request()).await;

        assert!(matches!(result, CompletionResult::Error(ErrorKind::Api, _)));
    }

    #[tokio::test]
    async fn missing_content_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply(serde_json::Value::Null))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        assert_eq!(
            client.complete(request()).await,
            CompletionResult::Text(String::new())
        );
    }

    #[tokio::test]
    async fn no_choices_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_secs(5));
        assert_eq!(
            client.complete(request()).await,
            CompletionResult::Text(String::new())
        );
    }

    #[tokio::test]
    async fn timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply(json!("too late")).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = client_for(&server.uri(), Duration::from_millis(200));
        let result = client.complete(request()).await;

        assert!(matches!(result, CompletionResult::Error(ErrorKind::Network, msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        // Nothing listens on port 1
        let client = client_for("http://127.0.0.1:1", Duration::from_secs(5));
        let result = client.complete(request()).await;

        assert!(matches!(result, CompletionResult::Error(ErrorKind::Network, _)));
    }
}
