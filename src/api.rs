// API client module: contains a small blocking HTTP client that talks to
// the chat-completion endpoint. It is intentionally small and synchronous
// to keep the request/response flow easy to follow.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Simple API client that holds a reqwest blocking client, the base URL
/// of the completion endpoint, the secret key and the fixed sampling
/// settings used for every request.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

/// One turn of the prompt. Role is `"system"` for the persona
/// instruction and `"user"` for the typed question.
#[derive(Serialize, Deserialize, Debug)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Payload for the completion endpoint. Fields mirror the backend
/// expectations of the hosted chat API.
#[derive(Serialize, Deserialize, Debug)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

/// Expected response shape. Only the first choice is used; the rest of
/// the payload (usage counters etc.) is ignored on purpose.
#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
    message: CompletionChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct CompletionChoiceMessage {
    content: String,
}

/// Response shape of the models listing, used by the connectivity probe.
#[derive(Deserialize, Debug)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Deserialize, Debug)]
struct ModelEntry {
    id: String,
}

impl ChatClient {
    /// Create a ChatClient from the loaded configuration. The settings
    /// are copied in so the client owns everything it needs per call.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ChatClient {
            client,
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            temperature: cfg.temperature,
        })
    }

    /// Helper to build the Authorization header map for the bearer key.
    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let val = format!("Bearer {}", self.api_key);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&val).unwrap());
        headers
    }

    /// Compose the payload for one submission: the persona instruction
    /// followed by the user question, with the fixed model name and
    /// temperature. Split out from `complete` so the composition can be
    /// exercised without a network.
    pub fn request_for(&self, instruction: &str, question: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: instruction.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: question.into(),
                },
            ],
        }
    }

    /// Send one completion request and return the text of the first
    /// choice. On a non-success status the server response body is
    /// included in the error so the user sees what the provider said.
    pub fn complete(&self, instruction: &str, question: &str) -> Result<String> {
        let url = format!("{}/chat/completions", &self.base_url);
        let req = self.request_for(instruction, question);
        let res = self.client.post(&url)
            .headers(self.auth_headers())
            .json(&req)
            .send()
            .context("Failed to send completion request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Completion request failed: {} - {}", status, txt);
        }
        let resp: CompletionResponse = res.json().context("Parsing completion response json")?;
        let first = resp
            .choices
            .into_iter()
            .next()
            .context("Completion response contained no choices")?;
        Ok(first.message.content)
    }

    /// List the model identifiers the endpoint offers. Used once at
    /// startup as a cheap connectivity and authentication probe.
    pub fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models", &self.base_url);
        let res = self.client.get(&url)
            .headers(self.auth_headers())
            .send()
            .context("Failed to send models request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Listing models failed: {} - {}", status, txt);
        }
        let resp: ModelsResponse = res.json().context("Parsing models response json")?;
        Ok(resp.data.into_iter().map(|m| m.id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ChatClient {
        let cfg = Config {
            api_key: "sk-test".into(),
            base_url: "http://localhost:9999/v1".into(),
            model: "gpt-3.5-turbo".into(),
            temperature: 0.5,
        };
        ChatClient::from_config(&cfg).unwrap()
    }

    #[test]
    fn request_holds_two_messages_in_system_then_user_order() {
        let api = test_client();
        let req = api.request_for("You are a test fixture.", "What am I?");

        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[0].content, "You are a test fixture.");
        assert_eq!(req.messages[1].role, "user");
        assert_eq!(req.messages[1].content, "What am I?");
    }

    #[test]
    fn request_carries_the_fixed_model_and_temperature() {
        let api = test_client();
        let req = api.request_for("instruction", "question");
        assert_eq!(req.model, "gpt-3.5-turbo");
        assert_eq!(req.temperature, 0.5);
    }

    #[test]
    fn request_serializes_to_the_expected_wire_shape() {
        let api = test_client();
        let req = api.request_for("instruction", "question");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "question");
    }

    #[test]
    fn nutrition_ask_composes_instruction_and_question_verbatim() {
        use crate::persona::Persona;

        let api = test_client();
        let persona = Persona::from_label("nutritionist");
        let question = "What should I eat before a run?";
        let req = api.request_for(persona.instruction(), question);

        assert_eq!(req.messages[0].content, Persona::Nutritionist.instruction());
        assert_eq!(req.messages[1].content, question);
    }

    #[test]
    fn models_response_parses_identifiers() {
        let body = r#"{"data": [{"id": "gpt-3.5-turbo"}, {"id": "gpt-4o-mini"}]}"#;
        let resp: ModelsResponse = serde_json::from_str(body).unwrap();
        let ids: Vec<String> = resp.data.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["gpt-3.5-turbo", "gpt-4o-mini"]);
    }

    #[test]
    fn completion_response_yields_the_first_choice() {
        let body = r#"{"choices": [
            {"message": {"role": "assistant", "content": "first"}},
            {"message": {"role": "assistant", "content": "second"}}
        ]}"#;
        let resp: CompletionResponse = serde_json::from_str(body).unwrap();
        let first = resp.choices.into_iter().next().unwrap();
        assert_eq!(first.message.content, "first");
    }
}
