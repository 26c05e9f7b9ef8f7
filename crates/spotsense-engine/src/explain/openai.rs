//! OpenAI chat-completions client for narrative generation.
//!
//! Wraps `reqwest` with a client-level timeout and typed request/response
//! bodies. Fails closed: any transport, status, parse, or empty-content
//! problem surfaces as [`ExplainError`] and the provider falls back to the
//! deterministic template. A single attempt is made per item — no retries.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::ExplanationFeatures;
use crate::error::ExplainError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Fixed system instruction. Requires the narrative to disclose that
/// footfall is pedestrian traffic rather than visitors, to use the given
/// conversion-rate fields when present, and to never invent figures.
const SYSTEM_PROMPT_KO: &str = "너는 입지 추천 사유를 작성하는 도우미다. \
유동인구는 '보행량'이며 실제 방문자가 아님을 명시하라. \
features에 'assumed_visit_rate'와 'estimated_visitors'가 있으면 이를 사용해, \
전환율 r% 가정 시 방문자 추정 N명을 사실대로 설명하라. \
과장/추정치 임의 생성 금지, 주어진 값만 사용.";

/// Generative explanation backend.
///
/// Use [`OpenAiClient::new`] for the production endpoint or
/// [`OpenAiClient::with_base_url`] to point at a mock server in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Client for the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`ExplainError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ExplainError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Client with a custom base URL (mock servers, gateways).
    ///
    /// # Errors
    ///
    /// Returns [`ExplainError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ExplainError::Api`] for an unparsable base URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ExplainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        // Ensure exactly one trailing slash so Url::join appends the path
        // instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ExplainError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    /// One chat completion, single attempt.
    ///
    /// # Errors
    ///
    /// - [`ExplainError::Http`] on network failure or timeout.
    /// - [`ExplainError::Api`] on a non-2xx status or undecodable body.
    /// - [`ExplainError::EmptyCompletion`] when the response carries no text.
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ExplainError> {
        let url = self
            .base_url
            .join("chat/completions")
            .map_err(|e| ExplainError::Api(format!("invalid completions URL: {e}")))?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: 0.2,
            max_tokens: 300,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplainError::Api(format!(
                "completions endpoint returned status {status}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExplainError::Api(format!("completions response parse error: {e}")))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .ok_or(ExplainError::EmptyCompletion)?;

        Ok(content)
    }

    /// Generate the narrative for one recommendation's features.
    ///
    /// # Errors
    ///
    /// Propagates every [`Self::generate`] failure; the caller decides
    /// whether to fall back.
    pub(super) async fn explain(
        &self,
        features: &ExplanationFeatures,
    ) -> Result<String, ExplainError> {
        let user_prompt = build_user_prompt(features)?;
        self.generate(SYSTEM_PROMPT_KO, &user_prompt).await
    }
}

fn build_user_prompt(features: &ExplanationFeatures) -> Result<String, ExplainError> {
    let features_json = serde_json::to_string(features)?;
    Ok(format!(
        "다음 JSON 지표만 근거로 아래 형식을 그대로 작성하라.\n\
         규칙:\n\
         - 각 항목은 정확히 2문장\n\
         - 과장 및 임의 추정/계산(예: 매출, 순이익) 금지. 주어진 수치만 언급\n\
         - 데이터가 없으면 '데이터 없음'이라고 적기\n\
         - 전체는 900자 이내\n\n\
         형식:\n\
         1. 추천 사유\n\
         2. 예상 매출 수익 사유\n\
         3. 유사 성공 사례\n\
         4. 창업 운영 팁\n\
         5. 정부 지원금 정보\n\n\
         JSON:\n{features_json}"
    ))
}
