//! Integration tests for `OpenAiClient` and provider fallback using
//! wiremock HTTP mocks.

use spotsense_engine::{ExplainError, ExplanationFeatures, ExplanationProvider, OpenAiClient};
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> OpenAiClient {
    OpenAiClient::with_base_url("test-key", "gpt-4o-mini", 5, base_url)
        .expect("client construction should not fail")
}

fn sample_features() -> ExplanationFeatures {
    ExplanationFeatures {
        business_type: Some("카페".to_string()),
        distance_km: Some(0.42),
        daily_footfall_avg: Some(4790),
        assumed_visit_rate: Some(0.035),
        estimated_visitors: Some(167),
        monthly_rent: Some(1_565_000),
        deposit: Some(26_600_000),
        floor: Some(1),
        address: Some("서울 서대문구".to_string()),
    }
}

#[tokio::test]
async fn generate_returns_completion_content() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": "1. 추천 사유: 유동인구가 많습니다." } }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(bearer_token("test-key"))
        .and(body_partial_json(serde_json::json!({ "model": "gpt-4o-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let text = client
        .generate("system", "user")
        .await
        .expect("completion should parse");
    assert_eq!(text, "1. 추천 사유: 유동인구가 많습니다.");
}

#[tokio::test]
async fn generate_fails_closed_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let result = client.generate("system", "user").await;
    assert!(matches!(result, Err(ExplainError::Api(_))));
}

#[tokio::test]
async fn generate_fails_closed_on_empty_content() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "choices": [ { "message": { "role": "assistant", "content": "" } } ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/v1", server.uri()));
    let result = client.generate("system", "user").await;
    assert!(matches!(result, Err(ExplainError::EmptyCompletion)));
}

#[tokio::test]
async fn provider_uses_backend_text_when_available() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "choices": [ { "message": { "role": "assistant", "content": "생성된 설명" } } ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = ExplanationProvider::OpenAi(test_client(&format!("{}/v1", server.uri())));
    let text = provider.explain(&sample_features()).await;
    assert_eq!(text, "생성된 설명");
}

#[tokio::test]
async fn provider_falls_back_to_template_when_backend_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = ExplanationProvider::OpenAi(test_client(&format!("{}/v1", server.uri())));
    let text = provider.explain(&sample_features()).await;

    // Identical to what the deterministic provider would have produced.
    let expected = ExplanationProvider::Deterministic
        .explain(&sample_features())
        .await;
    assert_eq!(text, expected);
    assert!(text.contains("0.42km"));
    assert!(text.contains("4,790"));
    assert!(text.contains("1층"));
}

#[tokio::test]
async fn provider_falls_back_when_backend_is_unreachable() {
    // Nothing listens on this port; the request errors at connect time.
    let provider = ExplanationProvider::OpenAi(test_client("http://127.0.0.1:1/v1"));
    let text = provider.explain(&sample_features()).await;
    assert!(text.ends_with("등을 종합해 상위 후보로 선정했습니다."));
}
