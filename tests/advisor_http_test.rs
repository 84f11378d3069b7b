//! Advisor tests against a local mock of the provider APIs.

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, Uri},
};
use neon_bomb::{
    AdviceRequest, AdvisorError, Board, LlmAdvisor, LlmClient, LlmConfig, LlmProvider,
    MoveAdvisor, Player, Position, Square, banter, suggest_or_fallback,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// What the mock saw: path, API key header, body.
type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

/// Starts a server that answers every request with `status` and `body`.
async fn mock_server(status: StatusCode, body: Value) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let log = Arc::clone(&seen);

    let app = Router::new().fallback(
        move |uri: Uri, headers: HeaderMap, Json(request): Json<Value>| {
            let log = Arc::clone(&log);
            let body = body.clone();
            async move {
                let key = headers
                    .get("x-goog-api-key")
                    .or_else(|| headers.get("x-api-key"))
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
                    .or_else(|| {
                        headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.strip_prefix("Bearer "))
                            .map(str::to_string)
                    });
                log.lock()
                    .expect("lock")
                    .push((uri.path().to_string(), key, request));
                (status, Json(body))
            }
        },
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{}", addr), seen)
}

fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [{ "text": text }] } }
        ]
    })
}

fn advisor(provider: LlmProvider, base_url: &str) -> LlmAdvisor {
    let config = LlmConfig::new(provider, "test-key".to_string(), "test-model".to_string(), 64)
        .with_base_url(base_url);
    LlmAdvisor::new("Mock", LlmClient::new(config))
}

fn board_with_x_in_corner() -> Board {
    let mut board = Board::new();
    board.set(Position::TopLeft, Square::Occupied(Player::X));
    board
}

#[tokio::test]
async fn test_gemini_move_and_request_shape() {
    let (url, seen) = mock_server(
        StatusCode::OK,
        gemini_reply(r#"{"move": 4, "isBomb": false, "commentary": "The center is mine."}"#),
    )
    .await;

    let request = AdviceRequest::new(board_with_x_in_corner(), Player::O, 2, 2, true);
    let suggestion = advisor(LlmProvider::Gemini, &url)
        .suggest(&request)
        .await
        .expect("suggestion");

    assert_eq!(suggestion.cell, Some(Position::Center));
    assert!(!suggestion.bomb);
    assert_eq!(suggestion.commentary, "The center is mine.");

    let seen = seen.lock().expect("lock");
    let (path, key, body) = &seen[0];
    assert_eq!(path, "/v1beta/models/test-model:generateContent");
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert!(body["generationConfig"]["responseSchema"]["properties"]["isBomb"].is_object());
    let system = body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .expect("system text");
    assert!(system.contains("X, 1, 2, 3, 4, 5, 6, 7, 8"));
}

#[tokio::test]
async fn test_gemini_schema_omits_bomb_without_stock() {
    let (url, seen) = mock_server(
        StatusCode::OK,
        gemini_reply(r#"{"move": 0, "isBomb": true, "commentary": "Boom!"}"#),
    )
    .await;

    let request = AdviceRequest::new(board_with_x_in_corner(), Player::O, 0, 2, true);
    let suggestion = advisor(LlmProvider::Gemini, &url)
        .suggest(&request)
        .await
        .expect("suggestion");

    // Out of bombs: the flag is dropped.
    assert!(!suggestion.bomb);
    let seen = seen.lock().expect("lock");
    assert!(seen[0].2["generationConfig"]["responseSchema"]["properties"]["isBomb"].is_null());
}

#[tokio::test]
async fn test_anthropic_fenced_bomb() {
    let (url, seen) = mock_server(
        StatusCode::OK,
        json!({
            "content": [
                { "type": "text", "text": "```json\n{\"move\": 0, \"isBomb\": true, \"commentary\": \"Kaboom.\"}\n```" }
            ]
        }),
    )
    .await;

    let request = AdviceRequest::new(board_with_x_in_corner(), Player::O, 1, 2, true);
    let suggestion = advisor(LlmProvider::Anthropic, &url)
        .suggest(&request)
        .await
        .expect("suggestion");

    assert_eq!(suggestion.cell, Some(Position::TopLeft));
    assert!(suggestion.bomb);

    let seen = seen.lock().expect("lock");
    assert_eq!(seen[0].0, "/v1/messages");
    assert_eq!(seen[0].2["model"], "test-model");
}

#[tokio::test]
async fn test_openai_json_mode() {
    let (url, seen) = mock_server(
        StatusCode::OK,
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 0,
            "model": "test-model",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "{\"move\": 4, \"commentary\": \"Mine.\"}"
                },
                "finish_reason": "stop",
                "logprobs": null
            }],
            "usage": { "prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2 }
        }),
    )
    .await;

    let request = AdviceRequest::new(board_with_x_in_corner(), Player::O, 2, 2, true);
    let suggestion = advisor(LlmProvider::OpenAI, &url)
        .suggest(&request)
        .await
        .expect("suggestion");

    assert_eq!(suggestion.cell, Some(Position::Center));
    assert!(!suggestion.bomb);
    assert_eq!(suggestion.commentary, "Mine.");

    let seen = seen.lock().expect("lock");
    let (path, key, body) = &seen[0];
    assert_eq!(path, "/chat/completions");
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert_eq!(body["messages"][0]["role"], "system");
}

#[tokio::test]
async fn test_server_error_falls_back_to_first_empty() {
    let (url, _seen) = mock_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "overloaded" }),
    )
    .await;

    let advisor = advisor(LlmProvider::Gemini, &url);
    let request = AdviceRequest::new(board_with_x_in_corner(), Player::O, 2, 2, true);

    assert!(matches!(
        advisor.suggest(&request).await,
        Err(AdvisorError::Llm(_))
    ));

    let suggestion = suggest_or_fallback(&advisor, &request).await;
    assert_eq!(suggestion.cell, Some(Position::TopCenter));
    assert!(!suggestion.bomb);
    assert_eq!(suggestion.commentary, banter::GLITCH_LINE);
}

#[tokio::test]
async fn test_prose_reply_falls_back() {
    let (url, _seen) = mock_server(
        StatusCode::OK,
        gemini_reply("I think I'll take the middle, human."),
    )
    .await;

    let advisor = advisor(LlmProvider::Gemini, &url);
    let request = AdviceRequest::new(board_with_x_in_corner(), Player::O, 2, 2, true);

    assert!(matches!(
        advisor.suggest(&request).await,
        Err(AdvisorError::Malformed(_))
    ));
    let suggestion = suggest_or_fallback(&advisor, &request).await;
    assert_eq!(suggestion.cell, Some(Position::TopCenter));
}
