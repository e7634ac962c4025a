use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use quick_reply_voice::api::routes::{create_router, AppState};
use quick_reply_voice::upstream::{LlmClient, LlmConfig, TtsClient, TtsConfig};

fn router_for(llm_url: &str, tts_url: &str) -> Router {
    let state = Arc::new(AppState {
        llm: LlmClient::new(LlmConfig {
            base_url: llm_url.to_string(),
            api_key: Some("test-llm-key".to_string()),
            ..LlmConfig::default()
        }),
        tts: TtsClient::new(TtsConfig {
            base_url: tts_url.to_string(),
            api_key: Some("test-tts-key".to_string()),
            default_voice_id: "default-voice".to_string(),
            ..TtsConfig::default()
        }),
    });
    create_router(state)
}

async fn post_json(app: Router, path: &str, body: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let bytes = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();

    (status, content_type, bytes)
}

async fn get(app: Router, path: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();

    (status, bytes)
}

#[tokio::test]
async fn missing_client_message_is_rejected_without_an_upstream_call() {
    let mut llm = mockito::Server::new_async().await;
    let mock = llm
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let app = router_for(&llm.url(), "http://unused.invalid");
    let (status, _, body) = post_json(app, "/api/reply", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, br#"{"error":"clientMessage required"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_client_message_is_rejected() {
    let app = router_for("http://unused.invalid", "http://unused.invalid");
    let (status, _, body) = post_json(app, "/api/reply", r#"{"clientMessage":""}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, br#"{"error":"clientMessage required"}"#);
}

#[tokio::test]
async fn reply_returns_trimmed_choice_text() {
    let mut llm = mockito::Server::new_async().await;
    let _m = llm
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"content":"  Sure, I'll send it by Friday.  "}}]}"#)
        .create_async()
        .await;

    let app = router_for(&llm.url(), "http://unused.invalid");
    let (status, _, body) = post_json(
        app,
        "/api/reply",
        r#"{"clientMessage":"Hi, can you send the invoice by Friday?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, br#"{"reply":"Sure, I'll send it by Friday."}"#);
}

#[tokio::test]
async fn reply_upstream_error_is_not_leaked() {
    let mut llm = mockito::Server::new_async().await;
    let _m = llm
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body(r#"{"error":{"message":"internal provider detail"}}"#)
        .create_async()
        .await;

    let app = router_for(&llm.url(), "http://unused.invalid");
    let (status, _, body) = post_json(app, "/api/reply", r#"{"clientMessage":"Hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        br#"{"error":"An error occurred while generating a reply."}"#
    );
    assert!(!String::from_utf8_lossy(&body).contains("provider detail"));
}

#[tokio::test]
async fn reply_transport_failure_maps_to_the_fixed_message() {
    // Nothing listens here; the connection fails fast
    let app = router_for("http://127.0.0.1:9", "http://unused.invalid");
    let (status, _, body) = post_json(app, "/api/reply", r#"{"clientMessage":"Hello"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        br#"{"error":"An error occurred while generating a reply."}"#
    );
}

#[tokio::test]
async fn reply_falls_back_to_raw_payload_when_choices_are_missing() {
    let mut llm = mockito::Server::new_async().await;
    let _m = llm
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected":"shape"}"#)
        .create_async()
        .await;

    let app = router_for(&llm.url(), "http://unused.invalid");
    let (status, _, body) = post_json(app, "/api/reply", r#"{"clientMessage":"Hello"}"#).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("unexpected"));
}

#[tokio::test]
async fn missing_text_is_rejected_without_an_upstream_call() {
    let mut tts = mockito::Server::new_async().await;
    let mock = tts
        .mock(
            "POST",
            mockito::Matcher::Regex("^/text-to-speech/.*".to_string()),
        )
        .expect(0)
        .create_async()
        .await;

    let app = router_for("http://unused.invalid", &tts.url());
    let (status, _, body) = post_json(app, "/api/tts", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, br#"{"error":"text required"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn tts_returns_audio_bytes_with_mpeg_content_type() {
    let mut tts = mockito::Server::new_async().await;
    let _m = tts
        .mock("POST", "/text-to-speech/default-voice")
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body([0xff, 0xf3, 0x10, 0x20])
        .create_async()
        .await;

    let app = router_for("http://unused.invalid", &tts.url());
    let (status, content_type, body) = post_json(
        app,
        "/api/tts",
        r#"{"text":"Sure, I'll send it by Friday."}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("audio/mpeg"));
    assert_eq!(body, vec![0xff, 0xf3, 0x10, 0x20]);
}

#[tokio::test]
async fn tts_uses_the_requested_voice() {
    let mut tts = mockito::Server::new_async().await;
    let mock = tts
        .mock("POST", "/text-to-speech/wAGzRVkxKEs8La0lmdrE")
        .with_status(200)
        .with_body([0x00])
        .create_async()
        .await;

    let app = router_for("http://unused.invalid", &tts.url());
    let (status, _, _) = post_json(
        app,
        "/api/tts",
        r#"{"text":"Sure.","voiceId":"wAGzRVkxKEs8La0lmdrE"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn tts_upstream_error_is_not_leaked() {
    let mut tts = mockito::Server::new_async().await;
    let _m = tts
        .mock("POST", "/text-to-speech/default-voice")
        .with_status(401)
        .with_body(r#"{"detail":"invalid api key"}"#)
        .create_async()
        .await;

    let app = router_for("http://unused.invalid", &tts.url());
    let (status, _, body) = post_json(app, "/api/tts", r#"{"text":"Sure."}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        br#"{"error":"Failed to load the voice. Please try again."}"#
    );
    assert!(!String::from_utf8_lossy(&body).contains("api key"));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = router_for("http://unused.invalid", "http://unused.invalid");
    let (status, body) = get(app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains(r#""status":"ok""#));
}

#[tokio::test]
async fn voices_lists_the_catalogue() {
    let app = router_for("http://unused.invalid", "http://unused.invalid");
    let (status, body) = get(app, "/api/voices").await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("sully"));
    assert!(text.contains("wAGzRVkxKEs8La0lmdrE"));
}
