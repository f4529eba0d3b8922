//! HttpAudioGenerator against a local stand-in backend
//!
//! Each test starts a small axum server on an ephemeral port that plays
//! the role of the inference backend.

use axum::{http::StatusCode, routing::post, Json, Router};
use demo_mc::generator::{AudioGenerator, GenerationParams, GeneratorError, HttpAudioGenerator};
use serde_json::{json, Value};
use std::time::Duration;

/// Serve `app` on 127.0.0.1 and return its base URL
async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", address)
}

fn client(base_url: &str) -> HttpAudioGenerator {
    HttpAudioGenerator::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_generate_sends_prompts_and_duration() {
    // Echo the duration back as the sample count so the request is observable
    let app = Router::new().route(
        "/generate",
        post(|Json(body): Json<Value>| async move {
            let duration = body["duration"].as_u64().unwrap() as usize;
            let waveforms: Vec<Value> = body["prompts"]
                .as_array()
                .unwrap()
                .iter()
                .map(|_| json!({"channels": 1, "samples": vec![0.25; duration]}))
                .collect();
            Json(json!({"sample_rate": 32000, "waveforms": waveforms}))
        }),
    );
    let base_url = spawn_backend(app).await;

    let waveforms = client(&base_url)
        .generate(
            &GenerationParams::with_duration(12),
            &["A slow tempo jazz track that feels chill".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(waveforms.len(), 1);
    assert_eq!(waveforms[0].channels, 1);
    assert_eq!(waveforms[0].samples, vec![0.25; 12]);
}

#[tokio::test]
async fn test_backend_error_is_reported() {
    let app = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "CUDA out of memory") }),
    );
    let base_url = spawn_backend(app).await;

    let result = client(&base_url)
        .generate(&GenerationParams::with_duration(10), &["x".to_string()])
        .await;

    match result {
        Err(GeneratorError::Backend { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "CUDA out of memory");
        }
        other => panic!("Expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_sample_rate_is_protocol_error() {
    let app = Router::new().route(
        "/generate",
        post(|| async {
            Json(json!({
                "sample_rate": 44100,
                "waveforms": [{"channels": 1, "samples": [0.0, 0.1]}],
            }))
        }),
    );
    let base_url = spawn_backend(app).await;

    let result = client(&base_url)
        .generate(&GenerationParams::with_duration(10), &["x".to_string()])
        .await;
    assert!(matches!(result, Err(GeneratorError::Protocol(_))));
}

#[tokio::test]
async fn test_unreachable_backend_is_unavailable() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let result = client(&format!("http://{}", address))
        .generate(&GenerationParams::with_duration(10), &["x".to_string()])
        .await;
    assert!(matches!(result, Err(GeneratorError::Unavailable(_))));
}
