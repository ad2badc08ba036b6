//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Service wiring from `AppConfig` against mocked backends
//! - Retry behavior through the resilient adapter
//! - Retry delay properties

use application::{ApplicationError, SpeechInput};
use ai_speech::{ProviderId, SpeechError};
use infrastructure::{AppConfig, RetryConfig, build_speech_service};
use secrecy::SecretString;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(mock_server: &MockServer, id: ProviderId) -> AppConfig {
    let mut config = AppConfig::default();
    let provider = config.speech.provider_mut(id);
    provider.api_key = Some(SecretString::from("test-key"));
    provider.endpoint = Some(format!("{}/speech", mock_server.uri()));
    config.retry = RetryConfig::new(1, 10, 2.0, 2).without_jitter();
    config
}

// ============================================================================
// Service Wiring Tests
// ============================================================================

mod wiring_tests {
    use super::*;

    #[tokio::test]
    async fn markdown_to_audio() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/speech"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFFu8, 0xFB]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = build_speech_service(&config_for(&mock_server, ProviderId::Groq)).unwrap();
        let outcome = service
            .synthesize(
                ProviderId::Groq,
                &SpeechInput::new("## Intro\n\n- one\n- two\n\n```\ncode\n```"),
            )
            .await
            .unwrap();

        assert_eq!(outcome.speakable_text.as_str(), "Intro. one. two.");
        assert_eq!(outcome.result.size_bytes(), 2);
    }

    #[tokio::test]
    async fn unkeyed_provider_is_not_configured() {
        let mock_server = MockServer::start().await;
        let service = build_speech_service(&config_for(&mock_server, ProviderId::Groq)).unwrap();

        let err = service
            .synthesize(ProviderId::OpenAi, &SpeechInput::new("Hello"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::ProviderNotConfigured(ProviderId::OpenAi)
        ));
    }
}

// ============================================================================
// Retry Tests
// ============================================================================

mod retry_tests {
    use super::*;

    #[tokio::test]
    async fn recovers_from_transient_5xx() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .up_to_n_times(1)
            .with_priority(1)
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .with_priority(2)
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = build_speech_service(&config_for(&mock_server, ProviderId::OpenAi)).unwrap();
        let outcome = service
            .synthesize(ProviderId::OpenAi, &SpeechInput::new("Hello"))
            .await
            .unwrap();

        assert_eq!(outcome.result.size_bytes(), 3);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Invalid voice" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = build_speech_service(&config_for(&mock_server, ProviderId::OpenAi)).unwrap();
        let err = service
            .synthesize(ProviderId::OpenAi, &SpeechInput::new("Hello"))
            .await
            .unwrap_err();

        let ApplicationError::Provider(SpeechError::Api { status, message, .. }) = err else {
            unreachable!("expected provider API error");
        };
        assert_eq!(status, 400);
        assert_eq!(message, "Invalid voice");
    }

    #[tokio::test]
    async fn gives_up_after_budget() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&mock_server)
            .await;

        let service = build_speech_service(&config_for(&mock_server, ProviderId::Google)).unwrap();
        let err = service
            .synthesize(ProviderId::Google, &SpeechInput::new("Hello"))
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod retry_property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn delay_never_exceeds_max(
            initial in 1u64..1_000,
            extra in 0u64..10_000,
            attempt in 0u32..20,
        ) {
            let max = initial + extra;
            let config = RetryConfig::new(initial, max, 2.0, 5).without_jitter();
            let delay = config.delay_for_attempt(attempt);
            prop_assert!(delay.as_millis() <= u128::from(max));
        }

        #[test]
        fn delay_is_monotonic_without_jitter(initial in 1u64..500, attempt in 0u32..10) {
            let config = RetryConfig::new(initial, 60_000, 2.0, 5).without_jitter();
            prop_assert!(config.delay_for_attempt(attempt) <= config.delay_for_attempt(attempt + 1));
        }

        #[test]
        fn jitter_stays_within_factor(initial in 10u64..1_000) {
            let config = RetryConfig::new(initial, 60_000, 2.0, 5);
            let delay = config.delay_for_attempt(0).as_millis();
            let spread = u128::from(initial) / 10 + 1;
            prop_assert!(delay + spread >= u128::from(initial));
            prop_assert!(delay <= u128::from(initial) + spread);
        }
    }
}
