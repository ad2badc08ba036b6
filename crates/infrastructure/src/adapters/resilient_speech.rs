//! Resilient speech adapter
//!
//! Wraps a provider client with a hard per-attempt timeout and retries on
//! transport failures, timeouts and 5xx responses. Client errors such as a
//! rejected key or an unknown voice are returned after the first attempt.

use std::sync::Arc;
use std::time::Duration;

use ai_speech::{ProviderId, SpeechError, SynthesisRequest, SynthesisResult, TextToSpeech};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::retry::{RetryConfig, with_retry};

/// Timeout and retry decorator around any `TextToSpeech`
pub struct ResilientSpeechProvider {
    inner: Arc<dyn TextToSpeech>,
    retry: RetryConfig,
    timeout: Duration,
}

impl std::fmt::Debug for ResilientSpeechProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientSpeechProvider")
            .field("provider", &self.inner.provider())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.retry.max_retries)
            .finish_non_exhaustive()
    }
}

impl ResilientSpeechProvider {
    /// Wrap `inner` with the given retry policy and per-attempt timeout
    pub fn new(inner: Arc<dyn TextToSpeech>, retry: RetryConfig, timeout: Duration) -> Self {
        Self {
            inner,
            retry,
            timeout,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn attempt(&self, request: &SynthesisRequest) -> Result<SynthesisResult, SpeechError> {
        tokio::time::timeout(self.timeout, self.inner.synthesize(request))
            .await
            .unwrap_or_else(|_| Err(SpeechError::Timeout(self.timeout.as_millis() as u64)))
    }
}

#[async_trait]
impl TextToSpeech for ResilientSpeechProvider {
    fn provider(&self) -> ProviderId {
        self.inner.provider()
    }

    #[instrument(skip(self, request), fields(provider = %self.inner.provider()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, SpeechError> {
        let outcome = with_retry(&self.retry, || self.attempt(request)).await;
        debug!(
            attempts = outcome.attempts,
            duration_ms = u64::try_from(outcome.total_duration.as_millis()).unwrap_or(u64::MAX),
            "Provider call finished"
        );
        outcome.into_result()
    }
}
