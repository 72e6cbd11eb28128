use std::{sync::Arc, time::Instant};

use ai_llm_service::ChatCompletion;
use tracing::{error, info, instrument};

use crate::{
    interpret::{ExtractionStrategy, interpret},
    model::AnalysisRequest,
    prompt::{SYSTEM_PROMPT, build_security_prompt},
    verdict::{DegradedReason, Verdict},
};

/// Prompt → upstream → interpret, with every failure folded into a
/// [`Verdict::Degraded`].
///
/// Holds no mutable state; share it behind an `Arc`.
#[derive(Clone)]
pub struct SecurityAnalyzer {
    client: Arc<dyn ChatCompletion>,
    strategy: ExtractionStrategy,
}

impl SecurityAnalyzer {
    pub fn new(client: Arc<dyn ChatCompletion>, strategy: ExtractionStrategy) -> Self {
        Self { client, strategy }
    }

    /// Model identifier of the underlying client.
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Runs one analysis. Never returns an error: upstream failures become
    /// [`DegradedReason::Upstream`], unreadable replies [`DegradedReason::Unparseable`].
    #[instrument(
        name = "analyze_security_intent",
        skip_all,
        fields(language = %req.language, code_len = req.code.len())
    )]
    pub async fn analyze(&self, req: &AnalysisRequest) -> Verdict {
        let started = Instant::now();
        let prompt = build_security_prompt(&req.intent, &req.code, &req.language);

        let reply = match self.client.complete(&prompt, Some(SYSTEM_PROMPT)).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "analysis error");
                return Verdict::Degraded(DegradedReason::Upstream(e.to_string()));
            }
        };

        let verdict = interpret(&reply, self.strategy);
        info!(
            degraded = verdict.is_degraded(),
            latency_ms = started.elapsed().as_millis(),
            "analysis finished"
        );
        verdict
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ai_llm_service::{
        AiLlmError, LlmProvider, ProviderError, ProviderErrorKind,
        error_handler::{HttpError, StatusCode},
    };
    use async_trait::async_trait;

    use super::*;
    use crate::model::Severity;

    /// Replays a canned reply (or error) and records what it was sent.
    struct StubClient {
        reply: Result<String, fn() -> AiLlmError>,
        seen: Mutex<Vec<(String, Option<String>)>>,
    }

    impl StubClient {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(make: fn() -> AiLlmError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(make),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatCompletion for StubClient {
        async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), system.map(str::to_string)));
            match &self.reply {
                Ok(s) => Ok(s.clone()),
                Err(make) => Err(make()),
            }
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(
            "must validate input",
            "function test(x){return x;}",
            Some("javascript"),
        )
    }

    #[tokio::test]
    async fn sends_prompt_with_system_persona() {
        let stub = StubClient::ok(r#"{"isSecure": true, "issues": [], "suggestions": [], "severity": "info"}"#);
        let analyzer = SecurityAnalyzer::new(stub.clone(), ExtractionStrategy::Scan);

        let r = analyzer.analyze(&request()).await.into_result();
        assert!(r.is_secure);
        assert_eq!(r.severity, Severity::Info);

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].0.contains("SECURITY INTENT: must validate input"));
        assert_eq!(seen[0].1.as_deref(), Some(SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn upstream_status_failure_degrades_instead_of_failing() {
        let stub = StubClient::failing(|| {
            ProviderError::new(
                LlmProvider::OpenRouter,
                ProviderErrorKind::HttpStatus(HttpError {
                    status: StatusCode::BAD_GATEWAY,
                    url: "http://upstream/chat/completions".into(),
                    snippet: "bad gateway".into(),
                }),
            )
            .into()
        });
        let analyzer = SecurityAnalyzer::new(stub, ExtractionStrategy::Scan);

        let v = analyzer.analyze(&request()).await;
        assert!(v.is_degraded());
        let r = v.into_result();
        assert!(!r.is_secure);
        assert_eq!(r.severity, Severity::Error);
        assert!(r.suggestions.is_empty());
        assert_eq!(r.issues.len(), 1);
        assert!(r.issues[0].starts_with("Analysis failed: "));
        assert!(r.issues[0].contains("502"));
    }

    #[tokio::test]
    async fn missing_key_degrades() {
        let stub = StubClient::failing(|| {
            ProviderError::new(LlmProvider::OpenRouter, ProviderErrorKind::MissingApiKey).into()
        });
        let analyzer = SecurityAnalyzer::new(stub, ExtractionStrategy::Span);
        let r = analyzer.analyze(&request()).await.into_result();
        assert_eq!(r.severity, Severity::Error);
        assert!(r.issues[0].contains("API key is not configured"));
    }

    #[tokio::test]
    async fn prose_reply_degrades_to_parse_failure() {
        let stub = StubClient::ok("The code looks fine to me.");
        let analyzer = SecurityAnalyzer::new(stub, ExtractionStrategy::Scan);
        assert_eq!(
            analyzer.analyze(&request()).await,
            Verdict::Degraded(DegradedReason::Unparseable)
        );
        assert_eq!(analyzer.model(), "stub-model");
    }
}
