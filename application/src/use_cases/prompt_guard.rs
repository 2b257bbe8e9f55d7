//! Prompt guard.
//!
//! Two-stage gate in front of the pipeline:
//!
//! 1. [`PromptGuard::validate_non_empty`] — local and free
//! 2. [`PromptGuard::classify_intent`] — one classifier model call
//!
//! Stage 2 only runs when stage 1 passes. The classifier stage fails
//! closed: anything other than an explicit on-topic verdict, including a
//! failed call, rejects the question.

use crate::config::{CallLimits, GuardSettings};
use crate::ports::llm_gateway::LlmGateway;
use crate::use_cases::shared::call_with_limits;
use kbchat_domain::util::log_preview;
use kbchat_domain::{ClassificationVerdict, GuardDecision, PromptTemplate, Question, RejectionReason};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Validates and classifies user input before any retrieval or generation.
pub struct PromptGuard {
    gateway: Arc<dyn LlmGateway>,
    settings: GuardSettings,
    limits: CallLimits,
}

impl PromptGuard {
    pub fn new(gateway: Arc<dyn LlmGateway>, settings: GuardSettings, limits: CallLimits) -> Self {
        Self {
            gateway,
            settings,
            limits,
        }
    }

    /// Stage 1: false when the text is empty or whitespace-only.
    pub fn validate_non_empty(text: &str) -> bool {
        !Question::is_blank(text)
    }

    /// Whether stage 2 is configured to run.
    pub fn classification_enabled(&self) -> bool {
        self.settings.classify
    }

    /// Subject the assistant is limited to.
    pub fn topic(&self) -> &str {
        &self.settings.topic
    }

    /// Stage 2: ask the classifier model for the question's category.
    ///
    /// Never returns an error. A failed classification call is logged and
    /// reported as [`RejectionReason::ServiceUnavailable`] carrying the
    /// gateway error; a cancelled call is reported the same way, with
    /// `GatewayError::Cancelled` inside.
    pub async fn classify_intent(
        &self,
        text: &str,
        cancellation: Option<&CancellationToken>,
    ) -> GuardDecision {
        let prompt = PromptTemplate::classification(text, &self.settings.topic);

        let raw = match call_with_limits(
            self.gateway.generate(&prompt, &self.settings.classifier),
            &self.limits,
            cancellation,
        )
        .await
        {
            Ok(raw) => raw,
            Err(e) => {
                if e.is_cancelled() {
                    info!("Classification cancelled");
                } else {
                    warn!(
                        kind = e.kind(),
                        model = %self.settings.classifier.model(),
                        "Classification call failed, rejecting question: {}",
                        e
                    );
                }
                return GuardDecision::Rejected(RejectionReason::ServiceUnavailable(e));
            }
        };

        let verdict = ClassificationVerdict::parse(&raw);
        debug!(verdict = ?verdict, "Classifier output: {}", log_preview(&raw, 80));

        let decision = GuardDecision::from(verdict);
        if let GuardDecision::Rejected(reason) = &decision {
            info!(reason = reason.as_str(), "Question rejected by classifier");
        }
        decision
    }

    /// Run both stages.
    ///
    /// With classification disabled only stage 1 applies.
    pub async fn check(
        &self,
        text: &str,
        cancellation: Option<&CancellationToken>,
    ) -> GuardDecision {
        if !Self::validate_non_empty(text) {
            return GuardDecision::Rejected(RejectionReason::EmptyInput);
        }
        if !self.settings.classify {
            return GuardDecision::Authorized;
        }
        self.classify_intent(text, cancellation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::use_cases::test_support::{HangingGateway, ScriptedGateway};
    use kbchat_domain::IntentCategory;

    fn guard(gateway: Arc<dyn LlmGateway>) -> PromptGuard {
        PromptGuard::new(gateway, GuardSettings::default(), CallLimits::default())
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(PromptGuard::validate_non_empty("What is the torque?"));
        assert!(!PromptGuard::validate_non_empty(""));
        assert!(!PromptGuard::validate_non_empty("   \t\n"));
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_call() {
        let gateway = Arc::new(ScriptedGateway::replying(&["Category E"]));
        let guard = guard(gateway.clone());

        for input in ["", "   ", "\n\t"] {
            assert_eq!(
                guard.check(input, None).await,
                GuardDecision::Rejected(RejectionReason::EmptyInput)
            );
        }
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_category_e_authorizes() {
        let gateway = Arc::new(ScriptedGateway::replying(&["  category E\n"]));
        let guard = guard(gateway.clone());

        assert_eq!(
            guard.check("What is the bucket capacity?", None).await,
            GuardDecision::Authorized
        );
        assert_eq!(gateway.call_count(), 1);
        assert!(gateway.prompt(0).contains("What is the bucket capacity?"));
    }

    #[tokio::test]
    async fn test_non_e_categories_reject() {
        let gateway = Arc::new(ScriptedGateway::replying(&[
            "Category A",
            "Category B",
            "Category C",
            "Category D",
        ]));
        let guard = guard(gateway);

        for expected in [
            IntentCategory::ModelMeta,
            IntentCategory::Toxic,
            IntentCategory::OffTopic,
            IntentCategory::InstructionProbe,
        ] {
            assert_eq!(
                guard.classify_intent("anything", None).await,
                GuardDecision::Rejected(RejectionReason::Category(expected))
            );
        }
    }

    #[tokio::test]
    async fn test_unparseable_output_rejects() {
        let gateway = Arc::new(ScriptedGateway::replying(&["I think this is fine"]));
        let decision = guard(gateway).classify_intent("anything", None).await;
        assert!(matches!(
            decision,
            GuardDecision::Rejected(RejectionReason::UnrecognizedVerdict(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_error_fails_closed() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(
            GatewayError::ConnectionError("dns failure".to_string()),
        )]));
        let decision = guard(gateway).classify_intent("What is the torque?", None).await;
        assert_eq!(
            decision,
            GuardDecision::Rejected(RejectionReason::ServiceUnavailable(
                GatewayError::ConnectionError("dns failure".to_string())
            ))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_closed() {
        let guard = PromptGuard::new(
            Arc::new(HangingGateway),
            GuardSettings::default(),
            CallLimits::with_timeout_seconds(2),
        );
        assert_eq!(
            guard.classify_intent("What is the torque?", None).await,
            GuardDecision::Rejected(RejectionReason::ServiceUnavailable(GatewayError::Timeout))
        );
    }

    #[tokio::test]
    async fn test_cancelled_call_keeps_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let guard = guard(Arc::new(HangingGateway));

        let decision = guard.classify_intent("What is the torque?", Some(&token)).await;
        assert_eq!(
            decision,
            GuardDecision::Rejected(RejectionReason::ServiceUnavailable(GatewayError::Cancelled))
        );
    }

    #[tokio::test]
    async fn test_classification_disabled_skips_model() {
        let gateway = Arc::new(ScriptedGateway::replying(&["Category B"]));
        let settings = GuardSettings {
            classify: false,
            ..GuardSettings::default()
        };
        let guard = PromptGuard::new(gateway.clone(), settings, CallLimits::default());

        assert_eq!(guard.check("anything", None).await, GuardDecision::Authorized);
        assert_eq!(
            guard.check(" ", None).await,
            GuardDecision::Rejected(RejectionReason::EmptyInput)
        );
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_uses_classifier_config() {
        let gateway = Arc::new(ScriptedGateway::replying(&["Category E"]));
        guard(gateway.clone()).classify_intent("q", None).await;
        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls[0].1, GuardSettings::default().classifier);
    }
}
