//! Grounded answer generation.

use crate::config::CallLimits;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::shared::call_with_limits;
use kbchat_domain::{Answer, Context, GenerationConfig, PromptTemplate, Question};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Builds the grounded prompt and makes exactly one generation call.
pub struct Answerer {
    gateway: Arc<dyn LlmGateway>,
    limits: CallLimits,
}

impl Answerer {
    pub fn new(gateway: Arc<dyn LlmGateway>, limits: CallLimits) -> Self {
        Self { gateway, limits }
    }

    /// Answer `question` from `context`.
    ///
    /// A response without a first candidate's text surfaces as
    /// [`GatewayError::MalformedResponse`] from the gateway.
    pub async fn answer(
        &self,
        question: &Question,
        context: &Context,
        config: &GenerationConfig,
        cancellation: Option<&CancellationToken>,
    ) -> Result<Answer, GatewayError> {
        let prompt = PromptTemplate::grounded_answer(question, context);
        debug!(
            model = %config.model(),
            prompt_bytes = prompt.len(),
            fallback_context = context.is_fallback(),
            "Generating answer"
        );

        let text = call_with_limits(
            self.gateway.generate(&prompt, config),
            &self.limits,
            cancellation,
        )
        .await?;

        Ok(Answer::new(text))
    }
}
