//! Bedrock text generation gateway
//!
//! Implements [`LlmGateway`] with one stateless `InvokeModel` call per
//! prompt. The request body format is picked from the model family.

use super::model_map::{self, ModelFamily};
use super::types;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_smithy_types::Blob;
use kbchat_application::ports::llm_gateway::{GatewayError, LlmGateway};
use kbchat_domain::{GenerationConfig, Model};
use std::sync::Arc;
use tracing::debug;

pub struct BedrockLlmGateway {
    client: Arc<BedrockClient>,
}

impl BedrockLlmGateway {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Arc::new(BedrockClient::new(sdk_config)),
        }
    }

    fn family_for(model: &Model) -> Result<ModelFamily, GatewayError> {
        model_map::model_family(model).ok_or_else(|| {
            GatewayError::ModelNotAvailable(format!(
                "Model {} has no known Bedrock request format",
                model
            ))
        })
    }
}

#[async_trait]
impl LlmGateway for BedrockLlmGateway {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GatewayError> {
        let model = config.model();
        let family = Self::family_for(model)?;
        let body = types::build_request_body(family, prompt, config)?;

        debug!(
            model = %model,
            family = ?family,
            prompt_bytes = prompt.len(),
            "Calling Bedrock InvokeModel"
        );

        let response = self
            .client
            .invoke_model()
            .model_id(model.as_str())
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| types::convert_invoke_error(&e))?;

        types::parse_response_body(family, response.body().as_ref())
    }
}
