//! Wire types and conversions for the Bedrock APIs
//!
//! `InvokeModel` request and response bodies per model family, SDK error
//! conversion, and document metadata conversion for retrieval results.

use super::model_map::ModelFamily;
use aws_sdk_bedrockruntime::error::SdkError;
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_smithy_types::Document;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;
use kbchat_application::ports::llm_gateway::GatewayError;
use kbchat_domain::GenerationConfig;
use serde::{Deserialize, Serialize};

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

// ─── Titan ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanRequest<'a> {
    input_text: &'a str,
    text_generation_config: TitanGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanGenerationConfig {
    max_token_count: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanResponse {
    #[serde(default)]
    results: Vec<TitanResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanResult {
    output_text: Option<String>,
}

// ─── Anthropic ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: Vec<AnthropicContent<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicContent<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponseBlock {
    text: Option<String>,
}

// ─── Request / response bodies ───────────────────────────────────

/// Serialize the `InvokeModel` body for a single-prompt call.
pub fn build_request_body(
    family: ModelFamily,
    prompt: &str,
    config: &GenerationConfig,
) -> Result<Vec<u8>, GatewayError> {
    let body = match family {
        ModelFamily::Titan => serde_json::to_vec(&TitanRequest {
            input_text: prompt,
            text_generation_config: TitanGenerationConfig {
                max_token_count: config.max_output_tokens(),
                temperature: config.temperature(),
                top_p: config.top_p(),
            },
        }),
        ModelFamily::Anthropic => serde_json::to_vec(&AnthropicRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: config.max_output_tokens(),
            temperature: config.temperature(),
            top_p: config.top_p(),
            messages: vec![AnthropicMessage {
                role: "user",
                content: vec![AnthropicContent {
                    kind: "text",
                    text: prompt,
                }],
            }],
        }),
    };
    body.map_err(|e| GatewayError::RequestFailed(format!("Failed to encode request: {}", e)))
}

/// Extract the first candidate's text from an `InvokeModel` response body.
///
/// An empty string is a valid answer; a missing candidate or missing text
/// field is [`GatewayError::MalformedResponse`].
pub fn parse_response_body(family: ModelFamily, body: &[u8]) -> Result<String, GatewayError> {
    let malformed = |detail: String| GatewayError::MalformedResponse(detail);

    match family {
        ModelFamily::Titan => {
            let response: TitanResponse = serde_json::from_slice(body)
                .map_err(|e| malformed(format!("invalid Titan response: {}", e)))?;
            response
                .results
                .into_iter()
                .next()
                .and_then(|r| r.output_text)
                .ok_or_else(|| malformed("missing results[0].outputText".to_string()))
        }
        ModelFamily::Anthropic => {
            let response: AnthropicResponse = serde_json::from_slice(body)
                .map_err(|e| malformed(format!("invalid Anthropic response: {}", e)))?;
            response
                .content
                .into_iter()
                .next()
                .and_then(|b| b.text)
                .ok_or_else(|| malformed("missing content[0].text".to_string()))
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────

/// Convert an `InvokeModel` SDK error to a GatewayError.
pub fn convert_invoke_error(err: &SdkError<InvokeModelError>) -> GatewayError {
    match err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            InvokeModelError::ThrottlingException(e) => {
                GatewayError::Throttled(format!("Bedrock throttled: {}", e))
            }
            InvokeModelError::ModelNotReadyException(e) => {
                GatewayError::ModelNotAvailable(format!("Bedrock model not ready: {}", e))
            }
            InvokeModelError::ResourceNotFoundException(e) => {
                GatewayError::ModelNotAvailable(format!("Bedrock model not found: {}", e))
            }
            InvokeModelError::ValidationException(e) => {
                GatewayError::RequestFailed(format!("Bedrock validation error: {}", e))
            }
            InvokeModelError::ModelTimeoutException(_) => GatewayError::Timeout,
            other => convert_service_error("Bedrock", other.code(), other.message()),
        },
        SdkError::TimeoutError(_) => GatewayError::Timeout,
        other => GatewayError::ConnectionError(format!("Bedrock SDK error: {}", other)),
    }
}

/// Convert any other AWS SDK error using its error code.
pub fn convert_sdk_error<E, R>(service: &str, err: &SdkError<E, R>) -> GatewayError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::ServiceError(service_err) => {
            let inner = service_err.err();
            convert_service_error(service, inner.code(), inner.message())
        }
        SdkError::TimeoutError(_) => GatewayError::Timeout,
        other => GatewayError::ConnectionError(format!("{} SDK error: {}", service, other)),
    }
}

/// Map an AWS error code to a GatewayError variant.
pub fn convert_service_error(
    service: &str,
    code: Option<&str>,
    message: Option<&str>,
) -> GatewayError {
    let code = code.unwrap_or("UnknownError");
    let detail = format!("{} {}: {}", service, code, message.unwrap_or("no message"));
    match code {
        "ThrottlingException" | "TooManyRequestsException" | "SlowDown" => {
            GatewayError::Throttled(detail)
        }
        "ModelTimeoutException" | "RequestTimeout" => GatewayError::Timeout,
        "ModelNotReadyException" => GatewayError::ModelNotAvailable(detail),
        "ServiceUnavailableException" | "InternalServerException" => {
            GatewayError::ConnectionError(detail)
        }
        _ => GatewayError::RequestFailed(detail),
    }
}

// ─── Document helpers ────────────────────────────────────────────

/// Convert an aws_smithy_types::Document to a serde_json::Value.
pub fn document_to_json(doc: &Document) -> serde_json::Value {
    match doc {
        Document::Null => serde_json::Value::Null,
        Document::Bool(b) => serde_json::Value::Bool(*b),
        Document::Number(n) => match n {
            aws_smithy_types::Number::PosInt(i) => serde_json::json!(*i),
            aws_smithy_types::Number::NegInt(i) => serde_json::json!(*i),
            aws_smithy_types::Number::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        },
        Document::String(s) => serde_json::Value::String(s.clone()),
        Document::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(document_to_json).collect())
        }
        Document::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}
