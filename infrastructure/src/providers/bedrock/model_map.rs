//! Bedrock model family mapping
//!
//! `InvokeModel` takes a provider-specific JSON body, so every model must
//! be mapped to the family whose request and response shape it speaks.

use kbchat_domain::Model;

/// Request/response body format of a Bedrock-hosted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Amazon Titan text (`inputText` / `results[0].outputText`)
    Titan,
    /// Anthropic messages API (`messages` / `content[0].text`)
    Anthropic,
}

/// Body format for `model`.
///
/// Returns `None` for models whose family can't be inferred from the id
/// (e.g. a custom id from another provider).
pub fn model_family(model: &Model) -> Option<ModelFamily> {
    if model.is_titan() {
        Some(ModelFamily::Titan)
    } else if model.is_claude() {
        Some(ModelFamily::Anthropic)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titan_models() {
        assert_eq!(model_family(&Model::TitanTextLite), Some(ModelFamily::Titan));
        assert_eq!(model_family(&Model::TitanTextPremier), Some(ModelFamily::Titan));
    }

    #[test]
    fn test_claude_models() {
        assert_eq!(model_family(&Model::ClaudeHaiku3), Some(ModelFamily::Anthropic));
        assert_eq!(model_family(&Model::ClaudeSonnet35), Some(ModelFamily::Anthropic));
    }

    #[test]
    fn test_custom_inference_profile() {
        let model = Model::Custom("us.anthropic.claude-3-7-sonnet-20250219-v1:0".to_string());
        assert_eq!(model_family(&model), Some(ModelFamily::Anthropic));
    }

    #[test]
    fn test_unknown_custom_model() {
        let model = Model::Custom("meta.llama3-8b-instruct-v1:0".to_string());
        assert_eq!(model_family(&model), None);
    }
}
