//! Role-based model configuration from TOML (`[models]` section)

use crate::providers::bedrock::model_family;
use kbchat_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Role-based model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// classifier = "amazon.titan-text-lite-v1"   # Topic classification
/// generator = "anthropic.claude-3-haiku-20240307-v1:0"  # Grounded answers
/// ```
///
/// Values are Bedrock model ids or inference profile ids. Short aliases
/// such as `titan-text-lite` are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model for topic classification
    pub classifier: String,
    /// Model for grounded answer generation
    pub generator: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            classifier: Model::TitanTextLite.to_string(),
            generator: Model::TitanTextLite.to_string(),
        }
    }
}

impl FileModelsConfig {
    /// Parse a single model string, collecting issues for empty or
    /// unsupported names.
    fn parse_single_model(field: &str, value: &str) -> (Option<Model>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if value.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingValue {
                    field: format!("models.{}", field),
                },
                format!("models.{}: model name cannot be empty", field),
            ));
            return (None, issues);
        }

        let Ok(model) = value.trim().parse::<Model>();
        if model_family(&model).is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnsupportedModel {
                    field: format!("models.{}", field),
                    model: model.to_string(),
                },
                format!(
                    "models.{}: '{}' is neither an Amazon Titan text model nor an Anthropic Claude model",
                    field, model
                ),
            ));
        }
        (Some(model), issues)
    }

    /// Parse classifier model string into Model enum
    pub fn parse_classifier(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("classifier", &self.classifier)
    }

    /// Parse generator model string into Model enum
    pub fn parse_generator(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        Self::parse_single_model("generator", &self.generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse_to_titan_lite() {
        let config = FileModelsConfig::default();
        let (model, issues) = config.parse_classifier();
        assert_eq!(model, Some(Model::TitanTextLite));
        assert!(issues.is_empty());
        assert_eq!(config.parse_generator().0, Some(Model::TitanTextLite));
    }

    #[test]
    fn test_alias_and_claude_model() {
        let config = FileModelsConfig {
            classifier: "titan-text-express".to_string(),
            generator: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
        };
        assert_eq!(config.parse_classifier().0, Some(Model::TitanTextExpress));
        assert_eq!(config.parse_generator().0, Some(Model::ClaudeHaiku3));
    }

    #[test]
    fn test_empty_model_is_error() {
        let config = FileModelsConfig {
            generator: "  ".to_string(),
            ..Default::default()
        };
        let (model, issues) = config.parse_generator();
        assert!(model.is_none());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("models.generator"));
    }

    #[test]
    fn test_unsupported_model_is_error() {
        let config = FileModelsConfig {
            classifier: "meta.llama3-8b-instruct-v1:0".to_string(),
            ..Default::default()
        };
        let (_, issues) = config.parse_classifier();
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::UnsupportedModel { ref field, .. } if field == "models.classifier"
        ));
    }
}
