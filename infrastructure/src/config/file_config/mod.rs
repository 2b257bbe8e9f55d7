//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings
//! once validated.

mod generation;
mod guard;
mod ingestion;
mod knowledge_base;
mod logging;
mod models;
mod providers;

pub use generation::FileGenerationConfig;
pub use guard::FileGuardConfig;
pub use ingestion::FileIngestionConfig;
pub use knowledge_base::FileKnowledgeBaseConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use providers::{FileBedrockConfig, FileProvidersConfig};

use kbchat_application::config::{
    AssistantConfig, CallLimits, GuardSettings, IngestionSettings, KnowledgeBaseSettings,
};
use kbchat_domain::{ConfigIssue, ConfigIssueCode, DomainError, GenerationConfig, Model};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors converting file configuration into application settings
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{field} is not set")]
    MissingValue { field: String },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] DomainError),
}

/// Complete file configuration (raw TOML structure)
///
/// # Example
///
/// ```toml
/// [knowledge_base]
/// id = "YCXJT4XOV3"
///
/// [models]
/// generator = "anthropic.claude-3-haiku-20240307-v1:0"
///
/// [guard]
/// topic = "heavy machinery"
///
/// [providers.bedrock]
/// region = "us-west-2"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Knowledge base to query
    pub knowledge_base: FileKnowledgeBaseConfig,
    /// Role-based model selection
    pub models: FileModelsConfig,
    /// Answer generation parameters
    pub generation: FileGenerationConfig,
    /// Topic classification parameters
    pub classification: FileGenerationConfig,
    /// Prompt guard settings
    pub guard: FileGuardConfig,
    /// Provider settings (AWS region, profile, timeouts)
    pub providers: FileProvidersConfig,
    /// Source documents for `ingest`
    pub ingestion: FileIngestionConfig,
    /// Conversation transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The knowledge base id and `top_k`
    /// 2. Model names and whether Bedrock can serve them
    /// 3. Generation parameter ranges for both models
    /// 4. Guard, region and timeout settings
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Knowledge base
        if self.knowledge_base.id.trim().is_empty() {
            issues.push(missing(
                "knowledge_base.id",
                "knowledge_base.id: knowledge base id is required",
            ));
        }
        if self.knowledge_base.top_k == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "knowledge_base.top_k".to_string(),
                    value: "0".to_string(),
                },
                "knowledge_base.top_k: must be at least 1",
            ));
        }

        // 2. Models
        issues.extend(self.models.parse_classifier().1);
        issues.extend(self.models.parse_generator().1);

        // 3. Generation parameters
        issues.extend(self.generation.validate("generation"));
        issues.extend(self.classification.validate("classification"));

        // 4. Guard and provider
        if self.guard.topic.trim().is_empty() {
            issues.push(missing("guard.topic", "guard.topic: topic label cannot be empty"));
        }
        if self.providers.bedrock.region.trim().is_empty() {
            issues.push(missing(
                "providers.bedrock.region",
                "providers.bedrock.region: AWS region is required",
            ));
        }
        if self.providers.bedrock.timeout_secs == Some(0) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "providers.bedrock.timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "providers.bedrock.timeout_secs: 0 disables the per-call timeout",
            ));
        }

        issues
    }

    /// Build the question pipeline settings.
    ///
    /// Call [`validate`](Self::validate) first for a full list of problems;
    /// this stops at the first one.
    pub fn to_assistant_config(&self) -> Result<AssistantConfig, ConfigValidationError> {
        let knowledge_base =
            KnowledgeBaseSettings::new(self.knowledge_base.id.trim(), self.knowledge_base.top_k)?;

        let classifier = self.classification.to_generation_config(
            parse_model(&self.models.classifier),
            &GenerationConfig::classifier_defaults(),
        )?;
        let answer = self.generation.to_generation_config(
            parse_model(&self.models.generator),
            &GenerationConfig::answer_defaults(),
        )?;

        let guard = GuardSettings {
            classify: self.guard.classify,
            topic: self.guard.topic.trim().to_string(),
            classifier,
        };

        Ok(AssistantConfig::new(knowledge_base)
            .with_guard(guard)
            .with_answer_config(answer)
            .with_limits(CallLimits::from_timeout_seconds(
                self.providers.bedrock.timeout_secs,
            )))
    }

    /// Build the ingestion settings. Bucket, knowledge base id and data
    /// source id are required here but not for chatting.
    pub fn to_ingestion_settings(&self) -> Result<IngestionSettings, ConfigValidationError> {
        let required = |field: &str, value: &str| {
            if value.trim().is_empty() {
                Err(ConfigValidationError::MissingValue {
                    field: field.to_string(),
                })
            } else {
                Ok(value.trim().to_string())
            }
        };

        Ok(IngestionSettings {
            knowledge_base_id: required("knowledge_base.id", &self.knowledge_base.id)?,
            data_source_id: required(
                "knowledge_base.data_source_id",
                &self.knowledge_base.data_source_id,
            )?,
            bucket: required("ingestion.bucket", &self.ingestion.bucket)?,
            prefix: self.ingestion.prefix.clone(),
            extension: self.ingestion.extension.trim_start_matches('.').to_string(),
        })
    }
}

fn missing(field: &str, message: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::MissingValue {
            field: field.to_string(),
        },
        message,
    )
}

fn parse_model(name: &str) -> Model {
    let Ok(model) = name.trim().parse::<Model>();
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn valid_config() -> FileConfig {
        let mut config = FileConfig::default();
        config.knowledge_base.id = "YCXJT4XOV3".to_string();
        config
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[knowledge_base]
id = "YCXJT4XOV3"
data_source_id = "s3"
top_k = 5

[models]
classifier = "titan-text-lite"
generator = "anthropic.claude-3-haiku-20240307-v1:0"

[generation]
max_output_tokens = 1024
temperature = 0.3
top_p = 0.8

[classification]
max_output_tokens = 8

[guard]
classify = false
topic = "construction equipment"

[providers.bedrock]
region = "eu-central-1"
profile = "machinery"
timeout_secs = 30

[ingestion]
bucket = "bedrock-kb-255401567831"

[logging]
conversation_log = "/tmp/kb-chat.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.knowledge_base.top_k, 5);
        assert_eq!(config.generation.max_output_tokens, Some(1024));
        assert_eq!(config.classification.max_output_tokens, Some(8));
        assert!(config.classification.temperature.is_none());
        assert!(!config.guard.classify);
        assert_eq!(config.providers.bedrock.profile.as_deref(), Some("machinery"));
        assert_eq!(config.ingestion.prefix, "spec-sheets/");
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("/tmp/kb-chat.jsonl"))
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.knowledge_base.top_k, 3);
        assert_eq!(config.classification, FileGenerationConfig::default());
        assert!(config.guard.classify);
        assert_eq!(config.guard.topic, "heavy machinery");
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_validate_requires_knowledge_base_id() {
        let issues = FileConfig::default().validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::MissingValue {
                field: "knowledge_base.id".to_string()
            }
        );
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(valid_config().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut config = valid_config();
        config.knowledge_base.top_k = 0;
        config.models.generator = String::new();
        config.generation.temperature = Some(2.0);
        config.guard.topic = " ".to_string();

        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().all(|i| i.is_error()));
    }

    #[test]
    fn test_zero_timeout_is_warning() {
        let mut config = valid_config();
        config.providers.bedrock.timeout_secs = Some(0);
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_to_assistant_config() {
        let mut config = valid_config();
        config.models.generator = "claude-3-haiku".to_string();
        config.guard.classify = false;
        config.providers.bedrock.timeout_secs = Some(15);

        let assistant = config.to_assistant_config().unwrap();
        assert_eq!(assistant.knowledge_base.id(), "YCXJT4XOV3");
        assert_eq!(assistant.knowledge_base.top_k(), 3);
        assert_eq!(assistant.answer.model(), &Model::ClaudeHaiku3);
        assert_eq!(assistant.answer.max_output_tokens(), 512);
        assert_eq!(assistant.guard.classifier, GenerationConfig::classifier_defaults());
        assert!(!assistant.guard.classify);
        assert_eq!(assistant.limits.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_to_assistant_config_rejects_invalid() {
        let mut config = valid_config();
        config.generation.top_p = Some(3.0);
        assert!(matches!(
            config.to_assistant_config(),
            Err(ConfigValidationError::Invalid(_))
        ));
        assert!(FileConfig::default().to_assistant_config().is_err());
    }

    #[test]
    fn test_to_ingestion_settings() {
        let mut config = valid_config();
        config.knowledge_base.data_source_id = "s3".to_string();
        config.ingestion.bucket = "bedrock-kb-255401567831".to_string();
        config.ingestion.extension = ".pdf".to_string();

        let settings = config.to_ingestion_settings().unwrap();
        assert_eq!(settings.data_source_id, "s3");
        assert_eq!(settings.prefix, "spec-sheets/");
        assert_eq!(settings.extension, "pdf");
    }

    #[test]
    fn test_to_ingestion_settings_requires_bucket() {
        let mut config = valid_config();
        config.knowledge_base.data_source_id = "s3".to_string();
        let err = config.to_ingestion_settings().unwrap_err();
        assert_eq!(err.to_string(), "ingestion.bucket is not set");
    }
}
