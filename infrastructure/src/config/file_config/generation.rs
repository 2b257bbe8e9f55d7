//! Model parameter configuration from TOML
//!
//! Used for both the `[generation]` (answer) and `[classification]`
//! sections. Unset fields fall back to the defaults of the role the
//! section configures.

use kbchat_domain::{ConfigIssue, ConfigIssueCode, DomainError, GenerationConfig, Model};
use serde::{Deserialize, Serialize};

/// ```toml
/// [generation]
/// max_output_tokens = 512
/// temperature = 0.2
/// top_p = 0.9
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

impl FileGenerationConfig {
    /// Effective `(max_output_tokens, temperature, top_p)` over `defaults`.
    pub fn resolve(&self, defaults: &GenerationConfig) -> (u32, f32, f32) {
        (
            self.max_output_tokens
                .unwrap_or(defaults.max_output_tokens()),
            self.temperature.unwrap_or(defaults.temperature()),
            self.top_p.unwrap_or(defaults.top_p()),
        )
    }

    /// Build a validated config for `model`.
    pub fn to_generation_config(
        &self,
        model: Model,
        defaults: &GenerationConfig,
    ) -> Result<GenerationConfig, DomainError> {
        let (max_output_tokens, temperature, top_p) = self.resolve(defaults);
        GenerationConfig::new(model, max_output_tokens, temperature, top_p)
    }

    /// Range checks, reported per field under `section`.
    pub fn validate(&self, section: &str) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_output_tokens == Some(0) {
            issues.push(out_of_range(
                section,
                "max_output_tokens",
                "0".to_string(),
                "must be greater than 0",
            ));
        }
        for (field, value) in [("temperature", self.temperature), ("top_p", self.top_p)] {
            if let Some(value) = value
                && !(0.0..=1.0).contains(&value)
            {
                issues.push(out_of_range(
                    section,
                    field,
                    value.to_string(),
                    "must be between 0 and 1",
                ));
            }
        }
        issues
    }
}

fn out_of_range(section: &str, field: &str, value: String, rule: &str) -> ConfigIssue {
    let field = format!("{}.{}", section, field);
    let message = format!("{}: {} (got {})", field, rule, value);
    ConfigIssue::error(ConfigIssueCode::OutOfRange { field, value }, message)
}
