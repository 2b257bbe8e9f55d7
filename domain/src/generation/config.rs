//! Generation configuration value object

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Parameters for a single model invocation (Value Object)
///
/// Built per call from configuration and never mutated afterwards.
/// Construction through [`GenerationConfig::new`] enforces the ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    model: Model,
    max_output_tokens: u32,
    temperature: f32,
    top_p: f32,
}

impl GenerationConfig {
    /// Create a validated configuration.
    ///
    /// `temperature` and `top_p` must lie in `[0, 1]` and
    /// `max_output_tokens` must be positive.
    pub fn new(
        model: Model,
        max_output_tokens: u32,
        temperature: f32,
        top_p: f32,
    ) -> Result<Self, DomainError> {
        if max_output_tokens == 0 {
            return Err(DomainError::InvalidGenerationConfig(
                "max_output_tokens must be greater than 0".to_string(),
            ));
        }
        check_unit_range("temperature", temperature)?;
        check_unit_range("top_p", top_p)?;

        Ok(Self {
            model,
            max_output_tokens,
            temperature,
            top_p,
        })
    }

    /// Defaults for grounded answer generation
    pub fn answer_defaults() -> Self {
        Self {
            model: Model::TitanTextLite,
            max_output_tokens: 512,
            temperature: 0.2,
            top_p: 0.9,
        }
    }

    /// Defaults for intent classification: short and deterministic
    pub fn classifier_defaults() -> Self {
        Self {
            model: Model::TitanTextLite,
            max_output_tokens: 16,
            temperature: 0.0,
            top_p: 0.1,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn top_p(&self) -> f32 {
        self.top_p
    }
}

fn check_unit_range(field: &str, value: f32) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::InvalidGenerationConfig(format!(
            "{field} {value} outside [0, 1]"
        )))
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::answer_defaults()
    }
}
