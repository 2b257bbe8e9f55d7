//! Model value object representing a text model hosted on Bedrock

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text models the assistant can use for classification or generation (Value Object)
///
/// Known variants map to their Bedrock model identifiers. Anything else is
/// carried through verbatim as [`Model::Custom`], so inference profiles and
/// newly released models work without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Amazon Titan text models
    TitanTextLite,
    TitanTextExpress,
    TitanTextPremier,
    // Anthropic models
    ClaudeHaiku3,
    ClaudeHaiku35,
    ClaudeSonnet35,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the Bedrock model identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::TitanTextLite => "amazon.titan-text-lite-v1",
            Model::TitanTextExpress => "amazon.titan-text-express-v1",
            Model::TitanTextPremier => "amazon.titan-text-premier-v1:0",
            Model::ClaudeHaiku3 => "anthropic.claude-3-haiku-20240307-v1:0",
            Model::ClaudeHaiku35 => "anthropic.claude-3-5-haiku-20241022-v1:0",
            Model::ClaudeSonnet35 => "anthropic.claude-3-5-sonnet-20240620-v1:0",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is an Amazon Titan text model
    pub fn is_titan(&self) -> bool {
        match self {
            Model::TitanTextLite | Model::TitanTextExpress | Model::TitanTextPremier => true,
            Model::Custom(id) => strip_region_prefix(id).starts_with("amazon.titan-text"),
            _ => false,
        }
    }

    /// Check if this is an Anthropic Claude model
    pub fn is_claude(&self) -> bool {
        match self {
            Model::ClaudeHaiku3 | Model::ClaudeHaiku35 | Model::ClaudeSonnet35 => true,
            Model::Custom(id) => strip_region_prefix(id).starts_with("anthropic.claude"),
            _ => false,
        }
    }
}

/// Drop a cross-region inference profile prefix (`us.`, `eu.`, `apac.`...).
fn strip_region_prefix(id: &str) -> &str {
    match id.split_once('.') {
        Some((prefix, rest))
            if !prefix.is_empty()
                && prefix.len() <= 4
                && prefix.chars().all(|c| c.is_ascii_lowercase())
                && rest.contains('.') =>
        {
            rest
        }
        _ => id,
    }
}

impl Default for Model {
    /// Returns the default generation model (Titan Text Lite)
    fn default() -> Self {
        Model::TitanTextLite
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "amazon.titan-text-lite-v1" | "titan-text-lite" => Model::TitanTextLite,
            "amazon.titan-text-express-v1" | "titan-text-express" => Model::TitanTextExpress,
            "amazon.titan-text-premier-v1:0" | "titan-text-premier" => Model::TitanTextPremier,
            "anthropic.claude-3-haiku-20240307-v1:0" | "claude-3-haiku" => Model::ClaudeHaiku3,
            "anthropic.claude-3-5-haiku-20241022-v1:0" | "claude-3.5-haiku" => {
                Model::ClaudeHaiku35
            }
            "anthropic.claude-3-5-sonnet-20240620-v1:0" | "claude-3.5-sonnet" => {
                Model::ClaudeSonnet35
            }
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}
