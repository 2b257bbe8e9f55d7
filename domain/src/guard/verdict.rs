//! Classification verdicts and guard decisions

use crate::core::gateway_error::GatewayError;
use serde::{Deserialize, Serialize};

/// Intent categories the classifier chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentCategory {
    /// Questions about the model, its architecture or how it works
    ModelMeta,
    /// Profane or toxic content
    Toxic,
    /// Content unrelated to the supported domain
    OffTopic,
    /// Requests for the assistant's internal instructions
    InstructionProbe,
    /// On-topic domain questions
    OnTopic,
}

impl IntentCategory {
    pub const ALL: [IntentCategory; 5] = [
        IntentCategory::ModelMeta,
        IntentCategory::Toxic,
        IntentCategory::OffTopic,
        IntentCategory::InstructionProbe,
        IntentCategory::OnTopic,
    ];

    /// Single-letter label used in the classification template
    pub fn letter(&self) -> char {
        match self {
            IntentCategory::ModelMeta => 'A',
            IntentCategory::Toxic => 'B',
            IntentCategory::OffTopic => 'C',
            IntentCategory::InstructionProbe => 'D',
            IntentCategory::OnTopic => 'E',
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IntentCategory::ModelMeta => "model_meta",
            IntentCategory::Toxic => "toxic",
            IntentCategory::OffTopic => "off_topic",
            IntentCategory::InstructionProbe => "instruction_probe",
            IntentCategory::OnTopic => "on_topic",
        }
    }

    /// Full label the classifier is asked to return, e.g. `Category E`
    pub fn label(&self) -> String {
        format!("Category {}", self.letter())
    }

    fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.letter().eq_ignore_ascii_case(&letter))
    }
}

impl std::fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed classifier output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationVerdict {
    /// Output was exactly one category label
    Category(IntentCategory),
    /// Output did not match any label; carries the raw text for logging
    Unrecognized(String),
}

impl ClassificationVerdict {
    /// Parse raw classifier output.
    ///
    /// The whole output, trimmed and compared case-insensitively, must be
    /// `category <letter>`. Anything longer, shorter or decorated is
    /// [`ClassificationVerdict::Unrecognized`].
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        let category = normalized
            .strip_prefix("category ")
            .and_then(|rest| {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) => Some(letter),
                    _ => None,
                }
            })
            .and_then(IntentCategory::from_letter);

        match category {
            Some(category) => ClassificationVerdict::Category(category),
            None => ClassificationVerdict::Unrecognized(raw.to_string()),
        }
    }

    /// Only an explicit on-topic verdict authorizes the pipeline
    pub fn is_authorized(&self) -> bool {
        matches!(
            self,
            ClassificationVerdict::Category(IntentCategory::OnTopic)
        )
    }
}

/// Why the guard refused a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Input was empty or whitespace-only
    EmptyInput,
    /// Classifier placed the question in a non-authorized category
    Category(IntentCategory),
    /// Classifier output could not be parsed
    UnrecognizedVerdict(String),
    /// Classification call failed; the guard fails closed
    ServiceUnavailable(GatewayError),
}

impl RejectionReason {
    pub fn as_str(&self) -> &str {
        match self {
            RejectionReason::EmptyInput => "empty_input",
            RejectionReason::Category(_) => "unauthorized_category",
            RejectionReason::UnrecognizedVerdict(_) => "unrecognized_verdict",
            RejectionReason::ServiceUnavailable(_) => "classifier_unavailable",
        }
    }
}

impl RejectionReason {
    /// The failed classification call, if that is why the question was refused
    pub fn service_error(&self) -> Option<&GatewayError> {
        match self {
            RejectionReason::ServiceUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::EmptyInput => write!(f, "question is empty"),
            RejectionReason::Category(category) => {
                write!(f, "classified as {}", category)
            }
            RejectionReason::UnrecognizedVerdict(raw) => {
                write!(f, "unrecognized classifier output: {:?}", raw)
            }
            RejectionReason::ServiceUnavailable(cause) => {
                write!(f, "classifier unavailable: {}", cause)
            }
        }
    }
}

/// Outcome of running a question through the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Authorized,
    Rejected(RejectionReason),
}

impl GuardDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, GuardDecision::Authorized)
    }
}

impl From<ClassificationVerdict> for GuardDecision {
    fn from(verdict: ClassificationVerdict) -> Self {
        match verdict {
            ClassificationVerdict::Category(IntentCategory::OnTopic) => GuardDecision::Authorized,
            ClassificationVerdict::Category(category) => {
                GuardDecision::Rejected(RejectionReason::Category(category))
            }
            ClassificationVerdict::Unrecognized(raw) => {
                GuardDecision::Rejected(RejectionReason::UnrecognizedVerdict(raw))
            }
        }
    }
}
