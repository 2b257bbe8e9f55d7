//! Pipeline states and legal transitions

use serde::{Deserialize, Serialize};

/// State of a single question moving through the pipeline
///
/// ```text
/// Idle → Validating → Classifying → Retrieving → Assembling → Generating → Done
///            │             │             │                        │
///            └──► Rejected ◄┘             └────────► Failed ◄──────┘
/// ```
///
/// A classifier outage during `Classifying` is reported as `Rejected`, not
/// `Failed`; only a cancelled classification call ends in `Failed`. With
/// topic classification disabled, `Validating` moves straight to
/// `Retrieving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineState {
    Idle,
    Validating,
    Classifying,
    Retrieving,
    Assembling,
    Generating,
    Done,
    Rejected,
    Failed,
}

impl PipelineState {
    pub fn as_str(&self) -> &str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::Validating => "validating",
            PipelineState::Classifying => "classifying",
            PipelineState::Retrieving => "retrieving",
            PipelineState::Assembling => "assembling",
            PipelineState::Generating => "generating",
            PipelineState::Done => "done",
            PipelineState::Rejected => "rejected",
            PipelineState::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Validating => "Validating question",
            PipelineState::Classifying => "Checking topic",
            PipelineState::Retrieving => "Searching knowledge base",
            PipelineState::Assembling => "Assembling context",
            PipelineState::Generating => "Generating answer",
            PipelineState::Done => "Done",
            PipelineState::Rejected => "Rejected",
            PipelineState::Failed => "Failed",
        }
    }

    /// Terminal states end the question
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::Done | PipelineState::Rejected | PipelineState::Failed
        )
    }

    /// States whose work is an external service call
    pub fn calls_external_service(&self) -> bool {
        matches!(
            self,
            PipelineState::Classifying | PipelineState::Retrieving | PipelineState::Generating
        )
    }

    /// Check whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Classifying)
                | (Validating, Retrieving)
                | (Validating, Rejected)
                | (Classifying, Retrieving)
                | (Classifying, Rejected)
                | (Classifying, Failed)
                | (Retrieving, Assembling)
                | (Retrieving, Failed)
                | (Assembling, Generating)
                | (Generating, Done)
                | (Generating, Failed)
        )
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
