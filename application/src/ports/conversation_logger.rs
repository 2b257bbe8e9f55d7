//! Conversation transcript port.
//!
//! Every question leaves a trace here: what was retrieved and answered,
//! or why it was turned away. `tracing` keeps the diagnostics; this port
//! keeps the transcript.

use serde_json::Value;

/// What happened to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    QuestionRejected,
    ContextRetrieved,
    AnswerGenerated,
    PipelineFailed,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::QuestionRejected => "question_rejected",
            EventKind::ContextRetrieved => "context_retrieved",
            EventKind::AnswerGenerated => "answer_generated",
            EventKind::PipelineFailed => "pipeline_failed",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub kind: EventKind,
    /// Event fields; objects are flattened into the transcript record
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Sink for conversation events.
///
/// Synchronous and infallible: a transcript that can't be written never
/// changes the outcome of a question.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Used when no transcript is configured.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
