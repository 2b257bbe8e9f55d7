//! Pipeline progress port
//!
//! Lets the presentation layer follow a question through the pipeline.

use kbchat_domain::PipelineState;

/// Callback for pipeline state changes
pub trait PipelineProgress: Send + Sync {
    /// Called on every state transition
    fn on_state_change(&self, from: PipelineState, to: PipelineState);

    /// Called after retrieval with the number of passages returned
    fn on_chunks_retrieved(&self, _count: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoPipelineProgress;

impl PipelineProgress for NoPipelineProgress {
    fn on_state_change(&self, _from: PipelineState, _to: PipelineState) {}
}
