//! Progress reporting for the question pipeline

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use kbchat_application::PipelineProgress;
use kbchat_domain::PipelineState;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner on stderr that follows a question through the pipeline
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, message: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(message.to_string());
        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(spinner) = self.spinner.lock()
            && let Some(pb) = spinner.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgress for ProgressReporter {
    fn on_state_change(&self, _from: PipelineState, to: PipelineState) {
        if to == PipelineState::Validating {
            self.start(to.display_name());
            return;
        }

        if to.is_terminal() {
            if let Ok(mut spinner) = self.spinner.lock()
                && let Some(pb) = spinner.take()
            {
                pb.finish_and_clear();
            }
            return;
        }

        self.with_spinner(|pb| pb.set_message(format!("{}...", to.display_name())));
    }

    fn on_chunks_retrieved(&self, count: usize) {
        self.with_spinner(|pb| pb.println(format!("  {} {} passage(s) retrieved", "v".green(), count)));
    }
}

/// Plain-text progress for non-interactive output (one line per step)
pub struct SimpleProgress;

impl PipelineProgress for SimpleProgress {
    fn on_state_change(&self, _from: PipelineState, to: PipelineState) {
        if to.calls_external_service() {
            eprintln!("{} {}", "->".cyan(), to.display_name());
        }
    }

    fn on_chunks_retrieved(&self, count: usize) {
        eprintln!("  {} {} passage(s) retrieved", "v".green(), count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_state_change(PipelineState::Idle, PipelineState::Validating);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_state_change(PipelineState::Validating, PipelineState::Retrieving);
        reporter.on_chunks_retrieved(3);
        reporter.on_state_change(PipelineState::Retrieving, PipelineState::Failed);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_updates_without_spinner_are_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_state_change(PipelineState::Assembling, PipelineState::Generating);
        reporter.on_chunks_retrieved(0);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
