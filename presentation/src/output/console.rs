//! Console output formatter for answers, refusals and ingestion results

use colored::Colorize;
use kbchat_application::{AskError, AskOutput, IngestDocumentsOutput};

const SEPARATOR_WIDTH: usize = 60;

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an answer, optionally followed by its source documents
    pub fn format_answer(output: &AskOutput, show_sources: bool) -> String {
        let mut text = format!("{} {}\n", "Assistant:".cyan().bold(), output.answer);

        if show_sources && !output.sources.is_empty() {
            text.push_str(&format!("\n{}\n", "Sources:".dimmed()));
            for source in &output.sources {
                text.push_str(&format!("  {} {}\n", "-".dimmed(), source.dimmed()));
            }
        }
        text
    }

    /// User-facing message for a question that produced no answer.
    ///
    /// Rejections never reveal the classifier's category, and service
    /// failures never show the underlying error; both are in the logs.
    pub fn format_error(error: &AskError, topic: &str) -> String {
        match error {
            AskError::EmptyQuestion => "Please enter a non-empty question.".yellow().to_string(),
            AskError::UnauthorizedTopic(_) => {
                format!("I can only help with questions about {}.", topic)
                    .yellow()
                    .to_string()
            }
            e if e.is_cancelled() => "Cancelled.".yellow().to_string(),
            AskError::Classification(_) | AskError::Retrieval(_) | AskError::Generation(_) => {
                format!(
                    "{} Something went wrong while answering. Please try again.",
                    "[ERROR]".red().bold()
                )
            }
        }
    }

    /// Format the result of an ingestion run
    pub fn format_ingest(output: &IngestDocumentsOutput) -> String {
        let mut text = format!(
            "{} Found {} document(s):\n",
            "v".green(),
            output.documents.len()
        );
        for document in &output.documents {
            text.push_str(&format!("  - {}\n", document));
        }

        match &output.job {
            Some(job) => {
                text.push_str(&format!(
                    "\n{} Ingestion started. Job ID: {} ({})\n",
                    "->".cyan(),
                    job.id.bold(),
                    job.status
                ));
                text.push_str("Embeddings take a few minutes to become searchable.\n");
            }
            None => text.push_str("\nListing only; no ingestion job started.\n"),
        }
        text
    }

    /// Horizontal rule between turns
    pub fn separator() -> String {
        "-".repeat(SEPARATOR_WIDTH).dimmed().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbchat_application::{GatewayError, IngestionJob};
    use kbchat_domain::{Answer, IntentCategory, RejectionReason};

    fn plain() {
        colored::control::set_override(false);
    }

    fn output() -> AskOutput {
        AskOutput {
            answer: Answer::new("The X200 delivers 450Nm."),
            context_passages: 2,
            sources: vec!["s3://docs/spec-sheets/x200.pdf".to_string()],
        }
    }

    #[test]
    fn test_format_answer_with_sources() {
        plain();
        let text = ConsoleFormatter::format_answer(&output(), true);
        assert!(text.starts_with("Assistant: The X200 delivers 450Nm."));
        assert!(text.contains("s3://docs/spec-sheets/x200.pdf"));
    }

    #[test]
    fn test_format_answer_without_sources() {
        plain();
        let text = ConsoleFormatter::format_answer(&output(), false);
        assert!(!text.contains("Sources:"));
    }

    #[test]
    fn test_rejection_does_not_reveal_category() {
        plain();
        let error =
            AskError::UnauthorizedTopic(RejectionReason::Category(IntentCategory::ModelMeta));
        let text = ConsoleFormatter::format_error(&error, "heavy machinery");
        assert_eq!(text, "I can only help with questions about heavy machinery.");
        assert!(!text.contains("Category"));
    }

    #[test]
    fn test_failure_is_generic() {
        plain();
        let error = AskError::Generation(GatewayError::MalformedResponse(
            "missing results[0].outputText".to_string(),
        ));
        let text = ConsoleFormatter::format_error(&error, "heavy machinery");
        assert!(text.contains("Something went wrong"));
        assert!(!text.contains("outputText"));
    }

    #[test]
    fn test_cancelled_message() {
        plain();
        for error in [
            AskError::Classification(GatewayError::Cancelled),
            AskError::Retrieval(GatewayError::Cancelled),
            AskError::Generation(GatewayError::Cancelled),
        ] {
            assert_eq!(
                ConsoleFormatter::format_error(&error, "heavy machinery"),
                "Cancelled."
            );
        }
    }

    #[test]
    fn test_classifier_outage_reads_as_refusal() {
        plain();
        let error = AskError::UnauthorizedTopic(RejectionReason::ServiceUnavailable(
            GatewayError::Timeout,
        ));
        assert_eq!(
            ConsoleFormatter::format_error(&error, "heavy machinery"),
            "I can only help with questions about heavy machinery."
        );
    }

    #[test]
    fn test_format_ingest() {
        plain();
        let text = ConsoleFormatter::format_ingest(&IngestDocumentsOutput {
            documents: vec!["spec-sheets/x200.pdf".to_string()],
            job: Some(IngestionJob {
                id: "JOB123".to_string(),
                status: "STARTING".to_string(),
            }),
        });
        assert!(text.contains("Found 1 document(s)"));
        assert!(text.contains("Job ID: JOB123"));
    }
}
