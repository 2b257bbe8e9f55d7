//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use kbchat_application::{
    AskError, AskOutput, AskQuestionUseCase, NoPipelineProgress, PipelineProgress,
};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One line of user input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput<'a> {
    /// `exit` or `quit`, any case, surrounding whitespace ignored
    Exit,
    /// Blank or whitespace-only line
    Empty,
    /// Anything else, passed to the pipeline untouched
    Question(&'a str),
}

impl<'a> ReplInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            ReplInput::Empty
        } else if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            ReplInput::Exit
        } else {
            ReplInput::Question(line)
        }
    }
}

/// Interactive chat REPL
///
/// Reads one line per turn. Every failure is reported and the loop
/// continues; only `exit`/`quit` or end of input end the session.
pub struct ChatRepl {
    use_case: Arc<AskQuestionUseCase>,
    show_progress: bool,
    show_sources: bool,
    handle_interrupts: bool,
}

impl ChatRepl {
    pub fn new(use_case: Arc<AskQuestionUseCase>) -> Self {
        Self {
            use_case,
            show_progress: true,
            show_sources: true,
            handle_interrupts: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set whether to list source documents after each answer
    pub fn with_sources(mut self, show: bool) -> Self {
        self.show_sources = show;
        self
    }

    /// Set whether Ctrl-C cancels the in-flight question
    pub fn with_interrupt_handling(mut self, enabled: bool) -> Self {
        self.handle_interrupts = enabled;
        self
    }

    /// Run the REPL on stdin/stdout
    pub async fn run(&self) -> io::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.run_with(stdin, &mut io::stdout()).await
    }

    /// Run the REPL over arbitrary input and output
    pub async fn run_with<R, W>(&self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        self.print_welcome(out)?;

        loop {
            write!(out, "{} ", "You:".green().bold())?;
            out.flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = self.interrupted() => {
                    writeln!(out, "^C (type 'exit' to quit)")?;
                    continue;
                }
            };

            let Some(line) = line else {
                writeln!(out)?;
                writeln!(out, "Goodbye!")?;
                break;
            };

            match ReplInput::parse(&line) {
                ReplInput::Exit => {
                    writeln!(out, "Goodbye!")?;
                    break;
                }
                ReplInput::Empty => {
                    writeln!(out, "Please enter a non-empty question.")?;
                    writeln!(out)?;
                }
                ReplInput::Question(question) => self.process_question(question, out).await?,
            }
        }

        Ok(())
    }

    fn print_welcome<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("Chatbot ready! Ask about {}.", self.use_case.topic()).bold()
        )?;
        writeln!(out, "Type 'exit' or 'quit' to leave.")?;
        writeln!(out)
    }

    /// Resolves on Ctrl-C, or never when interrupt handling is off.
    async fn interrupted(&self) {
        if !self.handle_interrupts || tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    async fn process_question<W: Write>(&self, question: &str, out: &mut W) -> io::Result<()> {
        let token = CancellationToken::new();
        let watcher = self.handle_interrupts.then(|| {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    debug!("Interrupt received, cancelling question");
                    token.cancel();
                }
            })
        });

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.run_pipeline(question, &progress, &token).await
        } else {
            self.run_pipeline(question, &NoPipelineProgress, &token).await
        };

        if let Some(watcher) = watcher {
            watcher.abort();
        }

        writeln!(out)?;
        match result {
            Ok(output) => write!(
                out,
                "{}",
                ConsoleFormatter::format_answer(&output, self.show_sources)
            )?,
            Err(e) => writeln!(
                out,
                "{}",
                ConsoleFormatter::format_error(&e, self.use_case.topic())
            )?,
        }
        writeln!(out)?;
        writeln!(out, "{}", ConsoleFormatter::separator())?;
        writeln!(out)
    }

    async fn run_pipeline(
        &self,
        question: &str,
        progress: &dyn PipelineProgress,
        token: &CancellationToken,
    ) -> Result<AskOutput, AskError> {
        self.use_case
            .execute_with_progress(question, progress, Some(token))
            .await
    }
}
