//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for kb-chat
#[derive(Parser, Debug)]
#[command(name = "kb-chat")]
#[command(author, version, about = "Knowledge base chat - grounded answers from your documents")]
#[command(long_about = r#"
kb-chat answers questions from a Bedrock knowledge base.

Each question goes through three steps:
1. Guard: empty input is refused and a classifier model checks the topic
2. Retrieval: the top passages are fetched from the knowledge base
3. Answer: a text model answers from those passages only

Configuration files are loaded from (in priority order):
1. KBCHAT_* environment variables (e.g. KBCHAT_KNOWLEDGE_BASE__ID)
2. --config <path>      Explicit config file
3. ./kb-chat.toml       Project-level config
4. ~/.config/kb-chat/config.toml   Global config

Example:
  kb-chat
  kb-chat ask "What is the bucket capacity of the X200 excavator?"
  kb-chat ingest --list
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive chat session (default)
    Chat,

    /// Ask a single question and exit
    Ask {
        /// The question to ask
        question: String,

        /// Don't list the source documents after the answer
        #[arg(long)]
        no_sources: bool,
    },

    /// List source documents and start a knowledge base ingestion job
    Ingest {
        /// Include every object under the prefix, not just the configured extension
        #[arg(long)]
        all: bool,

        /// Only list the documents; don't start a job
        #[arg(long)]
        list: bool,
    },

    /// Show configuration sources and the effective configuration
    Config,
}

impl Cli {
    /// The subcommand to run; no subcommand means chat.
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}
