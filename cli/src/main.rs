//! CLI entrypoint for kb-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use kbchat_application::{
    AskQuestionUseCase, IngestDocumentsInput, IngestDocumentsUseCase, NoPipelineProgress,
};
use kbchat_infrastructure::{
    BedrockKnowledgeBase, BedrockLlmGateway, ConfigLoader, FileConfig, JsonlConversationLogger,
    S3BedrockIngestor, load_sdk_config,
};
use kbchat_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting kb-chat");

    // === Configuration ===
    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let command = cli.command_or_default();
    if command == Command::Config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("{}", toml::to_string_pretty(&config)?);

        let issues = config.validate();
        if issues.is_empty() {
            println!("Configuration is valid.");
        }
        for issue in &issues {
            let label = if issue.is_error() { "error" } else { "warning" };
            println!("{}: {}", label, issue.message);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut has_errors = false;
    for issue in config.validate() {
        if issue.is_error() {
            error!("{}", issue.message);
            has_errors = true;
        } else {
            warn!("{}", issue.message);
        }
    }
    if has_errors {
        bail!("Invalid configuration (run `kb-chat config` to inspect it)");
    }

    // === Dependency Injection ===
    let bedrock = &config.providers.bedrock;
    let sdk_config = load_sdk_config(&bedrock.region, bedrock.profile.as_deref()).await;

    match command {
        Command::Ingest { all, list } => run_ingest(&config, &sdk_config, all, list).await,
        Command::Ask {
            question,
            no_sources,
        } => {
            let use_case = build_ask_use_case(&config, &sdk_config)?;
            run_ask(&use_case, &question, !no_sources, cli.quiet).await
        }
        Command::Chat | Command::Config => {
            let use_case = Arc::new(build_ask_use_case(&config, &sdk_config)?);
            let repl = ChatRepl::new(use_case).with_progress(!cli.quiet);
            repl.run().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_ask_use_case(
    config: &FileConfig,
    sdk_config: &aws_config::SdkConfig,
) -> Result<AskQuestionUseCase> {
    let assistant = config.to_assistant_config()?;
    let gateway = Arc::new(BedrockLlmGateway::new(sdk_config));
    let knowledge_base = Arc::new(BedrockKnowledgeBase::new(sdk_config));

    let mut use_case = AskQuestionUseCase::new(gateway, knowledge_base, assistant);
    if let Some(path) = &config.logging.conversation_log {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Conversation log: {}", logger.path().display());
                use_case = use_case.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation log disabled: cannot open {}", path.display()),
        }
    }
    Ok(use_case)
}

async fn run_ask(
    use_case: &AskQuestionUseCase,
    question: &str,
    show_sources: bool,
    quiet: bool,
) -> Result<ExitCode> {
    let token = CancellationToken::new();
    let watcher = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        })
    };

    let result = if quiet {
        use_case
            .execute_with_progress(question, &NoPipelineProgress, Some(&token))
            .await
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case
            .execute_with_progress(question, &progress, Some(&token))
            .await
    } else {
        use_case
            .execute_with_progress(question, &SimpleProgress, Some(&token))
            .await
    };
    watcher.abort();

    match result {
        Ok(output) => {
            print!("{}", ConsoleFormatter::format_answer(&output, show_sources));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e, use_case.topic()));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_ingest(
    config: &FileConfig,
    sdk_config: &aws_config::SdkConfig,
    all_files: bool,
    list_only: bool,
) -> Result<ExitCode> {
    let settings = config.to_ingestion_settings()?;
    let ingestor = Arc::new(S3BedrockIngestor::new(sdk_config));
    let use_case = IngestDocumentsUseCase::new(ingestor, settings);

    let output = use_case
        .execute(IngestDocumentsInput {
            all_files,
            list_only,
        })
        .await?;

    print!("{}", ConsoleFormatter::format_ingest(&output));
    Ok(ExitCode::SUCCESS)
}
