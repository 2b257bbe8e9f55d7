//! Configuration file loading for kb-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `KBCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./kb-chat.toml` or `./.kb-chat.toml`
//! 4. Global: `~/.config/kb-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBedrockConfig, FileConfig, FileGenerationConfig, FileGuardConfig,
    FileIngestionConfig, FileKnowledgeBaseConfig, FileLoggingConfig, FileModelsConfig,
    FileProvidersConfig,
};
pub use loader::ConfigLoader;
