//! Configuration file loading for debate-arena
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `DEBATE_*` (nested with `__`) and the provider key variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./debate.toml` or `./.debate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/debate-arena/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDebateConfig, FileDebaterConfig, FileDebatersConfig,
    FileJudgeConfig, FileLoggingConfig, FileProviderEndpoint, FileProvidersConfig,
};
pub use loader::ConfigLoader;
