//! Command execution context
//!
//! Bundles the loaded config, the store container, and the resolved output
//! format so command handlers share one initialization path.

use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::client::HttpBoardClient;
use crate::config::Config;
use crate::error::Result;
use crate::store::Stores;

/// Shared state for command execution
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Store container over the HTTP client
    pub stores: Stores<HttpBoardClient>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, apply overrides, and build the stores.
    ///
    /// Format resolution: explicit flag, then the config-file preference,
    /// then table.
    pub fn new(
        format: Option<OutputFormat>,
        base_url: Option<&str>,
        config_path: Option<&str>,
    ) -> Result<Self> {
        let mut config = Config::load_at(config_path)?;
        if let Some(base_url) = base_url {
            config.base_url = base_url.to_string();
        }

        let format = format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .map(OutputFormat::from_preference)
            })
            .unwrap_or(OutputFormat::Table);

        let client = Arc::new(HttpBoardClient::new(config.base_url.clone())?);
        let stores = Stores::new(client, config.cache_ttl());

        Ok(Self {
            config,
            stores,
            format,
        })
    }
}
