use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tool settings merged from CLI args, env vars, and defaults.
///
/// Site configuration itself is not part of this cascade: the site file is
/// loaded all-or-nothing by docpress-core with unknown fields rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocpressConfig {
    /// Build configuration
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Site configuration file path
    pub config: String,
    /// Docs source directory containing markdown files
    pub source: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            config: "./docpress.toml".to_string(),
            source: "./docs".to_string(),
        }
    }
}

impl Default for DocpressConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
        }
    }
}

impl DocpressConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (DOCPRESS_*)
    /// 3. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add environment variables with DOCPRESS_ prefix
        builder = builder.add_source(
            Environment::with_prefix("DOCPRESS")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // 3. Override with CLI arguments (highest priority)
        let mut cli_overrides = HashMap::new();

        if let Some(path) = args.get_one::<String>("config") {
            cli_overrides.insert("build.config".to_string(), path.clone());
        }
        if let Some(dir) = args.get_one::<String>("source") {
            cli_overrides.insert("build.source".to_string(), dir.clone());
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
        }

        // Build and deserialize
        let merged = builder.build()?;
        let settings: DocpressConfig = merged.try_deserialize()?;

        Ok(settings)
    }

    /// Get the build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}
