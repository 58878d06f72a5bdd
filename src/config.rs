//! Build configuration.
//!
//! Settings come from, in increasing priority: built-in defaults, an optional
//! configuration file (YAML, JSON or TOML), `REFDOC_*` environment variables,
//! and finally command line flags applied by the binary.

use std::path::Path;

use ::config::{Config, Environment, File};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::canonical::Canonicalizer;
use crate::error::{BuildError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Assembly name shown in page headers and as navigation title.
    /// Defaults to the name reported by the type surface.
    pub assembly_label: Option<String>,
    /// Base URL of the reference pages
    pub api_base_url: String,
    /// First navigation entry; empty disables it
    pub home_entry: String,
    pub page_extension: String,
    /// Remove stale top-level files from the output folder before writing
    pub clean_output: bool,
    /// Build types on the rayon thread pool
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            assembly_label: None,
            api_base_url: "/api/".to_string(),
            home_entry: "home".to_string(),
            page_extension: "md".to_string(),
            clean_output: true,
            parallel: false,
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load layered settings. A missing `path` is an error, `None` skips the file layer.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix("REFDOC").try_parsing(true));

        let settings = builder
            .build()
            .map_err(|e| BuildError::Config(e.to_string()))?;
        let config: BuildConfig = settings
            .try_deserialize()
            .map_err(|e| BuildError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_extension.trim_start_matches('.').is_empty() {
            return Err(BuildError::Config("page_extension must not be empty".to_string()));
        }
        if !self.api_base_url.starts_with('/') && !self.api_base_url.contains("://") {
            return Err(BuildError::Config(format!(
                "api_base_url '{}' must be absolute",
                self.api_base_url
            )));
        }
        Ok(())
    }

    /// Canonicalizer honoring the URL and page settings.
    pub fn canonicalizer(&self) -> Canonicalizer {
        Canonicalizer::new()
            .with_api_base_url(&self.api_base_url)
            .with_page_extension(&self.page_extension)
    }
}
