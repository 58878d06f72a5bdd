//! Navigation manifest for the generated reference pages.
//!
//! The manifest is a YAML list of sections consumed by the site's sidebar:
//!
//! ```yaml
//! - title: Acme.dll
//!   api:
//!   - home
//!   - widget
//!   - color
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};
use crate::renderer::RenderedPage;

/// One sidebar section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    /// Entries in page order, the home entry first
    pub api: Vec<String>,
}

impl NavSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            api: Vec::new(),
        }
    }
}

/// Collects page entries in render order.
#[derive(Debug)]
pub struct NavigationBuilder {
    title: String,
    home_entry: Option<String>,
    entries: Vec<String>,
}

impl NavigationBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            home_entry: Some("home".to_string()),
            entries: Vec::new(),
        }
    }

    /// Entry listed before all pages; empty disables it.
    pub fn with_home_entry(mut self, home: &str) -> Self {
        self.home_entry = Some(home.to_string()).filter(|h| !h.is_empty());
        self
    }

    pub fn register_page(&mut self, page: &RenderedPage) {
        self.register_entry(&page.relative_name);
    }

    pub fn register_entry(&mut self, relative_name: &str) {
        self.entries.push(relative_name.to_string());
    }

    pub fn build(&self) -> Vec<NavSection> {
        let mut section = NavSection::new(self.title.clone());
        section.api.extend(self.home_entry.iter().cloned());
        section.api.extend(self.entries.iter().cloned());
        vec![section]
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.build())
            .map_err(|e| BuildError::Render(format!("navigation manifest: {}", e)))
    }
}
