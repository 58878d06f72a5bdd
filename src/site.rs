//! Writes rendered pages and the navigation manifest to disk.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::navigation::NavigationBuilder;
use crate::renderer::RenderedPage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteStats {
    pub pages_written: usize,
    pub files_removed: usize,
    /// Pages whose file name was already written in this run
    pub pages_overwritten: usize,
}

/// Output folder for reference pages plus the navigation manifest path.
pub struct SiteWriter {
    output_dir: PathBuf,
    navigation_path: PathBuf,
    clean_output: bool,
}

impl SiteWriter {
    pub fn new(output_dir: impl Into<PathBuf>, navigation_path: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            navigation_path: navigation_path.into(),
            clean_output: true,
        }
    }

    pub fn with_clean_output(mut self, clean: bool) -> Self {
        self.clean_output = clean;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create or clean the output folder, write every page, then the manifest.
    pub fn write(&self, pages: &[RenderedPage], navigation: &NavigationBuilder) -> Result<SiteStats> {
        let mut stats = SiteStats::default();

        if self.output_dir.exists() {
            if self.clean_output {
                stats.files_removed = self.clean()?;
            }
        } else {
            fs::create_dir_all(&self.output_dir)?;
        }

        let mut written = HashSet::new();
        for page in pages {
            let path = self.output_dir.join(&page.file_name);
            if !written.insert(page.file_name.as_str()) {
                warn!(
                    "Page {} is written more than once, the earlier type's page is replaced",
                    page.file_name
                );
                stats.pages_overwritten += 1;
            }
            debug!("Writing {}", path.display());
            fs::write(&path, &page.content)?;
            stats.pages_written += 1;
        }

        if let Some(parent) = self.navigation_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.navigation_path, navigation.to_yaml()?)?;

        info!(
            "Wrote {} pages to {} ({} stale files removed)",
            stats.pages_written,
            self.output_dir.display(),
            stats.files_removed
        );
        Ok(stats)
    }

    /// Remove regular files directly inside the output folder. Subfolders are kept.
    fn clean(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in WalkDir::new(&self.output_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
