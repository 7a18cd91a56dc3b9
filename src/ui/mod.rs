//! User interface module - terminal output and result files.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Writing the rendered notes to disk

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_changelog, display_error, display_publish_plan, display_status, display_success,
    display_version_decision,
};

/// Writes rendered release notes to `path`, creating parent directories.
///
/// # Arguments
/// * `path` - Destination file, overwritten when present
/// * `changelog` - Rendered markdown
pub fn write_changelog(path: &Path, changelog: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, changelog)
        .with_context(|| format!("Failed to write release notes to {}", path.display()))?;
    Ok(())
}
