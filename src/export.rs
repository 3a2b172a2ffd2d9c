//! Writing exported drawings to disk.

use crate::config::ExportConfig;
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while saving an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid export filename '{0}'")]
    InvalidFilename(String),
}

/// A PNG produced by the Save action, waiting for the host to store it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Suggested filename including extension, e.g. `my-drawing.png`
    pub filename: String,
    /// Encoded PNG bytes at the surface's pixel size
    pub bytes: Vec<u8>,
}

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save drawings to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

impl FileSaveConfig {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.directory),
            filename_template: config.filename_template.clone(),
            format: config.format.to_lowercase(),
        }
    }

    /// Filename for an export taken now.
    pub fn filename(&self) -> String {
        generate_filename(&self.filename_template, &self.format)
    }
}

/// Generate a filename based on the template and current time.
///
/// Templates chrono cannot format are used verbatim.
pub fn generate_filename(template: &str, format: &str) -> String {
    let mut filename = String::new();
    if write!(filename, "{}", Local::now().format(template)).is_err() {
        log::warn!("Invalid filename template '{}', using it verbatim", template);
        filename = template.to_string();
    }
    format!("{}.{}", filename, format)
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes `request` into `directory` and returns the path of the new file.
pub fn save_png(request: &ExportRequest, directory: &Path) -> Result<PathBuf, ExportError> {
    let name = Path::new(&request.filename);
    if request.filename.is_empty() || name.file_name() != Some(name.as_os_str()) {
        return Err(ExportError::InvalidFilename(request.filename.clone()));
    }

    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(name);

    log::info!(
        "Saving drawing to: {} ({} bytes)",
        file_path.display(),
        request.bytes.len()
    );
    fs::write(&file_path, &request.bytes)?;

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
