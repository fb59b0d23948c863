//! HTML page output.
//!
//! The dashboard is written as a single self-contained document after every
//! trigger, replacing the previous file.

use crate::ui::Page;
use chrono::Local;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Render a [`Page`] and write it to `path`.
///
/// Creates the parent directory when it doesn't exist.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_page(page: &Page, path: &Path) -> Result<(), Box<dyn Error>> {
    let html = page.to_html(Local::now());

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, &html).await?;
    info!(
        bytes = html.len(),
        cards = page.container.children().len(),
        "Wrote dashboard page"
    );
    Ok(())
}
