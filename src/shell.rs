//! Shell Integration - open folders in the system file browser
//!
//! Best-effort only. Callers get an error back for logging; nothing here is
//! ever shown to the user as a blocking dialog.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Open `path` with the platform's default file browser
pub fn open_folder(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("Not a directory: {:?}", path);
    }

    open::that_detached(path).with_context(|| format!("Could not open folder {:?}", path))?;
    info!("Opened folder: {:?}", path);
    Ok(())
}

/// Like [`open_folder`] but only logs failures
pub fn open_folder_logged(path: &Path) {
    if let Err(e) = open_folder(path) {
        warn!("{:#}", e);
    }
}
