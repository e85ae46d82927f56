//! Centralized Application Settings
//!
//! Every constant the application relies on lives here instead of being
//! scattered across the UI code. Nothing is read from or written to disk.

use std::time::Duration;

/// Application ID registered with GTK
pub const APP_ID: &str = "org.lorisoftware.TiffConverter";

/// Main window title
pub const WINDOW_TITLE: &str = "TIFF Image Converter";

/// Themed icon used for the window and the welcome screen
pub const ICON_NAME: &str = "image-x-generic";

/// Credit shown at the bottom of every screen
pub const CREDIT_TEXT: &str = "LoriSoftware";

/// Fixed window size
pub mod window {
    pub const WIDTH: i32 = 600;
    pub const HEIGHT: i32 = 400;
    pub const RESIZABLE: bool = false;
}

/// Worker channel tuning
pub mod worker {
    use super::Duration;

    /// How often the UI drains the worker channel
    pub const POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// Messages the worker may queue before it waits for the UI
    pub const CHANNEL_CAPACITY: usize = 1;
}

/// Folder pickers
pub mod picker {
    use std::path::PathBuf;

    /// Where the folder pickers open: Pictures, then home
    pub fn start_dir() -> Option<PathBuf> {
        dirs::picture_dir()
            .filter(|p| p.is_dir())
            .or_else(dirs::home_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_settings() {
        assert!(worker::CHANNEL_CAPACITY >= 1);
        assert!(worker::POLL_INTERVAL < Duration::from_millis(100));
    }

    #[test]
    fn test_app_id_is_reverse_dns() {
        assert_eq!(APP_ID.split('.').count(), 3);
        assert!(!APP_ID.contains(' '));
    }

    #[test]
    fn test_picker_start_dir_exists_when_found() {
        if let Some(dir) = picker::start_dir() {
            assert!(dir.is_absolute());
        }
    }
}
