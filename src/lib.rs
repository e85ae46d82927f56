//! tiffconv Library - Batch TIFF conversion behind a wizard
//!
//! This library provides:
//! - The batch converter (TIFF folder -> PNG/JPEG/BMP/GIF)
//! - A background worker that streams progress over a channel
//! - The toolkit-free wizard state machine
//! - Shell integration for opening the output folder
//! - The GTK4/Libadwaita front end (feature `gui`)

pub mod converter;
pub mod settings;
pub mod shell;
pub mod state;
pub mod worker;

#[cfg(feature = "gui")]
pub mod ui;
