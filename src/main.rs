//! tiffconv - Batch TIFF converter
//!
//! This is the main entry point. It handles:
//! 1. CLI argument parsing (only --help/--version)
//! 2. Logging setup (RUST_LOG, default `info`)
//! 3. GTK4/Libadwaita initialization
//! 4. Running the wizard application

use anyhow::{bail, Context, Result};
use clap::Parser;
use tiffconv::ui;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// tiffconv - convert a folder of TIFF images to PNG, JPEG, BMP or GIF
#[derive(Parser, Debug)]
#[command(name = "tiffconv")]
#[command(about = "Batch-convert TIFF images with a step-by-step wizard")]
#[command(version)]
struct Args {}

fn main() -> Result<()> {
    let startup_time = std::time::Instant::now();

    let _args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();

    info!("tiffconv v{}", env!("CARGO_PKG_VERSION"));

    #[cfg(all(unix, not(target_os = "macos")))]
    if std::env::var_os("DISPLAY").is_none() && std::env::var_os("WAYLAND_DISPLAY").is_none() {
        bail!("No display server detected (X11 or Wayland). tiffconv needs a graphical session.");
    }

    gtk::init().context("Failed to initialize GTK4. Please ensure GTK4 is installed.")?;
    adw::init().context("Failed to initialize Libadwaita. Please ensure Libadwaita is installed.")?;

    info!("GTK4/Libadwaita initialized in {:?}", startup_time.elapsed());

    let app = ui::app::TiffconvApplication::new();
    let exit_code = app.run();

    std::process::exit(exit_code.into());
}
