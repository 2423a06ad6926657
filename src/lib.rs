//! # RTW Ship Editor
//!
//! Editing core for Rule the Waves ship files: superstructure outlines and
//! funnels are edited through reversible commands, turret and torpedo
//! mounts are placed the way the game places them.
//!
//! ## Architecture
//!
//! 1. **rtwship-core** - Observers and the undo/redo command stack
//! 2. **rtwship-settings** - Parameter tables and application configuration
//! 3. **rtwship-model** - Ship file format, geometry, entities, commands
//! 4. **rtwship** - This crate: logging setup and the command line entry

use anyhow::Context;
use std::path::{Path, PathBuf};

pub use rtwship_core::{Command, CommandStack, Notification, Observable, Observers, Subscription};
pub use rtwship_model::{
    Document, Funnel, IniDocument, Mount, Point, Session, ShipCommand, ShipData, ShipFileError,
    Structure,
};
pub use rtwship_settings::{AppConfig, Parameters};

/// Initialize logging with tracing
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// What to do on a run of the program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Directory holding the parameter tables and `app_config.json`.
    pub config_dir: PathBuf,
    /// Ship file to open; the last opened file when absent.
    pub ship_file: Option<PathBuf>,
    /// Where to write the ship file back, if anywhere.
    pub output: Option<PathBuf>,
}

impl RunOptions {
    /// `[ship-file] [output-file]`, parameters read from `config_dir`.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I, config_dir: PathBuf) -> Self {
        let mut args = args.into_iter();
        Self {
            config_dir,
            ship_file: args.next().map(PathBuf::from),
            output: args.next().map(PathBuf::from),
        }
    }
}

/// Open a ship file, log what it holds, and save it if asked.
///
/// Returns the opened document, or `None` when there was nothing to open.
pub fn run(options: &RunOptions) -> anyhow::Result<Option<Document>> {
    let params = Parameters::load_from_dir(&options.config_dir);
    let config_path = options.config_dir.join(rtwship_settings::app_config::APP_CONFIG_FILE);
    let mut config = AppConfig::load_or_default(&config_path);

    let Some(path) = options.ship_file.clone().or_else(|| config.last_file()) else {
        tracing::info!("No ship file given and no file opened before");
        return Ok(None);
    };

    let mut session = Session::new();
    let document = session
        .load(&path, &params)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    log_summary(document.ship(), &params);

    if let Some(output) = &options.output {
        document
            .save_as(output.clone())
            .with_context(|| format!("Failed to save {}", output.display()))?;
        tracing::info!("Saved {}", output.display());
    }

    config.set_last_file(&path);
    if let Err(err) = config.save_to_file(&config_path) {
        tracing::warn!("Could not record the last opened file: {}", err);
    }

    Ok(session.close())
}

fn log_summary(ship: &ShipData, params: &Parameters) {
    tracing::info!(
        "{} ship, half length {}, {} hull lines",
        ship.ship_type(),
        ship.half_length(),
        ship.hull_outline(params).len()
    );
    for structure in ship.structures() {
        tracing::info!(
            "{}: {} points, {}",
            structure.name(),
            structure.points().len(),
            if structure.fill() { "filled" } else { "outline" }
        );
    }
    for mount in ship.mounts() {
        tracing::info!("Mount {} ({} vertices)", mount.letter(), mount.outline().len());
    }
    for (name, funnel) in ship.funnels() {
        tracing::info!(
            "{} at {}{}",
            name,
            funnel.position(),
            if funnel.oval() { ", oval" } else { "" }
        );
    }
    if let Some(picture) = ship.picture_path() {
        tracing::info!("Side picture {}", picture.display());
    }
}

/// The directory the program reads its configuration from.
pub fn default_config_dir() -> PathBuf {
    std::env::var_os("RTWSHIP_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}
