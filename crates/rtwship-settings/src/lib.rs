//! Configuration and static data for the RTW ship editor
//!
//! Two kinds of files live here, both JSON:
//! - **Parameter tables** describing the game: hull silhouettes, half length
//!   by tonnage, turret positions, turret scale by caliber, turret and
//!   torpedo mount outlines. Loading them never fails; anything unreadable
//!   or incomplete is replaced by built-in defaults and logged.
//! - **Application configuration**: the last opened ship file.

pub mod app_config;
pub mod defaults;
pub mod error;
pub mod parameters;

pub use app_config::AppConfig;
pub use error::{SettingsError, SettingsResult};
pub use parameters::{HalfLengthTable, Outline, Parameters, TurretPosition, Vertex};
