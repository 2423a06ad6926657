//! # RTW Ship Model
//!
//! Reads Rule the Waves ship files into an editable model and writes them
//! back.
//!
//! - [`ini`]: the section/option text format, order preserving
//! - [`geometry`]: funnel coordinates and the polar encoding of
//!   superstructure points
//! - [`structure`], [`funnel`]: the editable entities, each observable
//! - [`mounts`]: turret and torpedo placement, derived at load
//! - [`ship_data`]: the aggregate tying one file together
//! - [`commands`], [`document`]: reversible edits and the open document
//!
//! ```rust,ignore
//! use rtwship_model::{Document, ShipCommand};
//! use rtwship_settings::Parameters;
//!
//! let params = Parameters::load_from_dir(Path::new("parameters"));
//! let mut doc = Document::open("Hood.shd", &params)?;
//! doc.execute(ShipCommand::move_funnel("Funnel1", 42.0));
//! doc.undo();
//! doc.save()?;
//! ```

pub mod commands;
pub mod document;
pub mod error;
pub mod funnel;
pub mod geometry;
pub mod ini;
pub mod input;
pub mod mounts;
pub mod ship_data;
pub mod structure;

pub use commands::ShipCommand;
pub use document::{Document, Session};
pub use error::{IniError, MountError, Result, SchemaError, ShipFileError};
pub use funnel::{Funnel, FunnelEvent};
pub use geometry::{Point, PolarPoint};
pub use ini::{IniDocument, Section};
pub use mounts::{Mount, MountSet, Torpedo, Turret};
pub use ship_data::{ShipData, TextEncoding};
pub use structure::{Structure, StructureEvent, STRUCTURE_POINTS_MAX};
