//! Error handling for ship files
//!
//! - `IniError`: the file is not valid section/option text
//! - `SchemaError`: valid text, but the ship content is missing or unusable
//! - `MountError`: a turret or torpedo mount cannot be placed with the
//!   current parameter tables
//! - `ShipFileError`: what loading a ship file reports, carrying the path
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Section/option syntax error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IniError {
    /// An option appears before the first section header
    #[error("Line {line}: option outside of any section: {content:?}")]
    MissingSectionHeader { line: usize, content: String },

    /// The same section header appears twice
    #[error("Line {line}: duplicate section [{section}]")]
    DuplicateSection { line: usize, section: String },

    /// The same option appears twice in one section
    #[error("Line {line}: duplicate option {option} in section [{section}]")]
    DuplicateOption {
        line: usize,
        section: String,
        option: String,
    },

    /// A line that is neither a header, an option, a comment nor a continuation
    #[error("Line {line}: expected `option=value`: {content:?}")]
    InvalidLine { line: usize, content: String },
}

/// Ship file content error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Missing section: {section}")]
    MissingSection { section: String },

    #[error("Missing option: {option} in section {section}")]
    MissingOption { section: String, option: String },

    #[error("Invalid value {value:?} for {option} in section {section}: expected {expected}")]
    InvalidValue {
        section: String,
        option: String,
        value: String,
        expected: &'static str,
    },

    /// The half-length table has no entry for the ship type
    #[error("Unknown ship type: {ship_type}")]
    UnknownShipType { ship_type: String },

    /// No half-length threshold is above the displacement
    #[error("No half length defined for a {ship_type} of {displacement} tons")]
    DisplacementOutOfRange { ship_type: String, displacement: u32 },

    #[error(transparent)]
    Mount(#[from] MountError),
}

impl SchemaError {
    pub(crate) fn invalid_value(
        section: &str,
        option: &str,
        value: &str,
        expected: &'static str,
    ) -> Self {
        SchemaError::InvalidValue {
            section: section.to_string(),
            option: option.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

/// Mount placement lookup failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    #[error("No position defined for mount {letter}")]
    UnknownPosition { letter: String },

    #[error("Mount {letter} has no candidate position #{index}")]
    MissingCandidate { letter: String, index: usize },

    #[error("No turret scale for a caliber of {caliber}")]
    UnknownCaliber { caliber: usize },

    #[error("No turret outline for {guns} guns")]
    UnknownGunCount { guns: usize },

    #[error("No torpedo mount outline for {tubes} tubes")]
    UnknownTubeCount { tubes: usize },
}

/// A ship file could not be loaded or saved.
#[derive(Error, Debug)]
pub enum ShipFileError {
    /// The underlying section/option syntax is broken
    #[error("Could not parse as INI the file {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: IniError,
    },

    /// Mandatory content is missing or unusable
    #[error("Schema error in file {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    /// Reading or writing the file failed
    #[error("I/O error on file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ShipFileError {
    /// The file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            ShipFileError::Format { path, .. }
            | ShipFileError::Schema { path, .. }
            | ShipFileError::Io { path, .. } => path,
        }
    }

    /// Check if this is a syntax error
    pub fn is_format_error(&self) -> bool {
        matches!(self, ShipFileError::Format { .. })
    }

    /// Check if this is a schema error
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ShipFileError::Schema { .. })
    }
}

/// Result type for ship file operations
pub type Result<T> = std::result::Result<T, ShipFileError>;
