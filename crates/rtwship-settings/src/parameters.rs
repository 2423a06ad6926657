//! Static parameter tables.
//!
//! These tables describe the game rather than a given ship. The ship-data
//! model only reads them; it never checks their shape. Validation here is
//! limited to filling gaps with defaults so that every known ship type and
//! mount letter has an entry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::defaults::{self, SHIP_TYPES, TURRET_POSITIONS};
use crate::error::{SettingsError, SettingsResult};

pub const HULLS_SHAPES_FILE: &str = "hull_shapes.json";
pub const HALF_LENGTHS_FILE: &str = "lengths.json";
pub const TURRETS_POSITIONS_FILE: &str = "turrets_positions.json";
pub const TURRETS_SCALE_FILE: &str = "turrets_scale.json";
pub const TURRETS_OUTLINES_FILE: &str = "turrets_outlines.json";
pub const TORPEDO_OUTLINES_FILE: &str = "torpedo_outlines.json";

/// `(x, y)` in funnel coordinates, or hull-relative for hull shapes.
pub type Vertex = (f64, f64);

/// Ordered list of vertices.
pub type Outline = Vec<Vertex>;

/// Maximum tonnage (exclusive) -> half length, in ascending tonnage order.
pub type HalfLengthTable = BTreeMap<u32, f64>;

/// Where a mount letter may sit, and which way it faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurretPosition {
    /// 1 to 4 candidates, as fractions of the half length.
    pub positions: Vec<Vertex>,
    /// False for mounts facing aft.
    pub to_bow: bool,
}

/// All static tables consumed by the ship-data model.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Hull silhouette lines per ship type, relative to the half length.
    pub hulls_shapes: HashMap<String, Vec<Outline>>,
    /// Half length by tonnage, per ship type.
    pub ships_hlengths: HashMap<String, HalfLengthTable>,
    /// Candidate positions per mount letter.
    pub turrets_positions: HashMap<String, TurretPosition>,
    /// Outline scale, indexed by caliber in inches.
    pub turrets_scale: Vec<f64>,
    /// Turret outline, indexed by gun count.
    pub turrets_outlines: Vec<Outline>,
    /// Torpedo mount outline, indexed by tube count.
    pub torpedo_outlines: Vec<Outline>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            hulls_shapes: SHIP_TYPES
                .iter()
                .map(|t| (t.to_string(), defaults::hull_shape()))
                .collect(),
            ships_hlengths: SHIP_TYPES
                .iter()
                .map(|t| (t.to_string(), defaults::half_length_table()))
                .collect(),
            turrets_positions: TURRET_POSITIONS
                .iter()
                .map(|p| (p.to_string(), defaults::turret_position()))
                .collect(),
            turrets_scale: defaults::DEFAULT_TURRETS_SCALE.to_vec(),
            turrets_outlines: defaults::turrets_outlines(),
            torpedo_outlines: defaults::torpedo_outlines(),
        }
    }
}

impl Parameters {
    /// Load every table from `dir`.
    ///
    /// A table that cannot be read or decoded is replaced by its default;
    /// missing entries inside a table are filled from the defaults. Both
    /// cases are logged as errors.
    pub fn load_from_dir(dir: &Path) -> Self {
        let path = dir.join(HULLS_SHAPES_FILE);
        let hulls_shapes = complete_map(
            read_table(&path),
            &SHIP_TYPES,
            defaults::hull_shape,
            &path,
            "hull outline shape for ship type",
        );

        let path = dir.join(HALF_LENGTHS_FILE);
        let ships_hlengths = complete_map(
            read_table(&path),
            &SHIP_TYPES,
            defaults::half_length_table,
            &path,
            "half length definition for ship type",
        );

        let path = dir.join(TURRETS_POSITIONS_FILE);
        let turrets_positions = complete_map(
            read_table(&path),
            &TURRET_POSITIONS,
            defaults::turret_position,
            &path,
            "turret position",
        );

        let path = dir.join(TURRETS_SCALE_FILE);
        let turrets_scale = pad_table(
            read_table(&path),
            defaults::DEFAULT_TURRETS_SCALE.to_vec(),
            &path,
            "caliber",
        );

        let path = dir.join(TURRETS_OUTLINES_FILE);
        let turrets_outlines = pad_table(
            read_table(&path),
            defaults::turrets_outlines(),
            &path,
            "gun count",
        );

        let path = dir.join(TORPEDO_OUTLINES_FILE);
        let torpedo_outlines = pad_table(
            read_table(&path),
            defaults::torpedo_outlines(),
            &path,
            "tube count",
        );

        Self {
            hulls_shapes,
            ships_hlengths,
            turrets_positions,
            turrets_scale,
            turrets_outlines,
            torpedo_outlines,
        }
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> SettingsResult<T> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> SettingsResult<()> {
    let content = serde_json::to_string_pretty(value).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Option<T> {
    match read_json(path) {
        Ok(table) => Some(table),
        Err(err) => {
            tracing::error!("Could not load or read parameter file, using defaults: {}", err);
            None
        }
    }
}

fn complete_map<V>(
    table: Option<HashMap<String, V>>,
    keys: &[&str],
    default: impl Fn() -> V,
    path: &Path,
    what: &str,
) -> HashMap<String, V> {
    let mut table = table.unwrap_or_default();
    for key in keys {
        if !table.contains_key(*key) {
            tracing::error!("Missing {} {} from file {}", what, key, path.display());
            table.insert(key.to_string(), default());
        }
    }
    table
}

fn pad_table<T: Clone>(table: Option<Vec<T>>, defaults: Vec<T>, path: &Path, what: &str) -> Vec<T> {
    let Some(mut table) = table else {
        return defaults;
    };
    if table.len() < defaults.len() {
        tracing::error!(
            "Table in {} defined up to {} {} instead of {}",
            path.display(),
            what,
            table.len() as isize - 1,
            defaults.len() - 1
        );
        table.extend_from_slice(&defaults[table.len()..]);
    }
    table
}
