//! The ship-data aggregate: one loaded ship file.

use indexmap::IndexMap;
use rtwship_settings::Parameters;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, SchemaError, ShipFileError};
use crate::funnel::{funnels_to_section, parse_funnels, Funnel, FUNNELS_SECTION};
use crate::geometry::{hull_lines, Point};
use crate::ini::{IniDocument, Section};
use crate::mounts::{Mount, MountSet, Torpedo, Turret};
use crate::structure::Structure;

pub const DATA_SECTION: &str = "Data";
pub const GUNS_SECTION: &str = "Guns";

/// Sections and options a ship file must have, checked in this order.
const MANDATORY_SECTIONS_OPTIONS: [(&str, &[&str]); 3] = [
    (DATA_SECTION, &["PictureName", "ShipType", "Displacement"]),
    (GUNS_SECTION, &["TurretStyle"]),
    (FUNNELS_SECTION, &[]),
];

const STRUCTURE_MARKER: &str = "Superstructure";
const TURRET_MARKER: &str = "Turret";
const TORPEDO_MARKER: &str = "TorpedoMount";

/// How a ship file's bytes map to text.
///
/// Files written by older Windows builds of the game are in the ANSI code
/// page rather than UTF-8. Those are read as Latin-1 and written back the
/// same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl TextEncoding {
    /// Decode file bytes, falling back to Latin-1 when they are not UTF-8.
    pub fn decode(bytes: Vec<u8>) -> (String, Self) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, TextEncoding::Utf8),
            Err(err) => {
                let text = err.as_bytes().iter().map(|&b| char::from(b)).collect();
                (text, TextEncoding::Latin1)
            }
        }
    }

    /// Encode text for writing. Characters Latin-1 cannot hold become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Latin1 => text.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect(),
        }
    }
}

/// A loaded ship file.
///
/// The file's own sections are kept as read; structures and funnels are
/// merged back into them on save. Mounts and the half length are derived at
/// load and never change.
#[derive(Debug)]
pub struct ShipData {
    path: PathBuf,
    encoding: TextEncoding,
    document: IniDocument,
    ship_type: String,
    half_length: f64,
    structures: Vec<Structure>,
    mounts: Vec<Mount>,
    funnels: IndexMap<String, Funnel>,
}

impl ShipData {
    /// Read and parse the ship file at `path`.
    pub fn load(path: impl AsRef<Path>, params: &Parameters) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading ship file {}", path.display());
        let bytes = fs::read(path).map_err(|source| ShipFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (text, encoding) = TextEncoding::decode(bytes);
        if encoding != TextEncoding::Utf8 {
            tracing::warn!("{} is not UTF-8, reading it as Latin-1", path.display());
        }
        let mut ship = Self::parse(&text, path, params)?;
        ship.encoding = encoding;
        Ok(ship)
    }

    /// Parse ship file text. `path` is where it came from; it is used for
    /// error reports, the side picture and saving.
    pub fn parse(text: &str, path: impl Into<PathBuf>, params: &Parameters) -> Result<Self> {
        let path = path.into();
        let document = match IniDocument::parse(text) {
            Ok(document) => document,
            Err(source) => return Err(ShipFileError::Format { path, source }),
        };
        match Self::from_document(document, path.clone(), params) {
            Ok(ship) => Ok(ship),
            Err(source) => Err(ShipFileError::Schema { path, source }),
        }
    }

    /// Build the model from a parsed document.
    pub fn from_document(
        document: IniDocument,
        path: PathBuf,
        params: &Parameters,
    ) -> std::result::Result<Self, SchemaError> {
        check_mandatory(&document)?;

        let ship_type = required(&document, DATA_SECTION, "ShipType")?.to_string();
        let displacement: u32 = parse_option(&document, DATA_SECTION, "Displacement", "an integer tonnage")?;
        let half_length = half_length_for(params, &ship_type, displacement)?;

        let mut structures = Vec::new();
        let mut turrets: IndexMap<String, usize> = IndexMap::new();
        let mut torpedoes: Vec<(String, usize)> = Vec::new();

        for (name, section) in document.sections() {
            if name.contains(STRUCTURE_MARKER) {
                structures.push(Structure::from_section(name, section)?);
            } else if name.contains(TURRET_MARKER) {
                let letter = section_option(section, name, "Pos")?;
                let guns = parse_section_option(section, name, "Guns", "a gun count")?;
                turrets.insert(letter.to_string(), guns);
            } else if name.contains(TORPEDO_MARKER) {
                let tubes: i64 = parse_section_option(section, name, "Tubes", "a tube count")?;
                if tubes >= 1 {
                    let letter = section_option(section, name, "Pos")?;
                    torpedoes.push((letter.to_string(), tubes as usize));
                }
            }
        }

        let present: MountSet = turrets.keys().cloned().collect();
        let mut mounts = Vec::with_capacity(turrets.len() + torpedoes.len());
        if !turrets.is_empty() {
            let caliber: usize = parse_option(&document, GUNS_SECTION, "Main", "a caliber in inches")?;
            for (letter, guns) in &turrets {
                let turret = Turret::new(letter, *guns, caliber, half_length, &present, params)?;
                mounts.push(Mount::Turret(turret));
            }
        }
        for (letter, tubes) in &torpedoes {
            let torpedo = Torpedo::new(letter, *tubes, half_length, &present, params)?;
            mounts.push(Mount::Torpedo(torpedo));
        }

        let funnels = match document.section(FUNNELS_SECTION) {
            Some(section) => parse_funnels(section)?,
            None => IndexMap::new(),
        };

        tracing::debug!(
            "Parsed {} ship: half length {}, {} structures, {} mounts, {} funnels",
            ship_type,
            half_length,
            structures.len(),
            mounts.len(),
            funnels.len()
        );

        Ok(Self {
            path,
            encoding: TextEncoding::Utf8,
            document,
            ship_type,
            half_length,
            structures,
            mounts,
            funnels,
        })
    }

    /// Where the file was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Change where the file is saved and its picture is looked up.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// The encoding the file was read in, and is written back in.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Ship type code, such as `BC`.
    pub fn ship_type(&self) -> &str {
        &self.ship_type
    }

    /// Midship to bow, in funnel coordinates.
    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    /// Superstructures in file order.
    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Superstructure by position.
    pub fn structure(&self, index: usize) -> Option<&Structure> {
        self.structures.get(index)
    }

    /// Superstructure by position, for editing.
    pub fn structure_mut(&mut self, index: usize) -> Option<&mut Structure> {
        self.structures.get_mut(index)
    }

    /// Turrets in file order, then torpedo mounts.
    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    /// Funnels by name, in file order.
    pub fn funnels(&self) -> &IndexMap<String, Funnel> {
        &self.funnels
    }

    /// Funnel by name.
    pub fn funnel(&self, name: &str) -> Option<&Funnel> {
        self.funnels.get(name)
    }

    /// Funnel by name, for editing.
    pub fn funnel_mut(&mut self, name: &str) -> Option<&mut Funnel> {
        self.funnels.get_mut(name)
    }

    /// Side picture file name from `[Data]`.
    pub fn picture_name(&self) -> Option<&str> {
        self.document
            .get(DATA_SECTION, "PictureName")
            .filter(|name| !name.is_empty())
    }

    /// The side view picture, relative to the ship file's directory.
    pub fn picture_path(&self) -> Option<PathBuf> {
        let name = self.picture_name()?;
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        Some(dir.join(name))
    }

    /// Hull silhouette lines for this ship type, in funnel coordinates.
    pub fn hull_outline(&self, params: &Parameters) -> Vec<Vec<Point>> {
        params
            .hulls_shapes
            .get(&self.ship_type)
            .map(|lines| hull_lines(lines, self.half_length))
            .unwrap_or_default()
    }

    /// The file's sections with the current structures and funnels merged
    /// in. Mounts are derived and are never written.
    pub fn to_document(&self) -> IniDocument {
        let mut document = self.document.clone();
        for structure in &self.structures {
            document.set_section(structure.name(), structure.to_section());
        }
        let funnels = funnels_to_section(&self.funnels, self.document.section(FUNNELS_SECTION));
        document.set_section(FUNNELS_SECTION, funnels);
        document
    }

    /// Write the ship file to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.encoding.encode(&self.to_document().to_string()))?;
        writer.flush()
    }

    /// Write the ship file to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        tracing::debug!("Saving ship file {}", path.display());
        fs::write(path, self.encoding.encode(&self.to_document().to_string())).map_err(|source| ShipFileError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn check_mandatory(document: &IniDocument) -> std::result::Result<(), SchemaError> {
    for (section, options) in MANDATORY_SECTIONS_OPTIONS {
        let Some(content) = document.section(section) else {
            return Err(SchemaError::MissingSection {
                section: section.to_string(),
            });
        };
        for option in options {
            if !content.contains_key(*option) {
                return Err(SchemaError::MissingOption {
                    section: section.to_string(),
                    option: option.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Half length of the first tonnage threshold above `displacement`.
fn half_length_for(
    params: &Parameters,
    ship_type: &str,
    displacement: u32,
) -> std::result::Result<f64, SchemaError> {
    let table = params
        .ships_hlengths
        .get(ship_type)
        .ok_or_else(|| SchemaError::UnknownShipType {
            ship_type: ship_type.to_string(),
        })?;
    table
        .iter()
        .find(|(threshold, _)| **threshold > displacement)
        .map(|(_, half_length)| *half_length)
        .ok_or_else(|| SchemaError::DisplacementOutOfRange {
            ship_type: ship_type.to_string(),
            displacement,
        })
}

fn required<'a>(
    document: &'a IniDocument,
    section: &str,
    option: &str,
) -> std::result::Result<&'a str, SchemaError> {
    document
        .get(section, option)
        .ok_or_else(|| SchemaError::MissingOption {
            section: section.to_string(),
            option: option.to_string(),
        })
}

fn parse_option<T: FromStr>(
    document: &IniDocument,
    section: &str,
    option: &str,
    expected: &'static str,
) -> std::result::Result<T, SchemaError> {
    let value = required(document, section, option)?;
    value
        .trim()
        .parse()
        .map_err(|_| SchemaError::invalid_value(section, option, value, expected))
}

fn section_option<'a>(
    section: &'a Section,
    name: &str,
    option: &str,
) -> std::result::Result<&'a str, SchemaError> {
    section
        .get(option)
        .map(String::as_str)
        .ok_or_else(|| SchemaError::MissingOption {
            section: name.to_string(),
            option: option.to_string(),
        })
}

fn parse_section_option<T: FromStr>(
    section: &Section,
    name: &str,
    option: &str,
    expected: &'static str,
) -> std::result::Result<T, SchemaError> {
    let value = section_option(section, name, option)?;
    value
        .trim()
        .parse()
        .map_err(|_| SchemaError::invalid_value(name, option, value, expected))
}
