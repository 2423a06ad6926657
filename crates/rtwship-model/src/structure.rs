//! Superstructures.
//!
//! A superstructure section stores its outline as loose
//! `Point<N>Angle` / `Point<N>Distance` options. The game tolerates gaps,
//! repeated points and `(0, 0)` filler in that list; loading turns it into a
//! dense list of funnel-coordinate points, saving writes back a fixed-size
//! list of [`STRUCTURE_POINTS_MAX`] pairs.

use regex::Regex;
use rtwship_core::{Notification, Observable, Observers};
use std::sync::OnceLock;

use crate::error::SchemaError;
use crate::geometry::{cartesian_to_polar, polar_to_cartesian, Point, PolarPoint};
use crate::ini::Section;

/// Number of point pairs the game reads from a superstructure section.
pub const STRUCTURE_POINTS_MAX: usize = 21;

/// Point indices above this are ignored on load.
const POINT_INDEX_LIMIT: usize = 4096;

const IS_LINE: &str = "IsLine";

/// Which half of a polar pair an option holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointField {
    Angle,
    Distance,
}

/// Changes reported by a [`Structure`].
#[derive(Debug, Clone, PartialEq)]
pub enum StructureEvent {
    PointUpdated { index: usize, point: Point },
    PointAdded { index: usize, point: Point },
    PointDeleted { index: usize },
    PointsReplaced { points: Vec<Point> },
    FillChanged { fill: bool },
}

impl Notification for StructureEvent {
    fn kind(&self) -> &'static str {
        match self {
            StructureEvent::PointUpdated { .. } => "update",
            StructureEvent::PointAdded { .. } => "add_point",
            StructureEvent::PointDeleted { .. } => "delete_point",
            StructureEvent::PointsReplaced { .. } => "replace_points",
            StructureEvent::FillChanged { .. } => "fill",
        }
    }
}

/// One superstructure outline.
///
/// Mutate only through the methods below so that subscribers see every
/// change.
#[derive(Debug)]
pub struct Structure {
    name: String,
    points: Vec<Point>,
    fill: bool,
    observers: Observers<Structure, StructureEvent>,
}

impl Structure {
    /// Create a structure with no subscribers.
    pub fn new(name: impl Into<String>, points: Vec<Point>, fill: bool) -> Self {
        Self {
            name: name.into(),
            points,
            fill,
            observers: Observers::new(),
        }
    }

    /// Build a structure from its ship file section.
    pub fn from_section(name: &str, section: &Section) -> Result<Self, SchemaError> {
        let mut fill = true;
        let mut fields = Vec::new();

        for (option, value) in section {
            if option.contains(IS_LINE) {
                fill = !parse_bool(value)
                    .ok_or_else(|| SchemaError::invalid_value(name, option, value, "a boolean"))?;
                continue;
            }
            let Some((index, field)) = parse_point_option(option) else {
                tracing::warn!("Ignoring unknown option {} in section {}", option, name);
                continue;
            };
            if index > POINT_INDEX_LIMIT {
                tracing::warn!("Ignoring out of range option {} in section {}", option, name);
                continue;
            }
            let value = value
                .parse::<i64>()
                .map_err(|_| SchemaError::invalid_value(name, option, value, "an integer"))?;
            fields.push((index, field, value));
        }

        let points = decode_points(fields)
            .into_iter()
            .map(polar_to_cartesian)
            .collect();
        Ok(Self::new(name, points, fill))
    }

    /// Section name in the ship file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outline points in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Drawn filled; the opposite of the file's `IsLine`.
    pub fn fill(&self) -> bool {
        self.fill
    }

    /// Set the fill flag, notifying subscribers on change.
    pub fn set_fill(&mut self, fill: bool) {
        if self.fill != fill {
            self.fill = fill;
            self.observers
                .notify(self, &StructureEvent::FillChanged { fill });
        }
    }

    /// Replace the whole point list.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        let event = StructureEvent::PointsReplaced {
            points: self.points.clone(),
        };
        self.observers.notify(self, &event);
    }

    /// Move the point at `index`. Returns false if there is no such point.
    pub fn update_point(&mut self, index: usize, point: Point) -> bool {
        let Some(slot) = self.points.get_mut(index) else {
            tracing::warn!("{}: no point {} to update", self.name, index);
            return false;
        };
        *slot = point;
        self.observers
            .notify(self, &StructureEvent::PointUpdated { index, point });
        true
    }

    /// Insert a point at `index`, shifting the following points. Returns
    /// false if `index` is past the end of the list.
    pub fn add_point(&mut self, index: usize, point: Point) -> bool {
        if index > self.points.len() {
            tracing::warn!("{}: cannot insert a point at {}", self.name, index);
            return false;
        }
        self.points.insert(index, point);
        self.observers
            .notify(self, &StructureEvent::PointAdded { index, point });
        true
    }

    /// Remove the point at `index` and return it.
    pub fn delete_point(&mut self, index: usize) -> Option<Point> {
        if index >= self.points.len() {
            tracing::warn!("{}: no point {} to delete", self.name, index);
            return None;
        }
        let removed = self.points.remove(index);
        self.observers
            .notify(self, &StructureEvent::PointDeleted { index });
        Some(removed)
    }

    /// The ship file section for this structure, padded to
    /// [`STRUCTURE_POINTS_MAX`] points. Extra points are dropped.
    pub fn to_section(&self) -> Section {
        if self.points.len() > STRUCTURE_POINTS_MAX {
            tracing::warn!(
                "{}: only the first {} of {} points are saved",
                self.name,
                STRUCTURE_POINTS_MAX,
                self.points.len()
            );
        }
        let mut section = Section::new();
        for (index, polar) in encode_points(&self.points).into_iter().enumerate() {
            section.insert(format!("Point{}Angle", index), polar.angle.to_string());
            section.insert(format!("Point{}Distance", index), polar.distance.to_string());
        }
        section.insert(
            IS_LINE.to_string(),
            if self.fill { "0" } else { "1" }.to_string(),
        );
        section
    }

    /// The outline made symmetrical about the centerline.
    ///
    /// An outline that already mirrors onto itself comes back unchanged.
    /// Otherwise the side of the first off-centerline point is kept, up to
    /// the first point that crosses to the other side, and the kept run is
    /// mirrored back in reverse order. The first and last kept points are
    /// not duplicated when they lie on the centerline.
    pub fn symmetrical_points(&self) -> Vec<Point> {
        if is_symmetrical(&self.points) {
            return self.points.clone();
        }

        let port_side_first = self
            .points
            .iter()
            .find(|p| p.x != 0.0)
            .map_or(true, |p| p.x < 0.0);

        let kept: Vec<Point> = self
            .points
            .iter()
            .take_while(|p| p.x == 0.0 || (p.x < 0.0) == port_side_first)
            .copied()
            .collect();

        let start = usize::from(kept.first().is_some_and(|p| p.x == 0.0));
        let end = kept.len() - usize::from(kept.last().is_some_and(|p| p.x == 0.0));

        let mut points = kept.clone();
        if start < end {
            points.extend(kept[start..end].iter().rev().map(|p| Point::new(-p.x, p.y)));
        }
        points
    }
}

/// Whether mirroring the outline and walking it backwards gives the same
/// closed outline, starting from any point.
fn is_symmetrical(points: &[Point]) -> bool {
    let mirrored: Vec<Point> = points.iter().rev().map(|p| Point::new(-p.x, p.y)).collect();
    let n = points.len();
    (0..n.max(1)).any(|shift| {
        (0..n).all(|i| {
            let (a, b) = (points[(i + shift) % n], mirrored[i]);
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
        })
    })
}

impl Observable for Structure {
    type Event = StructureEvent;

    fn observers(&self) -> &Observers<Self, Self::Event> {
        &self.observers
    }
}

/// Rebuild the dense list of raw points from `(index, field, value)`
/// options in file order.
///
/// - a known index only gets the given half replaced; a distance of 0 there
///   is a redundant default and is ignored
/// - a new index past the end pads the list with `(0, 0)` up to itself
/// - `(0, 0)` points are then dropped and runs of identical points collapse
///   to their first occurrence
pub fn decode_points<I>(fields: I) -> Vec<PolarPoint>
where
    I: IntoIterator<Item = (usize, PointField, i64)>,
{
    let mut raw: Vec<PolarPoint> = Vec::new();
    for (index, field, value) in fields {
        if let Some(slot) = raw.get_mut(index) {
            match field {
                PointField::Angle => slot.angle = value,
                PointField::Distance if value != 0 => slot.distance = value,
                PointField::Distance => {}
            }
        } else {
            raw.resize(index, PolarPoint::default());
            raw.push(match field {
                PointField::Angle => PolarPoint::new(value, 0),
                PointField::Distance => PolarPoint::new(0, value),
            });
        }
    }
    raw.retain(|p| !p.is_empty());
    raw.dedup();
    raw
}

/// Exactly [`STRUCTURE_POINTS_MAX`] polar pairs: the points in order, then
/// `(0, 0)` filler.
pub fn encode_points(points: &[Point]) -> Vec<PolarPoint> {
    points
        .iter()
        .map(|p| cartesian_to_polar(*p))
        .chain(std::iter::repeat(PolarPoint::default()))
        .take(STRUCTURE_POINTS_MAX)
        .collect()
}

fn parse_point_option(option: &str) -> Option<(usize, PointField)> {
    static POINT_OPTION: OnceLock<Regex> = OnceLock::new();
    let re = POINT_OPTION.get_or_init(|| {
        Regex::new(r"^Point(\d+)(Angle|Distance)$").expect("invalid regex pattern")
    });
    let caps = re.captures(option)?;
    let index = caps[1].parse().ok()?;
    let field = match &caps[2] {
        "Angle" => PointField::Angle,
        _ => PointField::Distance,
    };
    Some((index, field))
}

/// Boolean option values the game and the editor accept.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
