//! Funnels.
//!
//! The `[Funnels]` section holds two scalar options per funnel,
//! `<name>Pos` and `<name>Oval`, in any order.

use indexmap::IndexMap;
use rtwship_core::{Notification, Observable, Observers};

use crate::error::SchemaError;
use crate::ini::Section;
use crate::structure::parse_bool;

pub const FUNNELS_SECTION: &str = "Funnels";

const POS_SUFFIX: &str = "Pos";
const OVAL_SUFFIX: &str = "Oval";

/// Changes reported by a [`Funnel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FunnelEvent {
    PositionChanged { position: f64 },
    OvalChanged { oval: bool },
}

impl Notification for FunnelEvent {
    fn kind(&self) -> &'static str {
        match self {
            FunnelEvent::PositionChanged { .. } => "position",
            FunnelEvent::OvalChanged { .. } => "oval",
        }
    }
}

#[derive(Debug, Default)]
pub struct Funnel {
    oval: bool,
    position: f64,
    observers: Observers<Funnel, FunnelEvent>,
}

impl Funnel {
    /// Create a funnel at `position` on the centerline.
    pub fn new(oval: bool, position: f64) -> Self {
        Self {
            oval,
            position,
            observers: Observers::new(),
        }
    }

    /// Whether the funnel is drawn oval rather than round.
    pub fn oval(&self) -> bool {
        self.oval
    }

    /// Position along the ship in funnel coordinates; 0 means unused.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Set the oval flag, notifying subscribers on change.
    pub fn set_oval(&mut self, oval: bool) {
        if self.oval != oval {
            self.oval = oval;
            self.observers.notify(self, &FunnelEvent::OvalChanged { oval });
        }
    }

    /// Move the funnel, notifying subscribers on change.
    pub fn set_position(&mut self, position: f64) {
        if self.position != position {
            self.position = position;
            self.observers
                .notify(self, &FunnelEvent::PositionChanged { position });
        }
    }
}

impl Observable for Funnel {
    type Event = FunnelEvent;

    fn observers(&self) -> &Observers<Self, Self::Event> {
        &self.observers
    }
}

/// Read every funnel declared in the `[Funnels]` section.
///
/// A name seen again updates the existing entry and keeps the field it
/// already had, whichever of the two options comes first.
pub fn parse_funnels(section: &Section) -> Result<IndexMap<String, Funnel>, SchemaError> {
    let mut funnels: IndexMap<String, Funnel> = IndexMap::new();

    for (option, value) in section {
        if let Some(index) = option.find(POS_SUFFIX) {
            let position = value.trim().parse::<i64>().map_err(|_| {
                SchemaError::invalid_value(FUNNELS_SECTION, option, value, "an integer")
            })?;
            funnels.entry(option[..index].to_string()).or_default().position = position as f64;
        }
        if let Some(index) = option.find(OVAL_SUFFIX) {
            let oval = parse_bool(value).ok_or_else(|| {
                SchemaError::invalid_value(FUNNELS_SECTION, option, value, "a boolean")
            })?;
            funnels.entry(option[..index].to_string()).or_default().oval = oval;
        }
    }

    Ok(funnels)
}

/// The `[Funnels]` section for `funnels`.
///
/// Options of `original` that do not belong to a funnel come first, then
/// every `<name>Pos` (rounded half to even), then every `<name>Oval`.
pub fn funnels_to_section(funnels: &IndexMap<String, Funnel>, original: Option<&Section>) -> Section {
    let mut section: Section = original
        .into_iter()
        .flatten()
        .filter(|(option, _)| !option.contains(POS_SUFFIX) && !option.contains(OVAL_SUFFIX))
        .map(|(option, value)| (option.clone(), value.clone()))
        .collect();

    for (name, funnel) in funnels {
        section.insert(
            format!("{}{}", name, POS_SUFFIX),
            (funnel.position.round_ties_even() as i64).to_string(),
        );
    }
    for (name, funnel) in funnels {
        section.insert(
            format!("{}{}", name, OVAL_SUFFIX),
            if funnel.oval { "1" } else { "0" }.to_string(),
        );
    }
    section
}
