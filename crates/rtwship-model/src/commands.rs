//! Reversible edits on a [`ShipData`].
//!
//! Commands address their entity by position (structures) or name
//! (funnels) and capture the state they replace when executed, so undo puts
//! back exactly what was there and redo recomputes from the current state.
//! Callers validate input before building a command; a command whose
//! target no longer exists is logged and does nothing.

use rtwship_core::Command;

use crate::geometry::Point;
use crate::ship_data::ShipData;
use crate::structure::Structure;

#[derive(Debug, Clone, PartialEq)]
pub enum ShipCommand {
    MoveFunnel(MoveFunnel),
    ToggleFunnelOval(ToggleFunnelOval),
    UpdatePoint(UpdatePoint),
    AddPoint(AddPoint),
    DeletePoint(DeletePoint),
    SetFill(SetFill),
    ApplySymmetry(ApplySymmetry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveFunnel {
    pub funnel: String,
    pub position: f64,
    pub old_position: Option<f64>, // Some while executed
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleFunnelOval {
    pub funnel: String,
    pub oval: bool,
    pub old_oval: Option<bool>,
}

/// Moves one point. A move that changes nothing at one decimal is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePoint {
    pub structure: usize,
    pub index: usize,
    pub point: Point,
    pub old_point: Option<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddPoint {
    pub structure: usize,
    pub index: usize,
    pub point: Point,
    pub added: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeletePoint {
    pub structure: usize,
    pub index: usize,
    pub removed: Option<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetFill {
    pub structure: usize,
    pub fill: bool,
    pub old_fill: Option<bool>,
}

/// Mirrors one side of a structure onto the other, see
/// [`Structure::symmetrical_points`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApplySymmetry {
    pub structure: usize,
    pub old_points: Option<Vec<Point>>,
}

impl ShipCommand {
    /// Move a funnel along the centerline.
    pub fn move_funnel(funnel: impl Into<String>, position: f64) -> Self {
        ShipCommand::MoveFunnel(MoveFunnel {
            funnel: funnel.into(),
            position,
            old_position: None,
        })
    }

    /// Set whether a funnel is drawn oval.
    pub fn set_funnel_oval(funnel: impl Into<String>, oval: bool) -> Self {
        ShipCommand::ToggleFunnelOval(ToggleFunnelOval {
            funnel: funnel.into(),
            oval,
            old_oval: None,
        })
    }

    /// Move point `index` of structure `structure`.
    pub fn update_point(structure: usize, index: usize, point: Point) -> Self {
        ShipCommand::UpdatePoint(UpdatePoint {
            structure,
            index,
            point,
            old_point: None,
        })
    }

    /// Insert a point before `index`.
    pub fn add_point(structure: usize, index: usize, point: Point) -> Self {
        ShipCommand::AddPoint(AddPoint {
            structure,
            index,
            point,
            added: false,
        })
    }

    /// Remove the point at `index`.
    pub fn delete_point(structure: usize, index: usize) -> Self {
        ShipCommand::DeletePoint(DeletePoint {
            structure,
            index,
            removed: None,
        })
    }

    /// Set whether a structure is drawn filled.
    pub fn set_fill(structure: usize, fill: bool) -> Self {
        ShipCommand::SetFill(SetFill {
            structure,
            fill,
            old_fill: None,
        })
    }

    /// Mirror a structure onto its other side.
    pub fn apply_symmetry(structure: usize) -> Self {
        ShipCommand::ApplySymmetry(ApplySymmetry {
            structure,
            old_points: None,
        })
    }

    /// Run the edit, recording what it replaces.
    pub fn apply(&mut self, ship: &mut ShipData) {
        match self {
            ShipCommand::MoveFunnel(cmd) => {
                if let Some(funnel) = ship.funnel_mut(&cmd.funnel) {
                    cmd.old_position = Some(funnel.position());
                    funnel.set_position(cmd.position);
                } else {
                    tracing::warn!("No funnel named {}", cmd.funnel);
                }
            }
            ShipCommand::ToggleFunnelOval(cmd) => {
                if let Some(funnel) = ship.funnel_mut(&cmd.funnel) {
                    cmd.old_oval = Some(funnel.oval());
                    funnel.set_oval(cmd.oval);
                } else {
                    tracing::warn!("No funnel named {}", cmd.funnel);
                }
            }
            ShipCommand::UpdatePoint(cmd) => {
                if let Some(structure) = structure_mut(ship, cmd.structure) {
                    if let Some(old) = structure.points().get(cmd.index).copied() {
                        if round_one_decimal(old) != round_one_decimal(cmd.point) {
                            structure.update_point(cmd.index, cmd.point);
                            cmd.old_point = Some(old);
                        }
                    }
                }
            }
            ShipCommand::AddPoint(cmd) => {
                if let Some(structure) = structure_mut(ship, cmd.structure) {
                    cmd.added = structure.add_point(cmd.index, cmd.point);
                }
            }
            ShipCommand::DeletePoint(cmd) => {
                if let Some(structure) = structure_mut(ship, cmd.structure) {
                    cmd.removed = structure.delete_point(cmd.index);
                }
            }
            ShipCommand::SetFill(cmd) => {
                if let Some(structure) = structure_mut(ship, cmd.structure) {
                    cmd.old_fill = Some(structure.fill());
                    structure.set_fill(cmd.fill);
                }
            }
            ShipCommand::ApplySymmetry(cmd) => {
                if let Some(structure) = structure_mut(ship, cmd.structure) {
                    let points = structure.symmetrical_points();
                    cmd.old_points = Some(structure.points().to_vec());
                    structure.set_points(points);
                }
            }
        }
    }

    /// Put back what [`ShipCommand::apply`] replaced. Does nothing if it was never applied.
    pub fn revert(&mut self, ship: &mut ShipData) {
        match self {
            ShipCommand::MoveFunnel(cmd) => {
                if let (Some(old), Some(funnel)) = (cmd.old_position.take(), ship.funnel_mut(&cmd.funnel)) {
                    funnel.set_position(old);
                }
            }
            ShipCommand::ToggleFunnelOval(cmd) => {
                if let (Some(old), Some(funnel)) = (cmd.old_oval.take(), ship.funnel_mut(&cmd.funnel)) {
                    funnel.set_oval(old);
                }
            }
            ShipCommand::UpdatePoint(cmd) => {
                if let Some(old) = cmd.old_point.take() {
                    if let Some(structure) = structure_mut(ship, cmd.structure) {
                        structure.update_point(cmd.index, old);
                    }
                }
            }
            ShipCommand::AddPoint(cmd) => {
                if std::mem::take(&mut cmd.added) {
                    if let Some(structure) = structure_mut(ship, cmd.structure) {
                        structure.delete_point(cmd.index);
                    }
                }
            }
            ShipCommand::DeletePoint(cmd) => {
                if let Some(point) = cmd.removed.take() {
                    if let Some(structure) = structure_mut(ship, cmd.structure) {
                        structure.add_point(cmd.index, point);
                    }
                }
            }
            ShipCommand::SetFill(cmd) => {
                if let Some(old) = cmd.old_fill.take() {
                    if let Some(structure) = structure_mut(ship, cmd.structure) {
                        structure.set_fill(old);
                    }
                }
            }
            ShipCommand::ApplySymmetry(cmd) => {
                if let Some(points) = cmd.old_points.take() {
                    if let Some(structure) = structure_mut(ship, cmd.structure) {
                        structure.set_points(points);
                    }
                }
            }
        }
    }
}

impl Command for ShipCommand {
    type Target = ShipData;

    fn execute(&mut self, ship: &mut ShipData) {
        self.apply(ship);
    }

    fn undo(&mut self, ship: &mut ShipData) {
        self.revert(ship);
    }

    fn name(&self) -> &str {
        match self {
            ShipCommand::MoveFunnel(_) => "Move Funnel",
            ShipCommand::ToggleFunnelOval(_) => "Toggle Funnel Oval",
            ShipCommand::UpdatePoint(_) => "Move Point",
            ShipCommand::AddPoint(_) => "Add Point",
            ShipCommand::DeletePoint(_) => "Delete Point",
            ShipCommand::SetFill(_) => "Set Fill",
            ShipCommand::ApplySymmetry(_) => "Apply Symmetry",
        }
    }
}

fn structure_mut(ship: &mut ShipData, index: usize) -> Option<&mut Structure> {
    let structure = ship.structure_mut(index);
    if structure.is_none() {
        tracing::warn!("No structure #{}", index);
    }
    structure
}

fn round_one_decimal(point: Point) -> (i64, i64) {
    (
        (point.x * 10.0).round_ties_even() as i64,
        (point.y * 10.0).round_ties_even() as i64,
    )
}
