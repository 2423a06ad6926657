use rtwship_core::Command;
use rtwship_model::{Document, Point, ShipCommand};

use crate::fixtures::{ship, snapshot};

fn assert_reversible(command: ShipCommand) {
    let mut doc = Document::new(ship());
    let before = snapshot(doc.ship());

    doc.execute(command);
    let after = snapshot(doc.ship());
    assert_ne!(before, after, "command changed nothing");

    assert!(doc.undo());
    assert_eq!(snapshot(doc.ship()), before);

    assert!(doc.redo());
    assert_eq!(snapshot(doc.ship()), after);

    assert!(doc.undo());
    assert_eq!(snapshot(doc.ship()), before);
}

#[test]
fn test_move_funnel_is_reversible() {
    assert_reversible(ShipCommand::move_funnel("Funnel1", 80.0));
}

#[test]
fn test_funnel_oval_is_reversible() {
    assert_reversible(ShipCommand::set_funnel_oval("Funnel1", true));
}

#[test]
fn test_update_point_is_reversible() {
    assert_reversible(ShipCommand::update_point(0, 1, Point::new(-5.0, -5.0)));
}

#[test]
fn test_add_point_is_reversible() {
    assert_reversible(ShipCommand::add_point(0, 1, Point::new(-3.0, -3.0)));
}

#[test]
fn test_add_point_at_end_is_reversible() {
    assert_reversible(ShipCommand::add_point(1, 2, Point::new(1.0, 1.0)));
}

#[test]
fn test_delete_point_is_reversible() {
    assert_reversible(ShipCommand::delete_point(0, 0));
}

#[test]
fn test_set_fill_is_reversible() {
    assert_reversible(ShipCommand::set_fill(0, false));
}

#[test]
fn test_apply_symmetry_is_reversible() {
    assert_reversible(ShipCommand::apply_symmetry(0));
}

#[test]
fn test_apply_symmetry_twice_changes_nothing_more() {
    let mut doc = Document::new(ship());
    doc.execute(ShipCommand::apply_symmetry(0));
    let once = doc.ship().structures()[0].points().to_vec();
    assert_eq!(once.len(), 5);
    assert!(once[3].x > 0.0 && once[4].x > 0.0);

    doc.execute(ShipCommand::apply_symmetry(0));
    assert_eq!(doc.ship().structures()[0].points(), once.as_slice());
}

#[test]
fn test_update_point_below_one_decimal_is_skipped() {
    let mut doc = Document::new(ship());
    let before = snapshot(doc.ship());
    let old = doc.ship().structures()[0].points()[0];

    doc.execute(ShipCommand::update_point(0, 0, Point::new(old.x + 0.01, old.y)));
    assert_eq!(snapshot(doc.ship()), before);

    assert!(doc.undo());
    assert_eq!(snapshot(doc.ship()), before);
}

#[test]
fn test_same_value_edits_leave_ship_unchanged() {
    let mut doc = Document::new(ship());
    let before = snapshot(doc.ship());
    doc.execute(ShipCommand::set_fill(0, true));
    doc.execute(ShipCommand::move_funnel("Funnel1", 20.0));
    doc.execute(ShipCommand::set_funnel_oval("Funnel2", true));
    assert_eq!(snapshot(doc.ship()), before);
    assert_eq!(doc.commands().undo_depth(), 3);
}

#[test]
fn test_missing_targets_do_nothing() {
    let mut doc = Document::new(ship());
    let before = snapshot(doc.ship());
    doc.execute(ShipCommand::move_funnel("Funnel9", 1.0));
    doc.execute(ShipCommand::delete_point(7, 0));
    doc.execute(ShipCommand::delete_point(0, 10));
    doc.execute(ShipCommand::add_point(0, 10, Point::new(0.0, 0.0)));
    assert_eq!(snapshot(doc.ship()), before);
    while doc.undo() {}
    assert_eq!(snapshot(doc.ship()), before);
}

#[test]
fn test_new_command_clears_redo() {
    let mut doc = Document::new(ship());
    doc.execute(ShipCommand::move_funnel("Funnel1", 1.0));
    doc.execute(ShipCommand::set_fill(0, false));
    doc.undo();
    doc.execute(ShipCommand::delete_point(1, 0));

    let names: Vec<&str> = doc.commands().undo_history().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Move Funnel", "Delete Point"]);
    assert!(!doc.commands().can_redo());
    assert!(!doc.redo());
}

#[test]
fn test_undo_sequence_restores_original() {
    let mut doc = Document::new(ship());
    let before = snapshot(doc.ship());
    doc.execute(ShipCommand::add_point(0, 3, Point::new(-1.0, 5.0)));
    doc.execute(ShipCommand::update_point(0, 0, Point::new(0.0, -25.0)));
    doc.execute(ShipCommand::apply_symmetry(0));
    doc.execute(ShipCommand::delete_point(0, 2));
    doc.execute(ShipCommand::set_fill(1, true));
    let edited = snapshot(doc.ship());

    while doc.undo() {}
    assert_eq!(snapshot(doc.ship()), before);
    while doc.redo() {}
    assert_eq!(snapshot(doc.ship()), edited);
}
