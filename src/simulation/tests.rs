use glam::Vec3;

use super::*;
use crate::authoring::Verb;
use crate::error::{NotFoundError, ParseError};
use crate::orbit::solar_system::{EARTH_POS, ROCKET_POS};
use crate::orbit::{TransferPhase, TransferWindowDetector};
use crate::scene_graph::euler_degrees;

const TICK: f32 = 1.0 / 60.0;

fn simulation() -> Simulation {
    Simulation::new(&SimulationConfig::default())
}

fn assert_near(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn authored_object_moves_to_point() {
    let mut sim = simulation();

    let point = sim.handle_message("PNT A 1 2 3");
    assert_eq!(point, Ok(Dispatched::Authored(Verb::CreatePoint)));
    let object = sim.handle_message("OBJ box 0 0 0 1 1 1 0 0 0 cube.mdl matA matB 1");
    assert_eq!(object, Ok(Dispatched::Authored(Verb::CreateObject)));
    let moved = sim.handle_message("MOV box A");
    assert_eq!(moved, Ok(Dispatched::Authored(Verb::MoveToPoint)));

    let node = sim.registry().node("box").unwrap();
    assert_near(sim.scene().world_position(node), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn short_create_object_changes_nothing() {
    let mut sim = simulation();
    let nodes_before = sim.scene().len();

    let result = sim.handle_message("OBJ box 0 0");

    assert_eq!(
        result,
        Err(CommandError::Parse(ParseError::WrongArity {
            verb: "OBJ",
            expected: 14,
            found: 3,
        }))
    );
    assert_eq!(sim.scene().len(), nodes_before);
    assert_eq!(sim.registry().node_count(), 0);
    assert_eq!(sim.registry().point_count(), 0);
}

#[test]
fn unknown_point_reports_not_found() {
    let mut sim = simulation();
    let nodes_before = sim.scene().len();

    let result = sim.handle_message("ATP pawn nowhere 1 1 1 0 0 0 pawn.mdl red grey 1");

    let missing = NotFoundError::Point("nowhere".into());
    assert_eq!(result, Err(CommandError::NotFound(missing)));
    assert_eq!(sim.scene().len(), nodes_before);
}

#[test]
fn detector_fires_once_per_alignment() {
    let mut detector = TransferWindowDetector::new(44);
    let fired: Vec<_> = [40, 42, 44, 44, 46]
        .into_iter()
        .enumerate()
        .filter_map(|(tick, angle)| Some((tick, detector.observe(angle)?.ticket)))
        .collect();

    assert_eq!(fired, vec![(2, 1)]);
}

#[test]
fn second_window_launches() {
    let mut sim = simulation();
    let mut first_window_tick = None;

    for tick in 0..(20 * 60) {
        sim.tick(TICK);
        let state = sim.transfer().state();

        if state.ticket_count == 1 && first_window_tick.is_none() {
            first_window_tick = Some(tick);
            assert_eq!(state.phase, TransferPhase::AttachedOrigin);
        }
        if state.phase == TransferPhase::InTransit {
            assert_eq!(state.ticket_count, 2);
            assert!(first_window_tick.is_some());
            return;
        }
    }

    panic!("no launch within 20 simulated seconds");
}

#[test]
fn launched_vehicle_starts_from_origin() {
    let mut sim = simulation();
    let bodies = *sim.transfer().bodies();

    let mut last_origin = sim.scene().world_position(bodies.origin);
    for _ in 0..(20 * 60) {
        if sim.transfer().phase() != TransferPhase::AttachedOrigin {
            break;
        }
        last_origin = sim.scene().world_position(bodies.origin);
        sim.tick(TICK);
    }
    assert_eq!(sim.transfer().phase(), TransferPhase::InTransit);

    // The launch tick moved Earth first, then re-parented the vehicle at
    // Earth's new position; the transfer orbit has not turned yet.
    let vehicle = sim.scene().world_position(bodies.vehicle);
    let origin = sim.scene().world_position(bodies.origin);
    assert_near(vehicle, origin);
    assert!(vehicle.distance(last_origin) < 0.1);
}

#[test]
fn pause_freezes_orbits() {
    let mut sim = simulation();
    let earth = sim.frames().frame(EARTH_POS).unwrap();

    sim.tick(TICK);
    assert_eq!(sim.handle_message("p"), Ok(Dispatched::Control('p')));
    assert!(sim.is_paused());

    let before = sim.scene().world_position(earth);
    for _ in 0..30 {
        sim.tick(TICK);
    }
    assert_eq!(sim.scene().world_position(earth), before);

    sim.handle_message("p").unwrap();
    sim.tick(TICK);
    assert_ne!(sim.scene().world_position(earth), before);
}

#[test]
fn start_paused() {
    let mut sim = Simulation::new(&SimulationConfig {
        start_paused: true,
        ..SimulationConfig::default()
    });
    let earth = sim.frames().frame(EARTH_POS).unwrap();

    sim.tick(1.0);

    assert_near(sim.scene().world_position(earth), Vec3::new(5.0, 0.0, 0.0));
}

#[test]
fn rocket_view_rides_along() {
    let mut sim = simulation();
    let rocket = sim.frames().frame(ROCKET_POS).unwrap();

    assert_eq!(sim.handle_message("f"), Ok(Dispatched::Control('f')));
    sim.tick(TICK);

    let camera = sim.scene().world_position(sim.camera().node());
    let rocket_position = sim.scene().world_position(rocket);
    assert!((camera - rocket_position).length() > 0.5);
    assert!((camera - rocket_position).length() < 1.1);

    // The mount follows the rocket around the sun.
    for _ in 0..60 {
        sim.tick(TICK);
    }
    let moved = sim.scene().world_position(sim.camera().node());
    assert!(moved.distance(camera) > 1.0);
    assert!(moved.distance(sim.scene().world_position(rocket)) < 1.1);
}

#[test]
fn camera_moves_and_turns() {
    let mut sim = simulation();
    let node = sim.camera().node();
    let start = sim.scene().world_position(node);

    sim.handle_message("o").unwrap();
    // Up is relative to the camera, which starts pitched 60 degrees.
    let up = euler_degrees(Vec3::new(60.0, 0.0, 0.0)) * Vec3::Y * 5.0;
    assert_near(sim.scene().world_position(node), start + up);

    sim.handle_message("k").unwrap();
    sim.handle_message("k").unwrap();
    assert_eq!(sim.camera().yaw(), -60.0);
}

#[test]
fn visual_toggles() {
    let mut sim = simulation();

    sim.handle_message("b").unwrap();
    assert!(!sim.visuals().sky_enabled());
    sim.handle_message("*").unwrap();
    assert!(sim.visuals().sky_enabled());
    assert_eq!(sim.handle_message("y"), Ok(Dispatched::Control('y')));
}

#[test]
fn unknown_and_empty_messages_are_ignored() {
    let mut sim = simulation();
    let nodes_before = sim.scene().len();

    assert_eq!(sim.handle_message("x"), Ok(Dispatched::Ignored));
    assert_eq!(sim.handle_message(""), Ok(Dispatched::Ignored));
    assert_eq!(sim.handle_message("\0"), Ok(Dispatched::Ignored));

    assert_eq!(sim.scene().len(), nodes_before);
    assert!(!sim.is_paused());
}

#[test]
fn default_scene_reaches_destination() {
    let mut sim = simulation();
    let bodies = *sim.transfer().bodies();

    for _ in 0..(120 * 60) {
        sim.tick(TICK);
        if sim.transfer().phase() == TransferPhase::AttachedDestination {
            break;
        }
    }

    let state = sim.transfer().state();
    assert_eq!(state.phase, TransferPhase::AttachedDestination);
    assert_eq!(state.attached_frame, bodies.destination);

    let vehicle = sim.scene().get_object(bodies.vehicle).unwrap();
    assert_eq!(vehicle.parent_id, Some(bodies.destination));
    let destination = sim.scene().world_position(bodies.destination);
    assert_near(sim.scene().world_position(bodies.vehicle), destination);

    // Stays on the destination once attached.
    for _ in 0..60 {
        sim.tick(TICK);
    }
    assert_eq!(sim.transfer().phase(), TransferPhase::AttachedDestination);
    let destination = sim.scene().world_position(bodies.destination);
    assert_near(sim.scene().world_position(bodies.vehicle), destination);
}
