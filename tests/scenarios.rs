//! End-to-end scenarios for the waypoint progression engine.
//!
//! Each test drives the engine the way the outer navigator does: activate
//! an item, translate it into the setpoint triplet, then tick
//! `is_item_reached` with telemetry snapshots until the item completes.

use skytrail::engine::WaypointEngine;
use skytrail::nav::{
    ActuatorControls, NavCmd, NavigatorItem, NavigatorPort, NavigatorState,
    PositionSetpointTriplet, SetpointType, VehicleCommand,
};
use skytrail::parameters::{MissionParams, ParamValue, ParameterStore};

#[derive(Default)]
struct RecordingPort {
    triplet_updates: usize,
    commands: Vec<VehicleCommand>,
    actuator_frames: Vec<(u8, ActuatorControls)>,
    failures: Vec<String>,
}

impl NavigatorPort for RecordingPort {
    fn set_setpoint_triplet_updated(&mut self) {
        self.triplet_updates += 1;
    }

    fn publish_vehicle_cmd(&mut self, cmd: &VehicleCommand) {
        self.commands.push(*cmd);
    }

    fn publish_actuator_controls(&mut self, group: u8, controls: &ActuatorControls) {
        self.actuator_frames.push((group, *controls));
    }

    fn set_mission_failure(&mut self, reason: &str) {
        self.failures.push(String::from(reason));
    }
}

/// Multirotor takeoff accepts on altitude alone.
#[test]
fn multirotor_takeoff_altitude_only_acceptance() {
    let mut engine = WaypointEngine::default();
    engine.set_item(NavigatorItem {
        nav_cmd: NavCmd::Takeoff,
        z: -10.0,
        acceptance_radius: 2.0,
        ..NavigatorItem::default()
    });

    let mut nav = NavigatorState::default();
    nav.altitude_acceptance_radius = 1.0;
    nav.local_position.z = -9.3;
    // horizontal distance is irrelevant for a multicopter takeoff
    nav.local_position.x = 300.0;

    let mut triplet = PositionSetpointTriplet::default();
    let mut port = RecordingPort::default();

    assert!(engine.is_item_reached(&nav, &mut triplet, &mut port, 1_000_000));
}

/// Fixed-wing waypoint with a large altitude error is captured via loiter.
#[test]
fn fixed_wing_waypoint_altitude_capture() {
    let mut engine = WaypointEngine::default();
    engine.set_item(NavigatorItem {
        nav_cmd: NavCmd::Waypoint,
        x: 100.0,
        y: 0.0,
        z: -50.0,
        ..NavigatorItem::default()
    });

    let mut nav = NavigatorState::default();
    nav.vehicle_status.is_rotary_wing = false;
    nav.altitude_acceptance_radius = 5.0;
    nav.loiter_radius = 80.0;
    nav.local_position.z = -20.0;

    let mut triplet = PositionSetpointTriplet::default();
    triplet.current = engine.item_to_setpoint(engine.item(), &nav);
    assert_eq!(triplet.current.type_, SetpointType::Position);

    let mut port = RecordingPort::default();

    let reached = engine.is_item_reached(&nav, &mut triplet, &mut port, 1_000_000);
    assert!(!reached);
    assert_eq!(triplet.current.type_, SetpointType::Loiter);
    assert_eq!(port.triplet_updates, 1);

    // altitude captured while circling: the setpoint reverts to position
    nav.local_position.x = 60.0;
    nav.local_position.z = -48.0;
    let reached = engine.is_item_reached(&nav, &mut triplet, &mut port, 2_000_000);
    assert!(!reached);
    assert_eq!(triplet.current.type_, SetpointType::Position);
    assert_eq!(port.triplet_updates, 2);
}

/// VTOL transition completes after the propagation delay once the
/// transition status clears.
#[test]
fn vtol_transition_propagation_and_completion() {
    let t0 = 10_000_000;

    let mut engine = WaypointEngine::default();
    engine.set_item(NavigatorItem {
        nav_cmd: NavCmd::DoVtolTransition,
        params: [4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ..NavigatorItem::default()
    });

    let mut nav = NavigatorState::default();
    nav.vehicle_status.in_transition_mode = true;

    let mut triplet = PositionSetpointTriplet::default();
    let mut port = RecordingPort::default();

    // activation publishes the command and stamps the action start
    let item = *engine.item();
    engine.issue_command(&item, &mut port, t0);
    assert_eq!(port.commands.len(), 1);
    assert_eq!(engine.progress().action_start, t0);

    // 400 ms: still propagating
    assert!(!engine.is_item_reached(&nav, &mut triplet, &mut port, t0 + 400_000));

    // 600 ms, transition done
    nav.vehicle_status.in_transition_mode = false;
    assert!(engine.is_item_reached(&nav, &mut triplet, &mut port, t0 + 600_000));
    assert_eq!(engine.progress().action_start, 0);
}

/// A forced heading that cannot be reached fails the mission after the
/// configured timeout.
#[test]
fn forced_heading_timeout_fails_mission() {
    let mut store = ParameterStore::new();
    MissionParams::register_defaults(&mut store).unwrap();
    store.set("MIS_YAW_TMT", ParamValue::Float(2.0)).unwrap();
    store.set("MIS_YAW_ERR", ParamValue::Float(5.0)).unwrap();

    let mut engine = WaypointEngine::new(MissionParams::from_store(&store));
    engine.set_item(NavigatorItem {
        nav_cmd: NavCmd::Waypoint,
        z: -10.0,
        yaw: 0.0,
        force_heading: true,
        ..NavigatorItem::default()
    });

    let mut nav = NavigatorState::default();
    nav.local_position.z = -10.0;
    nav.local_position.yaw = std::f32::consts::FRAC_PI_2;

    let mut triplet = PositionSetpointTriplet::default();
    let mut port = RecordingPort::default();

    let t0 = 5_000_000;

    // ticking at 10 Hz with the heading stuck 90 degrees off
    let mut t = t0;
    while t < t0 + 2_000_000 {
        assert!(!engine.is_item_reached(&nav, &mut triplet, &mut port, t));
        assert!(port.failures.is_empty(), "failed early at t = {}", t);
        t += 100_000;
    }

    assert!(!engine.is_item_reached(&nav, &mut triplet, &mut port, t0 + 2_100_000));
    assert_eq!(port.failures, ["unable to reach heading within timeout"]);
}

/// Leaving a timed loiter snaps the setpoint to the tangent departure
/// point toward the next waypoint.
#[test]
fn loiter_tangent_exit_toward_next() {
    let mut engine = WaypointEngine::default();
    engine.set_item(NavigatorItem {
        nav_cmd: NavCmd::LoiterTimeLimit,
        x: 0.0,
        y: 0.0,
        z: -40.0,
        loiter_radius: 50.0,
        loiter_exit_xtrack: true,
        time_inside: 0.0,
        ..NavigatorItem::default()
    });

    let mut nav = NavigatorState::default();
    nav.vehicle_status.is_rotary_wing = false;
    nav.altitude_acceptance_radius = 5.0;
    nav.local_position.y = 50.0;
    nav.local_position.z = -40.0;

    let mut triplet = PositionSetpointTriplet::default();
    triplet.current = engine.item_to_setpoint(engine.item(), &nav);
    triplet.next.x = 200.0;
    triplet.next.y = 0.0;
    triplet.next.valid = true;

    let mut port = RecordingPort::default();

    assert!(engine.is_item_reached(&nav, &mut triplet, &mut port, 1_000_000));
    assert!((triplet.current.x - 12.5).abs() < 0.2, "x = {}", triplet.current.x);
    assert!((triplet.current.y + 48.4).abs() < 0.2, "y = {}", triplet.current.y);
}

/// The altitude limiter keeps items below the landing detector ceiling.
#[test]
fn altitude_cap_applied_before_translation() {
    let engine = WaypointEngine::default();
    let mut nav = NavigatorState::default();
    nav.land_detected.alt_max = 40.0;
    nav.home_position.z = 0.0;

    let mut item = NavigatorItem {
        nav_cmd: NavCmd::Waypoint,
        z: -60.0,
        ..NavigatorItem::default()
    };

    engine.apply_limitation(&nav, &mut item);
    assert_eq!(item.z, -40.0);

    // the resulting setpoint stays below the ceiling too
    let sp = engine.item_to_setpoint(&item, &nav);
    assert!(-(sp.z - nav.home_position.z) <= nav.land_detected.alt_max);
}

/// Servo items publish the documented pulse-to-normalized mapping.
#[test]
fn servo_mapping_round_trip() {
    let mut engine = WaypointEngine::default();
    let mut port = RecordingPort::default();

    for (pulse, expected) in [(1500.0, -0.75), (2000.0, -1.0), (1000.0, -0.5)] {
        let item = NavigatorItem {
            nav_cmd: NavCmd::DoSetServo,
            params: [1.0, pulse, 0.0, 0.0, 0.0, 0.0, 0.0],
            ..NavigatorItem::default()
        };
        engine.issue_command(&item, &mut port, 0);

        let (_, controls) = port.actuator_frames.last().unwrap();
        assert!((controls.control[1] - expected).abs() < 1e-6);
    }
}

/// A full takeoff-cruise-land progression driven like the outer
/// sequencer would.
#[test]
fn takeoff_waypoint_land_progression() {
    let mut engine = WaypointEngine::default();
    let mut nav = NavigatorState::default();
    let mut triplet = PositionSetpointTriplet::default();
    let mut port = RecordingPort::default();

    // takeoff to 20 m
    let takeoff = engine.set_takeoff_item(&nav, -20.0, 0.15);
    engine.set_item(takeoff);
    triplet.current = engine.item_to_setpoint(engine.item(), &nav);
    assert_eq!(triplet.current.type_, SetpointType::Takeoff);

    nav.local_position.z = -5.0;
    assert!(!engine.is_item_reached(&nav, &mut triplet, &mut port, 1_000_000));
    nav.local_position.z = -19.0;
    assert!(engine.is_item_reached(&nav, &mut triplet, &mut port, 2_000_000));

    // cruise to a waypoint
    nav.vehicle_status.armed = true;
    engine.set_item(NavigatorItem {
        nav_cmd: NavCmd::Waypoint,
        x: 120.0,
        y: 40.0,
        z: -20.0,
        acceptance_radius: 5.0,
        ..NavigatorItem::default()
    });
    triplet.rotate_current_to_previous();
    triplet.current = engine.item_to_setpoint(engine.item(), &nav);
    assert_eq!(triplet.current.type_, SetpointType::Position);
    assert!(triplet.previous.valid);

    assert!(!engine.is_item_reached(&nav, &mut triplet, &mut port, 3_000_000));
    nav.local_position.x = 118.0;
    nav.local_position.y = 39.0;
    assert!(engine.is_item_reached(&nav, &mut triplet, &mut port, 4_000_000));

    // land at the waypoint
    let land = engine.set_land_item(&nav, &mut port, true);
    engine.set_item(land);
    triplet.rotate_current_to_previous();
    triplet.current = engine.item_to_setpoint(engine.item(), &nav);
    assert_eq!(triplet.current.type_, SetpointType::Land);

    assert!(!engine.is_item_reached(&nav, &mut triplet, &mut port, 5_000_000));
    nav.land_detected.landed = true;
    assert!(engine.is_item_reached(&nav, &mut triplet, &mut port, 6_000_000));
}

/// Dwell requirement: with `time_inside` zero, acceptance completes in
/// the same tick both flags first hold.
#[test]
fn zero_dwell_completes_same_tick() {
    let mut engine = WaypointEngine::default();
    engine.set_item(NavigatorItem {
        nav_cmd: NavCmd::Waypoint,
        time_inside: 0.0,
        ..NavigatorItem::default()
    });

    let nav = NavigatorState::default();
    let mut triplet = PositionSetpointTriplet::default();
    let mut port = RecordingPort::default();

    assert!(engine.is_item_reached(&nav, &mut triplet, &mut port, 1_000_000));
}
