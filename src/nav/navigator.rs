//! Navigator Seam
//!
//! The contract between the engine and the outer navigator that hosts it.
//! Inputs arrive as one [`NavigatorState`] snapshot per tick; effects
//! leave through the [`NavigatorPort`] trait. The engine holds no
//! reference to its host, so there is no mutual ownership to manage and
//! host tests can drive the engine with a plain recording mock.

use crate::geo::MapReference;
use crate::nav::item::NavigatorItem;
use crate::nav::NAV_EPSILON_POSITION;

use super::command::NavCmd;
use super::telemetry::{GlobalVelocity, HomePosition, LandDetected, LocalPosition, VehicleStatus};

/// Actuator control group carrying payload/auxiliary channels.
pub const ACTUATOR_GROUP_PAYLOAD: u8 = 2;

/// Number of channels in one actuator control group.
pub const ACTUATOR_CHANNELS: usize = 8;

/// VTOL configuration states, MAV_VTOL_STATE on-wire values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum VtolState {
    Undefined = 0,
    TransitionToFw = 1,
    TransitionToMc = 2,
    Mc = 3,
    Fw = 4,
}

/// A generic vehicle command assembled from an action item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleCommand {
    /// MAV_CMD value
    pub command: u16,
    pub param1: f32,
    pub param2: f32,
    pub param3: f32,
    pub param4: f32,
    pub param5: f32,
    pub param6: f32,
    pub param7: f32,
}

impl VehicleCommand {
    /// Pack an action item's raw parameter slots into a command.
    pub fn from_item(item: &NavigatorItem) -> Self {
        Self {
            command: item.nav_cmd.value(),
            param1: item.params[0],
            param2: item.params[1],
            param3: item.params[2],
            param4: item.params[3],
            param5: item.params[4],
            param6: item.params[5],
            param7: item.params[6],
        }
    }

    /// Command an immediate transition to multirotor configuration.
    ///
    /// Published ahead of a forced landing on VTOL airframes.
    pub fn vtol_transition_to_mc() -> Self {
        Self {
            command: NavCmd::DoVtolTransition.value(),
            param1: VtolState::Mc as u8 as f32,
            ..Self::default()
        }
    }
}

/// One actuator control frame (normalized channel values).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActuatorControls {
    /// Monotonic timestamp (us)
    pub timestamp: u64,
    /// Normalized channel values, roughly [-1, +1]
    pub control: [f32; ACTUATOR_CHANNELS],
}

impl ActuatorControls {
    /// A zeroed frame stamped at `now_us`.
    pub fn new(now_us: u64) -> Self {
        Self {
            timestamp: now_us,
            control: [0.0; ACTUATOR_CHANNELS],
        }
    }
}

/// Outputs the engine may produce during a tick.
///
/// All methods are fire-and-forget and must not block; the host decides
/// how publishes reach their buses (and advertises channels lazily on
/// first use where its middleware needs that).
pub trait NavigatorPort {
    /// The engine mutated the setpoint triplet; the host should republish it.
    fn set_setpoint_triplet_updated(&mut self);

    /// Publish a generic vehicle command.
    fn publish_vehicle_cmd(&mut self, cmd: &VehicleCommand);

    /// Publish an actuator control frame on the given group.
    fn publish_actuator_controls(&mut self, group: u8, controls: &ActuatorControls);

    /// Report an unrecoverable mission-level failure to the sequencer.
    fn set_mission_failure(&mut self, reason: &str);
}

/// Immutable per-tick snapshot of everything the engine reads from its
/// host: telemetry plus the navigator's configured defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigatorState {
    pub local_position: LocalPosition,
    pub global_velocity: GlobalVelocity,
    pub home_position: HomePosition,
    pub land_detected: LandDetected,
    pub vehicle_status: VehicleStatus,
    /// Default loiter radius (m)
    pub loiter_radius: f32,
    /// Default horizontal acceptance radius (m)
    pub acceptance_radius: f32,
    /// Vertical acceptance radius (m)
    pub altitude_acceptance_radius: f32,
    /// Commanded cruise speed (m/s), negative = controller default
    pub cruising_speed: f32,
    /// Commanded cruise throttle [0, 1], negative = controller default
    pub cruising_throttle: f32,
    /// The current setpoint is a place worth loitering at
    pub can_loiter_at_sp: bool,
    /// Geodetic reference of the local frame
    pub local_reference: MapReference,
}

impl Default for NavigatorState {
    fn default() -> Self {
        Self {
            local_position: LocalPosition::default(),
            global_velocity: GlobalVelocity::default(),
            home_position: HomePosition::default(),
            land_detected: LandDetected::default(),
            vehicle_status: VehicleStatus::default(),
            loiter_radius: 50.0,
            acceptance_radius: 10.0,
            altitude_acceptance_radius: 3.0,
            cruising_speed: -1.0,
            cruising_throttle: -1.0,
            can_loiter_at_sp: false,
            local_reference: MapReference::new(0.0, 0.0),
        }
    }
}

impl NavigatorState {
    /// Effective acceptance radius: the requested one when it is
    /// meaningfully positive, the navigator default otherwise.
    pub fn acceptance_radius_or(&self, requested: f32) -> f32 {
        if requested >= NAV_EPSILON_POSITION {
            requested
        } else {
            self.acceptance_radius
        }
    }
}
