//! Navigation Data Model
//!
//! The vocabulary the engine operates on: navigation commands, mission
//! items, the setpoint triplet consumed by the position controller,
//! telemetry snapshot records, and the seam to the outer navigator.

pub mod command;
pub mod item;
pub mod navigator;
pub mod setpoint;
pub mod telemetry;

pub use command::NavCmd;
pub use item::{NavigatorItem, Origin, ITEM_PARAM_SLOTS};
pub use navigator::{
    ActuatorControls, NavigatorPort, NavigatorState, VehicleCommand, VtolState,
    ACTUATOR_CHANNELS, ACTUATOR_GROUP_PAYLOAD,
};
pub use setpoint::{PositionSetpoint, PositionSetpointTriplet, SetpointType};
pub use telemetry::{GlobalVelocity, HomePosition, LandDetected, LocalPosition, VehicleStatus};

/// Positions and radii below this magnitude (meters) are treated as
/// "effectively zero" throughout the engine.
pub const NAV_EPSILON_POSITION: f32 = 0.001;
