//! Telemetry Snapshot Types
//!
//! Read-only records the outer navigator captures once per control tick
//! and hands to the engine. The engine never subscribes to anything and
//! never blocks; whatever is in the snapshot is the truth for that tick.

use nalgebra::Vector2;

/// Local-frame position estimate (NED, meters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub vx: f32,
    pub vy: f32,
    pub vz: f32,
    /// Heading estimate (rad)
    pub yaw: f32,
}

impl Default for LocalPosition {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            vx: 0.0,
            vy: 0.0,
            vz: 0.0,
            yaw: 0.0,
        }
    }
}

impl LocalPosition {
    /// Horizontal position as a 2-D vector.
    pub fn xy(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}

/// Ground velocity from the global estimator (m/s).
///
/// Used for fixed-wing course-over-ground when judging heading
/// acceptance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobalVelocity {
    pub vel_n: f32,
    pub vel_e: f32,
}

/// Home position in the local frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HomePosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub yaw: f32,
}

/// Landing detector output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandDetected {
    /// Vehicle is on the ground
    pub landed: bool,
    /// Maximum permitted altitude above home (m); <= 0 disables the cap
    pub alt_max: f32,
}

impl Default for LandDetected {
    fn default() -> Self {
        Self {
            landed: false,
            alt_max: -1.0,
        }
    }
}

/// Vehicle status flags relevant to item progression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleStatus {
    /// Currently flying as a multirotor
    pub is_rotary_wing: bool,
    /// Airframe is a VTOL
    pub is_vtol: bool,
    /// A VTOL transition is in progress
    pub in_transition_mode: bool,
    /// Motors armed
    pub armed: bool,
}

impl Default for VehicleStatus {
    fn default() -> Self {
        Self {
            is_rotary_wing: true,
            is_vtol: false,
            in_transition_mode: false,
            armed: false,
        }
    }
}
