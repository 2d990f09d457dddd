//! Navigator Item
//!
//! The value record describing one step of a mission: a position to fly
//! to, an action to perform, or a mode change. One canonical record is
//! used for both mission-file items and items synthesized onboard; the
//! [`Origin`] tag records which path produced it.

use super::command::NavCmd;

/// Number of generic MAV-style parameter slots on action items.
pub const ITEM_PARAM_SLOTS: usize = 7;

/// Where a navigator item came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Origin {
    /// Uploaded as part of a mission plan
    #[default]
    Mavlink,
    /// Synthesized onboard by the navigator
    Onboard,
}

/// One step of a mission.
///
/// Positions are local NED meters (z positive down, so altitude above
/// home is `-(z - home.z)`). `yaw` is radians with NaN meaning
/// "unspecified". The sign of `loiter_radius` encodes orbit direction
/// (positive clockwise); a magnitude below the navigation epsilon means
/// "use the navigator default".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigatorItem {
    /// Command selecting per-item behavior
    pub nav_cmd: NavCmd,
    /// Target north position (m)
    pub x: f32,
    /// Target east position (m)
    pub y: f32,
    /// Target down position (m, positive down)
    pub z: f32,
    /// Target yaw (rad), NaN = unspecified
    pub yaw: f32,
    /// Signed loiter radius (m); sign is orbit direction
    pub loiter_radius: f32,
    /// Horizontal acceptance radius (m); 0 = use default
    pub acceptance_radius: f32,
    /// Dwell time at the target before the item counts as reached (s)
    pub time_inside: f32,
    /// Require the yaw setpoint to actually be achieved
    pub force_heading: bool,
    /// On loiter exit, snap the setpoint to the tangent toward the next item
    pub loiter_exit_xtrack: bool,
    /// Minimum pitch during takeoff (rad)
    pub pitch_min: f32,
    /// Disable multicopter yaw control (weathervane phases)
    pub disable_mc_yaw: bool,
    /// Shrink the acceptance radius to the back-transition stopping distance
    pub vtol_back_transition: bool,
    /// Advance to the next item without operator confirmation
    pub autocontinue: bool,
    /// Provenance of this item
    pub origin: Origin,
    /// Generic parameter slots for action items
    pub params: [f32; ITEM_PARAM_SLOTS],
}

impl Default for NavigatorItem {
    fn default() -> Self {
        Self {
            nav_cmd: NavCmd::Idle,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            yaw: f32::NAN,
            loiter_radius: 0.0,
            acceptance_radius: 0.0,
            time_inside: 0.0,
            force_heading: false,
            loiter_exit_xtrack: false,
            pitch_min: 0.0,
            disable_mc_yaw: false,
            vtol_back_transition: false,
            autocontinue: false,
            origin: Origin::Mavlink,
            params: [0.0; ITEM_PARAM_SLOTS],
        }
    }
}

impl NavigatorItem {
    /// Create an item of the given command at a local-frame position,
    /// remaining fields defaulted.
    pub fn at(nav_cmd: NavCmd, x: f32, y: f32, z: f32) -> Self {
        Self {
            nav_cmd,
            x,
            y,
            z,
            ..Self::default()
        }
    }

    /// Effective dwell time for acceptance.
    ///
    /// Takeoff items never dwell regardless of their `time_inside` field.
    pub fn effective_time_inside(&self) -> f32 {
        if self.nav_cmd == NavCmd::Takeoff {
            0.0
        } else {
            self.time_inside
        }
    }
}
