//! Item -> Setpoint Translator
//!
//! Projects the active navigator item into the `current` slot of the
//! setpoint triplet: position and yaw are copied, loiter geometry is
//! normalized (magnitude plus direction), and the setpoint type is
//! selected per airframe and arming state.

use libm::fabsf;

use crate::nav::{
    NavCmd, NavigatorItem, NavigatorState, PositionSetpoint, SetpointType, NAV_EPSILON_POSITION,
};

use super::WaypointEngine;

impl WaypointEngine {
    /// Translate a navigator item into a position setpoint.
    ///
    /// Pure apart from reads of the navigator snapshot; the returned
    /// setpoint is always `valid`.
    pub fn item_to_setpoint(&self, item: &NavigatorItem, nav: &NavigatorState) -> PositionSetpoint {
        let mut sp = PositionSetpoint {
            x: item.x,
            y: item.y,
            z: item.z,
            yaw: item.yaw,
            yaw_valid: item.yaw.is_finite(),
            loiter_radius: if fabsf(item.loiter_radius) > NAV_EPSILON_POSITION {
                fabsf(item.loiter_radius)
            } else {
                nav.loiter_radius
            },
            loiter_direction: if item.loiter_radius > 0.0 { 1 } else { -1 },
            acceptance_radius: item.acceptance_radius,
            cruising_speed: nav.cruising_speed,
            cruising_throttle: nav.cruising_throttle,
            disable_mc_yaw_control: item.disable_mc_yaw,
            ..PositionSetpoint::default()
        };

        match item.nav_cmd {
            NavCmd::Idle => {
                sp.type_ = SetpointType::Idle;
            }

            NavCmd::Takeoff => {
                // Already flying: treat the takeoff like a regular position
                if nav.vehicle_status.armed && !nav.land_detected.landed {
                    sp.type_ = SetpointType::Position;
                } else {
                    sp.type_ = SetpointType::Takeoff;
                    sp.pitch_min = item.pitch_min;
                }
            }

            NavCmd::VtolTakeoff => {
                sp.type_ = SetpointType::Takeoff;

                if nav.vehicle_status.is_vtol && self.params().wv_takeoff_enabled {
                    sp.disable_mc_yaw_control = true;
                }
            }

            NavCmd::Land | NavCmd::VtolLand => {
                sp.type_ = SetpointType::Land;

                if nav.vehicle_status.is_vtol && self.params().wv_land_enabled {
                    sp.disable_mc_yaw_control = true;
                }
            }

            NavCmd::LoiterToAlt => {
                // Enter at the present altitude (respecting the minimum
                // clearance); the evaluator hands over the item altitude
                // once the loiter is established. Type stays Position.
                if self.params().loiter_min_alt > 0.0 {
                    sp.z = (nav.local_position.z - nav.home_position.z)
                        .min(-self.params().loiter_min_alt)
                        + nav.home_position.z;
                } else {
                    sp.z = nav.local_position.z;
                }
            }

            NavCmd::LoiterTimeLimit | NavCmd::LoiterUnlimited => {
                sp.type_ = SetpointType::Loiter;

                if nav.vehicle_status.is_vtol && self.params().wv_loiter_enabled {
                    sp.disable_mc_yaw_control = true;
                }
            }

            _ => {
                sp.type_ = SetpointType::Position;
            }
        }

        sp.valid = true;
        sp
    }
}
