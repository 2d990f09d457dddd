//! Acceptance Evaluator
//!
//! Per-tick decision whether the active navigator item is satisfied.
//! Alongside the boolean verdict this is where the in-flight setpoint
//! mutations live: fixed-wing altitude capture via loiter, the
//! loiter-to-altitude two-phase handover, and the tangent exit that
//! removes the crosstrack spike when leaving an orbit.

use core::f32::consts::FRAC_PI_2;

use libm::{asinf, atan2f, cosf, fabsf, sinf, sqrtf};
use nalgebra::Vector2;

use crate::geo::{bearing_to, horizontal_distance, radians, wrap_pi};
use crate::nav::{NavCmd, NavigatorPort, NavigatorState, PositionSetpointTriplet, SetpointType};
use crate::{log_debug, log_warn};

use super::{WaypointEngine, VTOL_TRANSITION_SETTLE_US};

impl WaypointEngine {
    /// Evaluate whether the active item is reached.
    ///
    /// Called once per control tick while an item is active. May mutate
    /// `triplet.current` (type, altitude, exit position, loiter fields)
    /// and the engine's progress state. All acceptance criteria must
    /// hold within the same tick: a late predicate failure clears the
    /// position and yaw flags again before returning.
    pub fn is_item_reached(
        &mut self,
        nav: &NavigatorState,
        triplet: &mut PositionSetpointTriplet,
        port: &mut dyn NavigatorPort,
        now_us: u64,
    ) -> bool {
        // Non-geometric items first
        match self.item.nav_cmd {
            NavCmd::DoSetServo => return true,

            NavCmd::Land | NavCmd::VtolLand => return nav.land_detected.landed,

            NavCmd::Idle | NavCmd::LoiterUnlimited => return false,

            NavCmd::DoLandStart
            | NavCmd::DoTriggerControl
            | NavCmd::DoDigicamControl
            | NavCmd::ImageStartCapture
            | NavCmd::ImageStopCapture
            | NavCmd::VideoStartCapture
            | NavCmd::VideoStopCapture
            | NavCmd::DoMountConfigure
            | NavCmd::DoMountControl
            | NavCmd::DoSetRoi
            | NavCmd::DoSetCamTriggDist
            | NavCmd::DoSetCamTriggInterval
            | NavCmd::SetCameraMode
            | NavCmd::DoChangeSpeed => return true,

            NavCmd::DoVtolTransition => {
                // Give the transition command time to propagate before
                // trusting the transition status.
                if now_us.saturating_sub(self.progress.action_start) > VTOL_TRANSITION_SETTLE_US
                    && !nav.vehicle_status.in_transition_mode
                {
                    self.progress.action_start = 0;
                    return true;
                }

                return false;
            }

            // 3D waypoint, evaluated geometrically below
            _ => {}
        }

        let rotary_wing = nav.vehicle_status.is_rotary_wing;
        let lpos = &nav.local_position;

        if !nav.land_detected.landed && !self.progress.waypoint_position_reached {
            let dist_xy = horizontal_distance(lpos.xy(), Vector2::new(self.item.x, self.item.y));
            let dist_z = fabsf(self.item.z - lpos.z);
            let dist = sqrtf(dist_xy * dist_xy + dist_z * dist_z);

            // Fixed-wing WAYPOINT: capture altitude by circling instead of
            // flying past the waypoint with an altitude error.
            if !rotary_wing && self.item.nav_cmd == NavCmd::Waypoint {
                if dist_z > 2.0 * nav.altitude_acceptance_radius
                    && dist_xy < 2.0 * nav.loiter_radius
                {
                    if triplet.current.type_ == SetpointType::Position {
                        triplet.current.type_ = SetpointType::Loiter;
                        triplet.current.loiter_radius = nav.loiter_radius;
                        triplet.current.loiter_direction = 1;
                        port.set_setpoint_triplet_updated();
                        log_debug!("altitude capture: holding in loiter");
                    }
                } else if triplet.current.type_ == SetpointType::Loiter
                    && dist_z < nav.loiter_radius
                    && dist_xy <= nav.loiter_radius * 1.2
                {
                    triplet.current.type_ = SetpointType::Position;
                    port.set_setpoint_triplet_updated();
                    log_debug!("altitude capture: resuming position tracking");
                }
            }

            if (self.item.nav_cmd == NavCmd::Takeoff || self.item.nav_cmd == NavCmd::VtolTakeoff)
                && rotary_wing
            {
                // Multicopter takeoff: only the altitude matters, and the
                // acceptance band must stay below the takeoff altitude so
                // climb-out procedures (landing gear etc.) actually run.
                let takeoff_alt = -self.item.z;
                let mut altitude_acceptance = nav.altitude_acceptance_radius;

                if takeoff_alt > 0.0 && takeoff_alt < altitude_acceptance {
                    altitude_acceptance = takeoff_alt / 2.0;
                }

                if lpos.z < self.item.z + altitude_acceptance {
                    self.progress.waypoint_position_reached = true;
                }
            } else if self.item.nav_cmd == NavCmd::Takeoff {
                // Fixed-wing takeoff uses the navigator acceptance radius
                if dist <= nav.acceptance_radius
                    && dist_z <= nav.altitude_acceptance_radius
                {
                    self.progress.waypoint_position_reached = true;
                }
            } else if !rotary_wing
                && (self.item.nav_cmd == NavCmd::LoiterUnlimited
                    || self.item.nav_cmd == NavCmd::LoiterTimeLimit)
            {
                // A fixed-wing loiter circles the target instead of flying
                // through it; reaching the orbit (plus margin) is enough.
                // Dwell time is handled after position and yaw.
                if dist <= nav.acceptance_radius_or(fabsf(self.item.loiter_radius) * 1.2)
                    && dist_z <= nav.altitude_acceptance_radius
                {
                    self.progress.waypoint_position_reached = true;
                } else {
                    self.progress.time_first_inside_orbit = 0;
                }
            } else if !rotary_wing && self.item.nav_cmd == NavCmd::LoiterToAlt {
                // The item altitude is only handed to the setpoint once the
                // initial loiter is established.
                if fabsf(triplet.current.z - self.item.z) >= f32::EPSILON {
                    if dist <= nav.acceptance_radius_or(fabsf(self.item.loiter_radius) * 1.2)
                        && dist_z <= nav.altitude_acceptance_radius
                    {
                        triplet.current.z = self.item.z;
                        port.set_setpoint_triplet_updated();
                    }
                } else if dist <= nav.acceptance_radius_or(fabsf(self.item.loiter_radius) * 1.2)
                    && dist_z <= nav.altitude_acceptance_radius
                {
                    self.progress.waypoint_position_reached = true;

                    // Exit heading points at the next item, if there is one
                    if self.item.force_heading {
                        if triplet.next.valid {
                            self.item.yaw = bearing_to(triplet.current.xy(), triplet.next.xy());
                            self.progress.waypoint_yaw_reached = false;
                        } else {
                            self.progress.waypoint_yaw_reached = true;
                        }
                    }
                }
            } else if self.item.nav_cmd == NavCmd::Delay {
                self.progress.waypoint_position_reached = true;
                self.progress.waypoint_yaw_reached = true;
                self.progress.time_wp_reached = now_us;
            } else {
                let mut acceptance_radius = nav.acceptance_radius_or(self.item.acceptance_radius);

                // A VTOL back-transition keeps considerable ground speed;
                // accept at the stopping distance plus reaction margin.
                if self.item.vtol_back_transition {
                    let velocity = sqrtf(lpos.vx * lpos.vx + lpos.vy * lpos.vy);

                    if self.params.back_trans_dec_mss > f32::EPSILON && velocity > f32::EPSILON {
                        acceptance_radius = velocity * velocity
                            / (2.0 * self.params.back_trans_dec_mss)
                            + self.params.reverse_delay * velocity;
                    }
                }

                if dist <= acceptance_radius && dist_z <= nav.altitude_acceptance_radius {
                    self.progress.waypoint_position_reached = true;
                }
            }

            // Stamp first position acceptance. Kept across the atomic
            // per-tick flag reset so the heading timeout is measured from
            // the first time the position held, not the latest.
            if self.progress.waypoint_position_reached && self.progress.time_wp_reached == 0 {
                self.progress.time_wp_reached = now_us;
            }
        }

        // Yaw acceptance, only once the position holds
        if self.progress.waypoint_position_reached && !self.progress.waypoint_yaw_reached {
            let wants_heading = rotary_wing
                || (self.item.nav_cmd == NavCmd::LoiterToAlt && self.item.force_heading);

            if wants_heading && self.item.yaw.is_finite() {
                // Rotary wings judge the heading estimate; fixed wings can
                // only turn by flying, so judge course over ground.
                let cog = if rotary_wing {
                    lpos.yaw
                } else {
                    atan2f(nav.global_velocity.vel_e, nav.global_velocity.vel_n)
                };

                let yaw_err = wrap_pi(self.item.yaw - cog);

                // A configured timeout makes non-forced headings optional
                if fabsf(yaw_err) < radians(self.params.yaw_err_deg)
                    || (self.params.yaw_timeout >= f32::EPSILON && !self.item.force_heading)
                {
                    self.progress.waypoint_yaw_reached = true;
                }

                if !self.progress.waypoint_yaw_reached
                    && self.item.force_heading
                    && self.params.yaw_timeout >= f32::EPSILON
                    && now_us.saturating_sub(self.progress.time_wp_reached)
                        >= (self.params.yaw_timeout * 1e6) as u64
                {
                    log_warn!("heading not reached before timeout, failing mission");
                    port.set_mission_failure("unable to reach heading within timeout");
                }
            } else {
                self.progress.waypoint_yaw_reached = true;
            }
        }

        // Dwell countdown starts once position and yaw both hold
        if self.progress.waypoint_position_reached && self.progress.waypoint_yaw_reached {
            if self.progress.time_first_inside_orbit == 0 {
                self.progress.time_first_inside_orbit = now_us;
            }

            let time_inside = self.item.effective_time_inside();

            if time_inside < f32::EPSILON
                || now_us.saturating_sub(self.progress.time_first_inside_orbit)
                    >= (time_inside * 1e6) as u64
            {
                // Leaving a loiter: snap the setpoint to the orbit's tangent
                // point toward the next item so the controller rolls out
                // without a crosstrack error spike.
                if self.item.loiter_exit_xtrack
                    && (self.item.nav_cmd == NavCmd::LoiterTimeLimit
                        || self.item.nav_cmd == NavCmd::LoiterToAlt)
                    && triplet.next.valid
                {
                    let range =
                        horizontal_distance(triplet.current.xy(), triplet.next.xy());

                    if range.is_finite() {
                        let mut bearing = bearing_to(triplet.current.xy(), triplet.next.xy());
                        let inner_angle = FRAC_PI_2 - asinf(self.item.loiter_radius / range);

                        if triplet.current.loiter_direction > 0 {
                            bearing -= inner_angle;
                        } else {
                            bearing += inner_angle;
                        }

                        // Ideal departure point on the orbit; undefined when
                        // the next item lies inside the circle.
                        if bearing.is_finite() {
                            triplet.current.x = triplet.current.loiter_radius * cosf(bearing);
                            triplet.current.y = triplet.current.loiter_radius * sinf(bearing);
                        }
                    }
                }

                return true;
            }
        }

        // All acceptance criteria must be met in the same iteration
        self.progress.waypoint_position_reached = false;
        self.progress.waypoint_yaw_reached = false;
        false
    }
}
