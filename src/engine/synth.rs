//! Item Synthesizers
//!
//! Constructors for the navigator items the outer sequencer injects when
//! mission flow needs one that no mission file provided: loitering after
//! a takeoff, landing on command, idling on the ground, or chasing a
//! follow target. All synthesized items are tagged [`Origin::Onboard`].

use crate::log_info;
use crate::nav::{
    NavCmd, NavigatorItem, NavigatorPort, NavigatorState, Origin, PositionSetpointTriplet,
    VehicleCommand,
};

use super::WaypointEngine;

/// Geodetic position of a follow target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowTarget {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

/// Fallback clearance above a followed target (m), well above the
/// average height of a person.
const FOLLOW_MIN_CLEARANCE_M: f32 = 8.0;

/// Sentinel altitude for land items; the position controller ignores it
/// and descends by velocity instead.
const LAND_ALTITUDE_SENTINEL: f32 = 10_000.0;

impl WaypointEngine {
    /// Build a loiter item around the present position or setpoint.
    ///
    /// Landed vehicles get an idle item instead of a takeoff. The current
    /// setpoint is reused when the navigator says it is worth loitering
    /// at; otherwise the vehicle position is used and pushed up to
    /// `min_clearance` above the origin when one is given.
    pub fn set_loiter_item(
        &self,
        nav: &NavigatorState,
        triplet: &PositionSetpointTriplet,
        min_clearance: f32,
    ) -> NavigatorItem {
        if nav.land_detected.landed {
            return NavigatorItem {
                nav_cmd: NavCmd::Idle,
                origin: Origin::Onboard,
                ..NavigatorItem::default()
            };
        }

        let mut item = NavigatorItem {
            nav_cmd: NavCmd::LoiterUnlimited,
            yaw: f32::NAN,
            loiter_radius: nav.loiter_radius,
            acceptance_radius: nav.acceptance_radius,
            time_inside: 0.0,
            autocontinue: false,
            origin: Origin::Onboard,
            ..NavigatorItem::default()
        };

        if nav.can_loiter_at_sp && triplet.current.valid {
            item.x = triplet.current.x;
            item.y = triplet.current.y;
            item.z = triplet.current.z;
        } else {
            item.x = nav.local_position.x;
            item.y = nav.local_position.y;
            item.z = nav.local_position.z;

            if min_clearance > 0.0 && item.z > -min_clearance {
                item.z = -min_clearance;
            }
        }

        item
    }

    /// Build a reposition item toward a followed target.
    ///
    /// The target's geodetic position is projected into the local frame;
    /// the altitude is held `min_clearance` below home (at least the
    /// built-in person-safe clearance).
    pub fn set_follow_target_item(
        &self,
        nav: &NavigatorState,
        min_clearance: f32,
        target: FollowTarget,
        yaw: f32,
    ) -> NavigatorItem {
        let mut item = NavigatorItem {
            yaw,
            loiter_radius: nav.loiter_radius,
            acceptance_radius: nav.acceptance_radius,
            time_inside: 0.0,
            autocontinue: false,
            origin: Origin::Onboard,
            ..NavigatorItem::default()
        };

        if nav.land_detected.landed {
            item.nav_cmd = NavCmd::Idle;
        } else {
            item.nav_cmd = NavCmd::DoFollowReposition;

            let (x, y) = nav.local_reference.project(target.lat_deg, target.lon_deg);
            item.x = x;
            item.y = y;

            item.z = nav.home_position.z - min_clearance.max(FOLLOW_MIN_CLEARANCE_M);
        }

        item
    }

    /// Build a takeoff item: climb from the present position to `lpos_z`.
    pub fn set_takeoff_item(
        &self,
        nav: &NavigatorState,
        lpos_z: f32,
        min_pitch: f32,
    ) -> NavigatorItem {
        NavigatorItem {
            nav_cmd: NavCmd::Takeoff,
            x: nav.local_position.x,
            y: nav.local_position.y,
            z: lpos_z,
            yaw: nav.local_position.yaw,
            loiter_radius: nav.loiter_radius,
            pitch_min: min_pitch,
            autocontinue: false,
            origin: Origin::Onboard,
            ..NavigatorItem::default()
        }
    }

    /// Build a land item at the present position or at home.
    ///
    /// A VTOL still flying fixed-wing is commanded back to multirotor
    /// configuration first when forced landings are configured.
    pub fn set_land_item(
        &self,
        nav: &NavigatorState,
        port: &mut dyn NavigatorPort,
        at_current_location: bool,
    ) -> NavigatorItem {
        if nav.vehicle_status.is_vtol
            && !nav.vehicle_status.is_rotary_wing
            && self.params().force_vtol
        {
            log_info!("forcing multirotor configuration for landing");
            port.publish_vehicle_cmd(&VehicleCommand::vtol_transition_to_mc());
        }

        let mut item = NavigatorItem {
            nav_cmd: NavCmd::Land,
            z: LAND_ALTITUDE_SENTINEL,
            loiter_radius: nav.loiter_radius,
            acceptance_radius: nav.acceptance_radius,
            time_inside: 0.0,
            autocontinue: true,
            origin: Origin::Onboard,
            ..NavigatorItem::default()
        };

        if at_current_location {
            item.x = nav.local_position.x;
            item.y = nav.local_position.y;
            item.yaw = nav.local_position.yaw;
        } else {
            item.x = nav.home_position.x;
            item.y = nav.home_position.y;
            item.yaw = nav.home_position.yaw;
        }

        item
    }

    /// Build a waypoint pinned to the present position.
    pub fn set_current_position_item(&self, nav: &NavigatorState) -> NavigatorItem {
        NavigatorItem {
            nav_cmd: NavCmd::Waypoint,
            x: nav.local_position.x,
            y: nav.local_position.y,
            z: nav.local_position.z,
            yaw: f32::NAN,
            loiter_radius: nav.loiter_radius,
            acceptance_radius: nav.acceptance_radius,
            time_inside: 0.0,
            autocontinue: true,
            origin: Origin::Onboard,
            ..NavigatorItem::default()
        }
    }

    /// Build an idle item at home.
    pub fn set_idle_item(&self, nav: &NavigatorState) -> NavigatorItem {
        NavigatorItem {
            nav_cmd: NavCmd::Idle,
            x: nav.home_position.x,
            y: nav.home_position.y,
            z: nav.home_position.z,
            yaw: f32::NAN,
            loiter_radius: nav.loiter_radius,
            acceptance_radius: nav.acceptance_radius,
            time_inside: 0.0,
            autocontinue: true,
            origin: Origin::Onboard,
            ..NavigatorItem::default()
        }
    }
}
