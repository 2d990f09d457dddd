//! Waypoint Progression Engine
//!
//! The core of the navigator: decides how the active navigation item
//! turns into a position setpoint, mutates that setpoint in flight
//! (altitude capture, loiter switching, tangent exit), and reports when
//! the item is reached so the outer sequencer may advance.
//!
//! The engine is driven once per control tick. It owns only the active
//! item, its acceptance progress and the parameter block; telemetry
//! arrives as a [`NavigatorState`] snapshot, the setpoint triplet is
//! borrowed mutably for the tick, and effects leave through a
//! [`NavigatorPort`].

mod acceptance;
mod command;
mod progress;
mod synth;
mod translate;

pub use progress::ItemProgress;
pub use synth::FollowTarget;

use crate::nav::{NavigatorItem, NavigatorState};
use crate::parameters::MissionParams;

/// Microseconds to let a VTOL transition command propagate before the
/// transition status is trusted.
pub const VTOL_TRANSITION_SETTLE_US: u64 = 500_000;

/// The waypoint progression engine.
///
/// Holds the active navigator item and its acceptance progress. The
/// outer sequencer activates items with [`set_item`](Self::set_item),
/// polls [`is_item_reached`](Self::is_item_reached) each tick, and uses
/// the synthesizer methods to inject derived items (loiter after
/// takeoff, land at home, ...).
pub struct WaypointEngine {
    item: NavigatorItem,
    progress: ItemProgress,
    params: MissionParams,
}

impl WaypointEngine {
    /// Create an engine with the given parameter block and an idle item.
    pub fn new(params: MissionParams) -> Self {
        Self {
            item: NavigatorItem::default(),
            progress: ItemProgress::default(),
            params,
        }
    }

    /// Activate a new item, resetting all acceptance progress.
    pub fn set_item(&mut self, item: NavigatorItem) {
        self.item = item;
        self.progress.reset();
    }

    /// The active item.
    pub fn item(&self) -> &NavigatorItem {
        &self.item
    }

    /// Acceptance progress of the active item.
    pub fn progress(&self) -> &ItemProgress {
        &self.progress
    }

    /// The parameter block the engine was built with.
    pub fn params(&self) -> &MissionParams {
        &self.params
    }

    /// Reload the parameter block (after a store update).
    pub fn update_params(&mut self, params: MissionParams) {
        self.params = params;
    }

    /// Clamp an item's altitude to the landing detector's ceiling.
    ///
    /// Applied before translation; with `alt_max <= 0` the ceiling is
    /// disabled.
    pub fn apply_limitation(&self, nav: &NavigatorState, item: &mut NavigatorItem) {
        let alt_max = nav.land_detected.alt_max;

        if alt_max > 0.0 && alt_max < -(item.z - nav.home_position.z) {
            item.z = -alt_max + nav.home_position.z;
        }
    }
}

impl Default for WaypointEngine {
    fn default() -> Self {
        Self::new(MissionParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::NavCmd;

    #[test]
    fn test_set_item_resets_progress() {
        let mut engine = WaypointEngine::default();
        engine.progress.waypoint_position_reached = true;
        engine.progress.waypoint_yaw_reached = true;
        engine.progress.time_wp_reached = 42;
        engine.progress.time_first_inside_orbit = 43;
        engine.progress.action_start = 44;

        engine.set_item(NavigatorItem::at(NavCmd::Waypoint, 1.0, 2.0, -3.0));

        assert_eq!(*engine.progress(), ItemProgress::default());
        assert_eq!(engine.item().nav_cmd, NavCmd::Waypoint);
    }

    #[test]
    fn test_update_params_takes_effect() {
        let mut engine = WaypointEngine::default();
        assert!(engine.params().yaw_timeout < 0.0);

        let mut params = MissionParams::default();
        params.yaw_timeout = 3.0;
        engine.update_params(params);
        assert_eq!(engine.params().yaw_timeout, 3.0);
    }

    #[test]
    fn test_apply_limitation_clamps_altitude() {
        let engine = WaypointEngine::default();
        let mut nav = NavigatorState::default();
        nav.land_detected.alt_max = 40.0;
        nav.home_position.z = 0.0;

        let mut item = NavigatorItem::at(NavCmd::Waypoint, 0.0, 0.0, -60.0);
        engine.apply_limitation(&nav, &mut item);
        assert_eq!(item.z, -40.0);
    }

    #[test]
    fn test_apply_limitation_leaves_compliant_item() {
        let engine = WaypointEngine::default();
        let mut nav = NavigatorState::default();
        nav.land_detected.alt_max = 40.0;

        let mut item = NavigatorItem::at(NavCmd::Waypoint, 0.0, 0.0, -30.0);
        engine.apply_limitation(&nav, &mut item);
        assert_eq!(item.z, -30.0);
    }

    #[test]
    fn test_apply_limitation_disabled_by_negative_ceiling() {
        let engine = WaypointEngine::default();
        let mut nav = NavigatorState::default();
        nav.land_detected.alt_max = -1.0;

        let mut item = NavigatorItem::at(NavCmd::Waypoint, 0.0, 0.0, -500.0);
        engine.apply_limitation(&nav, &mut item);
        assert_eq!(item.z, -500.0);
    }

    #[test]
    fn test_apply_limitation_respects_home_offset() {
        let engine = WaypointEngine::default();
        let mut nav = NavigatorState::default();
        nav.land_detected.alt_max = 40.0;
        nav.home_position.z = -10.0;

        // 60 m above home (z = -70 with home at -10) exceeds the 40 m cap
        let mut item = NavigatorItem::at(NavCmd::Waypoint, 0.0, 0.0, -70.0);
        engine.apply_limitation(&nav, &mut item);
        assert_eq!(item.z, -50.0);
    }
}
