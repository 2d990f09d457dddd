//! Per-Item Progress State
//!
//! Tracks how far the active navigator item has come through the
//! acceptance pipeline. All timestamps are monotonic microseconds with
//! `0` meaning "unset".

/// Acceptance progress for the active item.
///
/// Invariant maintained by the evaluator: `waypoint_yaw_reached` implies
/// `waypoint_position_reached`, and any predicate failing late in a tick
/// clears both flags again (acceptance must hold within one tick).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemProgress {
    /// Position acceptance holds
    pub waypoint_position_reached: bool,
    /// Yaw acceptance holds (only ever set after position)
    pub waypoint_yaw_reached: bool,
    /// When position acceptance first held (us, 0 = unset)
    pub time_wp_reached: u64,
    /// When position and yaw both first held (us, 0 = unset)
    pub time_first_inside_orbit: u64,
    /// When the current action command was issued (us, 0 = unset)
    pub action_start: u64,
}

impl ItemProgress {
    /// Clear all progress; called whenever a new item becomes active.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
