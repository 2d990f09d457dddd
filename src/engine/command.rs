//! Action Dispatch
//!
//! Turns an activated action item into its side effect: a servo frame on
//! the actuator bus or a generic vehicle command. Positional items are
//! driven entirely through the setpoint path and are ignored here.

use crate::nav::{
    ActuatorControls, NavCmd, NavigatorItem, NavigatorPort, VehicleCommand, ACTUATOR_CHANNELS,
    ACTUATOR_GROUP_PAYLOAD,
};
use crate::{log_info, log_warn};

use super::WaypointEngine;

/// Scale from a servo pulse width in the 900..2100 us range to a
/// normalized actuator value (1500 us maps to -0.75).
const SERVO_PULSE_SCALE: f32 = 1.0 / 2000.0;

impl WaypointEngine {
    /// Issue the side effect of an activated item.
    ///
    /// Positional items and the `DO_LAND_START` marker do nothing. Servo
    /// items publish an actuator frame; every other action is packed into
    /// a vehicle command and stamped as the start of the action for
    /// completion tracking (`DO_VTOL_TRANSITION` propagation delay).
    pub fn issue_command(
        &mut self,
        item: &NavigatorItem,
        port: &mut dyn NavigatorPort,
        now_us: u64,
    ) {
        if item.nav_cmd.contains_position() {
            return;
        }

        // only a marker in the mission plan
        if item.nav_cmd == NavCmd::DoLandStart {
            return;
        }

        if item.nav_cmd == NavCmd::DoSetServo {
            log_info!("servo set command");

            // params[0] selects the output channel, params[1] is the new
            // pulse width in microseconds
            let channel = item.params[0] as i32;
            let mut controls = ActuatorControls::new(now_us);

            if channel >= 0 && (channel as usize) < ACTUATOR_CHANNELS {
                controls.control[channel as usize] = SERVO_PULSE_SCALE * -item.params[1];
                port.publish_actuator_controls(ACTUATOR_GROUP_PAYLOAD, &controls);
            } else {
                log_warn!("servo channel out of range, ignoring");
            }
        } else {
            self.progress.action_start = now_us;
            port.publish_vehicle_cmd(&VehicleCommand::from_item(item));
        }
    }
}
