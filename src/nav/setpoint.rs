//! Position Setpoint Triplet
//!
//! The (previous, current, next) tuple consumed by the position control
//! loop. The triplet is owned by the outer navigator; the engine's
//! translator writes `current` and the acceptance evaluator may mutate it
//! in flight (loiter/position switching, altitude capture, tangent exit).

use nalgebra::Vector2;

/// What kind of setpoint the control loop should fly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SetpointType {
    /// Fly to and through the position
    #[default]
    Position,
    /// Circle the position at `loiter_radius`
    Loiter,
    /// Climb out to the position
    Takeoff,
    /// Descend onto the position
    Land,
    /// Sit idle (on ground)
    Idle,
}

/// One slot of the setpoint triplet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionSetpoint {
    /// Setpoint kind
    pub type_: SetpointType,
    /// North position (m)
    pub x: f32,
    /// East position (m)
    pub y: f32,
    /// Down position (m, positive down)
    pub z: f32,
    /// Yaw (rad); only meaningful when `yaw_valid`
    pub yaw: f32,
    /// Whether `yaw` carries a commanded heading
    pub yaw_valid: bool,
    /// Loiter radius magnitude (m)
    pub loiter_radius: f32,
    /// Orbit direction: +1 clockwise, -1 counter-clockwise
    pub loiter_direction: i8,
    /// Horizontal acceptance radius (m)
    pub acceptance_radius: f32,
    /// Commanded cruise speed (m/s), negative = controller default
    pub cruising_speed: f32,
    /// Commanded cruise throttle [0, 1], negative = controller default
    pub cruising_throttle: f32,
    /// Minimum pitch during takeoff (rad)
    pub pitch_min: f32,
    /// Let the weathervane own yaw instead of the multicopter controller
    pub disable_mc_yaw_control: bool,
    /// Whether this slot holds a usable setpoint
    pub valid: bool,
}

impl Default for PositionSetpoint {
    fn default() -> Self {
        Self {
            type_: SetpointType::Position,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            yaw: f32::NAN,
            yaw_valid: false,
            loiter_radius: 0.0,
            loiter_direction: 1,
            acceptance_radius: 0.0,
            cruising_speed: -1.0,
            cruising_throttle: -1.0,
            pitch_min: 0.0,
            disable_mc_yaw_control: false,
            valid: false,
        }
    }
}

impl PositionSetpoint {
    /// Horizontal position as a 2-D vector.
    pub fn xy(&self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}

/// The (previous, current, next) setpoint tuple.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionSetpointTriplet {
    pub previous: PositionSetpoint,
    pub current: PositionSetpoint,
    pub next: PositionSetpoint,
}

impl PositionSetpointTriplet {
    /// Preserve the active setpoint as `previous` before loading a new
    /// `current`. No-op while `current` is invalid.
    pub fn rotate_current_to_previous(&mut self) {
        if self.current.valid {
            self.previous = self.current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_setpoint() {
        let sp = PositionSetpoint::default();
        assert_eq!(sp.type_, SetpointType::Position);
        assert!(!sp.valid);
        assert!(!sp.yaw_valid);
        assert!(sp.yaw.is_nan());
        assert_eq!(sp.loiter_direction, 1);
        assert_eq!(sp.cruising_speed, -1.0);
    }

    #[test]
    fn test_xy_accessor() {
        let sp = PositionSetpoint {
            x: 3.0,
            y: -4.0,
            ..PositionSetpoint::default()
        };
        assert_eq!(sp.xy(), Vector2::new(3.0, -4.0));
    }

    #[test]
    fn test_rotate_current_to_previous() {
        let mut triplet = PositionSetpointTriplet::default();
        triplet.current = PositionSetpoint {
            x: 1.0,
            y: 2.0,
            z: -3.0,
            yaw: 0.5,
            yaw_valid: true,
            valid: true,
            ..PositionSetpoint::default()
        };

        triplet.rotate_current_to_previous();
        assert_eq!(triplet.previous, triplet.current);
    }

    #[test]
    fn test_rotate_skips_invalid_current() {
        let mut triplet = PositionSetpointTriplet::default();
        triplet.previous = PositionSetpoint {
            x: 9.0,
            valid: true,
            ..PositionSetpoint::default()
        };
        // current is invalid; previous must be left alone
        triplet.rotate_current_to_previous();
        assert_eq!(triplet.previous.x, 9.0);
    }
}
