//! Navigation Command Vocabulary
//!
//! The tag enum selecting per-item behavior. Discriminants match the
//! MAVLink MAV_CMD enumeration so items created from mission uploads keep
//! their on-wire values (the internal-only `Idle` tag uses 0, which
//! MAV_CMD leaves unassigned).

/// Navigation command carried by a [`NavigatorItem`](super::NavigatorItem).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum NavCmd {
    /// Hold on the ground / produce an idle setpoint (internal)
    Idle = 0,
    /// Fly to and pass through a 3D position
    Waypoint = 16,
    /// Circle the target indefinitely
    LoiterUnlimited = 17,
    /// Circle the target for a given dwell time
    LoiterTimeLimit = 19,
    /// Descend and land at the target
    Land = 21,
    /// Climb out from the current position to a target altitude
    Takeoff = 22,
    /// Circle while climbing/descending to the item altitude
    LoiterToAlt = 31,
    /// Reposition toward a followed target (onboard follow mode)
    DoFollowReposition = 33,
    /// VTOL takeoff (multirotor climb-out)
    VtolTakeoff = 84,
    /// VTOL landing
    VtolLand = 85,
    /// Hold position for a given time
    Delay = 93,
    /// Change cruise speed (action)
    DoChangeSpeed = 178,
    /// Set a servo output (action)
    DoSetServo = 183,
    /// Marker for the start of a landing sequence
    DoLandStart = 189,
    /// Set a region of interest (action)
    DoSetRoi = 201,
    /// Digital camera control (action)
    DoDigicamControl = 203,
    /// Configure a gimbal mount (action)
    DoMountConfigure = 204,
    /// Point a gimbal mount (action)
    DoMountControl = 205,
    /// Camera trigger by distance (action)
    DoSetCamTriggDist = 206,
    /// Camera trigger by interval (action)
    DoSetCamTriggInterval = 214,
    /// Select photo/video camera mode (action)
    SetCameraMode = 530,
    /// Start still-image capture (action)
    ImageStartCapture = 2000,
    /// Stop still-image capture (action)
    ImageStopCapture = 2001,
    /// Enable/disable the camera trigger (action)
    DoTriggerControl = 2003,
    /// Start video capture (action)
    VideoStartCapture = 2500,
    /// Stop video capture (action)
    VideoStopCapture = 2501,
    /// Command a VTOL transition (action with propagation delay)
    DoVtolTransition = 3000,
}

impl NavCmd {
    /// On-wire MAV_CMD value.
    pub fn value(self) -> u16 {
        self as u16
    }

    /// Whether this command describes a 3D position the vehicle flies to,
    /// as opposed to an immediate action.
    ///
    /// Positional items are driven entirely through the setpoint path;
    /// [`issue_command`](crate::engine::WaypointEngine::issue_command)
    /// ignores them.
    pub fn contains_position(self) -> bool {
        matches!(
            self,
            NavCmd::Waypoint
                | NavCmd::LoiterUnlimited
                | NavCmd::LoiterTimeLimit
                | NavCmd::LoiterToAlt
                | NavCmd::Land
                | NavCmd::Takeoff
                | NavCmd::VtolTakeoff
                | NavCmd::VtolLand
        )
    }
}

impl From<NavCmd> for u16 {
    fn from(cmd: NavCmd) -> u16 {
        cmd.value()
    }
}
