//! Mission Engine Parameter Definitions
//!
//! The parameter block consumed by the waypoint engine, following PX4
//! parameter naming so ground stations keep their familiar knobs.
//!
//! # Parameters
//!
//! - `MIS_LTRMIN_ALT` - Minimum loiter clearance above home (m), < 0 disables
//! - `MIS_YAW_TMT` - Heading acceptance timeout (s), < 0 disables
//! - `MIS_YAW_ERR` - Heading acceptance error (deg)
//! - `VT_WV_LND_EN` - Weathervane during VTOL landing
//! - `VT_WV_TKO_EN` - Weathervane during VTOL takeoff
//! - `VT_WV_LTR_EN` - Weathervane during VTOL loiter
//! - `NAV_FORCE_VT` - Force multirotor configuration before landing
//! - `VT_B_DEC_MSS` - Back-transition deceleration (m/s^2)
//! - `VT_B_REV_DEL` - Back-transition reaction delay (s)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

// --- Defaults ---

const DEFAULT_LOITER_MIN_ALT: f32 = -1.0;
const DEFAULT_YAW_TIMEOUT: f32 = -1.0;
const DEFAULT_YAW_ERR_DEG: f32 = 12.0;
const DEFAULT_WV_LAND_EN: bool = false;
const DEFAULT_WV_TAKEOFF_EN: bool = false;
const DEFAULT_WV_LOITER_EN: bool = false;
const DEFAULT_FORCE_VTOL: bool = true;
const DEFAULT_BACK_TRANS_DEC_MSS: f32 = 2.0;
const DEFAULT_REVERSE_DELAY: f32 = 0.0;

// --- Ranges ---

const MIN_LOITER_MIN_ALT: f32 = -1.0;
const MAX_LOITER_MIN_ALT: f32 = 80.0;

const MIN_YAW_TIMEOUT: f32 = -1.0;
const MAX_YAW_TIMEOUT: f32 = 20.0;

const MIN_YAW_ERR_DEG: f32 = 0.0;
const MAX_YAW_ERR_DEG: f32 = 90.0;

const MIN_BACK_TRANS_DEC: f32 = 0.0;
const MAX_BACK_TRANS_DEC: f32 = 10.0;

const MIN_REVERSE_DELAY: f32 = 0.0;
const MAX_REVERSE_DELAY: f32 = 10.0;

/// Engine parameters loaded from the parameter store.
#[derive(Debug, Clone, Copy)]
pub struct MissionParams {
    /// Minimum clearance above home while loitering (m); < 0 disables
    pub loiter_min_alt: f32,
    /// Heading acceptance timeout (s); < 0 disables.
    ///
    /// When set, headings that are not forced become optional: the item
    /// completes on position alone once the timeout machinery is armed.
    /// Forced headings that miss the timeout fail the mission instead.
    pub yaw_timeout: f32,
    /// Heading acceptance error (deg)
    pub yaw_err_deg: f32,
    /// Weathervane owns yaw during VTOL landing
    pub wv_land_enabled: bool,
    /// Weathervane owns yaw during VTOL takeoff
    pub wv_takeoff_enabled: bool,
    /// Weathervane owns yaw during VTOL loiter
    pub wv_loiter_enabled: bool,
    /// Transition to multirotor configuration before any landing
    pub force_vtol: bool,
    /// Expected deceleration during a VTOL back-transition (m/s^2)
    pub back_trans_dec_mss: f32,
    /// Reaction delay before the back-transition bites (s)
    pub reverse_delay: f32,
}

impl Default for MissionParams {
    fn default() -> Self {
        Self {
            loiter_min_alt: DEFAULT_LOITER_MIN_ALT,
            yaw_timeout: DEFAULT_YAW_TIMEOUT,
            yaw_err_deg: DEFAULT_YAW_ERR_DEG,
            wv_land_enabled: DEFAULT_WV_LAND_EN,
            wv_takeoff_enabled: DEFAULT_WV_TAKEOFF_EN,
            wv_loiter_enabled: DEFAULT_WV_LOITER_EN,
            force_vtol: DEFAULT_FORCE_VTOL,
            back_trans_dec_mss: DEFAULT_BACK_TRANS_DEC_MSS,
            reverse_delay: DEFAULT_REVERSE_DELAY,
        }
    }
}

impl MissionParams {
    /// Register the engine parameters with default values.
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "MIS_LTRMIN_ALT",
            ParamValue::Float(DEFAULT_LOITER_MIN_ALT),
            ParamFlags::empty(),
        )?;
        store.register(
            "MIS_YAW_TMT",
            ParamValue::Float(DEFAULT_YAW_TIMEOUT),
            ParamFlags::empty(),
        )?;
        store.register(
            "MIS_YAW_ERR",
            ParamValue::Float(DEFAULT_YAW_ERR_DEG),
            ParamFlags::empty(),
        )?;
        store.register(
            "VT_WV_LND_EN",
            ParamValue::Bool(DEFAULT_WV_LAND_EN),
            ParamFlags::empty(),
        )?;
        store.register(
            "VT_WV_TKO_EN",
            ParamValue::Bool(DEFAULT_WV_TAKEOFF_EN),
            ParamFlags::empty(),
        )?;
        store.register(
            "VT_WV_LTR_EN",
            ParamValue::Bool(DEFAULT_WV_LOITER_EN),
            ParamFlags::empty(),
        )?;
        store.register(
            "NAV_FORCE_VT",
            ParamValue::Bool(DEFAULT_FORCE_VTOL),
            ParamFlags::empty(),
        )?;
        store.register(
            "VT_B_DEC_MSS",
            ParamValue::Float(DEFAULT_BACK_TRANS_DEC_MSS),
            ParamFlags::empty(),
        )?;
        store.register(
            "VT_B_REV_DEL",
            ParamValue::Float(DEFAULT_REVERSE_DELAY),
            ParamFlags::empty(),
        )?;

        Ok(())
    }

    /// Load engine parameters from the store, clamping to valid ranges.
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            loiter_min_alt: load_float(
                store,
                "MIS_LTRMIN_ALT",
                DEFAULT_LOITER_MIN_ALT,
                MIN_LOITER_MIN_ALT,
                MAX_LOITER_MIN_ALT,
            ),
            yaw_timeout: load_float(
                store,
                "MIS_YAW_TMT",
                DEFAULT_YAW_TIMEOUT,
                MIN_YAW_TIMEOUT,
                MAX_YAW_TIMEOUT,
            ),
            yaw_err_deg: load_float(
                store,
                "MIS_YAW_ERR",
                DEFAULT_YAW_ERR_DEG,
                MIN_YAW_ERR_DEG,
                MAX_YAW_ERR_DEG,
            ),
            wv_land_enabled: load_bool(store, "VT_WV_LND_EN", DEFAULT_WV_LAND_EN),
            wv_takeoff_enabled: load_bool(store, "VT_WV_TKO_EN", DEFAULT_WV_TAKEOFF_EN),
            wv_loiter_enabled: load_bool(store, "VT_WV_LTR_EN", DEFAULT_WV_LOITER_EN),
            force_vtol: load_bool(store, "NAV_FORCE_VT", DEFAULT_FORCE_VTOL),
            back_trans_dec_mss: load_float(
                store,
                "VT_B_DEC_MSS",
                DEFAULT_BACK_TRANS_DEC_MSS,
                MIN_BACK_TRANS_DEC,
                MAX_BACK_TRANS_DEC,
            ),
            reverse_delay: load_float(
                store,
                "VT_B_REV_DEL",
                DEFAULT_REVERSE_DELAY,
                MIN_REVERSE_DELAY,
                MAX_REVERSE_DELAY,
            ),
        }
    }
}

/// Load a float parameter with clamping
fn load_float(store: &ParameterStore, name: &str, default: f32, min: f32, max: f32) -> f32 {
    match store.get(name) {
        Some(ParamValue::Float(v)) => v.clamp(min, max),
        Some(ParamValue::Int(v)) => (v as f32).clamp(min, max),
        _ => default,
    }
}

/// Load a boolean parameter; integers follow the nonzero-is-true convention
fn load_bool(store: &ParameterStore, name: &str, default: bool) -> bool {
    match store.get(name) {
        Some(ParamValue::Bool(v)) => v,
        Some(ParamValue::Int(v)) => v != 0,
        _ => default,
    }
}
