//! Parameter Management
//!
//! Bounded runtime configuration store plus the engine's typed parameter
//! block. Persistence and ground-station exposure live in the host.

pub mod error;
pub mod mission;
pub mod storage;

pub use error::ParameterError;
pub use mission::MissionParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
