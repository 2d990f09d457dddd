//! Parameter Storage
//!
//! Bounded key-value store for runtime configuration. Persistence and
//! ground-station exposure are host concerns; this crate only reads the
//! store when building a parameter block.

use bitflags::bitflags;
use heapless::FnvIndexMap;
use heapless::String;

use super::error::ParameterError;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters (index map capacity, power of two)
pub const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Hidden from ground-station parameter listings
        const HIDDEN = 0b0000_0001;
        /// Cannot be modified at runtime
        const READ_ONLY = 0b0000_0010;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

/// One stored parameter: value plus metadata.
#[derive(Debug, Clone, Copy)]
struct ParamEntry {
    value: ParamValue,
    flags: ParamFlags,
}

/// Parameter store for configuration management.
#[derive(Default)]
pub struct ParameterStore {
    entries: FnvIndexMap<String<PARAM_NAME_LEN>, ParamEntry, MAX_PARAMS>,
    /// Needs persisting by the host
    dirty: bool,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
            dirty: false,
        }
    }

    fn key(name: &str) -> Result<String<PARAM_NAME_LEN>, ParameterError> {
        let mut key = String::new();
        key.push_str(name)
            .map_err(|_| ParameterError::InvalidConfig)?;
        Ok(key)
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        let key = Self::key(name).ok()?;
        self.entries.get(&key).map(|e| e.value)
    }

    /// Register a parameter with its default value and flags.
    ///
    /// Idempotent: an existing parameter keeps its current value.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        if self.entries.contains_key(&key) {
            return Ok(());
        }

        self.entries
            .insert(
                key,
                ParamEntry {
                    value: default_value,
                    flags,
                },
            )
            .map_err(|_| ParameterError::StoreFull)?;

        Ok(())
    }

    /// Set the value of a registered parameter.
    ///
    /// Marks the store dirty so the host knows to persist it.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = Self::key(name)?;

        let entry = self
            .entries
            .get_mut(&key)
            .ok_or(ParameterError::InvalidConfig)?;

        if entry.flags.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }

        entry.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no parameters
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the store has unsaved modifications
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after the host persisted the store
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
