//! skytrail - Waypoint progression engine for autonomous aerial vehicles
//!
//! This crate contains the platform-agnostic core of a mission navigator:
//! given the active navigation item and a snapshot of vehicle telemetry, it
//! produces position setpoints for the flight-control loop and decides when
//! the item is reached so the outer sequencer may advance.
//!
//! # Design Principles
//!
//! - **Zero cfg**: no feature gates in logic modules; host tests run plain
//! - **Pure no_std**: bounded containers, `libm` for float math
//! - **Trait seams**: the host navigator is reached only through the
//!   [`nav::NavigatorPort`] trait and the [`nav::NavigatorState`] snapshot
//! - **Explicit time**: monotonic microseconds are passed into every tick,
//!   never sampled inside the engine
//!
//! # Modules
//!
//! - [`nav`]: navigation command vocabulary, items, setpoints, telemetry
//! - [`engine`]: acceptance evaluator, setpoint translator, item synthesizers
//! - [`geo`]: local-frame geometry and geodetic projection helpers
//! - [`parameters`]: parameter store and the engine's parameter block

#![no_std]

#[cfg(test)]
extern crate std;

pub mod engine;
pub mod geo;
pub mod logging;
pub mod nav;
pub mod parameters;
