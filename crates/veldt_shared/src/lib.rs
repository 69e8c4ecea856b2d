//! # VELDT Shared
//!
//! Math types and tuning constants used by every crate in the workspace.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - rendering or windowing crates
//! - async runtimes
//! - anything with a build script heavier than its job
//!
//! The simulation core and its presentation shells both consume these types.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use constants::{
    AVATAR_HEIGHT, AVATAR_RADIUS, CEILING_NUDGE, EXIT_CLEARANCE, EYE_HEIGHT, GRAVITY,
    INTERACT_RANGE, JUMP_IMPULSE, MAX_TICK_DELTA, SLOPE_THRESHOLD, TERMINAL_VELOCITY, TICK_RATE,
    WALK_SPEED,
};
pub use math::{Vec2, Vec3};
