//! # Simulation Tuning Constants
//!
//! Canonical values for locomotion and world interaction.
//!
//! **CRITICAL:** These values are baked into the binary. Worlds generated
//! under different constants are not guaranteed to feel identical.

// =============================================================================
// TICK CONFIGURATION
// =============================================================================

/// Simulation tick rate (ticks per second).
pub const TICK_RATE: u32 = 60;

/// Upper bound on a single tick's delta time (seconds).
///
/// Slow frames integrate one clamped step instead of a huge one. This bounds
/// the worst-case single-step error; it is a correctness measure.
pub const MAX_TICK_DELTA: f32 = 0.1;

// =============================================================================
// AVATAR BODY
// =============================================================================

/// Avatar standing height (units).
pub const AVATAR_HEIGHT: f32 = 1.8;

/// Eye height above the ground surface (units).
///
/// `AvatarState::position` is the eye point; a grounded avatar keeps its
/// eye exactly this far above the surface.
pub const EYE_HEIGHT: f32 = 1.6;

/// Horizontal collision radius (units).
pub const AVATAR_RADIUS: f32 = 0.4;

// =============================================================================
// LOCOMOTION
// =============================================================================

/// Gravity acceleration (units per second squared).
pub const GRAVITY: f32 = 24.0;

/// Maximum fall speed (units per second).
pub const TERMINAL_VELOCITY: f32 = 50.0;

/// Vertical velocity applied on jump (units per second).
pub const JUMP_IMPULSE: f32 = 8.5;

/// Walking speed (units per second). Sprint scales this externally.
pub const WALK_SPEED: f32 = 5.0;

/// Maximum terrain rise the avatar can climb in one tick (units).
///
/// The sole mechanism preventing the avatar from walking up near-vertical
/// terrain; there is no slope-normal geometry.
pub const SLOPE_THRESHOLD: f32 = 1.0;

/// Downward nudge applied when the head ray hits a ceiling (units).
pub const CEILING_NUDGE: f32 = 0.05;

// =============================================================================
// INTERACTION
// =============================================================================

/// Maximum distance at which the interact action reaches a door (units).
pub const INTERACT_RANGE: f32 = 3.0;

/// Outward offset along the entrance normal applied on building exit (units).
///
/// Keeps the restored avatar clear of the door so exit does not immediately
/// re-trigger entry.
pub const EXIT_CLEARANCE: f32 = 1.5;
