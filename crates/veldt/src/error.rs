//! # World Errors
//!
//! Construction-time failures only. The running simulation has no error
//! path: out-of-range queries return fallbacks, missing collidable context
//! means "no hit", and an unresolvable interact is a silent no-op. An `Err`
//! from this module always indicates a caller bug caught before the world
//! exists.

use thiserror::Error;
use veldt_terrain::TerrainError;

/// Errors raised while building a world from configuration.
#[derive(Error, Debug)]
pub enum WorldError {
    /// A configuration value fails validation.
    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),

    /// The configuration text is not valid TOML.
    #[error("configuration is not valid TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The terrain parameters were rejected by the generator.
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}
