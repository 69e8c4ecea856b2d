//! # VELDT Terrain
//!
//! Deterministic landscape generation for a bounded, reproducible world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed phrase always produces the same landscape
//! 2. **Bounded**: One fixed `N x N` elevation grid, origin centered
//! 3. **Immutable**: Built once at world creation; queries never mutate
//! 4. **Total**: Out-of-range queries return a defined fallback, never an error
//!
//! ## Core Components
//!
//! - `SimplexNoise`: seeded 2D noise generation
//! - `HeightField`: the elevation grid with a flattened settlement clearing
//!
//! ## Example
//!
//! ```rust,ignore
//! use veldt_terrain::{HeightField, TerrainParams};
//!
//! let field = HeightField::generate(&TerrainParams::default())?;
//!
//! // The settlement clearing is perfectly flat
//! assert_eq!(field.height_at(0.0, 0.0), 0.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod heightfield;
pub mod noise;

pub use heightfield::{HeightField, TerrainError, TerrainParams};
pub use noise::{SimplexNoise, WorldSeed};
