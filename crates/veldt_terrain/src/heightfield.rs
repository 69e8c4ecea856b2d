//! # HeightField
//!
//! The bounded, origin-centered elevation grid and its query API.
//!
//! Elevation is three octaves of seeded simplex noise with a radial blend
//! that flattens the settlement clearing to exactly zero and ramps the noise
//! back in across a transition band. Built once at world creation; immutable
//! afterwards, so queries are safe to issue from anywhere.

use thiserror::Error;
use veldt_shared::Vec2;

use crate::noise::{SimplexNoise, WorldSeed};

/// Derivation purpose for the elevation noise stream.
const ELEVATION_STREAM: u64 = 0x45;

/// Octave count for elevation noise.
const OCTAVES: u32 = 3;
/// Amplitude decay per octave.
const PERSISTENCE: f64 = 0.5;
/// Frequency growth per octave.
const LACUNARITY: f64 = 2.0;

/// Errors raised for invalid terrain construction parameters.
///
/// These indicate a caller bug, not a runtime condition: a world cannot be
/// half-built, so construction refuses outright.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    /// Grid size of zero cells.
    #[error("terrain grid size must be at least 1, got {0}")]
    GridSizeZero(usize),

    /// Seed phrase was empty or whitespace.
    #[error("seed phrase must not be empty")]
    EmptySeed,

    /// Clearing transition band must have positive width.
    #[error("clearing band width must be positive, got {0}")]
    InvalidBandWidth(f32),
}

/// Parameters for generating a [`HeightField`].
#[derive(Clone, Debug)]
pub struct TerrainParams {
    /// Grid side length `N`; the field covers `N x N` cells centered on the
    /// origin.
    pub size: usize,
    /// Seed phrase; hashed into the numeric world seed.
    pub seed: String,
    /// Center of the settlement clearing in world coordinates.
    pub clearing_center: Vec2,
    /// Radius inside which elevation is forced to exactly zero.
    pub clearing_radius: f32,
    /// Width of the annulus over which noise ramps back to full strength.
    pub clearing_band: f32,
    /// Peak elevation of the noise contribution.
    pub base_amplitude: f32,
    /// Spatial frequency of the first octave.
    pub base_frequency: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            size: 128,
            seed: "veldt".to_string(),
            clearing_center: Vec2::ZERO,
            clearing_radius: 18.0,
            clearing_band: 10.0,
            base_amplitude: 6.0,
            base_frequency: 0.05,
        }
    }
}

/// The procedural elevation grid.
///
/// World coordinates map to grid cells via `floor(coord + N/2)`; cell
/// `(0, 0)` sits at world `(-N/2, -N/2)`. Queries outside the grid return
/// the fallback elevation `0.0` rather than failing.
#[derive(Debug, PartialEq)]
pub struct HeightField {
    /// Side length of the grid.
    size: usize,
    /// Half the side length, precomputed for coordinate translation.
    half: f32,
    /// Row-major elevation samples, `size * size` entries.
    samples: Vec<f32>,
    /// Seed the field was generated from.
    seed: WorldSeed,
    /// Clearing center in world coordinates.
    clearing_center: Vec2,
    /// Clearing radius in world units.
    clearing_radius: f32,
}

impl HeightField {
    /// Elevation returned for queries outside the grid.
    pub const FALLBACK_HEIGHT: f32 = 0.0;

    /// Generates the field from `params`.
    ///
    /// Deterministic: the same parameters produce a bit-identical grid on
    /// every platform.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError`] when the parameters are unusable (zero grid,
    /// empty seed, non-positive band width).
    pub fn generate(params: &TerrainParams) -> Result<Self, TerrainError> {
        if params.size == 0 {
            return Err(TerrainError::GridSizeZero(params.size));
        }
        if params.seed.trim().is_empty() {
            return Err(TerrainError::EmptySeed);
        }
        if params.clearing_band <= 0.0 {
            return Err(TerrainError::InvalidBandWidth(params.clearing_band));
        }

        let seed = WorldSeed::from_phrase(&params.seed);
        let noise = SimplexNoise::new(seed.derive(ELEVATION_STREAM));

        let size = params.size;
        let half = size as f32 / 2.0;
        let mut samples = Vec::with_capacity(size * size);

        for iz in 0..size {
            for ix in 0..size {
                let x = ix as f32 - half;
                let z = iz as f32 - half;

                let raw = noise.octaved(
                    f64::from(x) * f64::from(params.base_frequency),
                    f64::from(z) * f64::from(params.base_frequency),
                    OCTAVES,
                    PERSISTENCE,
                    LACUNARITY,
                ) as f32
                    * params.base_amplitude;

                // Radial blend: flat inside the clearing, linear ramp across
                // the band, full noise outside. No cliff at the border.
                let dist = Vec2::new(x - params.clearing_center.x, z - params.clearing_center.y)
                    .length();
                let t = ((dist - params.clearing_radius) / params.clearing_band).clamp(0.0, 1.0);

                samples.push(raw * t);
            }
        }

        Ok(Self {
            size,
            half,
            samples,
            seed,
            clearing_center: params.clearing_center,
            clearing_radius: params.clearing_radius,
        })
    }

    /// Grid side length.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Seed the field was generated from.
    #[inline]
    #[must_use]
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Clearing center in world coordinates.
    #[inline]
    #[must_use]
    pub fn clearing_center(&self) -> Vec2 {
        self.clearing_center
    }

    /// Clearing radius in world units.
    #[inline]
    #[must_use]
    pub fn clearing_radius(&self) -> f32 {
        self.clearing_radius
    }

    /// Nearest-cell elevation at world `(x, z)`.
    ///
    /// Returns [`Self::FALLBACK_HEIGHT`] outside the grid.
    #[must_use]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let ix = (x + self.half).floor();
        let iz = (z + self.half).floor();
        if ix < 0.0 || iz < 0.0 {
            return Self::FALLBACK_HEIGHT;
        }
        let (ix, iz) = (ix as usize, iz as usize);
        if ix >= self.size || iz >= self.size {
            return Self::FALLBACK_HEIGHT;
        }
        self.samples[iz * self.size + ix]
    }

    /// Bilinearly interpolated elevation at world `(x, z)`.
    ///
    /// Continuous everywhere inside the grid: at the top/right border the
    /// upper interpolation corners clamp to the edge samples instead of
    /// falling back to nearest-cell lookup. Queries outside the grid defer
    /// to [`Self::height_at`] and therefore the fallback.
    #[must_use]
    pub fn interpolated_height_at(&self, x: f32, z: f32) -> f32 {
        let gx = x + self.half;
        let gz = z + self.half;
        let max = (self.size - 1) as f32;

        if gx < 0.0 || gz < 0.0 || gx > max || gz > max {
            return self.height_at(x, z);
        }

        let ix0 = gx.floor() as usize;
        let iz0 = gz.floor() as usize;
        let ix1 = (ix0 + 1).min(self.size - 1);
        let iz1 = (iz0 + 1).min(self.size - 1);
        let fx = gx - ix0 as f32;
        let fz = gz - iz0 as f32;

        let h00 = self.samples[iz0 * self.size + ix0];
        let h10 = self.samples[iz0 * self.size + ix1];
        let h01 = self.samples[iz1 * self.size + ix0];
        let h11 = self.samples[iz1 * self.size + ix1];

        let bottom = h00 + (h10 - h00) * fx;
        let top = h01 + (h11 - h01) * fx;
        bottom + (top - bottom) * fz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> TerrainParams {
        TerrainParams {
            size: 64,
            seed: "unit-test".to_string(),
            clearing_center: Vec2::ZERO,
            clearing_radius: 8.0,
            clearing_band: 6.0,
            base_amplitude: 5.0,
            base_frequency: 0.08,
        }
    }

    #[test]
    fn test_rejects_zero_grid() {
        let params = TerrainParams {
            size: 0,
            ..small_params()
        };
        assert_eq!(
            HeightField::generate(&params),
            Err(TerrainError::GridSizeZero(0))
        );
    }

    #[test]
    fn test_rejects_empty_seed() {
        let params = TerrainParams {
            seed: "   ".to_string(),
            ..small_params()
        };
        assert_eq!(HeightField::generate(&params), Err(TerrainError::EmptySeed));
    }

    #[test]
    fn test_rejects_zero_band() {
        let params = TerrainParams {
            clearing_band: 0.0,
            ..small_params()
        };
        assert_eq!(
            HeightField::generate(&params),
            Err(TerrainError::InvalidBandWidth(0.0))
        );
    }

    #[test]
    fn test_determinism_across_constructions() {
        let a = HeightField::generate(&small_params()).unwrap();
        let b = HeightField::generate(&small_params()).unwrap();

        for z in -32..32 {
            for x in -32..32 {
                assert_eq!(
                    a.height_at(x as f32, z as f32),
                    b.height_at(x as f32, z as f32),
                    "field must be bit-identical at ({x}, {z})"
                );
            }
        }
    }

    #[test]
    fn test_clearing_is_flat() {
        let field = HeightField::generate(&small_params()).unwrap();
        let radius = 8.0f32;

        for z in -8..=8 {
            for x in -8..=8 {
                let (xf, zf) = (x as f32, z as f32);
                if (xf * xf + zf * zf).sqrt() < radius {
                    assert_eq!(
                        field.height_at(xf, zf),
                        0.0,
                        "clearing must be flat at ({xf}, {zf})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_flat_spawn_scenario() {
        // Tiny world, clearing covering the origin: spawn must sit at zero.
        let params = TerrainParams {
            size: 8,
            seed: "test-v1".to_string(),
            clearing_center: Vec2::ZERO,
            clearing_radius: 3.0,
            clearing_band: 2.0,
            base_amplitude: 4.0,
            base_frequency: 0.1,
        };
        let field = HeightField::generate(&params).unwrap();
        assert_eq!(field.interpolated_height_at(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_out_of_bounds_fallback() {
        let field = HeightField::generate(&small_params()).unwrap();

        assert_eq!(field.height_at(1000.0, 0.0), HeightField::FALLBACK_HEIGHT);
        assert_eq!(field.height_at(0.0, -1000.0), HeightField::FALLBACK_HEIGHT);
        assert_eq!(
            field.interpolated_height_at(-1000.0, 1000.0),
            HeightField::FALLBACK_HEIGHT
        );
    }

    #[test]
    fn test_interpolation_matches_corners() {
        let field = HeightField::generate(&small_params()).unwrap();

        // At integer offsets from the grid origin the interpolated value is
        // the sample itself.
        for z in [-20.0f32, -3.0, 0.0, 7.0, 19.0] {
            for x in [-20.0f32, -3.0, 0.0, 7.0, 19.0] {
                let nearest = field.height_at(x, z);
                let interp = field.interpolated_height_at(x, z);
                assert!(
                    (nearest - interp).abs() < 1e-5,
                    "corner mismatch at ({x}, {z}): {nearest} vs {interp}"
                );
            }
        }
    }

    #[test]
    fn test_interpolation_continuity() {
        let field = HeightField::generate(&small_params()).unwrap();

        // March in small steps across several cells; adjacent samples must
        // never jump discontinuously.
        let mut prev = field.interpolated_height_at(12.0, 15.0);
        let mut x = 12.0f32;
        for _ in 0..400 {
            x += 0.01;
            let next = field.interpolated_height_at(x, 15.0);
            assert!(
                (next - prev).abs() < 0.5,
                "interpolation jump at x={x}: {prev} -> {next}"
            );
            prev = next;
        }
    }

    #[test]
    fn test_band_ramps_without_cliff() {
        let field = HeightField::generate(&small_params()).unwrap();

        // Walk outward along +x through the band: step-to-step change stays
        // bounded, so the clearing border has no wall.
        let mut prev = field.interpolated_height_at(7.5, 0.0);
        let mut x = 7.5f32;
        while x < 16.0 {
            x += 0.05;
            let next = field.interpolated_height_at(x, 0.0);
            assert!(
                (next - prev).abs() < 0.5,
                "cliff at clearing border, x={x}"
            );
            prev = next;
        }
    }
}
