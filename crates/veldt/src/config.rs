//! # World Configuration
//!
//! Startup parameters for world generation and simulation tuning.
//!
//! Loaded once from TOML before the world exists; never consulted again in
//! the hot path. Validation is strict: a config that passes `validate()`
//! builds a world, anything else is refused outright.

use serde::Deserialize;
use veldt_shared::{Vec2, WALK_SPEED};
use veldt_terrain::TerrainParams;

use crate::error::WorldError;

/// Complete world-generation and tuning configuration.
///
/// Every field has a default, so a TOML file only needs to override what it
/// cares about:
///
/// ```toml
/// seed = "northern-expedition"
/// building_count = 7
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Seed phrase; hashed into the numeric world seed.
    pub seed: String,
    /// Side length `N` of the elevation grid (world spans `N x N` units).
    pub grid_size: usize,
    /// Center of the settlement clearing in world coordinates.
    pub clearing_center: Vec2,
    /// Radius of the perfectly flat settlement clearing.
    pub clearing_radius: f32,
    /// Width of the annulus ramping noise back to full strength.
    pub clearing_band: f32,
    /// Peak elevation of the terrain noise.
    pub terrain_amplitude: f32,
    /// Spatial frequency of the first noise octave.
    pub terrain_frequency: f32,
    /// Number of buildings placed in the clearing.
    pub building_count: usize,
    /// Number of collidable tree trunks scattered outside the clearing.
    pub tree_count: usize,
    /// Avatar walking speed (units per second). Sprint shells scale this.
    pub walk_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: "veldt".to_string(),
            grid_size: 128,
            clearing_center: Vec2::ZERO,
            clearing_radius: 18.0,
            clearing_band: 10.0,
            terrain_amplitude: 6.0,
            terrain_frequency: 0.05,
            building_count: 6,
            tree_count: 80,
            walk_speed: WALK_SPEED,
        }
    }
}

impl WorldConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ConfigParse`] for malformed TOML or unknown
    /// fields, and [`WorldError::InvalidConfig`] when a value fails
    /// validation.
    pub fn from_toml_str(text: &str) -> Result<Self, WorldError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field for caller bugs.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.seed.trim().is_empty() {
            return Err(WorldError::InvalidConfig(
                "seed phrase must not be empty".to_string(),
            ));
        }
        if self.grid_size == 0 {
            return Err(WorldError::InvalidConfig(
                "grid_size must be at least 1".to_string(),
            ));
        }
        if self.clearing_radius <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "clearing_radius must be positive, got {}",
                self.clearing_radius
            )));
        }
        if self.clearing_band <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "clearing_band must be positive, got {}",
                self.clearing_band
            )));
        }
        if self.terrain_amplitude < 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "terrain_amplitude must not be negative, got {}",
                self.terrain_amplitude
            )));
        }
        if self.terrain_frequency <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "terrain_frequency must be positive, got {}",
                self.terrain_frequency
            )));
        }
        if self.walk_speed <= 0.0 {
            return Err(WorldError::InvalidConfig(format!(
                "walk_speed must be positive, got {}",
                self.walk_speed
            )));
        }
        Ok(())
    }

    /// Terrain generator parameters derived from this configuration.
    #[must_use]
    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams {
            size: self.grid_size,
            seed: self.seed.clone(),
            clearing_center: self.clearing_center,
            clearing_radius: self.clearing_radius,
            clearing_band: self.clearing_band,
            base_amplitude: self.terrain_amplitude,
            base_frequency: self.terrain_frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config = WorldConfig::from_toml_str(
            r#"
            seed = "toml-check"
            building_count = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, "toml-check");
        assert_eq!(config.building_count, 3);
        assert_eq!(config.grid_size, WorldConfig::default().grid_size);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = WorldConfig::from_toml_str("mystery_knob = 4");
        assert!(matches!(result, Err(WorldError::ConfigParse(_))));
    }

    #[test]
    fn test_empty_seed_is_rejected() {
        let result = WorldConfig::from_toml_str(r#"seed = "  ""#);
        assert!(matches!(result, Err(WorldError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_grid_is_rejected() {
        let config = WorldConfig {
            grid_size: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WorldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_non_positive_extents_are_rejected() {
        let mutations: [fn(&mut WorldConfig); 4] = [
            |c| c.clearing_radius = 0.0,
            |c| c.clearing_band = -1.0,
            |c| c.terrain_frequency = 0.0,
            |c| c.walk_speed = -2.0,
        ];
        for mutate in mutations {
            let mut config = WorldConfig::default();
            mutate(&mut config);
            assert!(
                matches!(config.validate(), Err(WorldError::InvalidConfig(_))),
                "mutation should have been rejected"
            );
        }
    }
}
