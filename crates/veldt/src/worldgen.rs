//! # World Generation
//!
//! Turns a validated configuration into the immutable world fixtures: the
//! height field, the structure registry, and the exterior collidable set.
//!
//! Placement is deterministic. The building and tree streams each draw
//! from their own seed derivation, so retuning one never reshuffles the
//! other, and the same seed phrase reproduces the same settlement on any
//! platform.

use std::f32::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use veldt_shared::{Vec2, Vec3};
use veldt_terrain::{HeightField, WorldSeed};

use crate::collision::Aabb;
use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::structures::{BuildingFootprint, EntranceSide, StructureRegistry};

/// Seed derivation purpose for building placement.
const PLACEMENT_STREAM: u64 = 0x50;
/// Seed derivation purpose for tree scatter.
const TREE_STREAM: u64 = 0x54;

/// Tree trunk collidable width (units).
const TRUNK_WIDTH: f32 = 0.6;
/// Tree trunk collidable height (units).
const TRUNK_HEIGHT: f32 = 3.0;
/// Margin kept between trees and the grid edge (units).
const TREE_MARGIN: f32 = 2.0;

/// The immutable world fixtures produced at generation time.
pub struct GeneratedWorld {
    /// The terrain elevation grid.
    pub height_field: HeightField,
    /// Every placed building footprint.
    pub registry: StructureRegistry,
    /// Bounds for the exterior collidable set: building shells and tree
    /// trunks. Terrain is answered by the height field, never by rays.
    pub exterior_collidables: Vec<Aabb>,
}

/// Generates the world fixtures from a configuration.
///
/// # Errors
///
/// Returns [`WorldError`] when the configuration fails validation or the
/// terrain parameters are rejected.
pub fn generate(config: &WorldConfig) -> Result<GeneratedWorld, WorldError> {
    config.validate()?;

    let height_field = HeightField::generate(&config.terrain_params())?;
    let seed = height_field.seed();

    let mut registry = StructureRegistry::new();
    let mut exterior_collidables = Vec::new();

    place_buildings(config, seed, &mut registry, &mut exterior_collidables);
    scatter_trees(config, seed, &height_field, &mut exterior_collidables);

    tracing::info!(
        seed = %config.seed,
        buildings = registry.len(),
        collidables = exterior_collidables.len(),
        "world fixtures generated"
    );

    Ok(GeneratedWorld {
        height_field,
        registry,
        exterior_collidables,
    })
}

/// Rings the clearing with buildings, every entrance facing the village
/// center.
fn place_buildings(
    config: &WorldConfig,
    seed: WorldSeed,
    registry: &mut StructureRegistry,
    exterior: &mut Vec<Aabb>,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.derive(PLACEMENT_STREAM).value());
    let center = config.clearing_center;
    let count = config.building_count;

    for slot in 0..count {
        // Even angular slots with a little jitter keep neighbors apart
        // without an overlap search.
        let base_angle = (slot as f32 / count as f32) * TAU;
        let angle = base_angle + rng.gen_range(-0.15..0.15);
        let ring = config.clearing_radius * rng.gen_range(0.55..0.75);

        let x = center.x + angle.cos() * ring;
        let z = center.y + angle.sin() * ring;

        let width: f32 = rng.gen_range(6.0..9.0);
        let depth: f32 = rng.gen_range(5.0..8.0);
        let height: f32 = rng.gen_range(3.0..4.5);

        let footprint = BuildingFootprint {
            // The clearing is flat at elevation zero, so every base sits
            // on the ground.
            center: Vec3::new(x, 0.0, z),
            width,
            depth,
            height,
            entrance: EntranceSide::facing(center.x - x, center.y - z),
        };

        registry.add(footprint);
        exterior.push(footprint.shell());
    }
}

/// Scatters collidable tree trunks outside the clearing band, rooted at
/// terrain height.
fn scatter_trees(
    config: &WorldConfig,
    seed: WorldSeed,
    field: &HeightField,
    exterior: &mut Vec<Aabb>,
) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.derive(TREE_STREAM).value());
    let half = config.grid_size as f32 / 2.0 - TREE_MARGIN;
    if half <= 0.0 {
        return;
    }
    let keep_out = config.clearing_radius + config.clearing_band;

    let mut placed = 0;
    let mut attempts = 0;
    let attempt_budget = config.tree_count * 8;

    while placed < config.tree_count && attempts < attempt_budget {
        attempts += 1;

        let x: f32 = rng.gen_range(-half..half);
        let z: f32 = rng.gen_range(-half..half);

        let from_center = Vec2::new(x - config.clearing_center.x, z - config.clearing_center.y);
        if from_center.length() < keep_out {
            continue;
        }

        let ground = field.height_at(x, z);
        exterior.push(Aabb::from_center_size(
            Vec3::new(x, ground + TRUNK_HEIGHT * 0.5, z),
            Vec3::new(TRUNK_WIDTH, TRUNK_HEIGHT, TRUNK_WIDTH),
        ));
        placed += 1;
    }

    tracing::debug!(placed, attempts, "tree scatter complete");
}
