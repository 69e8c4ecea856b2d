//! # Structure Registry
//!
//! The authoritative record of every placed building: position, extents and
//! entrance side, independent of whatever mesh the renderer assembles on
//! top. Filled once at world generation, immutable afterwards.
//!
//! Queries are O(number of buildings). Building counts are tens, so a flat
//! scan wins; a spatial index becomes worthwhile only if settlements grow
//! by orders of magnitude.

use veldt_shared::Vec3;

use crate::collision::Aabb;

/// Doorway opening width (units).
pub const DOOR_WIDTH: f32 = 1.4;
/// Doorway opening height (units).
pub const DOOR_HEIGHT: f32 = 2.2;
/// Interactable thickness of the door volume along its wall normal (units).
pub const DOOR_THICKNESS: f32 = 0.6;

/// Which wall of a building carries its entrance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntranceSide {
    /// Entrance faces +Z.
    PosZ,
    /// Entrance faces +X.
    PosX,
    /// Entrance faces -Z.
    NegZ,
    /// Entrance faces -X.
    NegX,
}

impl EntranceSide {
    /// All four sides, for iterating walls.
    pub const ALL: [Self; 4] = [Self::PosZ, Self::PosX, Self::NegZ, Self::NegX];

    /// Outward-facing unit normal of the entrance wall.
    #[must_use]
    pub fn normal(self) -> Vec3 {
        match self {
            Self::PosZ => Vec3::Z,
            Self::PosX => Vec3::X,
            Self::NegZ => -Vec3::Z,
            Self::NegX => -Vec3::X,
        }
    }

    /// The side whose normal points most along `(dx, dz)`.
    ///
    /// World generation uses this to aim every entrance at the village
    /// center. Ties go to the X axis.
    #[must_use]
    pub fn facing(dx: f32, dz: f32) -> Self {
        if dx.abs() >= dz.abs() {
            if dx >= 0.0 {
                Self::PosX
            } else {
                Self::NegX
            }
        } else if dz >= 0.0 {
            Self::PosZ
        } else {
            Self::NegZ
        }
    }
}

/// The axis-aligned volume a building occupies.
///
/// `center` is the middle of the base rectangle; the building spans
/// `[center.y, center.y + height]` vertically. Created at world generation
/// and never mutated.
#[derive(Clone, Copy, Debug)]
pub struct BuildingFootprint {
    /// Center of the base rectangle.
    pub center: Vec3,
    /// Extent along X.
    pub width: f32,
    /// Extent along Z.
    pub depth: f32,
    /// Vertical extent above `center.y`.
    pub height: f32,
    /// Which wall carries the door.
    pub entrance: EntranceSide,
}

impl BuildingFootprint {
    /// Half extent along the entrance normal's axis.
    fn half_along_entrance(&self) -> f32 {
        let n = self.entrance.normal();
        if n.x.abs() > 0.5 {
            self.width * 0.5
        } else {
            self.depth * 0.5
        }
    }

    /// Point-in-volume membership test.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        (point.x - self.center.x).abs() <= self.width * 0.5
            && (point.z - self.center.z).abs() <= self.depth * 0.5
            && point.y >= self.center.y
            && point.y <= self.center.y + self.height
    }

    /// Center of the doorway at ground level, on the entrance wall.
    ///
    /// One parametric offset along the entrance normal covers all four
    /// sides; there is no per-side position math anywhere else.
    #[must_use]
    pub fn door_position(&self) -> Vec3 {
        self.center + self.entrance.normal() * self.half_along_entrance()
    }

    /// The interactable volume of the doorway.
    ///
    /// Interact rays are tested against this box to resolve which building
    /// the player is asking to enter.
    #[must_use]
    pub fn door_volume(&self) -> Aabb {
        let n = self.entrance.normal();
        // Thin along the wall normal, door-sized in the other two axes.
        let size = Vec3::new(
            n.x.abs() * DOOR_THICKNESS + n.z.abs() * DOOR_WIDTH,
            DOOR_HEIGHT,
            n.z.abs() * DOOR_THICKNESS + n.x.abs() * DOOR_WIDTH,
        );
        let center = self.door_position() + Vec3::new(0.0, DOOR_HEIGHT * 0.5, 0.0);
        Aabb::from_center_size(center, size)
    }

    /// The solid shell registered as the building's exterior collidable.
    #[must_use]
    pub fn shell(&self) -> Aabb {
        Aabb::from_center_size(
            self.center + Vec3::new(0.0, self.height * 0.5, 0.0),
            Vec3::new(self.width, self.height, self.depth),
        )
    }
}

/// All placed building footprints.
#[derive(Default)]
pub struct StructureRegistry {
    footprints: Vec<BuildingFootprint>,
}

impl StructureRegistry {
    /// Creates an empty registry for world generation to fill.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a placed building.
    pub fn add(&mut self, footprint: BuildingFootprint) {
        self.footprints.push(footprint);
    }

    /// All recorded footprints, in placement order.
    #[must_use]
    pub fn footprints(&self) -> &[BuildingFootprint] {
        &self.footprints
    }

    /// Checks whether a point lies inside any building volume.
    #[must_use]
    pub fn is_inside(&self, point: Vec3) -> bool {
        self.footprint_at(point).is_some()
    }

    /// The footprint containing `point`, if any.
    #[must_use]
    pub fn footprint_at(&self, point: Vec3) -> Option<&BuildingFootprint> {
        self.footprints.iter().find(|f| f.contains(point))
    }

    /// Horizontal distance to the nearest building center.
    ///
    /// Telemetry helper for the debug overlay; `None` when no buildings
    /// exist.
    #[must_use]
    pub fn nearest_distance(&self, point: Vec3) -> Option<f32> {
        self.footprints
            .iter()
            .map(|f| f.center.horizontal_distance(point))
            .min_by(f32::total_cmp)
    }

    /// Number of recorded buildings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    /// Checks whether any buildings are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }
}
