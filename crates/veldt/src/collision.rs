//! # Collision Index
//!
//! A flat, rebuildable registry of solid obstacles and the ray queries the
//! locomotion tick issues against it.
//!
//! Terrain is deliberately excluded: ground contact is answered by the
//! height field, so the index only ever holds placed objects (building
//! shells, tree trunks, interior walls, furniture). Scene transitions swap
//! the whole working set in and out; there is no persistent spatial
//! structure, only a bounding-sphere cull in front of the exact test.

use veldt_shared::Vec3;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box from its center and full extents.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Geometric center of the box.
    #[must_use]
    pub fn center(self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the corner-to-corner diagonal; the bounding-sphere radius.
    #[must_use]
    pub fn half_diagonal(self) -> f32 {
        (self.max - self.min).length() * 0.5
    }

    /// Checks overlap with another box.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Checks whether a point lies inside the box (inclusive).
    #[must_use]
    pub fn contains(self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Slab-method ray intersection.
    ///
    /// `direction` must be unit length. Returns the entry distance along the
    /// ray, or `None` beyond `max_distance`. An origin inside the box hits
    /// at distance zero.
    #[must_use]
    pub fn ray_hit(self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let o = origin.to_array();
        let d = direction.to_array();
        let lo = self.min.to_array();
        let hi = self.max.to_array();

        let mut t_enter = 0.0f32;
        let mut t_exit = max_distance;

        for axis in 0..3 {
            if d[axis].abs() < 1e-8 {
                // Ray parallel to this slab: inside or never.
                if o[axis] < lo[axis] || o[axis] > hi[axis] {
                    return None;
                }
            } else {
                let inv = 1.0 / d[axis];
                let mut t0 = (lo[axis] - o[axis]) * inv;
                let mut t1 = (hi[axis] - o[axis]) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_enter = t_enter.max(t0);
                t_exit = t_exit.min(t1);
                if t_enter > t_exit {
                    return None;
                }
            }
        }

        Some(t_enter)
    }
}

/// Stable identity of a registered collidable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CollidableId(u64);

/// A solid obstacle: identity plus bounds, nothing else.
///
/// Blocking is binary; the index does not know or care what the object
/// looks like.
#[derive(Clone, Copy, Debug)]
pub struct Collidable {
    /// Identity handed out at registration.
    pub id: CollidableId,
    /// World-space bounds.
    pub bounds: Aabb,
}

/// The queryable set of solid obstacles for the active scene.
///
/// Exactly one working set is live at a time: the exterior world set, or
/// the current interior room's set. Content generators register and
/// deregister their objects here; scene transitions exchange whole sets.
#[derive(Default)]
pub struct CollisionIndex {
    /// Flat list of active collidables. Tens of entries; O(n) queries.
    collidables: Vec<Collidable>,
    /// Next identity to hand out. Never reused, even across set swaps.
    next_id: u64,
}

impl CollisionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an obstacle and returns its identity.
    pub fn register(&mut self, bounds: Aabb) -> CollidableId {
        let id = CollidableId(self.next_id);
        self.next_id += 1;
        self.collidables.push(Collidable { id, bounds });
        id
    }

    /// Removes an obstacle by identity. Returns `false` if it was absent.
    pub fn deregister(&mut self, id: CollidableId) -> bool {
        let before = self.collidables.len();
        self.collidables.retain(|c| c.id != id);
        self.collidables.len() != before
    }

    /// Takes the entire working set, leaving the index empty.
    ///
    /// Used by scene transitions to park the exterior set while an interior
    /// is active. Identities survive the round trip.
    pub fn take_set(&mut self) -> Vec<Collidable> {
        std::mem::take(&mut self.collidables)
    }

    /// Replaces the working set wholesale, discarding the current one.
    pub fn replace_set(&mut self, set: Vec<Collidable>) {
        self.collidables = set;
    }

    /// Number of active collidables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collidables.len()
    }

    /// Checks whether the working set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collidables.is_empty()
    }

    /// Casts a ray and returns the nearest hit distance.
    ///
    /// `direction` must be unit length. An empty working set is "no hit",
    /// never an error. Each candidate is culled against its bounding sphere
    /// before the exact slab test; this query runs many times per tick.
    #[must_use]
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let mut nearest: Option<f32> = None;

        for collidable in &self.collidables {
            let reach = max_distance + collidable.bounds.half_diagonal();
            if origin.distance_squared(collidable.bounds.center()) > reach * reach {
                continue;
            }
            if let Some(distance) = collidable.bounds.ray_hit(origin, direction, max_distance) {
                if nearest.map_or(true, |d| distance < d) {
                    nearest = Some(distance);
                }
            }
        }

        nearest
    }
}
