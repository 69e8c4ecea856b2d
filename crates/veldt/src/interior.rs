//! # Interior Rooms
//!
//! Builds the collidable set for the inside of a building: floor slab,
//! four walls with a doorway gap, and a fireplace block. Purely geometric;
//! the renderer dresses these bounds however it likes.
//!
//! Interiors live in their own local coordinate space: the room is centered
//! on the origin and the walkable floor surface sits at [`FLOOR_HEIGHT`].
//! The scene transition machine owns the mapping back to world coordinates.

use veldt_shared::{Vec3, EYE_HEIGHT};

use crate::collision::Aabb;
use crate::structures::{BuildingFootprint, EntranceSide, DOOR_WIDTH};

/// Height of the walkable interior floor surface.
pub const FLOOR_HEIGHT: f32 = 0.0;

/// Wall thickness (units).
const WALL_THICKNESS: f32 = 0.3;
/// Interior wall height (units).
const WALL_HEIGHT: f32 = 3.0;
/// Thickness of the floor slab below the surface (units).
const FLOOR_THICKNESS: f32 = 0.5;
/// How far inside the door the avatar spawns on entry (units).
const SPAWN_SETBACK: f32 = 1.2;

/// Builds the room's collidable set for a footprint.
///
/// The entrance wall is split around a doorway gap; every other wall is one
/// solid run. The fireplace sits against the wall opposite the door.
#[must_use]
pub fn build_room(footprint: &BuildingFootprint) -> Vec<Aabb> {
    let half_width = footprint.width * 0.5;
    let half_depth = footprint.depth * 0.5;

    let mut set = Vec::with_capacity(8);

    // Floor slab beneath the walkable surface.
    set.push(Aabb::new(
        Vec3::new(-half_width, -FLOOR_THICKNESS, -half_depth),
        Vec3::new(half_width, FLOOR_HEIGHT, half_depth),
    ));

    for side in EntranceSide::ALL {
        let with_door = side == footprint.entrance;
        wall_segments(side, half_width, half_depth, with_door, &mut set);
    }

    // Fireplace block against the wall opposite the door.
    let back = -footprint.entrance.normal();
    let fireplace_center = Vec3::new(
        back.x * (half_width - 0.8),
        0.6,
        back.z * (half_depth - 0.8),
    );
    set.push(Aabb::from_center_size(
        fireplace_center,
        Vec3::new(1.2, 1.2, 1.2),
    ));

    set
}

/// Appends the wall boxes for one side, with an optional doorway gap.
///
/// Handles both wall orientations through one axis-swap, so there is no
/// per-side position math.
fn wall_segments(
    side: EntranceSide,
    half_width: f32,
    half_depth: f32,
    with_door: bool,
    set: &mut Vec<Aabb>,
) {
    let normal = side.normal();
    let on_x = normal.x.abs() > 0.5;
    let (along, lateral) = if on_x {
        (half_width, half_depth)
    } else {
        (half_depth, half_width)
    };
    let sign = if on_x { normal.x } else { normal.z };

    // Wall slab occupies the strip just inside the room boundary.
    let near = sign * (along - WALL_THICKNESS);
    let far = sign * along;
    let (a0, a1) = (near.min(far), near.max(far));

    let spans: &[(f32, f32)] = if with_door {
        &[
            (-lateral, -DOOR_WIDTH * 0.5),
            (DOOR_WIDTH * 0.5, lateral),
        ]
    } else {
        &[(-lateral, lateral)]
    };

    for &(l0, l1) in spans {
        let aabb = if on_x {
            Aabb::new(
                Vec3::new(a0, FLOOR_HEIGHT, l0),
                Vec3::new(a1, WALL_HEIGHT, l1),
            )
        } else {
            Aabb::new(
                Vec3::new(l0, FLOOR_HEIGHT, a0),
                Vec3::new(l1, WALL_HEIGHT, a1),
            )
        };
        set.push(aabb);
    }
}

/// The interior door coordinate: inner face of the entrance wall, at floor
/// level. Exit interaction is a distance check against this fixed point.
#[must_use]
pub fn door_position(footprint: &BuildingFootprint) -> Vec3 {
    let normal = footprint.entrance.normal();
    let along = if normal.x.abs() > 0.5 {
        footprint.width * 0.5
    } else {
        footprint.depth * 0.5
    };
    normal * (along - WALL_THICKNESS)
}

/// Where the avatar appears on entry: just inside the door, eye at
/// standing height over the floor.
#[must_use]
pub fn spawn_position(footprint: &BuildingFootprint) -> Vec3 {
    let door = door_position(footprint);
    let inward = -footprint.entrance.normal();
    Vec3::new(
        door.x + inward.x * SPAWN_SETBACK,
        FLOOR_HEIGHT + EYE_HEIGHT,
        door.z + inward.z * SPAWN_SETBACK,
    )
}
