//! # Locomotion
//!
//! The per-tick avatar integrator: input intent, gravity, ground height and
//! obstacle rays in, new pose out.
//!
//! One routine serves both simulation modes. The caller parameterizes it
//! with a ground height function - the interpolated height field outdoors,
//! a constant floor indoors - so "where is solid ground" has exactly one
//! definition per mode and the integration logic is shared.
//!
//! There is no error path here. Out-of-bounds lookups return fallbacks and
//! a missing collidable set means "no hit"; a non-finite pose is a caller
//! bug caught by the tick-entry assertion, not a runtime condition.

use std::f32::consts::FRAC_1_SQRT_2;

use veldt_shared::{
    Vec2, Vec3, AVATAR_HEIGHT, AVATAR_RADIUS, CEILING_NUDGE, EYE_HEIGHT, GRAVITY, JUMP_IMPULSE,
    SLOPE_THRESHOLD, TERMINAL_VELOCITY,
};

use crate::collision::CollisionIndex;

/// Tolerance above the standing height before the avatar counts as
/// airborne. Absorbs float drift from the grounded snap.
const GROUND_TOLERANCE: f32 = 1e-3;

/// The eight horizontal sweep directions: four axes and four diagonals.
const SWEEP_DIRECTIONS: [Vec3; 8] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
    Vec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
    Vec3::new(-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
    Vec3::new(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
];

/// Which collidable scene the avatar currently inhabits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// The open world: terrain ground, exterior collidable set.
    Exterior,
    /// Inside a building: flat floor, the room's collidable set.
    Interior,
}

/// Movement intent for one tick, as supplied by the input shell.
///
/// `jump` is an edge trigger: the shell reports the press, not the held
/// state. `yaw` is the camera heading in radians; intent directions are
/// relative to it, with `yaw = 0` facing -Z.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputIntent {
    /// Move toward the view direction.
    pub forward: bool,
    /// Move away from the view direction.
    pub backward: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
    /// Jump was pressed this tick.
    pub jump: bool,
    /// Camera heading in radians.
    pub yaw: f32,
}

/// The avatar's complete physical state.
///
/// `position` is the eye point. Mutated exactly once per tick by [`step`];
/// `mode` is mutated only by the scene transition machine.
#[derive(Clone, Copy, Debug)]
pub struct AvatarState {
    /// Eye position in the active scene's coordinates.
    pub position: Vec3,
    /// Velocity (units per second). Horizontal components are transient
    /// intent; only the vertical component persists across ticks.
    pub velocity: Vec3,
    /// Standing height, feet to crown.
    pub height: f32,
    /// Horizontal collision radius.
    pub radius: f32,
    /// Whether a jump is currently available.
    pub can_jump: bool,
    /// Which scene the avatar inhabits.
    pub mode: Mode,
}

impl AvatarState {
    /// Creates an avatar standing at `position` (eye point) in the open
    /// world.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            height: AVATAR_HEIGHT,
            radius: AVATAR_RADIUS,
            can_jump: false,
            mode: Mode::Exterior,
        }
    }

    /// Center of the avatar's body; the origin for obstacle rays.
    #[must_use]
    pub fn body_center(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y - EYE_HEIGHT + self.height * 0.5,
            self.position.z,
        )
    }
}

/// Advances the avatar by one tick.
///
/// `ground` answers "height of the walkable surface at (x, z)" for the
/// active mode. `speed` is the current movement speed; sprint shells scale
/// it before calling.
///
/// The order of operations is load-bearing:
/// 1. vertical state (grounded vs. airborne, gravity)
/// 2. jump edge trigger
/// 3. horizontal intent, rotated by yaw
/// 4. slope veto against the candidate position
/// 5. vertical commit (snap to ground, or integrate and land)
/// 6. obstacle rays (8 horizontal + down + up), each resolving penetration
pub fn step<G>(
    dt: f32,
    intent: &InputIntent,
    speed: f32,
    avatar: &mut AvatarState,
    ground: G,
    index: &CollisionIndex,
) where
    G: Fn(f32, f32) -> f32,
{
    debug_assert!(
        avatar.position.is_finite() && avatar.velocity.is_finite(),
        "avatar pose must be finite"
    );

    let ground_here = ground(avatar.position.x, avatar.position.z);
    let airborne = avatar.position.y - ground_here > EYE_HEIGHT + GROUND_TOLERANCE;

    if airborne {
        avatar.velocity.y -= GRAVITY * dt;
        avatar.velocity.y = avatar.velocity.y.max(-TERMINAL_VELOCITY);
        avatar.can_jump = false;
    } else {
        if avatar.velocity.y < 0.0 {
            avatar.velocity.y = 0.0;
        }
        avatar.can_jump = true;
    }

    if intent.jump && avatar.can_jump {
        avatar.velocity.y = JUMP_IMPULSE;
        avatar.can_jump = false;
    }

    // Horizontal intent in world space.
    let wish = horizontal_wish(intent);
    let mut next_x = avatar.position.x + wish.x * speed * dt;
    let mut next_z = avatar.position.z + wish.y * speed * dt;

    // Slope veto: reject a climb steeper than the threshold in one tick.
    // This is the sole guard against walking up near-vertical terrain.
    if !airborne && wish != Vec2::ZERO {
        let climb = ground(next_x, next_z) - ground_here;
        if climb > SLOPE_THRESHOLD {
            next_x = avatar.position.x;
            next_z = avatar.position.z;
        }
    }

    // Vertical commit.
    let ascending = avatar.velocity.y > 0.0;
    let next_y = if !airborne && !ascending {
        // Grounded: stay glued to the surface across the step.
        ground(next_x, next_z) + EYE_HEIGHT
    } else {
        let integrated = avatar.position.y + avatar.velocity.y * dt;
        let surface = ground(next_x, next_z) + EYE_HEIGHT;
        if avatar.velocity.y <= 0.0 && integrated < surface {
            // Landing: never end a tick below the surface.
            avatar.velocity.y = 0.0;
            avatar.can_jump = true;
            surface
        } else {
            integrated
        }
    };

    avatar.position = Vec3::new(next_x, next_y, next_z);

    resolve_contacts(avatar, index);
}

/// Normalized horizontal movement direction in world space.
///
/// At `yaw = 0`, forward is -Z and right is +X; the whole frame rotates
/// with the camera heading.
fn horizontal_wish(intent: &InputIntent) -> Vec2 {
    let mut forward = 0.0;
    if intent.forward {
        forward += 1.0;
    }
    if intent.backward {
        forward -= 1.0;
    }
    let mut right = 0.0;
    if intent.right {
        right += 1.0;
    }
    if intent.left {
        right -= 1.0;
    }

    let local = Vec2::new(right, forward).normalized();
    if local == Vec2::ZERO {
        return Vec2::ZERO;
    }

    let (sin, cos) = intent.yaw.sin_cos();
    Vec2::new(
        sin * local.y + cos * local.x,
        -cos * local.y + sin * local.x,
    )
}

/// Pushes the avatar out of any obstacle it penetrates.
///
/// Eight horizontal rays handle walls, a downward ray makes standing on
/// furniture behave exactly like standing on terrain, and an upward ray
/// stops ascents at ceilings.
fn resolve_contacts(avatar: &mut AvatarState, index: &CollisionIndex) {
    for direction in &SWEEP_DIRECTIONS {
        let center = avatar.body_center();
        if let Some(hit) = index.cast_ray(center, *direction, avatar.radius) {
            let depth = avatar.radius - hit;
            avatar.position += *direction * -depth;
        }
    }

    let half_height = avatar.height * 0.5;
    let center = avatar.body_center();
    if let Some(hit) = index.cast_ray(center, -Vec3::Y, half_height) {
        avatar.position.y += half_height - hit;
        avatar.velocity.y = 0.0;
        avatar.can_jump = true;
    }

    let center = avatar.body_center();
    if index.cast_ray(center, Vec3::Y, avatar.radius).is_some() {
        if avatar.velocity.y > 0.0 {
            avatar.velocity.y = 0.0;
        }
        avatar.position.y -= CEILING_NUDGE;
    }
}

/// View direction from camera yaw and pitch, both in radians.
///
/// Interaction shells derive the interact ray from this.
#[must_use]
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Aabb;
    use std::f32::consts::FRAC_PI_2;

    const DT: f32 = 1.0 / 60.0;

    fn flat(_: f32, _: f32) -> f32 {
        0.0
    }

    fn standing_avatar() -> AvatarState {
        let mut avatar = AvatarState::at(Vec3::new(0.0, EYE_HEIGHT, 0.0));
        avatar.can_jump = true;
        avatar
    }

    fn forward_along_x() -> InputIntent {
        InputIntent {
            forward: true,
            yaw: FRAC_PI_2,
            ..InputIntent::default()
        }
    }

    #[test]
    fn test_grounded_avatar_stays_snapped_to_surface() {
        let index = CollisionIndex::new();
        let hillside = |x: f32, _: f32| x * 0.02;
        let mut avatar = standing_avatar();

        for _ in 0..120 {
            step(DT, &forward_along_x(), 5.0, &mut avatar, hillside, &index);
            let expected = hillside(avatar.position.x, avatar.position.z) + EYE_HEIGHT;
            assert!(
                (avatar.position.y - expected).abs() < 1e-4,
                "avatar unstuck from ground at x={}",
                avatar.position.x
            );
        }
        assert!(avatar.position.x > 5.0, "avatar never moved");
    }

    #[test]
    fn test_airborne_avatar_accelerates_downward() {
        let index = CollisionIndex::new();
        let mut avatar = AvatarState::at(Vec3::new(0.0, 30.0, 0.0));

        step(DT, &InputIntent::default(), 5.0, &mut avatar, flat, &index);
        let first = avatar.velocity.y;
        step(DT, &InputIntent::default(), 5.0, &mut avatar, flat, &index);

        assert!(first < 0.0);
        assert!(avatar.velocity.y < first, "gravity must accumulate");
        assert!(!avatar.can_jump);
    }

    #[test]
    fn test_fall_speed_is_clamped_to_terminal() {
        let index = CollisionIndex::new();
        let mut avatar = AvatarState::at(Vec3::new(0.0, 10_000.0, 0.0));

        for _ in 0..600 {
            step(DT, &InputIntent::default(), 5.0, &mut avatar, flat, &index);
        }
        assert!((avatar.velocity.y + TERMINAL_VELOCITY).abs() < 1e-3);
    }

    #[test]
    fn test_landing_never_ends_below_surface() {
        let index = CollisionIndex::new();
        let mut avatar = AvatarState::at(Vec3::new(0.0, 3.0, 0.0));

        for _ in 0..240 {
            step(DT, &InputIntent::default(), 5.0, &mut avatar, flat, &index);
            assert!(
                avatar.position.y >= EYE_HEIGHT - 1e-4,
                "avatar tunneled below ground"
            );
        }
        assert!((avatar.position.y - EYE_HEIGHT).abs() < 1e-4);
        assert!(avatar.can_jump);
    }

    #[test]
    fn test_jump_launches_and_cannot_double() {
        let index = CollisionIndex::new();
        let mut avatar = standing_avatar();
        let jump = InputIntent {
            jump: true,
            ..InputIntent::default()
        };

        step(DT, &jump, 5.0, &mut avatar, flat, &index);
        assert!(avatar.velocity.y > 0.0);
        assert!(!avatar.can_jump);
        let rising = avatar.velocity.y;

        // Holding jump while airborne must not re-trigger.
        step(DT, &jump, 5.0, &mut avatar, flat, &index);
        assert!(avatar.velocity.y < rising, "second impulse applied");
    }

    #[test]
    fn test_slope_veto_stops_forward_motion() {
        let index = CollisionIndex::new();
        // A 5-unit step wall directly ahead of x = 1.
        let step_wall = |x: f32, _: f32| if x > 1.0 { 5.0 } else { 0.0 };

        let mut avatar = standing_avatar();
        avatar.position.x = 0.95;

        step(DT, &forward_along_x(), 5.0, &mut avatar, step_wall, &index);

        assert!(
            (avatar.position.x - 0.95).abs() < 1e-6,
            "veto must yield zero net horizontal displacement"
        );
        assert!((avatar.position.z).abs() < 1e-6);
    }

    #[test]
    fn test_walkable_slope_is_not_vetoed() {
        let index = CollisionIndex::new();
        let gentle = |x: f32, _: f32| x * 0.1;
        let mut avatar = standing_avatar();

        step(DT, &forward_along_x(), 5.0, &mut avatar, gentle, &index);
        assert!(avatar.position.x > 0.0, "gentle slope must remain walkable");
    }

    #[test]
    fn test_wall_stops_avatar_at_collision_radius() {
        let mut index = CollisionIndex::new();
        // Wall face at x = 4.5, spanning the avatar's body vertically.
        index.register(Aabb::from_center_size(
            Vec3::new(5.0, 1.0, 5.0),
            Vec3::new(1.0, 2.0, 1.0),
        ));

        let mut avatar = standing_avatar();
        avatar.position = Vec3::new(3.5, EYE_HEIGHT, 5.0);

        for _ in 0..120 {
            step(DT, &forward_along_x(), 5.0, &mut avatar, flat, &index);
        }

        let gap = 4.5 - avatar.position.x;
        assert!(
            (gap - avatar.radius).abs() < 1e-3,
            "avatar must rest exactly one radius from the face, gap was {gap}"
        );
    }

    #[test]
    fn test_standing_on_furniture_restores_jump() {
        let mut index = CollisionIndex::new();
        // A table top at y = 1.
        index.register(Aabb::from_center_size(
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(2.0, 1.0, 2.0),
        ));

        // Dropped from above the table.
        let mut avatar = AvatarState::at(Vec3::new(0.0, 3.5, 0.0));
        for _ in 0..240 {
            step(DT, &InputIntent::default(), 5.0, &mut avatar, flat, &index);
        }

        // Feet on the table top: eye = top + eye height.
        assert!((avatar.position.y - (1.0 + EYE_HEIGHT)).abs() < 0.05);
        assert!(avatar.can_jump, "furniture must behave like terrain");
        assert_eq!(avatar.velocity.y, 0.0);
    }

    #[test]
    fn test_ceiling_cancels_ascent() {
        let mut index = CollisionIndex::new();
        // Low ceiling slab just above a standing avatar's head.
        index.register(Aabb::from_center_size(
            Vec3::new(0.0, 2.4, 0.0),
            Vec3::new(4.0, 0.4, 4.0),
        ));

        let mut avatar = standing_avatar();
        let jump = InputIntent {
            jump: true,
            ..InputIntent::default()
        };
        step(DT, &jump, 5.0, &mut avatar, flat, &index);

        let mut peak = avatar.position.y;
        for _ in 0..120 {
            step(DT, &InputIntent::default(), 5.0, &mut avatar, flat, &index);
            peak = peak.max(avatar.position.y);
        }

        // Unobstructed, the jump peaks around eye 3.1; the ceiling cuts the
        // ascent well short and the avatar settles back on the floor.
        assert!(peak < 2.7, "ceiling failed to stop ascent, peak eye {peak}");
        assert!((avatar.position.y - EYE_HEIGHT).abs() < 1e-3);
        assert!(avatar.velocity.y <= 0.0);
    }

    #[test]
    fn test_diagonal_intent_is_not_faster() {
        let index = CollisionIndex::new();

        let mut straight = standing_avatar();
        step(
            DT,
            &InputIntent {
                forward: true,
                ..InputIntent::default()
            },
            5.0,
            &mut straight,
            flat,
            &index,
        );

        let mut diagonal = standing_avatar();
        step(
            DT,
            &InputIntent {
                forward: true,
                right: true,
                ..InputIntent::default()
            },
            5.0,
            &mut diagonal,
            flat,
            &index,
        );

        let straight_dist = straight.position.horizontal_distance(Vec3::new(0.0, 0.0, 0.0));
        let diagonal_dist = diagonal.position.horizontal_distance(Vec3::new(0.0, 0.0, 0.0));
        assert!((straight_dist - diagonal_dist).abs() < 1e-5);
    }

    #[test]
    fn test_look_direction_matches_yaw_frame() {
        // yaw = 0 looks down -Z.
        let ahead = look_direction(0.0, 0.0);
        assert!((ahead.z + 1.0).abs() < 1e-6);
        assert!(ahead.x.abs() < 1e-6);

        // Positive pitch looks up.
        let up = look_direction(0.0, FRAC_PI_2);
        assert!((up.y - 1.0).abs() < 1e-6);
    }
}
