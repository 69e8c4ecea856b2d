//! # World
//!
//! The owning orchestrator: terrain, structures, collision index, scene
//! transitions, avatar state and the event bus, behind one tick entry
//! point.
//!
//! Single-threaded by design. The height field and registry are immutable
//! after construction, and everything else is mutated only by the tick
//! routine and the interact handler, never concurrently - so there is no
//! locking anywhere in the core.

use veldt_shared::{Vec3, EYE_HEIGHT, MAX_TICK_DELTA};
use veldt_terrain::HeightField;

use crate::collision::CollisionIndex;
use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::events::{EventBus, EventReceiver};
use crate::interior;
use crate::locomotion::{self, AvatarState, InputIntent, Mode};
use crate::structures::StructureRegistry;
use crate::transition::{InteriorSession, SceneTransition};
use crate::worldgen;

/// Event channel capacity; one player's transitions and hints never come
/// close.
const EVENT_CAPACITY: usize = 256;

/// The complete simulation state for one game session.
pub struct World {
    height_field: HeightField,
    registry: StructureRegistry,
    index: CollisionIndex,
    transition: SceneTransition,
    avatar: AvatarState,
    move_speed: f32,
    events: EventBus,
}

impl World {
    /// Generates a world from configuration and spawns the avatar at the
    /// clearing center.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] for an invalid configuration.
    pub fn generate(config: &WorldConfig) -> Result<Self, WorldError> {
        let generated = worldgen::generate(config)?;

        let mut index = CollisionIndex::new();
        for bounds in generated.exterior_collidables {
            index.register(bounds);
        }

        // The clearing is flat at elevation zero, so the spawn surface is
        // known without a height query.
        let spawn = Vec3::new(
            config.clearing_center.x,
            EYE_HEIGHT,
            config.clearing_center.y,
        );

        Ok(Self {
            height_field: generated.height_field,
            registry: generated.registry,
            index,
            transition: SceneTransition::new(),
            avatar: AvatarState::at(spawn),
            move_speed: config.walk_speed,
            events: EventBus::new(EVENT_CAPACITY),
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// `dt` is clamped to [`MAX_TICK_DELTA`] so a slow frame integrates one
    /// bounded step instead of a huge one.
    ///
    /// # Panics
    ///
    /// Panics if the avatar pose is non-finite: that is a caller bug, not
    /// a runtime condition the core recovers from.
    pub fn tick(&mut self, dt: f32, intent: &InputIntent) {
        let dt = dt.clamp(0.0, MAX_TICK_DELTA);

        assert!(
            self.avatar.position.is_finite() && self.avatar.velocity.is_finite(),
            "avatar pose must be finite at tick entry"
        );
        debug_assert_eq!(
            self.avatar.mode == Mode::Interior,
            self.transition.is_interior(),
            "interior session must exist exactly when mode is Interior"
        );

        let index = &self.index;
        match self.avatar.mode {
            Mode::Exterior => {
                let field = &self.height_field;
                locomotion::step(
                    dt,
                    intent,
                    self.move_speed,
                    &mut self.avatar,
                    |x, z| field.interpolated_height_at(x, z),
                    index,
                );
            }
            Mode::Interior => {
                locomotion::step(
                    dt,
                    intent,
                    self.move_speed,
                    &mut self.avatar,
                    |_, _| interior::FLOOR_HEIGHT,
                    index,
                );
            }
        }
    }

    /// Handles the player's interact action.
    ///
    /// The interaction shell supplies the ray origin and view direction;
    /// the transition machine decides whether a door is in reach.
    pub fn interact(&mut self, origin: Vec3, direction: Vec3) {
        let sender = self.events.sender();
        self.transition.interact(
            origin,
            direction,
            &self.registry,
            &mut self.index,
            &mut self.avatar,
            &sender,
        );
    }

    /// The avatar's current state.
    #[must_use]
    pub fn avatar(&self) -> &AvatarState {
        &self.avatar
    }

    /// Mutable avatar access for shells that reposition it (respawn,
    /// debug teleport). The tick itself never needs this.
    pub fn avatar_mut(&mut self) -> &mut AvatarState {
        &mut self.avatar
    }

    /// The current simulation mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.avatar.mode
    }

    /// The terrain elevation grid.
    #[must_use]
    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    /// The placed-building registry.
    #[must_use]
    pub fn registry(&self) -> &StructureRegistry {
        &self.registry
    }

    /// The active collidable working set.
    #[must_use]
    pub fn collision_index(&self) -> &CollisionIndex {
        &self.index
    }

    /// The interior session, when the avatar is inside a building.
    #[must_use]
    pub fn interior_session(&self) -> Option<&InteriorSession> {
        self.transition.session()
    }

    /// A receiver handle for the core's event stream.
    #[must_use]
    pub fn events_receiver(&self) -> EventReceiver {
        self.events.receiver()
    }

    /// Current movement speed (units per second).
    #[must_use]
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Sets the movement speed. Sprint shells scale the configured walking
    /// speed through this.
    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> World {
        World::generate(&WorldConfig {
            seed: "world-unit".to_string(),
            ..WorldConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_spawn_is_grounded_in_the_clearing() {
        let mut world = test_world();

        world.tick(1.0 / 60.0, &InputIntent::default());

        let avatar = world.avatar();
        assert_eq!(avatar.mode, Mode::Exterior);
        assert!((avatar.position.y - EYE_HEIGHT).abs() < 1e-4);
        assert!(avatar.can_jump);
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let mut world = test_world();
        world.avatar_mut().position.y = 60.0;

        // Ten simulated seconds in one frame must integrate as one clamped
        // step, not a teleport through the map.
        world.tick(10.0, &InputIntent::default());

        let fallen = 60.0 - world.avatar().position.y;
        assert!(
            fallen < 1.0,
            "clamp failed: avatar fell {fallen} units in one tick"
        );
    }

    #[test]
    fn test_session_exists_iff_interior() {
        let world = test_world();
        assert_eq!(world.mode(), Mode::Exterior);
        assert!(world.interior_session().is_none());
    }

    #[test]
    fn test_interact_into_air_emits_hint_only() {
        let mut world = test_world();
        let receiver = world.events_receiver();
        let origin = world.avatar().position;

        world.interact(origin, Vec3::Y);

        assert_eq!(world.mode(), Mode::Exterior);
        let events = receiver.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            crate::events::GameEvent::Hint { .. }
        ));
    }

    #[test]
    fn test_sprint_shell_scales_speed() {
        // Open field: no obstacles to cut the run short.
        let mut world = World::generate(&WorldConfig {
            seed: "sprint-field".to_string(),
            building_count: 0,
            tree_count: 0,
            ..WorldConfig::default()
        })
        .unwrap();
        world.set_move_speed(8.0);

        let start = world.avatar().position;
        let intent = InputIntent {
            forward: true,
            ..InputIntent::default()
        };
        for _ in 0..30 {
            world.tick(1.0 / 60.0, &intent);
        }

        // Half a second at 8 u/s covers four units; the default walk speed
        // would only manage two and a half.
        let travelled = world.avatar().position.horizontal_distance(start);
        assert!(
            travelled > 3.5,
            "sprint speed not applied, travelled {travelled}"
        );
    }
}
