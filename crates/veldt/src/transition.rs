//! # Scene Transitions
//!
//! The exterior/interior state machine behind building entry and exit.
//!
//! Exactly one mode holds at any time, and an [`InteriorSession`] exists if
//! and only if the mode is Interior. Entry is only evaluated in Exterior
//! mode, so nested interiors are unreachable by construction.
//!
//! This component owns no geometry: the interior builder supplies the room
//! set, and the machine merely toggles which working set the collision
//! index serves, parking the exterior set inside the session for the trip.

use veldt_shared::{Vec3, EXIT_CLEARANCE, INTERACT_RANGE};

use crate::collision::{Collidable, CollisionIndex};
use crate::events::{EventSender, GameEvent};
use crate::interior;
use crate::locomotion::{AvatarState, Mode};
use crate::structures::{BuildingFootprint, StructureRegistry};

/// The transient "currently inside this building" state.
///
/// Created on entry, discarded on exit. The parked exterior collidable set
/// rides along so the return trip restores identical obstacles.
pub struct InteriorSession {
    /// The building the avatar entered.
    pub source: BuildingFootprint,
    /// Exterior position to restore on exit.
    pub return_position: Vec3,
    /// Fixed interior-local door coordinate; exit is a distance check
    /// against this point, no raycast needed.
    pub door_position: Vec3,
    /// The exterior working set, parked while the interior is active.
    parked_exterior: Vec<Collidable>,
}

/// The exterior/interior transition machine.
#[derive(Default)]
pub struct SceneTransition {
    session: Option<InteriorSession>,
}

impl SceneTransition {
    /// Creates the machine in Exterior mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an interior session is active.
    #[must_use]
    pub fn is_interior(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, when the avatar is inside a building.
    #[must_use]
    pub fn session(&self) -> Option<&InteriorSession> {
        self.session.as_ref()
    }

    /// Handles the player's interact action.
    ///
    /// In Exterior mode the interact ray is resolved against building
    /// doorways; in Interior mode a distance check against the fixed door
    /// point decides. Anything unresolvable is a silent no-op plus a hint.
    pub fn interact(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        registry: &StructureRegistry,
        index: &mut CollisionIndex,
        avatar: &mut AvatarState,
        events: &EventSender,
    ) {
        match avatar.mode {
            Mode::Exterior => self.try_enter(origin, direction, registry, index, avatar, events),
            Mode::Interior => self.try_exit(index, avatar, events),
        }
    }

    /// Exterior -> Interior, if the interact ray reaches a doorway.
    fn try_enter(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        registry: &StructureRegistry,
        index: &mut CollisionIndex,
        avatar: &mut AvatarState,
        events: &EventSender,
    ) {
        let direction = direction.normalized();
        if direction == Vec3::ZERO {
            events.send(GameEvent::Hint {
                message: "nothing to interact with",
            });
            return;
        }

        let mut nearest: Option<(f32, &BuildingFootprint)> = None;
        for footprint in registry.footprints() {
            if let Some(distance) = footprint
                .door_volume()
                .ray_hit(origin, direction, INTERACT_RANGE)
            {
                if nearest.map_or(true, |(best, _)| distance < best) {
                    nearest = Some((distance, footprint));
                }
            }
        }

        let Some((_, &footprint)) = nearest else {
            events.send(GameEvent::Hint {
                message: "nothing to interact with",
            });
            return;
        };

        let parked_exterior = index.take_set();
        for bounds in interior::build_room(&footprint) {
            index.register(bounds);
        }

        self.session = Some(InteriorSession {
            source: footprint,
            return_position: avatar.position,
            door_position: interior::door_position(&footprint),
            parked_exterior,
        });

        avatar.position = interior::spawn_position(&footprint);
        avatar.velocity = Vec3::ZERO;
        avatar.mode = Mode::Interior;

        tracing::debug!(center = ?footprint.center, "entered building");
        events.send(GameEvent::BuildingEntered {
            center: footprint.center,
        });
        events.send(GameEvent::ModeChanged {
            mode: Mode::Interior,
        });
    }

    /// Interior -> Exterior, if the avatar stands near the door point.
    fn try_exit(
        &mut self,
        index: &mut CollisionIndex,
        avatar: &mut AvatarState,
        events: &EventSender,
    ) {
        let near_door = match self.session.as_ref() {
            Some(session) => {
                avatar.position.horizontal_distance(session.door_position) <= INTERACT_RANGE
            }
            None => return,
        };

        if !near_door {
            events.send(GameEvent::Hint {
                message: "go to the door to exit",
            });
            return;
        }

        let Some(session) = self.session.take() else {
            return;
        };

        index.replace_set(session.parked_exterior);

        // Offset outward along the entrance normal so exiting cannot
        // immediately re-trigger entry.
        let outward = session.source.entrance.normal();
        avatar.position = session.return_position + outward * EXIT_CLEARANCE;
        avatar.velocity = Vec3::ZERO;
        avatar.mode = Mode::Exterior;

        tracing::debug!(position = ?avatar.position, "exited building");
        events.send(GameEvent::BuildingExited {
            position: avatar.position,
        });
        events.send(GameEvent::ModeChanged {
            mode: Mode::Exterior,
        });
    }
}
