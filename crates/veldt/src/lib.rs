//! # VELDT
//!
//! First-person exploration over a procedurally generated landscape.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          VELDT CORE                                 │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌──────────────┐   ┌───────────────────┐   ┌──────────────────┐   │
//! │  │ HeightField  │   │ StructureRegistry │   │  CollisionIndex  │   │
//! │  │ (terrain)    │   │ (footprints)      │   │  (working set)   │   │
//! │  └──────┬───────┘   └─────────┬─────────┘   └────────┬─────────┘   │
//! │         │ immutable           │ immutable            │ swapped     │
//! │         │                     │                      │ per scene   │
//! │  ┌──────┴─────────────────────┴──────────────────────┴─────────┐   │
//! │  │                      Locomotion tick                        │   │
//! │  │      one integrator, parameterized by ground function       │   │
//! │  └──────────────────────────────┬──────────────────────────────┘   │
//! │                                 │                                  │
//! │  ┌──────────────────────────────┴──────────────────────────────┐   │
//! │  │   SceneTransition (Exterior <-> Interior state machine)     │   │
//! │  └──────────────────────────────┬──────────────────────────────┘   │
//! │                                 │ events                           │
//! └─────────────────────────────────┼──────────────────────────────────┘
//!                                   v
//!                      presentation shells (render, UI)
//! ```
//!
//! Terrain, structures and collision must agree on one notion of "where is
//! solid ground" and "what blocks movement": the height field answers
//! ground, the collision index answers obstacles, and the locomotion tick
//! is the only code that combines them.
//!
//! ## Modules
//!
//! - `config` / `error`: startup configuration and construction errors
//! - `worldgen` / `interior`: deterministic content placement
//! - `structures` / `collision`: placed-building registry and obstacle rays
//! - `locomotion` / `transition`: the per-tick integrator and mode machine
//! - `world` / `sim`: orchestration and the tick driver
//! - `events`: the bus toward presentation shells

pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod interior;
pub mod locomotion;
pub mod sim;
pub mod structures;
pub mod transition;
pub mod world;
pub mod worldgen;

pub use collision::{Aabb, Collidable, CollidableId, CollisionIndex};
pub use config::WorldConfig;
pub use error::WorldError;
pub use events::{EventBus, EventReceiver, EventSender, GameEvent};
pub use locomotion::{look_direction, AvatarState, InputIntent, Mode};
pub use sim::{SimLoop, TickStats, TickStatsAccumulator};
pub use structures::{BuildingFootprint, EntranceSide, StructureRegistry};
pub use transition::{InteriorSession, SceneTransition};
pub use world::World;
