//! # roam - Headless Expedition Demo
//!
//! Generates a world, walks the avatar to the nearest building, steps
//! inside, steps back out, and prints what happened along the way. No
//! window, no input devices; the point is to watch the core drive itself.
//!
//! Usage: `roam [seed-phrase]`

use std::env;
use std::process;

use veldt::{GameEvent, InputIntent, SimLoop, World, WorldConfig};
use veldt_shared::{Vec3, TICK_RATE};

fn main() {
    let mut config = WorldConfig::default();
    if let Some(seed) = env::args().nth(1) {
        config.seed = seed;
    }

    let world = match World::generate(&config) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("world generation failed: {err}");
            process::exit(1);
        }
    };

    println!("VELDT expedition");
    println!("  seed:       {}", config.seed);
    println!("  grid:       {0}x{0}", config.grid_size);
    println!("  buildings:  {}", world.registry().len());
    println!("  collidables:{}", world.collision_index().len());

    let receiver = world.events_receiver();
    let mut sim = SimLoop::new(world);
    let dt = 1.0 / TICK_RATE as f32;

    // Pick the closest doorway as the expedition target.
    let Some(door) = nearest_door(sim.world()) else {
        println!("no buildings in this world; nothing to explore");
        return;
    };
    println!("  target door: ({:.1}, {:.1})", door.x, door.z);

    // March toward the door until it is within arm's reach.
    let mut arrived = false;
    for _ in 0..2400 {
        let position = sim.world().avatar().position;
        if position.horizontal_distance(door) < 2.0 {
            arrived = true;
            break;
        }
        let intent = InputIntent {
            forward: true,
            yaw: yaw_toward(position, door),
            ..InputIntent::default()
        };
        sim.step_fixed(dt, &intent);
    }

    let position = sim.world().avatar().position;
    println!(
        "arrived={} at ({:.1}, {:.1}, {:.1}) after {} ticks",
        arrived,
        position.x,
        position.y,
        position.z,
        sim.tick_count()
    );
    if !arrived {
        println!("could not reach the door; exploring is still possible, exiting");
        return;
    }

    // Knock: interact toward the doorway.
    let aim = Vec3::new(door.x, 1.1, door.z);
    let direction = (aim - position).normalized();
    sim.world_mut().interact(position, direction);
    report_events(&receiver.drain());

    // One tick inside to settle on the floor, then step back out.
    sim.step_fixed(dt, &InputIntent::default());
    let inside = sim.world().avatar().position;
    println!(
        "interior pose: ({:.1}, {:.1}, {:.1}), mode {:?}",
        inside.x,
        inside.y,
        inside.z,
        sim.world().mode()
    );

    let origin = sim.world().avatar().position;
    sim.world_mut().interact(origin, direction);
    report_events(&receiver.drain());

    let outside = sim.world().avatar().position;
    println!(
        "back outside at ({:.1}, {:.1}, {:.1}), mode {:?}",
        outside.x,
        outside.y,
        outside.z,
        sim.world().mode()
    );

    let stats = sim.stats();
    println!(
        "ticks: {} | avg {:.3} ms | over budget {:.1}%",
        stats.ticks_recorded,
        stats.avg_tick_ms(),
        stats.over_budget_ratio() * 100.0
    );
}

/// The doorway of the building closest to the avatar.
fn nearest_door(world: &World) -> Option<Vec3> {
    let position = world.avatar().position;
    world
        .registry()
        .footprints()
        .iter()
        .min_by(|a, b| {
            a.center
                .horizontal_distance(position)
                .total_cmp(&b.center.horizontal_distance(position))
        })
        .map(veldt::BuildingFootprint::door_position)
}

/// Camera heading that walks `from` toward `to`.
fn yaw_toward(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    dx.atan2(-dz)
}

fn report_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::BuildingEntered { center } => {
                println!("event: entered building at ({:.1}, {:.1})", center.x, center.z);
            }
            GameEvent::BuildingExited { position } => {
                println!(
                    "event: exited to ({:.1}, {:.1}, {:.1})",
                    position.x, position.y, position.z
                );
            }
            GameEvent::ModeChanged { mode } => println!("event: mode -> {mode:?}"),
            GameEvent::Hint { message } => println!("hint: {message}"),
        }
    }
}
