use std::time::Duration;

use anyhow::Result;
use glam::Vec3;
use log::info;

use platformer_locomotion::engine::game_loop::TickClock;
use platformer_locomotion::engine::pathfinding::DirectAgentFactory;
use platformer_locomotion::engine::physics::{presets, PhysicsWorld};
use platformer_locomotion::engine::scene::{ActiveScene, GameScene};
use platformer_locomotion::game::characters::{
    CharacterQuery, CharacterRegistry, CharacterSetup, InputFlags, TickContext, HUMANOID_RAGDOLL,
};
use platformer_locomotion::game::graphs::{platformer_graph, walker_graph};

/// Simulated host frame, one fixed step each
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Ten seconds at 60 FPS
const DEMO_FRAMES: u64 = 600;

/// Floor, plus a wall to run into
fn build_level(world: &mut PhysicsWorld) {
    let ground = world.add_rigid_body(presets::platform_body(Vec3::new(0.0, -0.5, 0.0)));
    world.add_collider(presets::platform_collider(Vec3::new(1.0, 1.0, 40.0)), ground);

    let wall = world.add_rigid_body(presets::platform_body(Vec3::new(0.0, 2.0, 8.0)));
    world.add_collider(presets::platform_collider(Vec3::new(1.0, 4.0, 1.0)), wall);
}

/// Player input over time: run right into the wall, hop, then run back left
fn scripted_input(frame: u64) -> InputFlags {
    let mut input = InputFlags::default();
    match frame {
        60..=239 => input.move_right = true,
        240 => input.jump = true,
        300..=420 => input.move_left = true,
        421 => {
            input.move_left = true;
            input.jump = true;
        }
        422..=480 => input.move_left = true,
        _ => {}
    }
    input
}

fn report(registry: &CharacterRegistry, world: &PhysicsWorld) {
    for id in registry.ids() {
        let Some(character) = registry.get(id) else {
            continue;
        };
        let Some(position) = character.position(world) else {
            continue;
        };
        info!(
            "{} [{}] z={:.2} y={:.2} grounded={} front_blocked={} facing={:?}",
            character.name,
            character.current_node().unwrap_or("-"),
            position.z,
            position.y,
            character.control.query(CharacterQuery::Grounded),
            character.control.query(CharacterQuery::FrontBlocked),
            character.control.facing(),
        );
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting platformer locomotion demo...");

    let mut world = PhysicsWorld::new();
    build_level(&mut world);

    let mut registry = CharacterRegistry::new();
    let player = registry.spawn(
        CharacterSetup::new("Player", Vec3::new(0.0, 0.5, 0.0), platformer_graph()?)
            .with_ragdoll(&HUMANOID_RAGDOLL),
        &mut world,
    )?;
    registry.spawn(
        CharacterSetup::new("Walker", Vec3::new(0.0, 0.5, -6.0), walker_graph(1.5)?),
        &mut world,
    )?;

    let scene = ActiveScene(GameScene::Sample);
    let agents = DirectAgentFactory {
        target: Vec3::new(0.0, 0.0, 10.0),
        speed: 2.0,
    };

    let mut clock = TickClock::new();
    let dt = clock.fixed_timestep();
    world.set_timestep(dt);

    for frame in 0..DEMO_FRAMES {
        let ticks = clock.begin_frame(FRAME_TIME);

        if let Some(character) = registry.get_mut(player) {
            character.control.input = scripted_input(frame);
        }

        for _ in 0..ticks.fixed_steps {
            registry.fixed_update(&mut world, dt)?;
            world.step();
            registry.process_collisions(&world);
        }

        let mut tick = TickContext {
            bodies: &mut world,
            scene: &scene,
            agents: &agents,
            dt: ticks.frame_dt,
        };
        registry.update(&mut tick)?;

        if frame % 30 == 0 {
            report(&registry, &world);
        }
    }

    let ids: Vec<_> = registry.ids().collect();
    for id in ids {
        registry.despawn(id, &mut world);
    }

    info!(
        "Demo finished: {} frames, {} fixed updates",
        clock.frame_count(),
        clock.update_count()
    );
    Ok(())
}
