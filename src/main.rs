//! Coindash main entry point.
//!
//! A small 2D platformer: run around, jump between platforms, collect coins
//! and talk to NPCs. raylib does the windowing, graphics and audio;
//! bevy_ecs structures the simulation. Level layouts are data driven and
//! loaded from JSON files.
//!
//! Startup builds the ECS world (resources, observers, state hooks) and the
//! per-frame schedule, then hands control to the main loop. Each frame feeds
//! the real frame delta into [`WorldTime`](resources::worldtime::WorldTime),
//! runs the schedule and lets the render system draw into the fixed
//! resolution target. The audio thread is joined on the way out.
//!
//! ```sh
//! cargo run --release -- --level ./assets/levels/level01.json
//! ```

// No console window on Windows builds.
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod resources;
mod systems;

use std::path::PathBuf;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::{RaylibHandle, RaylibThread};

use crate::components::persistent::Persistent;
use crate::events::collision::contact_state_observer;
use crate::events::gamestate::{GameStateChangedEvent, gamestate_observer};
use crate::events::input::{interact_observer, quit_on_back_observer};
use crate::events::toggledebug::toggle_debug_observer;
use crate::events::togglefullscreen::toggle_fullscreen_observer;
use crate::resources::assets::{FontStore, TextureStore};
use crate::resources::audio::{setup_audio, shutdown_audio};
use crate::resources::contacts::ActiveContacts;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::statehooks::StateHooks;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{animation, animation_controller};
use crate::systems::audio::{
    log_audio_replies, pull_audio_replies, push_audio_cmds, tick_audio_cmds, tick_audio_replies,
};
use crate::systems::collision::{coin_pickup_observer, collision_detector, npc_proximity_observer};
use crate::systems::gameconfig::apply_config_changes;
use crate::systems::gamestate::{apply_pending_state, is_playing};
use crate::systems::groundsensor::ground_sensor;
use crate::systems::input::update_input_state;
use crate::systems::motor::{jump_observer, platformer_motor};
use crate::systems::movement::movement;
use crate::systems::render::render_frame;
use crate::systems::signalbinding::update_signal_bindings;
use crate::systems::time::update_world_time;

/// Coindash, a tiny platformer
#[derive(Parser)]
#[command(version, about = "Coindash: run, jump, collect coins, talk to NPCs.")]
struct Cli {
    /// Path to the configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Level file to load, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Start with all audio muted.
    #[arg(long)]
    mute: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config(Cli::parse());
    let (mut rl, thread) = open_window(&config);

    let mut world = build_world(&mut rl, &thread, config);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    register_observers(&mut world);
    bind_state_hooks(&mut world);

    // Kick the state machine: request Setup and apply it right away so the
    // setup hook runs before the first frame.
    world.resource_mut::<NextGameState>().request(GameStates::Setup);
    world.trigger(GameStateChangedEvent {});
    world.flush();

    let mut update = build_update_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    while !wants_quit(&world) {
        let dt = world.non_send_resource::<RaylibHandle>().get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame

        refresh_window_size(&mut world);
    }

    shutdown_audio(&mut world);
}

/// Parse the config file and fold the command line overrides into it.
fn load_config(cli: Cli) -> GameConfig {
    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::default(),
    };
    if let Err(e) = config.load() {
        log::warn!("{}. Writing a default config file", e);
        if let Err(e) = config.save() {
            log::warn!("{}", e);
        }
    }
    if let Some(level) = cli.level {
        config.level_path = level;
    }
    config.audio.mute = cli.mute;
    config
}

/// Open the raylib window at the configured size.
fn open_window(config: &GameConfig) -> (RaylibHandle, RaylibThread) {
    let (mut rl, thread) = raylib::init()
        .size(config.window.width as i32, config.window.height as i32)
        .resizable()
        .title("Coindash")
        .build();
    rl.set_target_fps(config.window.target_fps);
    // Disable ESC to exit; ESC is the back action and quits through the
    // state machine instead.
    rl.set_exit_key(None);
    (rl, thread)
}

/// Create the ECS world and insert every startup resource.
///
/// The raylib handles themselves are moved into the world by the caller,
/// after the render target (which needs them) has been created here.
fn build_world(rl: &mut RaylibHandle, thread: &RaylibThread, config: GameConfig) -> World {
    let width = config.render.width;
    let height = config.render.height;

    let render_target = RenderTarget::new(rl, thread, width, height, config.render.filter)
        .expect("Failed to create render target");

    let mut world = World::new();
    world.init_resource::<WorldTime>();
    world.init_resource::<WorldSignals>();
    world.init_resource::<ActiveContacts>();
    world.init_resource::<InputState>();
    // ScreenSize is the internal render resolution, WindowSize tracks the
    // real OS window and is refreshed every frame.
    world.insert_resource(ScreenSize::new(width, height));
    world.insert_resource(WindowSize::measure(rl));

    world.insert_resource(config);
    world.insert_non_send_resource(render_target);

    // Init audio. Must happen before game setup so load commands have a
    // channel to go through.
    setup_audio(&mut world);

    world.init_resource::<GameState>();
    world.init_resource::<NextGameState>();
    world.insert_non_send_resource(FontStore::new());
    world.insert_non_send_resource(TextureStore::new());

    world
}

/// Spawn the persistent observers.
///
/// All of them outlive scene transitions, so each carries [`Persistent`].
fn register_observers(world: &mut World) {
    world.spawn((Observer::new(gamestate_observer), Persistent));
    world.spawn((Observer::new(contact_state_observer), Persistent));
    world.spawn((Observer::new(coin_pickup_observer), Persistent));
    world.spawn((Observer::new(npc_proximity_observer), Persistent));
    world.spawn((Observer::new(jump_observer), Persistent));
    world.spawn((Observer::new(interact_observer), Persistent));
    world.spawn((Observer::new(quit_on_back_observer), Persistent));
    world.spawn((Observer::new(toggle_debug_observer), Persistent));
    world.spawn((Observer::new(toggle_fullscreen_observer), Persistent));
    // Observers must exist before anything triggers their events.
    world.flush();
}

/// Register the lifecycle one-shot systems and bind them by name.
///
/// NOTE: In bevy_ecs 0.18, registered systems are stored as entities. They
/// are marked Persistent so they survive scene transitions.
fn bind_state_hooks(world: &mut World) {
    let setup_id = world.register_system(game::setup);
    let enter_play_id = world.register_system(game::enter_play);
    let quit_game_id = world.register_system(game::quit_game);
    let clean_id = world.register_system(game::clean_all_entities);

    let mut hooks = StateHooks::new();
    hooks.bind("setup", setup_id);
    hooks.bind("enter_play", enter_play_id);
    hooks.bind("quit_game", quit_game_id);
    hooks.bind("clean_all_entities", clean_id);
    world.insert_resource(hooks);

    for id in [setup_id, enter_play_id, quit_game_id, clean_id] {
        world.entity_mut(id.entity()).insert(Persistent);
    }

    world.flush();
}

/// Build the per-frame schedule.
///
/// Explicit `after` edges pin down the simulation order: input and the
/// ground probe feed the motor, the motor feeds movement, movement feeds
/// collision, and animation plus rendering trail the lot.
fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(apply_config_changes.run_if(is_playing));
    update.add_systems(update_input_state);
    update.add_systems(apply_pending_state);
    update.add_systems(
        // The audio bridge runs as one block: push pending commands out to
        // the thread, then pull its replies in.
        (
            tick_audio_cmds,
            push_audio_cmds,
            pull_audio_replies,
            tick_audio_replies,
            log_audio_replies,
        )
            .chain(),
    );
    update.add_systems(ground_sensor);
    update.add_systems(
        platformer_motor
            .after(update_input_state)
            .after(ground_sensor),
    );
    update.add_systems(movement.after(platformer_motor));
    update.add_systems(collision_detector.after(movement));
    update.add_systems(animation_controller.after(collision_detector));
    update.add_systems(animation.after(animation_controller));
    update.add_systems(update_signal_bindings);
    update.add_systems(
        (game::update)
            .run_if(is_playing)
            .after(apply_pending_state)
            .after(movement),
    );
    update.add_systems(render_frame.after(animation));
    update
}

/// True once the window wants to close or the quit flag is raised.
fn wants_quit(world: &World) -> bool {
    world.non_send_resource::<RaylibHandle>().window_should_close()
        || world.resource::<WorldSignals>().has_flag("quit_game")
}

/// Pick up window resizes so the letterbox math stays correct.
fn refresh_window_size(world: &mut World) {
    let size = WindowSize::measure(world.non_send_resource::<RaylibHandle>());
    *world.resource_mut::<WindowSize>() = size;
}
