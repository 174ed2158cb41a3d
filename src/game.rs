//! High level game setup and scene management.
//!
//! The functions here are bound in the
//! [`StateHooks`](crate::resources::statehooks::StateHooks) registry and run
//! as state hooks: [`setup`] once on entering Setup, [`enter_play`] when the
//! level starts, [`quit_game`] on the way out and [`clean_all_entities`] when
//! leaving play. [`update`] runs every frame while playing and only moves the
//! camera.

use std::path::Path;

use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::prelude::*;

use crate::components::animation::{Animation, AnimationController, CmpOp, Condition};
use crate::components::boxcollider::BoxCollider;
use crate::components::coin::Coin;
use crate::components::contactstate::ContactState;
use crate::components::dynamictext::DynamicText;
use crate::components::group::Group;
use crate::components::groundsensor::GroundSensor;
use crate::components::interactable::{Interactable, Interactor};
use crate::components::mapposition::MapPosition;
use crate::components::motor::PlatformerMotor;
use crate::components::persistent::Persistent;
use crate::components::rigidbody::RigidBody;
use crate::components::screenposition::ScreenPosition;
use crate::components::signalbinding::SignalBinding;
use crate::components::signals::Signals;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::events::audio::AudioCmd;
use crate::resources::animationstore::{AnimationClip, AnimationStore};
use crate::resources::assets::{FontStore, TextureStore};
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::level::{Level, PlatformDef, SpawnPoint};
use crate::resources::screensize::ScreenSize;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

/// Side length of one tile in the tileset, in pixels.
const TILE_SIZE: f32 = 16.0;
/// Gravity acceleration applied to the player, in px/s^2.
const GRAVITY: f32 = 900.0;
/// Terminal fall speed of the player, in px/s.
const MAX_FALL_SPEED: f32 = 420.0;
/// Exponential camera follow rate, per second.
const CAMERA_FOLLOW_RATE: f32 = 4.0;

/// Load assets, register animation clips and parse the level file.
///
/// Runs once when the Setup state is entered and hands over to Playing.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    screen: Res<ScreenSize>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut fonts: NonSendMut<FontStore>,
    mut textures: NonSendMut<TextureStore>,
    mut audio: MessageWriter<AudioCmd>,
    mut next_state: ResMut<NextGameState>,
) {
    // The camera centers on the internal render resolution, not the window.
    commands.insert_resource(Camera2DRes::centered(screen.w as f32, screen.h as f32));

    let hud_font = rl
        .load_font(&th, "./assets/fonts/pixel_operator.ttf")
        .expect("load assets/pixel_operator.ttf");
    fonts.add("hud", hud_font);

    for (key, path) in [
        ("player-sheet", "./assets/textures/player-sheet.png"),
        ("tiles", "./assets/textures/tiles.png"),
        ("coin", "./assets/textures/coin-sheet.png"),
        ("npc", "./assets/textures/npc.png"),
        ("background", "./assets/textures/background.png"),
    ] {
        let tex = rl
            .load_texture(&th, path)
            .unwrap_or_else(|e| panic!("load {}: {}", path, e));
        textures.add(key, tex);
    }
    info!("Loaded {} textures, {} fonts", textures.len(), fonts.len());

    commands.insert_resource(build_clips());

    // Queue audio loads; the audio thread reports back via messages.
    queue_audio_loads(&mut audio);

    // Level data is user editable, so a broken file falls back to a
    // playable built-in layout instead of aborting.
    let level = match Level::load_from_file(&config.level_path) {
        Ok(level) => level,
        Err(e) => {
            error!("{}", e);
            fallback_level()
        }
    };
    info!(
        "Level '{}': {} platforms, {} coins, {} NPCs",
        level.name,
        level.platforms.len(),
        level.coins.len(),
        level.npcs.len()
    );
    commands.insert_resource(level);

    next_state.request(GameStates::Playing);
    info!("Setup done, Playing requested");
}

/// Register every playable file under the audio directory, keyed by file
/// stem. The gameplay cues resolve against those keys: "jump", "land",
/// "coin" and "talk" come from the wav files, the "theme" track from the
/// ogg.
fn queue_audio_loads(audio: &mut MessageWriter<AudioCmd>) {
    const AUDIO_DIR: &str = "./assets/audio";
    let entries = match std::fs::read_dir(AUDIO_DIR) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Audio directory {} unreadable: {}. Sound disabled", AUDIO_DIR, e);
            return;
        }
    };
    for entry in entries.flatten() {
        if let Some(cmd) = audio_load_cmd(&entry.path()) {
            audio.write(cmd);
        }
    }
}

/// Load command for one audio file. Wav files become one shot sounds, ogg
/// and mp3 streamed tracks; anything else is skipped.
fn audio_load_cmd(path: &Path) -> Option<AudioCmd> {
    let key = path.file_stem()?.to_str()?.to_string();
    let file = path.to_string_lossy().into_owned();
    match path.extension()?.to_str()? {
        "wav" => Some(AudioCmd::LoadFx { key, path: file }),
        "ogg" | "mp3" => Some(AudioCmd::LoadTrack { key, path: file }),
        _ => None,
    }
}

/// Animation clips used by the level: the player sheet rows plus the coin
/// spin. The player sheet holds one clip per 32 pixel row.
fn build_clips() -> AnimationStore {
    let sheet_row = |row: usize, frame_count, fps, looped| AnimationClip {
        tex_key: "player-sheet".into(),
        first_frame: Vector2 {
            x: 0.0,
            y: row as f32 * 32.0,
        },
        stride: 32.0,
        frame_count,
        fps,
        looped,
    };

    let mut clips = AnimationStore::default();
    clips.add("player_idle", sheet_row(0, 4, 6.0, true));
    clips.add("player_run", sheet_row(1, 6, 10.0, true));
    // the jump clip holds its last frame until the apex
    clips.add("player_jump", sheet_row(2, 2, 10.0, false));
    clips.add("player_fall", sheet_row(3, 2, 6.0, true));
    clips.add(
        "coin_spin",
        AnimationClip {
            tex_key: "coin".into(),
            first_frame: Vector2 { x: 0.0, y: 0.0 },
            stride: 16.0,
            frame_count: 6,
            fps: 10.0,
            looped: true,
        },
    );
    clips
}

/// Spawn the level entities and the HUD, then start the music.
pub fn enter_play(
    mut commands: Commands,
    level: Res<Level>,
    screen: Res<ScreenSize>,
    mut camera: ResMut<Camera2DRes>,
    mut world_signals: ResMut<WorldSignals>,
    mut audio: MessageWriter<AudioCmd>,
) {
    // Background sits behind everything and ignores collisions.
    commands.spawn((
        Group::new("background"),
        MapPosition::new(0.0, 0.0),
        ZIndex(-10),
        Sprite::new("background", screen.w as f32, screen.h as f32),
    ));

    for platform in &level.platforms {
        spawn_platform(&mut commands, platform);
    }

    for coin in &level.coins {
        commands.spawn((
            Group::new("coin"),
            MapPosition::new(coin.x, coin.y),
            ZIndex(1),
            Sprite::new("coin", 16.0, 16.0).with_origin(Vector2 { x: 8.0, y: 8.0 }),
            Animation::new("coin_spin"),
            BoxCollider::sensor(12.0, 12.0),
            Coin::new(coin.value),
        ));
    }

    for npc in &level.npcs {
        let mut interactable = Interactable::new(npc.line.clone());
        if let Some(cue) = &npc.cue {
            interactable = interactable.with_cue(cue.clone());
        }
        commands.spawn((
            Group::new("npc"),
            MapPosition::new(npc.x, npc.y),
            ZIndex(0),
            Sprite::new("npc", 32.0, 32.0).with_origin(Vector2 { x: 16.0, y: 16.0 }),
            // Wide volume so the player can talk from beside the NPC.
            BoxCollider::sensor(40.0, 32.0),
            interactable,
        ));
    }

    let spawn = level.player_spawn;
    let player = commands
        .spawn((
            Group::new("player"),
            MapPosition::new(spawn.x, spawn.y),
            ZIndex(2),
            // Pivot at the feet so MapPosition sits on the ground line.
            Sprite::new("player-sheet", 32.0, 32.0).with_origin(Vector2 { x: 16.0, y: 32.0 }),
            Animation::new("player_idle"),
            player_animation_rules(),
            Signals::default(),
            RigidBody::new()
                .with_force("gravity", Vector2 { x: 0.0, y: GRAVITY })
                .with_max_fall_speed(MAX_FALL_SPEED),
            BoxCollider::new(16.0, 28.0).with_offset(Vector2 { x: 0.0, y: -14.0 }),
            GroundSensor::default().with_mask("ground"),
            PlatformerMotor::default(),
            ContactState::default(),
            Interactor::default(),
        ))
        .id();

    // HUD: coin counter and dialogue line, bound to world signals.
    commands.spawn((
        ScreenPosition::new(8.0, 8.0),
        DynamicText::new("Coins: 0", "hud", 16.0),
        SignalBinding::new("coins").with_format("Coins: {}"),
    ));
    commands.spawn((
        ScreenPosition::new(8.0, screen.h as f32 - 24.0),
        DynamicText::new("", "hud", 12.0).with_color(Color::SKYBLUE),
        SignalBinding::new("dialogue"),
    ));

    world_signals.set_integer("coins", 0);
    world_signals.set_string("dialogue", "");
    world_signals.set_entity("player", player);

    // Snap the camera onto the player before the first follow tick.
    camera.0.target = camera_goal(
        Vector2 {
            x: spawn.x,
            y: spawn.y,
        },
        &screen,
    );

    audio.write(AudioCmd::PlayTrack {
        key: "theme".into(),
        looped: true,
    });
    info!("Entered play, player {:?} at ({}, {})", player, spawn.x, spawn.y);
}

/// Per frame scene logic: smooth camera follow on the player.
pub fn update(
    screen: Res<ScreenSize>,
    time: Res<WorldTime>,
    world_signals: Res<WorldSignals>,
    mut camera: ResMut<Camera2DRes>,
    positions: Query<&MapPosition>,
) {
    let Some(player) = world_signals.get_entity("player") else {
        return;
    };
    let Ok(position) = positions.get(player) else {
        return;
    };

    let goal = camera_goal(position.pos, &screen);
    // Exponential smoothing, clamped so a long frame cannot overshoot.
    let t = (CAMERA_FOLLOW_RATE * time.delta).min(1.0);
    let target = camera.0.target;
    camera.0.target = Vector2 {
        x: target.x + (goal.x - target.x) * t,
        y: target.y + (goal.y - target.y) * t,
    };
}

/// Stop the music and raise the quit flag checked by the main loop.
pub fn quit_game(mut world_signals: ResMut<WorldSignals>, mut audio: MessageWriter<AudioCmd>) {
    audio.write(AudioCmd::StopTrack {
        key: "theme".into(),
    });
    world_signals.set_flag("quit_game");
    info!("Quit requested");
}

/// Despawn every level entity and drop the per level world signal keys.
/// Persistent infrastructure (observers, registered systems) survives.
pub fn clean_all_entities(
    mut commands: Commands,
    mut world_signals: ResMut<WorldSignals>,
    query: Query<Entity, Without<Persistent>>,
) {
    let mut count = 0;
    for entity in &query {
        commands.entity(entity).despawn();
        count += 1;
    }
    world_signals.remove_entity("player");
    world_signals.remove_string("dialogue");
    info!("Cleaned {} entities", count);
}

/// Camera target for a player at `pos`, clamped to the level's left edge.
fn camera_goal(pos: Vector2, screen: &ScreenSize) -> Vector2 {
    Vector2 {
        x: pos.x.max(screen.w as f32 * 0.5),
        y: pos.y - 16.0,
    }
}

/// Animation selection for the player, evaluated against its signals.
///
/// Airborne clips win over ground clips; on the ground the speed signal
/// picks between run and idle.
fn player_animation_rules() -> AnimationController {
    AnimationController::new("player_idle")
        .with_rule(
            Condition::All(vec![
                Condition::LacksFlag("grounded".into()),
                Condition::ScalarCmp {
                    signal: "vspeed".into(),
                    op: CmpOp::Less,
                    value: 0.0,
                },
            ]),
            "player_jump",
        )
        .with_rule(Condition::LacksFlag("grounded".into()), "player_fall")
        .with_rule(
            Condition::ScalarCmp {
                signal: "speed".into(),
                op: CmpOp::Greater,
                value: 5.0,
            },
            "player_run",
        )
}

/// Spawn one platform: a single solid collider plus tile sprites filling its
/// rectangle, top row grass and dirt below.
fn spawn_platform(commands: &mut Commands, def: &PlatformDef) {
    commands.spawn((
        Group::new(def.group.as_str()),
        MapPosition::new(def.x, def.y),
        BoxCollider::new(def.w, def.h),
    ));

    let cols = (def.w / TILE_SIZE).round().max(1.0) as i32;
    let rows = (def.h / TILE_SIZE).round().max(1.0) as i32;
    let min_x = def.x - def.w * 0.5;
    let min_y = def.y - def.h * 0.5;

    for row in 0..rows {
        let offset_y = if row == 0 { 0.0 } else { TILE_SIZE };
        for col in 0..cols {
            commands.spawn((
                Group::new("tiles"),
                MapPosition::new(
                    min_x + (col as f32 + 0.5) * TILE_SIZE,
                    min_y + (row as f32 + 0.5) * TILE_SIZE,
                ),
                ZIndex(-1),
                Sprite::new("tiles", TILE_SIZE, TILE_SIZE)
                    .with_offset(Vector2 {
                        x: 0.0,
                        y: offset_y,
                    })
                    .with_origin(Vector2 {
                        x: TILE_SIZE * 0.5,
                        y: TILE_SIZE * 0.5,
                    }),
            ));
        }
    }
}

/// Minimal built-in level used when the configured file cannot be loaded.
fn fallback_level() -> Level {
    Level {
        name: "fallback".into(),
        player_spawn: SpawnPoint { x: 64.0, y: 280.0 },
        platforms: vec![PlatformDef {
            x: 320.0,
            y: 336.0,
            w: 640.0,
            h: 32.0,
            group: "ground".into(),
        }],
        coins: Vec::new(),
        npcs: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_files_classify_by_extension() {
        assert_eq!(
            audio_load_cmd(Path::new("./assets/audio/jump.wav")),
            Some(AudioCmd::LoadFx {
                key: "jump".to_string(),
                path: "./assets/audio/jump.wav".to_string(),
            })
        );
        assert_eq!(
            audio_load_cmd(Path::new("./assets/audio/theme.ogg")),
            Some(AudioCmd::LoadTrack {
                key: "theme".to_string(),
                path: "./assets/audio/theme.ogg".to_string(),
            })
        );
        assert_eq!(audio_load_cmd(Path::new("./assets/audio/readme.txt")), None);
        assert_eq!(audio_load_cmd(Path::new("./assets/audio/noext")), None);
    }
}
