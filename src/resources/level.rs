//! Level data loaded from JSON.
//!
//! A level file declares where the player starts, the solid platforms, the
//! coins and the NPCs. [`enter_play`](crate::game::enter_play) reads the
//! resource and spawns the matching entities.
//!
//! # Level File Format
//!
//! ```json
//! {
//!   "name": "first steps",
//!   "player_spawn": { "x": 64.0, "y": 200.0 },
//!   "platforms": [ { "x": 160.0, "y": 320.0, "w": 320.0, "h": 32.0 } ],
//!   "coins": [ { "x": 120.0, "y": 280.0 } ],
//!   "npcs": [ { "x": 300.0, "y": 288.0, "line": "Hello!", "cue": "talk" } ]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

fn default_coin_value() -> i32 {
    1
}

fn default_platform_group() -> String {
    "ground".into()
}

/// Player start position in map coordinates.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

/// One solid platform, positioned by its center.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Group the collider is tagged with, matched by sensor masks.
    #[serde(default = "default_platform_group")]
    pub group: String,
}

/// One collectible coin.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CoinDef {
    pub x: f32,
    pub y: f32,
    /// Amount added to the coin total on pickup.
    #[serde(default = "default_coin_value")]
    pub value: i32,
}

/// One NPC with a dialogue line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NpcDef {
    pub x: f32,
    pub y: f32,
    /// Line shown when the player interacts.
    pub line: String,
    /// Audio cue played alongside the line, if any.
    #[serde(default)]
    pub cue: Option<String>,
}

/// Parsed level file.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct Level {
    pub name: String,
    pub player_spawn: SpawnPoint,
    pub platforms: Vec<PlatformDef>,
    pub coins: Vec<CoinDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
}

impl Level {
    /// Load and parse a level file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level file {:?}: {}", path, e))?;
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse level {:?}: {}", path, e))
    }
}
