//! Game settings, INI backed.
//!
//! Settings load from an INI file over safe defaults, so a missing file or
//! key never stops the game. Command line flags may override individual
//! values after loading. Sections map onto the nested settings structs:
//! `[render]` holds the internal resolution and scale filter, `[window]`
//! the OS window and timing, `[game]` the level file and `[audio]` the
//! mixer. A partial file is fine:
//!
//! ```ini
//! [window]
//! fullscreen = true
//! target_fps = 144
//!
//! [audio]
//! master_volume = 0.5
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::resources::rendertarget::RenderFilter;

/// Internal render resolution and scaling, the `[render]` section.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub filter: RenderFilter,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            filter: RenderFilter::default(),
        }
    }
}

/// OS window parameters, the `[window]` section.
#[derive(Debug, Clone)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    pub fullscreen: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            target_fps: 120,
            vsync: true,
            fullscreen: false,
        }
    }
}

/// Audio parameters, the `[audio]` section. `mute` comes from the command
/// line only and is never persisted.
#[derive(Debug, Clone)]
pub struct AudioSettings {
    pub master_volume: f32,
    pub mute: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            mute: false,
        }
    }
}

/// Every setting as a single ECS resource.
///
/// Runtime changes are picked up by
/// [`apply_config_changes`](crate::systems::gameconfig::apply_config_changes).
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub render: RenderSettings,
    pub window: WindowSettings,
    pub audio: AudioSettings,
    /// Level file loaded at startup, the `[game]` section.
    pub level_path: PathBuf,
    /// Where the INI lives. Not itself part of the file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            render: RenderSettings::default(),
            window: WindowSettings::default(),
            audio: AudioSettings::default(),
            level_path: PathBuf::from("./assets/levels/level01.json"),
            config_path: PathBuf::from("./config.ini"),
        }
    }
}

impl GameConfig {
    /// Configuration bound to a custom file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::default()
        }
    }

    /// Load the INI file over the current values.
    ///
    /// Keys that are missing or fail to parse keep what they had. Only a
    /// file that cannot be read at all is an error.
    pub fn load(&mut self) -> Result<(), String> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| format!("could not read {:?}: {}", self.config_path, e))?;

        let uint =
            |section: &str, key: &str| ini.getuint(section, key).ok().flatten().map(|v| v as u32);
        let flag = |section: &str, key: &str| ini.getbool(section, key).ok().flatten();

        let render = &mut self.render;
        render.width = uint("render", "width").unwrap_or(render.width);
        render.height = uint("render", "height").unwrap_or(render.height);
        if let Some(filter) = ini.get("render", "filter") {
            render.filter = RenderFilter::parse(&filter);
        }

        let window = &mut self.window;
        window.width = uint("window", "width").unwrap_or(window.width);
        window.height = uint("window", "height").unwrap_or(window.height);
        window.target_fps = uint("window", "target_fps").unwrap_or(window.target_fps);
        window.vsync = flag("window", "vsync").unwrap_or(window.vsync);
        window.fullscreen = flag("window", "fullscreen").unwrap_or(window.fullscreen);

        if let Some(level) = ini.get("game", "level") {
            self.level_path = PathBuf::from(level);
        }
        if let Some(volume) = ini.getfloat("audio", "master_volume").ok().flatten() {
            self.audio.master_volume = (volume as f32).clamp(0.0, 1.0);
        }

        info!(
            "Config: render {}x{} ({}), window {}x{} at {} fps, vsync={}, fullscreen={}",
            self.render.width,
            self.render.height,
            self.render.filter.as_str(),
            self.window.width,
            self.window.height,
            self.window.target_fps,
            self.window.vsync,
            self.window.fullscreen,
        );
        info!(
            "Config: level {:?}, master volume {}",
            self.level_path, self.audio.master_volume
        );

        Ok(())
    }

    /// Write the current values back to the INI file, creating it if needed.
    pub fn save(&self) -> Result<(), String> {
        let mut ini = Ini::new();
        {
            let mut put =
                |section: &str, key: &str, value: String| ini.set(section, key, Some(value));

            put("render", "width", self.render.width.to_string());
            put("render", "height", self.render.height.to_string());
            put("render", "filter", self.render.filter.as_str().to_string());

            put("window", "width", self.window.width.to_string());
            put("window", "height", self.window.height.to_string());
            put("window", "target_fps", self.window.target_fps.to_string());
            put("window", "vsync", self.window.vsync.to_string());
            put("window", "fullscreen", self.window.fullscreen.to_string());

            put("game", "level", self.level_path.display().to_string());

            let volume = self.audio.master_volume.to_string();
            put("audio", "master_volume", volume);
        }

        ini.write(&self.config_path)
            .map_err(|e| format!("could not write {:?}: {}", self.config_path, e))?;
        info!("Config: saved to {:?}", self.config_path);

        Ok(())
    }

    /// Master volume with mute applied.
    pub fn effective_volume(&self) -> f32 {
        if self.audio.mute {
            0.0
        } else {
            self.audio.master_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.render.width, 640);
        assert_eq!(config.render.height, 360);
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.target_fps, 120);
        assert!(config.window.vsync);
        assert!(!config.window.fullscreen);
        assert!(!config.audio.mute);
        assert_eq!(config.config_path, PathBuf::from("./config.ini"));
    }

    #[test]
    fn test_mute_zeroes_effective_volume() {
        let mut config = GameConfig::default();
        config.audio.master_volume = 0.5;
        assert_eq!(config.effective_volume(), 0.5);
        config.audio.mute = true;
        assert_eq!(config.effective_volume(), 0.0);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = std::env::temp_dir().join("coindash_config_test.ini");
        let mut saved = GameConfig::with_path(&path);
        saved.render.width = 320;
        saved.window.target_fps = 60;
        saved.window.vsync = false;
        saved.audio.master_volume = 0.25;
        saved.save().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.render.width, 320);
        assert_eq!(loaded.window.target_fps, 60);
        assert!(!loaded.window.vsync);
        assert_eq!(loaded.audio.master_volume, 0.25);
    }
}
