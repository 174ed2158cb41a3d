//! Applies configuration changes to the running game.
//!
//! Watches [`GameConfig`] and pushes its settings out to the window, the
//! render target and the audio thread. Runs once when the resource is first
//! inserted, then again whenever something mutates it.

use bevy_ecs::prelude::*;
use log::{debug, error, info};
use raylib::ffi;

use crate::events::audio::AudioCmd;
use crate::events::togglefullscreen::ToggleFullscreenEvent;
use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;

/// Apply game configuration changes to the running game.
///
/// Covers the internal render resolution and scaling filter, the fullscreen
/// state, vsync, the FPS cap and the master volume.
pub fn apply_config_changes(
    config: Option<Res<GameConfig>>,
    mut commands: Commands,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut render_target: NonSendMut<RenderTarget>,
    mut screen: ResMut<ScreenSize>,
    mut audio_cmds: MessageWriter<AudioCmd>,
    marker: Option<Res<FullScreen>>,
) {
    let Some(config) = config else {
        return;
    };
    if !config.is_changed() && !config.is_added() {
        return;
    }

    // Resize the framebuffer when the configured internal resolution moved.
    // ScreenSize follows so HUD layout and camera math pick it up.
    if render_target.width != config.render.width
        || render_target.height != config.render.height
    {
        match render_target.recreate(&mut rl, &th, config.render.width, config.render.height) {
            Ok(()) => *screen = ScreenSize::new(config.render.width, config.render.height),
            Err(e) => error!("{}", e),
        }
    }
    render_target.set_filter(config.render.filter);

    // The window is fullscreen exactly while the FullScreen marker resource
    // exists. When the config disagrees, fire the toggle and let its
    // observer reconcile the two.
    let is_fullscreen = marker.is_some();
    if config.window.fullscreen != is_fullscreen {
        info!(
            "Config wants fullscreen={} but window has {}, toggling",
            config.window.fullscreen, is_fullscreen
        );
        commands.trigger(ToggleFullscreenEvent {});
    }

    let vsync_flag = ffi::ConfigFlags::FLAG_VSYNC_HINT as u32;
    unsafe {
        if config.window.vsync {
            ffi::SetWindowState(vsync_flag);
        } else {
            ffi::ClearWindowState(vsync_flag);
        }
    }

    rl.set_target_fps(config.window.target_fps);

    audio_cmds.write(AudioCmd::SetMasterVolume {
        volume: config.effective_volume(),
    });

    debug!("GameConfig changes applied");
}
