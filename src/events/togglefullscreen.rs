//! Window mode switching.
//!
//! Pressing F10 triggers [`ToggleFullscreenEvent`], handled by
//! [`toggle_fullscreen_observer`]. The [`FullScreen`] marker resource tracks
//! which mode the window is in.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::ffi;

use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;

/// Asks the window to switch between fullscreen and windowed mode.
///
/// The input system fires this on the fullscreen key (F10); the config
/// watcher fires it when the INI setting and the window disagree.
#[derive(Event, Debug, Clone, Copy)]
pub struct ToggleFullscreenEvent {}

/// Observer that flips the window mode and the [`FullScreen`] marker.
///
/// The marker is present exactly while the window is fullscreen.
pub fn toggle_fullscreen_observer(
    _trigger: On<ToggleFullscreenEvent>,
    mut commands: Commands,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    config: Res<GameConfig>,
    marker: Option<Res<FullScreen>>,
) {
    if marker.is_none() {
        commands.insert_resource(FullScreen);
        if !rl.is_window_fullscreen() && !enter_fullscreen(&mut rl) {
            error!("Failed to enter fullscreen");
        }
    } else {
        commands.remove_resource::<FullScreen>();
        if rl.is_window_fullscreen() && !leave_fullscreen(&mut rl, &config) {
            error!("Failed to leave fullscreen");
        }
    }
}

/// Grow the window to the current monitor and flip raylib's fullscreen flag.
fn enter_fullscreen(rl: &mut raylib::RaylibHandle) -> bool {
    rl.maximize_window();
    let monitor: i32 = unsafe { ffi::GetCurrentMonitor() };
    let monitor_w = unsafe { ffi::GetMonitorWidth(monitor) };
    let monitor_h = unsafe { ffi::GetMonitorHeight(monitor) };
    info!("Going fullscreen on monitor {} ({}x{})", monitor, monitor_w, monitor_h);
    rl.set_window_size(monitor_w, monitor_h);
    rl.toggle_fullscreen();
    rl.is_window_fullscreen()
}

/// Flip back to windowed mode at the size the config asks for.
fn leave_fullscreen(rl: &mut raylib::RaylibHandle, config: &GameConfig) -> bool {
    rl.toggle_fullscreen();
    let (w, h) = (config.window.width as i32, config.window.height as i32);
    rl.set_window_size(w, h);
    rl.restore_window();
    info!("Back to windowed {}x{}", w, h);
    !rl.is_window_fullscreen()
}
