//! ECS side of the audio thread bridge.
//!
//! Call [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioLink`] and message queue resources. Call
//! [`shutdown_audio`] during teardown to stop the thread and free its audio
//! device.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, TryIter, unbounded};
use log::warn;

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;

/// Handle to the background audio thread.
///
/// Created by [`setup_audio`]. Gameplay systems do not hold channel ends;
/// they write [`AudioCmd`] messages and the forwarding system pushes them
/// through [`AudioLink::send`].
#[derive(Resource)]
pub struct AudioLink {
    commands: Sender<AudioCmd>,
    replies: Receiver<AudioMessage>,
    thread: std::thread::JoinHandle<()>,
}

impl AudioLink {
    /// Push one command to the audio thread.
    ///
    /// A send error means the thread is already gone, which only happens
    /// during teardown, so it is swallowed.
    pub fn send(&self, cmd: AudioCmd) {
        let _ = self.commands.send(cmd);
    }

    /// Drain whatever replies the audio thread has produced so far.
    pub fn drain_replies(&self) -> TryIter<'_, AudioMessage> {
        self.replies.try_iter()
    }
}

/// Spawn the audio thread and insert [`AudioLink`] plus the `Messages`
/// queues both directions use.
pub fn setup_audio(world: &mut World) {
    let (cmd_tx, cmd_rx) = unbounded::<AudioCmd>();
    let (msg_tx, msg_rx) = unbounded::<AudioMessage>();

    let thread = std::thread::spawn(move || audio_thread(cmd_rx, msg_tx));

    world.insert_resource(AudioLink {
        commands: cmd_tx,
        replies: msg_rx,
        thread,
    });
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Ask the audio thread to stop and wait for it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(link) = world.remove_resource::<AudioLink>() {
        link.send(AudioCmd::Shutdown);
        if link.thread.join().is_err() {
            warn!("audio thread panicked during shutdown");
        }
    }
}
