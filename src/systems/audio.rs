//! Audio playback on a dedicated thread.
//!
//! [`audio_thread`] owns the raylib audio device on its own OS thread and
//! reacts to [`AudioCmd`](crate::events::audio::AudioCmd) messages with
//! [`AudioMessage`](crate::events::audio::AudioMessage) replies. The other
//! systems bridge the thread with the ECS world each frame:
//! [`push_audio_cmds`] forwards commands over the channel,
//! [`pull_audio_replies`] drains replies into the message queue,
//! [`tick_audio_cmds`] and [`tick_audio_replies`] advance the two queues and
//! [`log_audio_replies`] reports load failures.
//!
//! Every raylib audio call stays on the one thread; the main thread only
//! touches the channel ends inside
//! [`AudioLink`](crate::resources::audio::AudioLink). The thread starts in
//! [`setup_audio`](crate::resources::audio::setup_audio), joins in
//! [`shutdown_audio`](crate::resources::audio::shutdown_audio) and wakes at
//! [`PUMP_INTERVAL`] to keep music streams fed while tracks are playing.

use std::time::Duration;

use bevy_ecs::prelude::{MessageReader, MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioLink;

/// How long the audio thread waits for a command before pumping streams.
const PUMP_INTERVAL: Duration = Duration::from_millis(10);

/// Margin under the track length at which a silent stream counts as ended.
const END_MARGIN: f32 = 0.01;

/// Drain pending replies from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox.
///
/// Non-blocking; intended to run each frame on the main thread.
pub fn pull_audio_replies(link: Res<AudioLink>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(link.drain_replies());
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// The [`Messages`] API needs `update()` once per frame so newly written
/// messages become visible to readers. Run this after
/// [`pull_audio_replies`].
pub fn tick_audio_replies(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS [`AudioCmd`] messages to the audio thread.
pub fn push_audio_cmds(link: Res<AudioLink>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        link.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`] so same-frame readers can
/// observe writes.
pub fn tick_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Log audio thread replies on the main thread.
///
/// Load failures surface as warnings so a missing asset file is visible in
/// the main log.
pub fn log_audio_replies(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::TrackLoadFailed { key, error } => {
                warn!("Track '{}' failed to load: {}", key, error);
            }
            AudioMessage::FxLoadFailed { key, error } => {
                warn!("Sound '{}' failed to load: {}", key, error);
            }
            other => debug!("Audio message: {:?}", other),
        }
    }
}

/// Entry point of the dedicated audio thread.
///
/// The thread initializes the raylib audio device, keeps every `Music` and
/// `Sound` handle in an [`AudioBank`], reacts to [`AudioCmd`] inputs and
/// reports state changes as [`AudioMessage`] replies.
///
/// Blocks until [`AudioCmd::Shutdown`] arrives or the command channel
/// disconnects, then drops every handle and exits.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = RaylibAudio::init_audio_device()
        .unwrap_or_else(|e| panic!("audio device init failed: {}", e));

    eprintln!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut bank = AudioBank::default();
    'run: loop {
        // Block until a command arrives or it is time to pump streams again.
        match rx_cmd.recv_timeout(PUMP_INTERVAL) {
            Ok(first) => {
                for cmd in std::iter::once(first).chain(rx_cmd.try_iter()) {
                    if !bank.handle(cmd, &audio, &tx_msg) {
                        break 'run;
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            // Main thread dropped the link without a Shutdown; treat it the same.
            Err(RecvTimeoutError::Disconnected) => break 'run,
        }

        bank.pump(&tx_msg);
    }

    eprintln!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
    // `bank` drops its handles here, before `audio`, which owns the device.
}

/// All handles owned by the audio thread; every one borrows the device.
///
/// `playing` holds the track keys that are mid-playback, `looping` the
/// subset that restarts when its stream runs out.
#[derive(Default)]
struct AudioBank<'aud> {
    tracks: FxHashMap<String, Music<'aud>>,
    playing: FxHashSet<String>,
    looping: FxHashSet<String>,
    fx: FxHashMap<String, Sound<'aud>>,
}

impl<'aud> AudioBank<'aud> {
    /// Apply one command. Returns false when the thread should exit.
    fn handle(
        &mut self,
        cmd: AudioCmd,
        audio: &'aud RaylibAudio,
        tx_msg: &Sender<AudioMessage>,
    ) -> bool {
        match cmd {
            AudioCmd::LoadTrack { key, path } => match audio.new_music(&path) {
                Ok(track) => {
                    eprintln!("[audio] loaded key='{}' path='{}'", key, path);
                    self.tracks.insert(key.clone(), track);
                    let _ = tx_msg.send(AudioMessage::TrackLoaded { key });
                }
                Err(e) => {
                    eprintln!(
                        "[audio] load failed key='{}' path='{}' error='{}'",
                        key, path, e
                    );
                    let _ = tx_msg.send(AudioMessage::TrackLoadFailed {
                        key,
                        error: e.to_string(),
                    });
                }
            },
            AudioCmd::PlayTrack { key, looped } => {
                let Some(track) = self.tracks.get(&key) else {
                    eprintln!("[audio] play failed key='{}' reason='not loaded'", key);
                    return true;
                };
                eprintln!("[audio] play start key='{}' looped={}", key, looped);
                track.seek_stream(0.0);
                track.play_stream();
                self.playing.insert(key.clone());
                if looped {
                    self.looping.insert(key.clone());
                } else {
                    self.looping.remove(&key);
                }
                let _ = tx_msg.send(AudioMessage::TrackStarted { key });
            }
            AudioCmd::StopTrack { key } => {
                if let Some(track) = self.tracks.get(&key) {
                    eprintln!("[audio] stop key='{}'", key);
                    track.stop_stream();
                    self.playing.remove(&key);
                    self.looping.remove(&key);
                    let _ = tx_msg.send(AudioMessage::TrackStopped { key });
                }
            }
            AudioCmd::LoadFx { key, path } => match audio.new_sound(&path) {
                Ok(sound) => {
                    eprintln!("[audio] fx loaded key='{}' path='{}'", key, path);
                    self.fx.insert(key.clone(), sound);
                    let _ = tx_msg.send(AudioMessage::FxLoaded { key });
                }
                Err(e) => {
                    eprintln!(
                        "[audio] fx load failed key='{}' path='{}' error='{}'",
                        key, path, e
                    );
                    let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                        key,
                        error: e.to_string(),
                    });
                }
            },
            AudioCmd::PlayFx { key } => {
                if let Some(sound) = self.fx.get(&key) {
                    eprintln!("[audio] fx play key='{}'", key);
                    sound.play();
                } else {
                    eprintln!("[audio] fx play failed key='{}' reason='not loaded'", key);
                }
            }
            AudioCmd::PitchFx { key, pitch } => {
                if let Some(sound) = self.fx.get(&key) {
                    eprintln!("[audio] fx pitch key='{}' pitch={}", key, pitch);
                    sound.set_pitch(pitch);
                }
            }
            AudioCmd::SetMasterVolume { volume } => {
                eprintln!("[audio] master volume vol={}", volume);
                audio.set_master_volume(volume);
            }
            AudioCmd::Shutdown => {
                eprintln!("[audio] shutdown requested");
                return false;
            }
        }
        true
    }

    /// Keep the live streams fed. A stream that went silent close to its
    /// total length ended on its own: restart it if it loops, retire it
    /// otherwise.
    fn pump(&mut self, tx_msg: &Sender<AudioMessage>) {
        let tracks = &self.tracks;
        let looping = &self.looping;
        self.playing.retain(|key| {
            let Some(track) = tracks.get(key) else {
                return false;
            };
            if track.is_stream_playing() {
                track.update_stream();
                return true;
            }
            if track.get_time_played() < track.get_time_length() - END_MARGIN {
                // Silent but nowhere near the end: not started yet. Leave it.
                return true;
            }
            if looping.contains(key) {
                eprintln!("[audio] restarting looped key='{}'", key);
                track.seek_stream(0.0);
                track.play_stream();
                let _ = tx_msg.send(AudioMessage::TrackStarted { key: key.clone() });
                true
            } else {
                eprintln!("[audio] finished key='{}'", key);
                let _ = tx_msg.send(AudioMessage::TrackFinished { key: key.clone() });
                false
            }
        });
    }
}
