//! Message types exchanged with the background audio thread.
//!
//! Gameplay systems never talk to the audio device directly. They write
//! [`AudioCmd`] messages which the forwarding system pushes through
//! [`AudioLink`](crate::resources::audio::AudioLink); the thread answers
//! with [`AudioMessage`] values that are republished into the ECS.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
///
/// `key` names a previously loaded sound or track. Cue names double as
/// sound keys: "jump", "land", "coin", "talk".
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadTrack { key: String, path: String },
    PlayTrack { key: String, looped: bool },
    StopTrack { key: String },
    LoadFx { key: String, path: String },
    PlayFx { key: String },
    /// Set the playback pitch of a loaded sound. 1.0 is unmodified.
    PitchFx { key: String, pitch: f32 },
    /// Set the device master volume in [0, 1].
    SetMasterVolume { volume: f32 },
    Shutdown,
}

/// Replies sent *back* from the audio thread.
#[derive(Message, Debug, Clone)]
pub enum AudioMessage {
    TrackLoaded { key: String },
    TrackLoadFailed { key: String, error: String },
    TrackStarted { key: String },
    TrackStopped { key: String },
    /// A non looping track reached its end.
    TrackFinished { key: String },
    FxLoaded { key: String },
    FxLoadFailed { key: String, error: String },
}
