//! ECS systems.
//!
//! Everything the update schedule runs each frame, from input sampling
//! through simulation to the final draw, plus the audio thread entry point.
//!
//! Submodules overview
//! - [`animation`] – clip playback and rule driven clip selection
//! - [`audio`] – the audio thread and its main thread bridge
//! - [`collision`] – AABB overlap detection, contact events, solid resolution
//! - [`gameconfig`] – pushes config changes out to the window and audio
//! - [`gamestate`] – pending transition polling and the playing run condition
//! - [`groundsensor`] – downward sweep that reports ground under entities
//! - [`input`] – samples raylib input into the per frame key state
//! - [`motor`] – turns held keys into platformer movement
//! - [`movement`] – integrates rigid body velocities into positions
//! - [`render`] – world pass, HUD text pass and the debug overlay
//! - [`signalbinding`] – mirrors signal values into HUD text
//! - [`time`] – advances the shared clock

pub mod animation;
pub mod audio;
pub mod collision;
pub mod gameconfig;
pub mod gamestate;
pub mod groundsensor;
pub mod input;
pub mod motor;
pub mod movement;
pub mod render;
pub mod signalbinding;
pub mod time;
