//! Coindash, a small coin collecting platformer.
//!
//! The binary in `main.rs` runs the game; this library surface exists so
//! integration tests can drive the same components, resources and systems.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
