//! Domain events and their observers.
//!
//! Events keep systems decoupled: the collision detector does not know about
//! coins, the input system does not know about jumping. Observers placed next
//! to each event type react to it.
//!
//! Submodules:
//! - [`audio`] – command and reply messages for the audio thread
//! - [`collision`] – solid contact and sensor overlap notifications
//! - [`gamestate`] – the transition event and the observer applying it
//! - [`input`] – logical input actions with press/release edges
//! - [`toggledebug`] – flips the debug overlay
//! - [`togglefullscreen`] – flips the window mode

pub mod audio;
pub mod collision;
pub mod gamestate;
pub mod input;
pub mod toggledebug;
pub mod togglefullscreen;
