//! Data attached to entities.

pub mod animation;
pub mod boxcollider;
pub mod coin;
pub mod contactstate;
pub mod dynamictext;
pub mod group;
pub mod groundsensor;
pub mod interactable;
pub mod mapposition;
pub mod motor;
pub mod persistent;
pub mod rigidbody;
pub mod screenposition;
pub mod signalbinding;
pub mod signals;
pub mod sprite;
pub mod zindex;
