// Per-entity signals read by animation rules and text bindings

use std::borrow::Cow;

use bevy_ecs::prelude::{Component, Entity};
use rustc_hash::{FxHashMap, FxHashSet};

/// One named signal value.
///
/// A key holds exactly one of these; writing a different variant under the
/// same key replaces what was there. Flags live outside this enum because
/// their meaning is presence, not value.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Scalar(f32),
    Integer(i32),
    Text(String),
    Handle(Entity),
}

impl Signal {
    /// Printable form for text bindings. Handles have none.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Signal::Scalar(v) => Some(Cow::Owned(v.to_string())),
            Signal::Integer(v) => Some(Cow::Owned(v.to_string())),
            Signal::Text(v) => Some(Cow::Borrowed(v)),
            Signal::Handle(_) => None,
        }
    }
}

/// Named values attached to one entity.
///
/// Gameplay systems write these ("speed", "vspeed", "grounded"); the
/// animation controller and signal bindings read them.
#[derive(Debug, Clone, Component, Default)]
pub struct Signals {
    values: FxHashMap<String, Signal>,
    flags: FxHashSet<String>,
}

impl Signals {
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.values.insert(key.into(), Signal::Scalar(value));
    }

    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        match self.values.get(key) {
            Some(Signal::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.values.insert(key.into(), Signal::Integer(value));
    }

    pub fn get_integer(&self, key: &str) -> Option<i32> {
        match self.values.get(key) {
            Some(Signal::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    /// Raw slot access, for readers that take any signal type.
    pub fn signal(&self, key: &str) -> Option<&Signal> {
        self.values.get(key)
    }

    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }

    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }

    /// Builder-style: start with a scalar set.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_scalar(mut self, key: impl Into<String>, value: f32) -> Self {
        self.set_scalar(key, value);
        self
    }

    /// Builder-style: start with an integer set.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_integer(mut self, key: impl Into<String>, value: i32) -> Self {
        self.set_integer(key, value);
        self
    }

    /// Builder-style: start with a flag set.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.set_flag(key);
        self
    }
}
