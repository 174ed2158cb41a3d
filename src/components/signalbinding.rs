//! Binding from a signal value to a [`DynamicText`] content.
//!
//! The binding system looks the signal up each frame (world signals or a
//! specific entity's [`Signals`] component), formats it and writes the result
//! into the text component on the same entity.
//!
//! [`DynamicText`]: crate::components::dynamictext::DynamicText
//! [`Signals`]: crate::components::signals::Signals

use std::borrow::Cow;

use bevy_ecs::prelude::{Component, Entity};

/// Where a bound signal is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalSource {
    /// The global [`WorldSignals`](crate::resources::worldsignals::WorldSignals)
    /// resource.
    #[default]
    World,
    /// The [`Signals`](crate::components::signals::Signals) component of a
    /// specific entity.
    Entity(Entity),
}

/// Keeps a [`DynamicText`](crate::components::dynamictext::DynamicText) on the
/// same entity in sync with a named signal.
#[derive(Component, Debug, Clone)]
pub struct SignalBinding {
    /// Signal name to look up. A stored value renders in its text form, a
    /// bare flag as `true`.
    pub signal: String,
    pub source: SignalSource,
    /// Optional format string. `{}` is replaced with the signal value;
    /// without it the raw value becomes the text.
    pub format: Option<String>,
}

impl SignalBinding {
    pub fn new(signal: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
            source: SignalSource::World,
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_source_entity(mut self, entity: Entity) -> Self {
        self.source = SignalSource::Entity(entity);
        self
    }

    /// Text produced for a signal value, applying the format template if set.
    pub fn render(&self, value: Cow<'_, str>) -> String {
        match &self.format {
            Some(template) => template.replace("{}", &value),
            None => value.into_owned(),
        }
    }
}
