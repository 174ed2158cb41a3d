//! Signal binding system for reactive text updates.
//!
//! Synchronizes [`DynamicText`](crate::components::dynamictext::DynamicText)
//! content with signal values according to each entity's
//! [`SignalBinding`](crate::components::signalbinding::SignalBinding). The
//! coin counter and the dialogue line in the HUD are both driven this way.

use std::borrow::Cow;
use std::sync::Arc;

use bevy_ecs::prelude::*;

use crate::components::dynamictext::DynamicText;
use crate::components::signalbinding::{SignalBinding, SignalSource};
use crate::components::signals::{Signal, Signals};
use crate::resources::worldsignals::WorldSignals;

/// Update bound [`DynamicText`] contents from their signals.
///
/// The bound key is looked up in [`WorldSignals`] or in the source entity's
/// [`Signals`]. A stored value renders through [`Signal::as_text`], a bare
/// flag renders as `"true"`, and a missing signal leaves the text untouched.
pub fn update_signal_bindings(
    mut query: Query<(&mut DynamicText, &SignalBinding)>,
    world_signals: Res<WorldSignals>,
    signals_query: Query<&Signals>,
) {
    for (mut label, binding) in query.iter_mut() {
        let key = binding.signal.as_str();
        let looked_up = match binding.source {
            SignalSource::World => {
                slot_text(world_signals.signal(key), world_signals.has_flag(key))
            }
            SignalSource::Entity(entity) => signals_query
                .get(entity)
                .ok()
                .and_then(|signals| slot_text(signals.signal(key), signals.has_flag(key))),
        };
        let Some(value) = looked_up else {
            continue;
        };

        let rendered = binding.render(value);
        // untouched content keeps its allocation
        if *label.text != *rendered {
            label.text = Arc::from(rendered);
        }
    }
}

/// Printable form of a signal slot: the stored value if it has one, `"true"`
/// for a bare flag, `None` otherwise.
fn slot_text<'a>(value: Option<&'a Signal>, flagged: bool) -> Option<Cow<'a, str>> {
    if let Some(text) = value.and_then(Signal::as_text) {
        return Some(text);
    }
    flagged.then(|| Cow::Borrowed("true"))
}
