//! Priority resolution: picks the winning definition of each record.
//!
//! Definitions are layered lowest to highest priority. The winner of a key is
//! its highest-priority non-null definition; null definitions never win and
//! never hide a lower layer. Resolution is a pure fold over the listing, so
//! each key's winner depends only on that key's own definitions.

use indexmap::IndexMap;

use crate::record::Record;
use crate::types::{FormKey, Priority};

/// One plugin's version of a record.
#[derive(Debug)]
pub struct LayeredDefinition<'a, R> {
    /// Load-order position of the defining plugin.
    pub priority: Priority,
    /// Record key.
    pub key: &'a FormKey,
    /// The definition, or `None` for a null definition.
    pub definition: Option<&'a R>,
}

// Manual impls: a derive would require `R: Clone`.
impl<R> Clone for LayeredDefinition<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for LayeredDefinition<'_, R> {}

/// Resolved winner of a key.
#[derive(Debug)]
pub struct Winner<'a, R> {
    /// Record key.
    pub key: &'a FormKey,
    /// Priority of the winning layer.
    pub priority: Priority,
    /// Winning definition. Never mutated.
    pub record: &'a R,
}

/// Resolve the winning definition of `key`.
///
/// Returns the highest-priority non-null definition; on equal priority the
/// later entry wins. Definitions of other keys are ignored. `None` when the
/// key has no non-null definition.
#[must_use]
pub fn resolve<'a, R>(key: &FormKey, definitions: &[LayeredDefinition<'a, R>]) -> Option<&'a R> {
    definitions
        .iter()
        .filter(|d| d.key == key)
        .filter_map(|d| d.definition.map(|r| (d.priority, r)))
        .fold(None, |best: Option<(Priority, &'a R)>, (priority, record)| match best {
            Some((p, _)) if p > priority => best,
            _ => Some((priority, record)),
        })
        .map(|(_, record)| record)
}

/// Resolve every key in a full layer listing.
///
/// Winners come back in order of each key's first appearance, which for a
/// listing sorted by priority is load order.
#[must_use]
pub fn winning_overrides<'a, R: Record>(layers: &[LayeredDefinition<'a, R>]) -> Vec<Winner<'a, R>> {
    let mut slots: IndexMap<&'a FormKey, Option<(Priority, &'a R)>> = IndexMap::new();

    for layer in layers {
        let slot = slots.entry(layer.key).or_insert(None);
        if let Some(record) = layer.definition {
            let replace = slot.is_none_or(|(p, _)| p <= layer.priority);
            if replace {
                *slot = Some((layer.priority, record));
            }
        }
    }

    slots
        .into_iter()
        .filter_map(|(key, slot)| {
            slot.map(|(priority, record)| Winner {
                key,
                priority,
                record,
            })
        })
        .collect()
}
