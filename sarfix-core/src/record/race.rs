//! Races (`RACE`) and their attack data.

use serde::{Deserialize, Serialize};

use super::{Plugin, Record, RecordGroup, RecordKind};
use crate::types::FormKey;

/// Numeric attack parameters attached to an attack entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackData {
    /// Damage multiplier.
    pub damage_mult: f32,
    /// Chance (0–1) the AI picks this attack.
    pub attack_chance: f32,
    /// Half-angle (degrees) of the strike cone.
    pub strike_angle: f32,
    /// Vertical attack angle (degrees).
    pub attack_angle: f32,
}

impl Default for AttackData {
    fn default() -> Self {
        Self {
            damage_mult: 1.0,
            attack_chance: 1.0,
            strike_angle: 35.0,
            attack_angle: 0.0,
        }
    }
}

/// One attack entry on a race. Entries without data are ignored by rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    /// Animation event name, e.g. `attackStart`.
    pub event: String,
    /// Attack data sub-record.
    pub data: Option<AttackData>,
}

impl Attack {
    /// Attack with data.
    #[must_use]
    pub fn new(event: impl Into<String>, data: AttackData) -> Self {
        Self {
            event: event.into(),
            data: Some(data),
        }
    }

    /// Attack entry without a data sub-record.
    #[must_use]
    pub fn without_data(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: None,
        }
    }
}

/// A race record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    /// Record key.
    pub key: FormKey,
    /// Editor id, e.g. `NordRace`.
    pub editor_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Keyword editor ids, e.g. `ActorTypeNPC`.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Attack entries.
    #[serde(default)]
    pub attacks: Vec<Attack>,
}

impl Race {
    /// Create a race with an editor id and nothing else.
    #[must_use]
    pub fn new(key: FormKey, editor_id: impl Into<String>) -> Self {
        Self {
            key,
            editor_id: Some(editor_id.into()),
            name: None,
            keywords: Vec::new(),
            attacks: Vec::new(),
        }
    }

    /// Builder: add a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Builder: add an attack.
    #[must_use]
    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    /// Whether the race carries `keyword` (case-insensitive).
    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

impl Record for Race {
    const KIND: RecordKind = RecordKind::Race;

    fn key(&self) -> &FormKey {
        &self.key
    }

    fn set_key(&mut self, key: FormKey) {
        self.key = key;
    }

    fn editor_id(&self) -> Option<&str> {
        self.editor_id.as_deref()
    }

    fn group(plugin: &Plugin) -> &RecordGroup<Self> {
        &plugin.races
    }

    fn group_mut(plugin: &mut Plugin) -> &mut RecordGroup<Self> {
        &mut plugin.races
    }
}
