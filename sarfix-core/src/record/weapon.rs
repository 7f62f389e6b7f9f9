//! Weapons (`WEAP`).

use serde::{Deserialize, Serialize};

use super::{Plugin, Record, RecordGroup, RecordKind};
use crate::types::FormKey;

/// Core stat block of a weapon (`DNAM`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponData {
    /// Swing speed multiplier.
    pub speed: f32,
    /// Reach multiplier.
    pub reach: f32,
    /// Base damage.
    pub damage: u16,
    /// Stagger multiplier.
    pub stagger: f32,
}

impl Default for WeaponData {
    fn default() -> Self {
        Self {
            speed: 1.0,
            reach: 1.0,
            damage: 7,
            stagger: 0.75,
        }
    }
}

/// A weapon record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Record key.
    pub key: FormKey,
    /// Editor id, e.g. `IronSword`.
    pub editor_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Keyword editor ids, e.g. `WeapTypeSword`.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Stat block. Weapons without one are never patched.
    pub data: Option<WeaponData>,
}

impl Weapon {
    /// Create a weapon with default data and no keywords.
    #[must_use]
    pub fn new(key: FormKey, editor_id: impl Into<String>) -> Self {
        Self {
            key,
            editor_id: Some(editor_id.into()),
            name: None,
            keywords: Vec::new(),
            data: Some(WeaponData::default()),
        }
    }

    /// Builder: add a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Builder: set speed and reach.
    #[must_use]
    pub fn with_stats(mut self, speed: f32, reach: f32) -> Self {
        let data = self.data.get_or_insert_with(WeaponData::default);
        data.speed = speed;
        data.reach = reach;
        self
    }

    /// Whether the weapon carries `keyword` (case-insensitive).
    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

impl Record for Weapon {
    const KIND: RecordKind = RecordKind::Weapon;

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
        &plugin.weapons
    }

    fn group_mut(plugin: &mut Plugin) -> &mut RecordGroup<Self> {
        &mut plugin.weapons
    }
}
