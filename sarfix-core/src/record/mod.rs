//! Record type definitions and the [`Plugin`] aggregate.
//!
//! This module contains the three record kinds the patcher touches, plus the
//! [`Plugin`] that groups them per load-order entry.
//!
//! A [`RecordGroup`] maps each [`FormKey`] to an optional definition. A
//! `None` entry is a *null definition*: the plugin mentions the key but
//! carries no data for it, and the resolver never picks it as a winner.

pub mod game_setting;
pub mod race;
pub mod weapon;

pub use game_setting::{GameSetting, GameSettingValue};
pub use race::{Attack, AttackData, Race};
pub use weapon::{Weapon, WeaponData};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{FormKey, ModKey};

/// Which kind of record a type represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// `GMST`: engine tunables.
    GameSetting,
    /// `RACE`: creature/NPC races with attack data.
    Race,
    /// `WEAP`: weapons with speed and reach.
    Weapon,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameSetting => write!(f, "GMST"),
            Self::Race => write!(f, "RACE"),
            Self::Weapon => write!(f, "WEAP"),
        }
    }
}

/// Common behaviour of every patchable record type.
pub trait Record: Clone + PartialEq + fmt::Debug {
    /// Record kind tag.
    const KIND: RecordKind;

    /// Stable key of this record.
    fn key(&self) -> &FormKey;

    /// Re-key the record. Used when a brand-new record is added to a patch.
    fn set_key(&mut self, key: FormKey);

    /// Editor id, if the record has one.
    fn editor_id(&self) -> Option<&str>;

    /// The group holding records of this kind inside a plugin.
    fn group(plugin: &Plugin) -> &RecordGroup<Self>;

    /// Mutable access to the group holding records of this kind.
    fn group_mut(plugin: &mut Plugin) -> &mut RecordGroup<Self>;
}

// ---------------------------------------------------------------------------
// RecordGroup
// ---------------------------------------------------------------------------

/// Ordered collection of one record kind inside a plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordGroup<R> {
    records: IndexMap<FormKey, Option<R>>,
}

impl<R> Default for RecordGroup<R> {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }
}

impl<R: Record> RecordGroup<R> {
    /// Insert or replace a definition under its own key.
    pub fn insert(&mut self, record: R) {
        self.records.insert(record.key().clone(), Some(record));
    }

    /// Insert a null definition for `key`.
    pub fn insert_null(&mut self, key: FormKey) {
        self.records.insert(key, None);
    }

    /// The non-null definition for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &FormKey) -> Option<&R> {
        self.records.get(key).and_then(Option::as_ref)
    }

    /// Mutable access to the non-null definition for `key`.
    pub fn get_mut(&mut self, key: &FormKey) -> Option<&mut R> {
        self.records.get_mut(key).and_then(Option::as_mut)
    }

    /// Whether the group mentions `key` at all (null definitions included).
    #[must_use]
    pub fn contains_key(&self, key: &FormKey) -> bool {
        self.records.contains_key(key)
    }

    /// Remove `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &FormKey) -> Option<Option<R>> {
        self.records.shift_remove(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FormKey, Option<&R>)> {
        self.records.iter().map(|(k, v)| (k, v.as_ref()))
    }

    /// Iterate non-null definitions in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.records.values().filter_map(Option::as_ref)
    }

    /// Number of entries, null definitions included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// One load-order entry: a named set of record groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    /// Plugin file name.
    pub mod_key: ModKey,
    /// Game settings defined or overridden here.
    #[serde(default)]
    pub game_settings: RecordGroup<GameSetting>,
    /// Races defined or overridden here.
    #[serde(default)]
    pub races: RecordGroup<Race>,
    /// Weapons defined or overridden here.
    #[serde(default)]
    pub weapons: RecordGroup<Weapon>,
}

impl Plugin {
    /// Create an empty plugin.
    #[must_use]
    pub fn new(mod_key: ModKey) -> Self {
        Self {
            mod_key,
            game_settings: RecordGroup::default(),
            races: RecordGroup::default(),
            weapons: RecordGroup::default(),
        }
    }

    /// Builder-style insert of any record kind.
    #[must_use]
    pub fn with<R: Record>(mut self, record: R) -> Self {
        R::group_mut(&mut self).insert(record);
        self
    }

    /// Total number of entries across all groups.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.game_settings.len() + self.races.len() + self.weapons.len()
    }

    /// Whether the plugin carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: u32) -> FormKey {
        FormKey::new(ModKey::new("Skyrim.esm"), id)
    }

    #[test]
    fn null_definitions_are_tracked_but_not_returned() {
        let mut group: RecordGroup<Weapon> = RecordGroup::default();
        group.insert_null(key(1));
        assert!(group.contains_key(&key(1)));
        assert!(group.get(&key(1)).is_none());
        assert_eq!(group.records().count(), 0);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn remove_keeps_order() {
        let mut plugin = Plugin::new(ModKey::new("Skyrim.esm"));
        for id in 1..=3 {
            plugin = plugin.with(Weapon::new(key(id), format!("Weapon{id}")));
        }
        plugin.weapons.remove(&key(2));
        let ids: Vec<u32> = plugin.weapons.records().map(|w| w.key.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn plugin_counts_all_groups() {
        let plugin = Plugin::new(ModKey::new("Skyrim.esm"))
            .with(Weapon::new(key(1), "IronSword"))
            .with(Race::new(key(2), "NordRace"))
            .with(GameSetting::float(key(3), "fObjectHitWeaponReach", 75.0));
        assert_eq!(plugin.record_count(), 3);
        assert!(!plugin.is_empty());
    }

    #[test]
    fn plugin_json_round_trip_keeps_null_entries() {
        let mut plugin = Plugin::new(ModKey::new("Mod.esp")).with(Weapon::new(key(1), "IronSword"));
        plugin.weapons.insert_null(key(2));
        let json = serde_json::to_string(&plugin).expect("serialize");
        let back: Plugin = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, plugin);
    }
}
