//! Record store: the load order the patcher reads from and the patch it
//! writes to.
//!
//! [`RecordStore`] is the seam between the engine and whatever actually holds
//! plugin data. [`LoadOrder`] is the in-memory implementation:
//!
//! ```text
//! priority 0      1           2             patch (never listed)
//! ┌──────────┐ ┌──────────┐ ┌───────────┐   ┌────────────────────────┐
//! │Skyrim.esm│ │Update.esm│ │SomeMod.esp│   │SpeedAndReachFixes.esp  │
//! └──────────┘ └──────────┘ └───────────┘   └────────────────────────┘
//!      list_layers() ──────────────────▶       get_or_create_override()
//!                                               remove_override()
//!                                               add_new_record()
//! ```
//!
//! The patch is kept out of [`RecordStore::list_layers`] so the patcher never
//! reads its own output back as input. Overrides are copy-on-write: the first
//! `get_or_create_override` for a key clones the winner into the patch, later
//! calls return that same copy.

use tracing::{debug, info};

use crate::error::{PatchError, Result};
use crate::record::{Plugin, Record};
use crate::resolver::LayeredDefinition;
use crate::types::{FormKey, MAX_LOCAL_ID, ModKey, Priority};

/// First local id handed out for records created in the patch.
pub const FIRST_NEW_LOCAL_ID: u32 = 0x800;

/// Read layered definitions, write overrides.
pub trait RecordStore {
    /// Every definition of kind `R`, lowest to highest priority.
    fn list_layers<R: Record>(&self) -> Vec<LayeredDefinition<'_, R>>;

    /// The patch's override of `winner`, created as a clone of `winner` if the
    /// patch has none yet.
    ///
    /// # Errors
    /// Store-specific failures.
    fn get_or_create_override<R: Record>(&mut self, winner: &R) -> Result<&mut R>;

    /// Make `record` the patch's override of its key, discarding any override
    /// already there, and return it for the rules to edit.
    ///
    /// # Errors
    /// Store-specific failures.
    fn replace_override<R: Record>(&mut self, record: R) -> Result<&mut R>;

    /// Drop the patch's override of `key`. Returns whether one existed.
    ///
    /// # Errors
    /// Store-specific failures.
    fn remove_override<R: Record>(&mut self, key: &FormKey) -> Result<bool>;

    /// Add a brand-new record to the patch and return its key.
    ///
    /// # Errors
    /// Store-specific failures, e.g. running out of form ids.
    fn add_new_record<R: Record>(&mut self, record: R) -> Result<FormKey>;

    /// The patch's current override of `key`, if any.
    fn override_of<R: Record>(&self, key: &FormKey) -> Option<&R>;
}

// ---------------------------------------------------------------------------
// LoadOrder
// ---------------------------------------------------------------------------

/// In-memory load order plus output patch.
#[derive(Debug, Clone)]
pub struct LoadOrder {
    plugins: Vec<Plugin>,
    patch: Plugin,
    next_local_id: u32,
}

impl LoadOrder {
    /// An empty load order writing to a patch named `patch_name`.
    #[must_use]
    pub fn new(patch_name: impl Into<String>) -> Self {
        Self {
            plugins: Vec::new(),
            patch: Plugin::new(ModKey::new(patch_name)),
            next_local_id: FIRST_NEW_LOCAL_ID,
        }
    }

    /// Builder: append a plugin at the top of the load order.
    #[must_use]
    pub fn with_plugin(mut self, plugin: Plugin) -> Self {
        self.push(plugin);
        self
    }

    /// Start from an existing patch, e.g. the output of a previous run.
    ///
    /// New-record ids continue after the highest id already used by records
    /// the patch itself defines.
    #[must_use]
    pub fn with_patch(mut self, patch: Plugin) -> Self {
        let highest = own_records_max_id(&patch);
        self.next_local_id = highest.map_or(FIRST_NEW_LOCAL_ID, |id| (id + 1).max(FIRST_NEW_LOCAL_ID));
        self.patch = patch;
        self
    }

    /// Append a plugin at the top of the load order.
    pub fn push(&mut self, plugin: Plugin) {
        debug!(plugin = %plugin.mod_key, priority = self.plugins.len(), "Plugin added to load order");
        self.plugins.push(plugin);
    }

    /// Plugins in load order.
    #[must_use]
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// The output patch.
    #[must_use]
    pub fn patch(&self) -> &Plugin {
        &self.patch
    }

    /// Consume the store and return the output patch.
    #[must_use]
    pub fn into_patch(self) -> Plugin {
        info!(
            patch = %self.patch.mod_key,
            records = self.patch.record_count(),
            "Patch finalized"
        );
        self.patch
    }

    fn allocate_key(&mut self) -> Result<FormKey> {
        if self.next_local_id > MAX_LOCAL_ID {
            return Err(PatchError::FormIdExhausted {
                plugin: self.patch.mod_key.to_string(),
            });
        }
        let key = FormKey::new(self.patch.mod_key.clone(), self.next_local_id);
        self.next_local_id += 1;
        Ok(key)
    }
}

fn own_records_max_id(patch: &Plugin) -> Option<u32> {
    let own = |key: &FormKey| (key.plugin == patch.mod_key).then_some(key.id);
    patch
        .game_settings
        .iter()
        .map(|(k, _)| k)
        .chain(patch.races.iter().map(|(k, _)| k))
        .chain(patch.weapons.iter().map(|(k, _)| k))
        .filter_map(own)
        .max()
}

impl RecordStore for LoadOrder {
    fn list_layers<R: Record>(&self) -> Vec<LayeredDefinition<'_, R>> {
        self.plugins
            .iter()
            .enumerate()
            .flat_map(|(index, plugin)| {
                R::group(plugin).iter().map(move |(key, definition)| LayeredDefinition {
                    priority: Priority(index),
                    key,
                    definition,
                })
            })
            .collect()
    }

    fn get_or_create_override<R: Record>(&mut self, winner: &R) -> Result<&mut R> {
        let group = R::group_mut(&mut self.patch);
        let key = winner.key();
        if group.get(key).is_none() {
            group.insert(winner.clone());
        }
        group
            .get_mut(key)
            .ok_or_else(|| PatchError::RecordNotFound(key.clone()))
    }

    fn replace_override<R: Record>(&mut self, record: R) -> Result<&mut R> {
        let group = R::group_mut(&mut self.patch);
        let key = record.key().clone();
        group.insert(record);
        group.get_mut(&key).ok_or(PatchError::RecordNotFound(key))
    }

    fn remove_override<R: Record>(&mut self, key: &FormKey) -> Result<bool> {
        Ok(R::group_mut(&mut self.patch).remove(key).is_some())
    }

    fn add_new_record<R: Record>(&mut self, mut record: R) -> Result<FormKey> {
        let patch_key = self.patch.mod_key.clone();
        // A new record from an earlier pass with the same editor id is
        // replaced in place.
        let existing = record.editor_id().and_then(|edid| {
            R::group(&self.patch)
                .records()
                .find(|r| r.key().plugin == patch_key && r.editor_id() == Some(edid))
                .map(|r| r.key().clone())
        });

        let key = match existing {
            Some(key) => key,
            None => self.allocate_key()?,
        };
        record.set_key(key.clone());
        R::group_mut(&mut self.patch).insert(record);
        Ok(key)
    }

    fn override_of<R: Record>(&self, key: &FormKey) -> Option<&R> {
        R::group(&self.patch).get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{GameSetting, Weapon};

    fn key(id: u32) -> FormKey {
        FormKey::new(ModKey::new("Skyrim.esm"), id)
    }

    fn store() -> LoadOrder {
        LoadOrder::new("Patch.esp")
            .with_plugin(Plugin::new(ModKey::new("Skyrim.esm")).with(Weapon::new(key(1), "IronSword")))
            .with_plugin(
                Plugin::new(ModKey::new("Mod.esp"))
                    .with(Weapon::new(key(1), "IronSword").with_stats(0.8, 1.0))
                    .with(Weapon::new(key(2), "SteelSword")),
            )
    }

    #[test]
    fn layers_are_listed_in_priority_order() {
        let store = store();
        let layers = store.list_layers::<Weapon>();
        let priorities: Vec<usize> = layers.iter().map(|l| l.priority.0).collect();
        assert_eq!(priorities, vec![0, 1, 1]);
        assert!(store.list_layers::<GameSetting>().is_empty());
    }

    #[test]
    fn override_is_created_once() {
        let mut store = store();
        let winner = Weapon::new(key(1), "IronSword").with_stats(0.8, 1.0);

        store.get_or_create_override(&winner).expect("override").data.as_mut().expect("data").speed = 1.0;
        let again = store.get_or_create_override(&winner).expect("override");
        assert!((again.data.expect("data").speed - 1.0).abs() < f32::EPSILON, "same clone returned");
        assert_eq!(store.patch().weapons.len(), 1);
    }

    #[test]
    fn patch_is_not_a_layer() {
        let mut store = store();
        let winner = Weapon::new(key(1), "IronSword");
        store.get_or_create_override(&winner).expect("override");
        assert_eq!(store.list_layers::<Weapon>().len(), 3);
    }

    #[test]
    fn replace_override_discards_previous_copy() {
        let mut store = store();
        let winner = Weapon::new(key(1), "IronSword").with_stats(0.8, 1.0);
        let mut stale = winner.clone().with_stats(0.5, 2.0);
        stale.name = Some("Old".into());
        store.replace_override(stale).expect("seed");

        let fresh = store.replace_override(winner.clone()).expect("replace");
        assert_eq!(*fresh, winner);
        assert_eq!(store.patch().weapons.len(), 1);
    }

    #[test]
    fn remove_override_is_idempotent() {
        let mut store = store();
        let winner = Weapon::new(key(1), "IronSword");
        store.get_or_create_override(&winner).expect("override");
        assert!(store.remove_override::<Weapon>(&key(1)).expect("remove"));
        assert!(!store.remove_override::<Weapon>(&key(1)).expect("remove"));
        assert!(store.override_of::<Weapon>(&key(1)).is_none());
    }

    #[test]
    fn new_records_get_patch_keys() {
        let mut store = store();
        let placeholder = FormKey::new(ModKey::new("Patch.esp"), 0);
        let first = store
            .add_new_record(GameSetting::float(placeholder.clone(), "fNewSettingA", 1.0))
            .expect("add");
        let second = store
            .add_new_record(GameSetting::float(placeholder, "fNewSettingB", 2.0))
            .expect("add");

        assert_eq!(first.to_string(), "000800:Patch.esp");
        assert_eq!(second.id, FIRST_NEW_LOCAL_ID + 1);
        assert!(store.override_of::<GameSetting>(&first).is_some());
    }

    #[test]
    fn re_adding_same_editor_id_replaces() {
        let mut store = store();
        let placeholder = FormKey::new(ModKey::new("Patch.esp"), 0);
        let first = store
            .add_new_record(GameSetting::float(placeholder.clone(), "fNewSetting", 1.0))
            .expect("add");
        let again = store
            .add_new_record(GameSetting::float(placeholder, "fNewSetting", 2.0))
            .expect("add");
        assert_eq!(first, again);
        assert_eq!(store.patch().game_settings.len(), 1);
    }

    #[test]
    fn seeded_patch_continues_id_allocation() {
        let patch_mod = ModKey::new("Patch.esp");
        let seeded = Plugin::new(patch_mod.clone()).with(GameSetting::float(FormKey::new(patch_mod.clone(), 0x805), "fOld", 1.0));
        let mut store = LoadOrder::new("Patch.esp").with_patch(seeded);
        let key = store
            .add_new_record(GameSetting::float(FormKey::new(patch_mod, 0), "fNew", 1.0))
            .expect("add");
        assert_eq!(key.id, 0x806);
    }

    #[test]
    fn id_space_exhaustion_is_an_error() {
        let mut store = LoadOrder::new("Patch.esp");
        store.next_local_id = MAX_LOCAL_ID + 1;
        let err = store.add_new_record(GameSetting::float(key(0), "fX", 1.0));
        assert!(matches!(err, Err(PatchError::FormIdExhausted { .. })));
    }
}
