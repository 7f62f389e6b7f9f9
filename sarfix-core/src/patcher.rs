//! Patch emitter: drives resolution and rules over a store and decides, per
//! record, whether an override is written, removed, or left alone.
//!
//! Each winning record ends in one of three states:
//!
//! | state       | when                                         | store action            |
//! |-------------|----------------------------------------------|-------------------------|
//! | `Skipped`   | missing data/keyword, or family disabled      | none                    |
//! | `Modified`  | at least one field differs from the winner    | clone → apply → commit  |
//! | `Unchanged` | evaluated, nothing differs                    | remove stale override   |
//!
//! Removing stale overrides keeps identical-to-master records out of the
//! patch when it is rebuilt on top of an earlier run's output. For the same
//! reason a modified record always starts from a fresh copy of the winner,
//! and a disabled family drops every override it owns.
//!
//! Families run in a fixed order: game settings, races, weapons.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::PatcherConfig;
use crate::error::Result;
use crate::record::{GameSetting, GameSettingValue, Race, Record, Weapon};
use crate::resolver::winning_overrides;
use crate::rules::attack::{RaceAdjustment, apply_attack_angle};
use crate::rules::game_setting::apply_game_setting;
use crate::rules::weapon::{WeaponAdjustment, WeaponRules};
use crate::store::RecordStore;
use crate::types::{FormKey, ModKey};

/// Per-record result of evaluating the rules against a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Not eligible for any rule.
    Skipped,
    /// At least one field changed; an override was written.
    Modified,
    /// Evaluated without a diff; any stale override was removed.
    Unchanged,
}

/// Counts produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Game settings set by the substring table.
    pub game_settings: usize,
    /// Game settings added as new records.
    pub game_settings_added: usize,
    /// Attack sub-records whose strike angle changed.
    pub attacks: usize,
    /// Races written to the patch.
    pub races: usize,
    /// Weapons written to the patch.
    pub weapons: usize,
    /// Stale overrides removed because their record came out unchanged.
    pub removed_overrides: usize,
    /// Races and weapons that were not eligible for their family's rules.
    pub skipped: usize,
}

impl RunSummary {
    /// The change counter: one per game setting (set or added), one per
    /// modified attack, one per modified weapon.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.game_settings + self.game_settings_added + self.attacks + self.weapons
    }

    /// Serialize the summary as pretty JSON.
    ///
    /// # Errors
    /// Returns `PatchError::Serialization` on failure.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run every rule family over `store` and return the counts.
///
/// # Errors
/// Only store failures propagate; ineligible records are skipped.
pub fn run<S: RecordStore>(config: &PatcherConfig, store: &mut S) -> Result<RunSummary> {
    PatchEmitter::new(config).run(store)
}

// ---------------------------------------------------------------------------
// PatchEmitter
// ---------------------------------------------------------------------------

/// Evaluation of one winner, computed before the store is touched.
enum Evaluation<R, A> {
    Skipped,
    Unchanged(FormKey),
    Modified(R, A),
}

impl<R, A> Evaluation<R, A> {
    fn outcome(&self) -> Outcome {
        match self {
            Self::Skipped => Outcome::Skipped,
            Self::Unchanged(_) => Outcome::Unchanged,
            Self::Modified(..) => Outcome::Modified,
        }
    }
}

/// Orchestrates one patch run. Owns the change counter for the run.
#[derive(Debug)]
pub struct PatchEmitter<'c> {
    config: &'c PatcherConfig,
    summary: RunSummary,
}

impl<'c> PatchEmitter<'c> {
    /// New emitter with zeroed counters.
    #[must_use]
    pub fn new(config: &'c PatcherConfig) -> Self {
        Self {
            config,
            summary: RunSummary::default(),
        }
    }

    /// Run all families in order and return the final counts.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn run<S: RecordStore>(mut self, store: &mut S) -> Result<RunSummary> {
        info!("Beginning patcher process");

        self.patch_game_settings(store)?;
        let gmst_count = self.summary.game_settings + self.summary.game_settings_added;
        if gmst_count > 0 {
            info!(count = gmst_count, "Modified {gmst_count} game setting(s)");
        }

        self.patch_races(store)?;
        self.patch_weapons(store)?;

        info!(
            total = self.summary.total_changes(),
            removed = self.summary.removed_overrides,
            skipped = self.summary.skipped,
            "Finished patching {} records",
            self.summary.total_changes()
        );
        Ok(self.summary)
    }

    /// Apply the substring table to every winning game setting, then add the
    /// configured new settings.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn patch_game_settings<S: RecordStore>(&mut self, store: &mut S) -> Result<()> {
        let config: &'c PatcherConfig = self.config;
        let gmst = &config.game_settings;
        if !gmst.enabled {
            debug!("Game settings disabled");
            return self.drop_family::<S, GameSetting>(store);
        }

        let planned: Vec<Evaluation<GameSetting, GameSettingValue>> = {
            let layers = store.list_layers::<GameSetting>();
            winning_overrides(&layers)
                .into_iter()
                .map(|w| match apply_game_setting(w.record, &gmst.overrides) {
                    Some(value) => Evaluation::Modified(w.record.clone(), value),
                    None => Evaluation::Skipped,
                })
                .collect()
        };

        for evaluation in planned {
            trace!(kind = %GameSetting::KIND, outcome = ?evaluation.outcome(), "Evaluated");
            if let Evaluation::Modified(winner, value) = evaluation {
                debug!(editor_id = ?winner.editor_id, form_key = %winner.key, ?value, "Game setting set");
                store.replace_override(winner)?.value = value;
                self.summary.game_settings += 1;
            }
        }

        let placeholder = FormKey::new(ModKey::new(config.general.patch_name.as_str()), 0);
        for addition in &gmst.additions {
            let key = store.add_new_record(GameSetting {
                key: placeholder.clone(),
                editor_id: Some(addition.editor_id.clone()),
                value: addition.value.clone(),
            })?;
            debug!(editor_id = %addition.editor_id, form_key = %key, "Game setting added");
            self.summary.game_settings_added += 1;
        }
        Ok(())
    }

    /// Adjust the strike angle of every eligible race's attacks.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn patch_races<S: RecordStore>(&mut self, store: &mut S) -> Result<()> {
        let config: &'c PatcherConfig = self.config;
        let angle = &config.attack_angle;
        if !angle.is_enabled() {
            debug!("Attack angle modifier is zero, races skipped");
            return self.drop_family::<S, Race>(store);
        }

        let planned: Vec<Evaluation<Race, RaceAdjustment>> = {
            let layers = store.list_layers::<Race>();
            winning_overrides(&layers)
                .into_iter()
                .map(|w| match apply_attack_angle(w.record, angle) {
                    None => Evaluation::Skipped,
                    Some(adj) if adj.changed_count() == 0 => Evaluation::Unchanged(w.key.clone()),
                    Some(adj) => Evaluation::Modified(w.record.clone(), adj),
                })
                .collect()
        };

        for evaluation in planned {
            trace!(kind = %Race::KIND, outcome = ?evaluation.outcome(), "Evaluated");
            match evaluation {
                Evaluation::Skipped => self.skip(),
                Evaluation::Unchanged(key) => self.drop_stale::<S, Race>(store, &key)?,
                Evaluation::Modified(winner, adj) => {
                    let editor_id = winner.editor_id.clone();
                    let race = store.replace_override(winner)?;
                    let mut changed = 0;
                    for (attack, angle) in race.attacks.iter_mut().zip(&adj.angles) {
                        if let (Some(data), Some(angle)) = (attack.data.as_mut(), angle) {
                            data.strike_angle = angle.value;
                            changed += usize::from(angle.changed);
                        }
                    }
                    debug!(?editor_id, attacks = changed, "Modified {changed} attacks for race");
                    self.summary.attacks += changed;
                    self.summary.races += 1;
                }
            }
        }
        Ok(())
    }

    /// Apply speed/reach profiles and exclusions to every winning weapon.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn patch_weapons<S: RecordStore>(&mut self, store: &mut S) -> Result<()> {
        let config: &'c PatcherConfig = self.config;
        if !config.weapons.enabled {
            debug!("Weapons disabled");
            return self.drop_family::<S, Weapon>(store);
        }
        let rules = WeaponRules::new(&config.weapons);

        let planned: Vec<Evaluation<Weapon, WeaponAdjustment>> = {
            let layers = store.list_layers::<Weapon>();
            winning_overrides(&layers)
                .into_iter()
                .map(|w| match rules.apply(w.record) {
                    None => Evaluation::Skipped,
                    Some(adj) if !adj.changed() => Evaluation::Unchanged(w.key.clone()),
                    Some(adj) => Evaluation::Modified(w.record.clone(), adj),
                })
                .collect()
        };

        for evaluation in planned {
            trace!(kind = %Weapon::KIND, outcome = ?evaluation.outcome(), "Evaluated");
            match evaluation {
                Evaluation::Skipped => self.skip(),
                Evaluation::Unchanged(key) => self.drop_stale::<S, Weapon>(store, &key)?,
                Evaluation::Modified(winner, adj) => {
                    let editor_id = winner.editor_id.clone();
                    let weapon = store.replace_override(winner)?;
                    let Some(data) = weapon.data.as_mut() else {
                        continue;
                    };
                    data.speed = adj.speed.value;
                    data.reach = adj.reach.value;
                    debug!(
                        ?editor_id,
                        speed = adj.speed.value,
                        reach = adj.reach.value,
                        profile = ?adj.profile,
                        "Successfully modified weapon"
                    );
                    self.summary.weapons += 1;
                }
            }
        }
        Ok(())
    }

    fn skip(&mut self) {
        self.summary.skipped += 1;
    }

    /// Remove every override of a family that this run does not patch.
    fn drop_family<S: RecordStore, R: Record>(&mut self, store: &mut S) -> Result<()> {
        let keys: Vec<FormKey> = {
            let layers = store.list_layers::<R>();
            winning_overrides(&layers).into_iter().map(|w| w.key.clone()).collect()
        };
        for key in keys {
            self.drop_stale::<S, R>(store, &key)?;
        }
        Ok(())
    }

    fn drop_stale<S: RecordStore, R: Record>(&mut self, store: &mut S, key: &FormKey) -> Result<()> {
        if store.remove_override::<R>(key)? {
            debug!(kind = %R::KIND, form_key = %key, "Removed identical-to-master override");
            self.summary.removed_overrides += 1;
        }
        Ok(())
    }
}
