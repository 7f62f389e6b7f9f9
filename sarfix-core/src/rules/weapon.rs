//! Weapon speed/reach rules.
//!
//! Each weapon is matched against the configured [`StatProfile`]s in priority
//! order (highest first, declaration order on ties). The first enabled profile
//! that shares a keyword with the weapon supplies the target speed and reach;
//! no other profile is consulted for that weapon.
//!
//! Reach exclusions are authoritative: a weapon whose editor id contains an
//! exclusion term ends up with the exclusion's reach no matter what the
//! profile says. The `changed` flag always compares against the reach the
//! weapon had before any rule ran.

use serde::Serialize;

use super::Adjusted;
use crate::config::{ReachExclusion, StatProfile, WeaponConfig};
use crate::record::Weapon;
use crate::types::contains_ignore_case;

impl StatProfile {
    /// Whether this profile applies to `weapon`.
    #[must_use]
    pub fn matches(&self, weapon: &Weapon) -> bool {
        self.enabled && self.keywords.iter().any(|k| weapon.has_keyword(k))
    }

    /// Target speed for a weapon currently at `current`.
    #[must_use]
    pub fn speed_for(&self, current: f32) -> Adjusted<f32> {
        target_for(self.speed, current)
    }

    /// Target reach for a weapon currently at `current`.
    #[must_use]
    pub fn reach_for(&self, current: f32) -> Adjusted<f32> {
        target_for(self.reach, current)
    }
}

fn target_for(target: Option<f32>, current: f32) -> Adjusted<f32> {
    match target {
        Some(value) => Adjusted::compare(current, value),
        None => Adjusted::unchanged(current),
    }
}

impl ReachExclusion {
    /// Whether `editor_id` falls under this exclusion.
    #[must_use]
    pub fn matches(&self, editor_id: &str) -> bool {
        contains_ignore_case(editor_id, &self.editor_id_contains)
    }
}

/// Outcome of the weapon rules for one weapon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponAdjustment {
    /// New speed.
    pub speed: Adjusted<f32>,
    /// New reach.
    pub reach: Adjusted<f32>,
    /// Name of the profile that matched, if any.
    pub profile: Option<String>,
    /// Whether a reach exclusion applied.
    pub excluded: bool,
}

impl WeaponAdjustment {
    /// Whether any field differs from the original.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.speed.changed || self.reach.changed
    }
}

/// Profiles pre-sorted for matching, borrowed from a [`WeaponConfig`].
#[derive(Debug, Clone)]
pub struct WeaponRules<'c> {
    profiles: Vec<&'c StatProfile>,
    exclusions: &'c [ReachExclusion],
}

impl<'c> WeaponRules<'c> {
    /// Sort the configured profiles by descending priority.
    #[must_use]
    pub fn new(config: &'c WeaponConfig) -> Self {
        let mut profiles: Vec<&StatProfile> = config.profiles.iter().collect();
        // Stable: equal priorities keep declaration order.
        profiles.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self {
            profiles,
            exclusions: &config.exclusions,
        }
    }

    /// Highest-priority enabled profile matching `weapon`.
    #[must_use]
    pub fn matching_profile(&self, weapon: &Weapon) -> Option<&'c StatProfile> {
        self.profiles.iter().copied().find(|p| p.matches(weapon))
    }

    /// First exclusion matching `editor_id`.
    #[must_use]
    pub fn exclusion_for(&self, editor_id: &str) -> Option<&'c ReachExclusion> {
        self.exclusions.iter().find(|e| e.matches(editor_id))
    }

    /// Compute the new speed and reach of `weapon`.
    ///
    /// Returns `None` when the weapon cannot be patched: no stat block or no
    /// editor id.
    #[must_use]
    pub fn apply(&self, weapon: &Weapon) -> Option<WeaponAdjustment> {
        let data = weapon.data.as_ref()?;
        let editor_id = weapon.editor_id.as_deref()?;

        let exclusion = self.exclusion_for(editor_id);
        let profile = self.matching_profile(weapon);

        let original_reach = data.reach;
        let reach_in = exclusion.map_or(original_reach, |e| e.reach);

        let speed = profile.map_or(Adjusted::unchanged(data.speed), |p| p.speed_for(data.speed));
        let reach_out = profile.map_or(reach_in, |p| p.reach_for(reach_in).value);
        let reach_out = exclusion.map_or(reach_out, |e| e.reach);

        Some(WeaponAdjustment {
            speed,
            reach: Adjusted::compare(original_reach, reach_out),
            profile: profile.map(|p| p.name.clone()),
            excluded: exclusion.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WARSTAFF_REACH;
    use crate::types::{FormKey, ModKey};

    fn key(id: u32) -> FormKey {
        FormKey::new(ModKey::new("Skyrim.esm"), id)
    }

    fn config(profiles: Vec<StatProfile>) -> WeaponConfig {
        WeaponConfig {
            profiles,
            ..WeaponConfig::default()
        }
    }

    #[test]
    fn sword_speed_is_raised() {
        let config = config(vec![StatProfile::new("Swords", &["WeapTypeSword"], Some(1.0), None)]);
        let rules = WeaponRules::new(&config);
        let sword = Weapon::new(key(1), "IronSword").with_keyword("WeapTypeSword").with_stats(0.9, 1.0);

        let adj = rules.apply(&sword).expect("patchable");
        assert!((adj.speed.value - 1.0).abs() < f32::EPSILON);
        assert!(adj.speed.changed);
        assert!(!adj.reach.changed);
        assert!(adj.changed());
        assert_eq!(adj.profile.as_deref(), Some("Swords"));
    }

    #[test]
    fn weapon_already_on_target_is_unchanged() {
        let config = config(vec![StatProfile::new("Swords", &["WeapTypeSword"], Some(1.0), Some(0.8))]);
        let rules = WeaponRules::new(&config);
        let sword = Weapon::new(key(1), "SteelSword").with_keyword("WeapTypeSword").with_stats(1.0, 0.8);

        let adj = rules.apply(&sword).expect("patchable");
        assert!(!adj.changed());
    }

    #[test]
    fn no_matching_profile_leaves_fields() {
        let config = config(vec![StatProfile::new("Swords", &["WeapTypeSword"], Some(1.0), None)]);
        let rules = WeaponRules::new(&config);
        let bow = Weapon::new(key(1), "HuntingBow").with_keyword("WeapTypeBow").with_stats(0.5, 1.0);

        let adj = rules.apply(&bow).expect("patchable");
        assert!(!adj.changed());
        assert!(adj.profile.is_none());
    }

    #[test]
    fn highest_priority_profile_wins() {
        let config = config(vec![
            StatProfile::new("Generic", &["WeapTypeSword"], Some(1.0), Some(1.0)),
            StatProfile::new("Katanas", &["WeapTypeKatana"], Some(1.2), Some(0.9)).with_priority(5),
        ]);
        let rules = WeaponRules::new(&config);
        let katana = Weapon::new(key(1), "AkaviriKatana")
            .with_keyword("WeapTypeSword")
            .with_keyword("WeapTypeKatana")
            .with_stats(1.0, 1.0);

        let adj = rules.apply(&katana).expect("patchable");
        assert_eq!(adj.profile.as_deref(), Some("Katanas"));
        assert!((adj.speed.value - 1.2).abs() < f32::EPSILON);
        assert!((adj.reach.value - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn equal_priority_keeps_declaration_order() {
        let config = config(vec![
            StatProfile::new("First", &["WeapTypeSword"], Some(1.1), None),
            StatProfile::new("Second", &["WeapTypeSword"], Some(0.7), None),
        ]);
        let rules = WeaponRules::new(&config);
        let sword = Weapon::new(key(1), "IronSword").with_keyword("WeapTypeSword");
        assert_eq!(rules.matching_profile(&sword).map(|p| p.name.as_str()), Some("First"));
    }

    #[test]
    fn disabled_profiles_are_skipped() {
        let mut top = StatProfile::new("Off", &["WeapTypeSword"], Some(3.0), None).with_priority(10);
        top.enabled = false;
        let config = config(vec![top, StatProfile::new("On", &["WeapTypeSword"], Some(1.0), None)]);
        let rules = WeaponRules::new(&config);
        let sword = Weapon::new(key(1), "IronSword").with_keyword("WeapTypeSword");
        assert_eq!(rules.matching_profile(&sword).map(|p| p.name.as_str()), Some("On"));
    }

    #[test]
    fn exclusion_beats_profile_reach() {
        let config = config(vec![StatProfile::new("Staves", &["WeapTypeStaff"], None, Some(2.0))]);
        let rules = WeaponRules::new(&config);
        let staff = Weapon::new(key(1), "DLC2WarstaffNordic")
            .with_keyword("WeapTypeStaff")
            .with_stats(1.0, 1.0);

        let adj = rules.apply(&staff).expect("patchable");
        assert!((adj.reach.value - WARSTAFF_REACH).abs() < f32::EPSILON);
        assert!(adj.reach.changed, "compared against the original 1.0");
        assert!(adj.excluded);
    }

    #[test]
    fn exclusion_already_applied_is_unchanged() {
        let config = config(vec![StatProfile::new("Staves", &["WeapTypeStaff"], None, Some(2.0))]);
        let rules = WeaponRules::new(&config);
        let staff = Weapon::new(key(1), "warstaffiron")
            .with_keyword("WeapTypeStaff")
            .with_stats(1.0, WARSTAFF_REACH);

        let adj = rules.apply(&staff).expect("patchable");
        assert!(!adj.reach.changed);
        assert!(!adj.changed());
    }

    #[test]
    fn weapons_without_data_or_editor_id_are_skipped() {
        let rules_config = config(vec![]);
        let rules = WeaponRules::new(&rules_config);

        let mut no_data = Weapon::new(key(1), "Broken");
        no_data.data = None;
        assert!(rules.apply(&no_data).is_none());

        let mut no_edid = Weapon::new(key(2), "x");
        no_edid.editor_id = None;
        assert!(rules.apply(&no_edid).is_none());
    }
}
