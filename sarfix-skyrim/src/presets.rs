//! Weapon stat presets (speed/reach profile tables).
//!
//! A preset is a ready-made set of [`StatProfile`]s. `Vanilla` covers the base
//! game weapon types; `AnimatedArmoury` adds the Animated Armoury types at a
//! higher priority so they take precedence over the vanilla keyword those
//! weapons also carry.

use serde::{Deserialize, Serialize};

use sarfix_core::PatcherConfig;
use sarfix_core::config::StatProfile;

use crate::keywords::{
    WEAP_TYPE_BATTLEAXE, WEAP_TYPE_CLAW, WEAP_TYPE_DAGGER, WEAP_TYPE_GREATSWORD, WEAP_TYPE_HALBERD, WEAP_TYPE_KATANA,
    WEAP_TYPE_MACE, WEAP_TYPE_PIKE, WEAP_TYPE_QUARTERSTAFF, WEAP_TYPE_RAPIER, WEAP_TYPE_SWORD, WEAP_TYPE_WAR_AXE,
    WEAP_TYPE_WARHAMMER, WEAP_TYPE_WHIP,
};

/// Priority given to Animated Armoury profiles.
const ANIMATED_ARMOURY_PRIORITY: i32 = 10;

/// Built-in weapon profile table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponPreset {
    /// Base game weapon types only.
    #[default]
    Vanilla,
    /// Base game plus Animated Armoury weapon types.
    AnimatedArmoury,
}

impl WeaponPreset {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Vanilla => "Vanilla: base game weapon types",
            Self::AnimatedArmoury => "Animated Armoury: base game plus Animated Armoury weapon types",
        }
    }

    /// The profiles of this preset.
    #[must_use]
    pub fn profiles(self) -> Vec<StatProfile> {
        let mut profiles = vanilla_profiles();
        if self == Self::AnimatedArmoury {
            profiles.extend(animated_armoury_profiles());
        }
        profiles
    }

    /// Replace the weapon profiles of `config` with this preset's.
    pub fn apply_to(self, config: &mut PatcherConfig) {
        config.weapons.profiles = self.profiles();
    }

    /// A default config using this preset.
    #[must_use]
    pub fn config(self) -> PatcherConfig {
        let mut config = PatcherConfig::default();
        self.apply_to(&mut config);
        config
    }
}

fn vanilla_profiles() -> Vec<StatProfile> {
    vec![
        StatProfile::new("Daggers", &[WEAP_TYPE_DAGGER], Some(1.35), Some(0.7)),
        StatProfile::new("Swords", &[WEAP_TYPE_SWORD], Some(1.1), Some(1.0)),
        StatProfile::new("War Axes", &[WEAP_TYPE_WAR_AXE], Some(1.0), Some(0.95)),
        StatProfile::new("Maces", &[WEAP_TYPE_MACE], Some(0.9), Some(0.9)),
        StatProfile::new("Greatswords", &[WEAP_TYPE_GREATSWORD], Some(0.8), Some(1.3)),
        StatProfile::new("Battleaxes", &[WEAP_TYPE_BATTLEAXE], Some(0.75), Some(1.25)),
        StatProfile::new("Warhammers", &[WEAP_TYPE_WARHAMMER], Some(0.65), Some(1.2)),
    ]
}

fn animated_armoury_profiles() -> Vec<StatProfile> {
    [
        StatProfile::new("Rapiers", &[WEAP_TYPE_RAPIER], Some(1.15), Some(1.05)),
        StatProfile::new("Katanas", &[WEAP_TYPE_KATANA], Some(1.0), Some(1.0)),
        StatProfile::new("Claws", &[WEAP_TYPE_CLAW], Some(1.3), Some(0.6)),
        StatProfile::new("Whips", &[WEAP_TYPE_WHIP], Some(1.0), Some(1.8)),
        StatProfile::new("Pikes", &[WEAP_TYPE_PIKE], Some(0.8), Some(1.6)),
        StatProfile::new("Halberds", &[WEAP_TYPE_HALBERD], Some(0.75), Some(1.45)),
        // Reach is left to the Warstaff exclusion.
        StatProfile::new("Quarterstaves", &[WEAP_TYPE_QUARTERSTAFF], Some(0.9), None),
    ]
    .into_iter()
    .map(|p| p.with_priority(ANIMATED_ARMOURY_PRIORITY))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::VANILLA_MELEE;

    #[test]
    fn vanilla_covers_every_melee_type() {
        let profiles = WeaponPreset::Vanilla.profiles();
        for keyword in VANILLA_MELEE {
            assert!(
                profiles.iter().any(|p| p.keywords.iter().any(|k| k == keyword)),
                "{keyword} has no profile"
            );
        }
    }

    #[test]
    fn animated_armoury_extends_vanilla() {
        let vanilla = WeaponPreset::Vanilla.profiles();
        let armoury = WeaponPreset::AnimatedArmoury.profiles();
        assert!(armoury.len() > vanilla.len());
        assert_eq!(&armoury[..vanilla.len()], vanilla.as_slice());
        assert!(armoury[vanilla.len()..].iter().all(|p| p.priority > 0));
    }

    #[test]
    fn preset_configs_validate() {
        for preset in [WeaponPreset::Vanilla, WeaponPreset::AnimatedArmoury] {
            preset.config().validate().expect("valid preset");
            assert!(!preset.description().is_empty());
        }
    }

    #[test]
    fn apply_to_replaces_profiles() {
        let mut config = PatcherConfig::default();
        config.weapons.profiles.push(StatProfile::new("Custom", &["WeapTypeBow"], Some(2.0), None));
        WeaponPreset::Vanilla.apply_to(&mut config);
        assert!(config.weapons.profiles.iter().all(|p| p.name != "Custom"));
    }
}
