//! Synthesis-style `settings.json` import.
//!
//! The patcher's user settings live in a PascalCase JSON document:
//!
//! ```json
//! {
//!   "GameSettings": { "Enabled": true, "WeaponReach": 81.0, "TwoHandReach": 135.0, "H2HReach": 61.0 },
//!   "AttackStrikeAngleModifier": 7.0,
//!   "WeaponStats": { "Enabled": true, "Preset": "AnimatedArmoury", "WarstaffReach": 1.3, "Profiles": [] }
//! }
//! ```
//!
//! Every key is optional. [`SynthesisSettings::into_config`] turns the
//! document into a [`PatcherConfig`]; custom `Profiles` are appended after the
//! preset's.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sarfix_core::PatcherConfig;
use sarfix_core::config::{GameSettingRule, ReachExclusion, StatProfile, WARSTAFF_REACH, WARSTAFF_TERM};

use crate::presets::WeaponPreset;

/// Top-level `settings.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SynthesisSettings {
    /// Object-hit reach game settings.
    #[serde(default)]
    pub game_settings: GameSettingsSection,
    /// Degrees added to every NPC attack's strike angle. Zero disables.
    #[serde(default = "default_angle_modifier")]
    pub attack_strike_angle_modifier: f32,
    /// Weapon speed and reach.
    #[serde(default)]
    pub weapon_stats: WeaponStatsSection,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            game_settings: GameSettingsSection::default(),
            attack_strike_angle_modifier: default_angle_modifier(),
            weapon_stats: WeaponStatsSection::default(),
        }
    }
}

/// `GameSettings` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameSettingsSection {
    /// Whether game settings are patched.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// `fObjectHitWeaponReach`.
    #[serde(default = "default_weapon_reach")]
    pub weapon_reach: f32,
    /// `fObjectHitTwoHandReach`.
    #[serde(default = "default_two_hand_reach")]
    pub two_hand_reach: f32,
    /// `fObjectHitH2HReach`.
    #[serde(default = "default_h2h_reach", rename = "H2HReach")]
    pub h2h_reach: f32,
}

impl Default for GameSettingsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            weapon_reach: default_weapon_reach(),
            two_hand_reach: default_two_hand_reach(),
            h2h_reach: default_h2h_reach(),
        }
    }
}

impl GameSettingsSection {
    /// The substring table for these values.
    #[must_use]
    pub fn rules(&self) -> Vec<GameSettingRule> {
        vec![
            GameSettingRule::new("fObjectHitWeaponReach", self.weapon_reach),
            GameSettingRule::new("fObjectHitTwoHandReach", self.two_hand_reach),
            GameSettingRule::new("fObjectHitH2HReach", self.h2h_reach),
        ]
    }
}

/// `WeaponStats` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeaponStatsSection {
    /// Whether weapons are patched.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Built-in profile table.
    #[serde(default)]
    pub preset: WeaponPreset,
    /// Reach forced onto Warstaff weapons.
    #[serde(default = "default_warstaff_reach")]
    pub warstaff_reach: f32,
    /// Extra profiles appended after the preset.
    #[serde(default)]
    pub profiles: Vec<ProfileEntry>,
}

impl Default for WeaponStatsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            preset: WeaponPreset::default(),
            warstaff_reach: default_warstaff_reach(),
            profiles: Vec::new(),
        }
    }
}

/// A user-defined profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileEntry {
    /// Profile name.
    pub name: String,
    /// Whether the profile is used.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Matching priority.
    #[serde(default)]
    pub priority: i32,
    /// Keyword editor ids.
    pub keywords: Vec<String>,
    /// Target speed.
    #[serde(default)]
    pub speed: Option<f32>,
    /// Target reach.
    #[serde(default)]
    pub reach: Option<f32>,
}

impl From<ProfileEntry> for StatProfile {
    fn from(entry: ProfileEntry) -> Self {
        Self {
            name: entry.name,
            priority: entry.priority,
            enabled: entry.enabled,
            keywords: entry.keywords,
            speed: entry.speed,
            reach: entry.reach,
        }
    }
}

impl SynthesisSettings {
    /// Parse a `settings.json` document.
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the settings layout.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Failed to parse settings JSON")
    }

    /// Read and parse a `settings.json` file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = Self::from_json(&content).with_context(|| format!("In {}", path.display()))?;
        debug!(path = %path.display(), preset = ?settings.weapon_stats.preset, "Settings loaded");
        Ok(settings)
    }

    /// Build the patcher configuration these settings describe.
    ///
    /// # Errors
    /// Returns an error if the resulting configuration fails validation.
    pub fn into_config(self) -> anyhow::Result<PatcherConfig> {
        let mut config = self.weapon_stats.preset.config();

        config.game_settings.enabled = self.game_settings.enabled;
        config.game_settings.overrides = self.game_settings.rules();

        config.attack_angle.modifier = self.attack_strike_angle_modifier;

        config.weapons.enabled = self.weapon_stats.enabled;
        config.weapons.exclusions = vec![ReachExclusion {
            editor_id_contains: WARSTAFF_TERM.to_string(),
            reach: self.weapon_stats.warstaff_reach,
        }];
        config
            .weapons
            .profiles
            .extend(self.weapon_stats.profiles.into_iter().map(StatProfile::from));

        config.validate().context("Settings produce an invalid configuration")?;
        Ok(config)
    }
}

/// Read `settings.json` at `path` and build the patcher configuration.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_config(path: &Path) -> anyhow::Result<PatcherConfig> {
    SynthesisSettings::load(path)?.into_config()
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_angle_modifier() -> f32 { 7.0 }
fn default_weapon_reach() -> f32 { 81.0 }
fn default_two_hand_reach() -> f32 { 135.0 }
fn default_h2h_reach() -> f32 { 61.0 }
fn default_warstaff_reach() -> f32 { WARSTAFF_REACH }
