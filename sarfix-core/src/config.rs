//! Configuration for the sarfix patcher.
//!
//! The whole rule set is one explicit [`PatcherConfig`] value that the caller
//! passes to [`crate::run`]. It maps directly to `sarfix.toml` (or a JSON file
//! with the same shape); every field has a default so partial files work.

use serde::{Deserialize, Serialize};

use crate::error::{PatchError, Result};
use crate::record::GameSettingValue;

/// Top-level patcher configuration, loadable from TOML or JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatcherConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Game setting overrides and additions.
    #[serde(default)]
    pub game_settings: GameSettingsConfig,
    /// Strike angle adjustment for race attack data.
    #[serde(default)]
    pub attack_angle: AttackAngleConfig,
    /// Weapon speed and reach profiles.
    #[serde(default)]
    pub weapons: WeaponConfig,
}

impl PatcherConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `PatchError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| PatchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string.
    ///
    /// # Errors
    /// Returns `PatchError::Config` if the JSON is invalid or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| PatchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file. `.json` files are read as JSON,
    /// everything else as TOML.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Render the configuration as TOML.
    ///
    /// # Errors
    /// Returns `PatchError::Serialization` if a value cannot be represented.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PatchError::Serialization(e.to_string()))
    }

    /// Check values that parse fine but make no sense.
    ///
    /// # Errors
    /// Returns `PatchError::Config` naming the first offending entry.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.game_settings.overrides {
            if rule.editor_id_contains.is_empty() {
                return Err(PatchError::Config(
                    "game setting override with empty editor_id_contains".into(),
                ));
            }
            finite("game setting override", &rule.editor_id_contains, rule.value)?;
        }
        for addition in &self.game_settings.additions {
            if addition.editor_id.is_empty() {
                return Err(PatchError::Config("game setting addition with empty editor_id".into()));
            }
            if let Some(v) = addition.value.as_f32() {
                finite("game setting addition", &addition.editor_id, v)?;
            }
        }

        finite("attack angle", "modifier", self.attack_angle.modifier)?;

        for profile in &self.weapons.profiles {
            if profile.keywords.is_empty() {
                return Err(PatchError::Config(format!(
                    "weapon profile '{}' has no keywords",
                    profile.name
                )));
            }
            for (field, value) in [("speed", profile.speed), ("reach", profile.reach)] {
                if let Some(v) = value {
                    finite("weapon profile", &profile.name, v)?;
                    if v < 0.0 {
                        return Err(PatchError::Config(format!(
                            "weapon profile '{}' has negative {field} {v}",
                            profile.name
                        )));
                    }
                }
            }
        }
        for exclusion in &self.weapons.exclusions {
            if exclusion.editor_id_contains.is_empty() {
                return Err(PatchError::Config("reach exclusion with empty editor_id_contains".into()));
            }
            finite("reach exclusion", &exclusion.editor_id_contains, exclusion.reach)?;
        }
        Ok(())
    }
}

fn finite(what: &str, name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PatchError::Config(format!("{what} '{name}' is not finite: {value}")))
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// File name of the output patch plugin.
    #[serde(default = "default_patch_name")]
    pub patch_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            patch_name: default_patch_name(),
        }
    }
}

/// Game setting rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettingsConfig {
    /// Whether game settings are patched at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Editor-id substring → value table. First matching entry wins.
    #[serde(default = "default_game_setting_overrides")]
    pub overrides: Vec<GameSettingRule>,
    /// Settings added to the patch as new records.
    #[serde(default)]
    pub additions: Vec<NewGameSetting>,
}

impl Default for GameSettingsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            overrides: default_game_setting_overrides(),
            additions: Vec::new(),
        }
    }
}

/// Sets every game setting whose editor id contains `editor_id_contains`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettingRule {
    /// Case-sensitive substring of the editor id.
    pub editor_id_contains: String,
    /// Value to write.
    pub value: f32,
}

impl GameSettingRule {
    /// Build a rule.
    #[must_use]
    pub fn new(editor_id_contains: impl Into<String>, value: f32) -> Self {
        Self {
            editor_id_contains: editor_id_contains.into(),
            value,
        }
    }
}

/// A game setting that does not exist in any plugin and is added outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGameSetting {
    /// Editor id of the new setting.
    pub editor_id: String,
    /// Initial value.
    pub value: GameSettingValue,
}

/// How the angle modifier combines with the current strike angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    /// `angle + modifier`.
    #[default]
    Additive,
    /// `modifier` replaces the angle.
    Absolute,
}

/// Strike angle adjustment for race attacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackAngleConfig {
    /// Signed delta (or absolute angle). Exactly 0 disables the rule.
    #[serde(default = "default_angle_modifier")]
    pub modifier: f32,
    /// How `modifier` is applied.
    #[serde(default)]
    pub mode: AngleMode,
    /// Races must carry this keyword to be adjusted. `None` or an empty
    /// string adjusts all races.
    #[serde(default = "default_required_keyword")]
    pub required_keyword: Option<String>,
}

impl AttackAngleConfig {
    /// The keyword filter, if one is set.
    #[must_use]
    pub fn keyword_filter(&self) -> Option<&str> {
        self.required_keyword.as_deref().filter(|k| !k.is_empty())
    }

    /// Whether the rule does anything.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_enabled(&self) -> bool {
        self.modifier != 0.0
    }
}

impl Default for AttackAngleConfig {
    fn default() -> Self {
        Self {
            modifier: default_angle_modifier(),
            mode: AngleMode::Additive,
            required_keyword: default_required_keyword(),
        }
    }
}

/// Weapon stat rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Whether weapons are patched at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Stat profiles, matched by keyword in priority order.
    #[serde(default)]
    pub profiles: Vec<StatProfile>,
    /// Editor-id exclusions with a forced reach.
    #[serde(default = "default_exclusions")]
    pub exclusions: Vec<ReachExclusion>,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            profiles: Vec::new(),
            exclusions: default_exclusions(),
        }
    }
}

/// Target speed/reach for weapons carrying any of `keywords`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatProfile {
    /// Human-readable name, used in logs.
    pub name: String,
    /// Higher priority profiles are tried first.
    #[serde(default)]
    pub priority: i32,
    /// Disabled profiles are skipped during matching.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Keyword editor ids; a weapon matches if it carries any of them.
    pub keywords: Vec<String>,
    /// Target speed, `None` leaves speed alone.
    #[serde(default)]
    pub speed: Option<f32>,
    /// Target reach, `None` leaves reach alone.
    #[serde(default)]
    pub reach: Option<f32>,
}

impl StatProfile {
    /// Build an enabled profile with priority 0.
    #[must_use]
    pub fn new(name: impl Into<String>, keywords: &[&str], speed: Option<f32>, reach: Option<f32>) -> Self {
        Self {
            name: name.into(),
            priority: 0,
            enabled: true,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            speed,
            reach,
        }
    }

    /// Builder: set priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Weapons whose editor id contains `editor_id_contains` always get `reach`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachExclusion {
    /// Case-insensitive substring of the editor id.
    pub editor_id_contains: String,
    /// Forced reach.
    pub reach: f32,
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

/// Editor-id term that marks quarterstaff-style weapons.
pub const WARSTAFF_TERM: &str = "Warstaff";
/// Reach forced onto [`WARSTAFF_TERM`] weapons.
pub const WARSTAFF_REACH: f32 = 1.3;

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_patch_name() -> String { "SpeedAndReachFixes.esp".to_string() }
fn default_angle_modifier() -> f32 { 7.0 }
fn default_required_keyword() -> Option<String> { Some("ActorTypeNPC".to_string()) }
fn default_game_setting_overrides() -> Vec<GameSettingRule> {
    vec![
        GameSettingRule::new("fObjectHitWeaponReach", 81.0),
        GameSettingRule::new("fObjectHitTwoHandReach", 135.0),
        GameSettingRule::new("fObjectHitH2HReach", 61.0),
    ]
}
fn default_exclusions() -> Vec<ReachExclusion> {
    vec![ReachExclusion {
        editor_id_contains: WARSTAFF_TERM.to_string(),
        reach: WARSTAFF_REACH,
    }]
}
