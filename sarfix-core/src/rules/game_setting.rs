//! Game setting substring table.
//!
//! A winning game setting whose editor id contains a configured substring is
//! set to that entry's value. There is no "did it change" check: every match
//! is a modification.

use crate::config::GameSettingRule;
use crate::record::{GameSetting, GameSettingValue};

/// First rule (table order) whose substring occurs in the setting's editor id.
#[must_use]
pub fn matching_rule<'c>(setting: &GameSetting, rules: &'c [GameSettingRule]) -> Option<&'c GameSettingRule> {
    let editor_id = setting.editor_id.as_deref()?;
    rules
        .iter()
        .find(|r| editor_id.contains(r.editor_id_contains.as_str()))
}

/// New value for `setting`, or `None` when no rule matches or the setting is
/// not numeric.
#[must_use]
pub fn apply_game_setting(setting: &GameSetting, rules: &[GameSettingRule]) -> Option<GameSettingValue> {
    let rule = matching_rule(setting, rules)?;
    let mut value = setting.value.clone();
    value.set_numeric(rule.value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FormKey, ModKey};

    fn gmst(id: u32, edid: &str, value: GameSettingValue) -> GameSetting {
        GameSetting {
            key: FormKey::new(ModKey::new("Skyrim.esm"), id),
            editor_id: Some(edid.to_string()),
            value,
        }
    }

    fn rules() -> Vec<GameSettingRule> {
        vec![
            GameSettingRule::new("fObjectHitWeaponReach", 81.0),
            GameSettingRule::new("fObjectHit", 10.0),
        ]
    }

    #[test]
    fn first_matching_entry_wins() {
        let setting = gmst(1, "fObjectHitWeaponReach", GameSettingValue::Float(75.0));
        let rules = rules();
        let rule = matching_rule(&setting, &rules).expect("match");
        assert!((rule.value - 81.0).abs() < f32::EPSILON);
    }

    #[test]
    fn match_is_unconditional() {
        let setting = gmst(1, "fObjectHitWeaponReach", GameSettingValue::Float(81.0));
        assert_eq!(
            apply_game_setting(&setting, &rules()),
            Some(GameSettingValue::Float(81.0)),
            "already at target still counts as a match"
        );
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        let setting = gmst(1, "FOBJECTHITWEAPONREACH", GameSettingValue::Float(75.0));
        assert!(matching_rule(&setting, &rules()).is_none());
    }

    #[test]
    fn non_numeric_settings_are_skipped() {
        let setting = gmst(1, "fObjectHitLabel", GameSettingValue::String("x".into()));
        assert!(matching_rule(&setting, &rules()).is_some());
        assert!(apply_game_setting(&setting, &rules()).is_none());
    }

    #[test]
    fn settings_without_editor_id_never_match() {
        let mut setting = gmst(1, "fObjectHitWeaponReach", GameSettingValue::Float(75.0));
        setting.editor_id = None;
        assert!(apply_game_setting(&setting, &rules()).is_none());
    }
}
