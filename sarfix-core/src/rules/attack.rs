//! Strike angle adjustment for race attack data.

use super::Adjusted;
use crate::config::{AngleMode, AttackAngleConfig};
use crate::record::Race;

/// New strike angle for an attack currently at `current`.
#[must_use]
pub fn strike_angle_for(current: f32, config: &AttackAngleConfig) -> Adjusted<f32> {
    let value = match config.mode {
        AngleMode::Additive => current + config.modifier,
        AngleMode::Absolute => config.modifier,
    };
    Adjusted::compare(current, value)
}

/// Per-attack outcome for one race, index-aligned with `race.attacks`.
///
/// `None` entries are attacks without a data sub-record.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceAdjustment {
    /// New strike angle per attack.
    pub angles: Vec<Option<Adjusted<f32>>>,
}

impl RaceAdjustment {
    /// Number of attacks whose angle actually changes.
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.angles.iter().flatten().filter(|a| a.changed).count()
    }
}

/// Compute the new strike angles of `race`.
///
/// Returns `None` when the rule is disabled (modifier of exactly zero), or the
/// race has no editor id, or it lacks the configured keyword.
#[must_use]
pub fn apply_attack_angle(race: &Race, config: &AttackAngleConfig) -> Option<RaceAdjustment> {
    if !config.is_enabled() || race.editor_id.is_none() {
        return None;
    }
    if let Some(keyword) = config.keyword_filter() {
        if !race.has_keyword(keyword) {
            return None;
        }
    }

    let angles = race
        .attacks
        .iter()
        .map(|attack| attack.data.map(|d| strike_angle_for(d.strike_angle, config)))
        .collect();
    Some(RaceAdjustment { angles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Attack, AttackData};
    use crate::types::{FormKey, ModKey};

    fn npc_race() -> Race {
        Race::new(FormKey::new(ModKey::new("Skyrim.esm"), 0x13746), "NordRace")
            .with_keyword("ActorTypeNPC")
            .with_attack(Attack::new("attackStart", AttackData::default()))
            .with_attack(Attack::without_data("bashStart"))
            .with_attack(Attack::new("attackPowerStart", AttackData::default()))
    }

    #[test]
    fn additive_modifier_widens_every_attack_with_data() {
        let config = AttackAngleConfig::default();
        let adj = apply_attack_angle(&npc_race(), &config).expect("eligible");
        assert_eq!(adj.angles.len(), 3);
        assert!(adj.angles[1].is_none());
        assert_eq!(adj.changed_count(), 2);
        let first = adj.angles[0].expect("data");
        assert!((first.value - (AttackData::default().strike_angle + 7.0)).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_modifier_disables_rule() {
        let config = AttackAngleConfig {
            modifier: 0.0,
            ..AttackAngleConfig::default()
        };
        assert!(apply_attack_angle(&npc_race(), &config).is_none());
    }

    #[test]
    fn races_without_keyword_are_skipped() {
        let mut race = npc_race();
        race.keywords.clear();
        assert!(apply_attack_angle(&race, &AttackAngleConfig::default()).is_none());

        let open = AttackAngleConfig {
            required_keyword: Some(String::new()),
            ..AttackAngleConfig::default()
        };
        assert!(apply_attack_angle(&race, &open).is_some());
    }

    #[test]
    fn races_without_editor_id_are_skipped() {
        let mut race = npc_race();
        race.editor_id = None;
        assert!(apply_attack_angle(&race, &AttackAngleConfig::default()).is_none());
    }

    #[test]
    fn absolute_mode_is_stable_at_target() {
        let config = AttackAngleConfig {
            modifier: 35.0,
            mode: AngleMode::Absolute,
            ..AttackAngleConfig::default()
        };
        let adj = apply_attack_angle(&npc_race(), &config).expect("eligible");
        assert_eq!(adj.changed_count(), 0, "default strike angle is already 35");
    }
}
