//! Game settings (`GMST`): named engine tunables.

use serde::{Deserialize, Serialize};

use super::{Plugin, Record, RecordGroup, RecordKind};
use crate::types::FormKey;

/// Typed value of a game setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GameSettingValue {
    /// `f`-prefixed settings.
    Float(f32),
    /// `i`-prefixed settings.
    Int(i32),
    /// `b`-prefixed settings.
    Bool(bool),
    /// `s`-prefixed settings.
    String(String),
}

impl GameSettingValue {
    /// Numeric view of the value, if it has one.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(v) => Some(*v as f32),
            Self::Bool(_) | Self::String(_) => None,
        }
    }

    /// Replace a numeric value with `target`. Non-numeric values are left
    /// untouched and `false` is returned.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_numeric(&mut self, target: f32) -> bool {
        match self {
            Self::Float(v) => {
                *v = target;
                true
            }
            Self::Int(v) => {
                *v = target.round() as i32;
                true
            }
            Self::Bool(_) | Self::String(_) => false,
        }
    }
}

/// A game setting record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSetting {
    /// Record key.
    pub key: FormKey,
    /// Editor id, e.g. `fObjectHitWeaponReach`.
    pub editor_id: Option<String>,
    /// Current value.
    pub value: GameSettingValue,
}

impl GameSetting {
    /// Create a float setting.
    #[must_use]
    pub fn float(key: FormKey, editor_id: impl Into<String>, value: f32) -> Self {
        Self {
            key,
            editor_id: Some(editor_id.into()),
            value: GameSettingValue::Float(value),
        }
    }
}

impl Record for GameSetting {
    const KIND: RecordKind = RecordKind::GameSetting;

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
        &plugin.game_settings
    }

    fn group_mut(plugin: &mut Plugin) -> &mut RecordGroup<Self> {
        &mut plugin.game_settings
    }
}
