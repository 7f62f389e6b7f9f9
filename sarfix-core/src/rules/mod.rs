//! Stat rule engine: computes new field values for winning records.
//!
//! Every rule family is a pure function of a winning record and the
//! configuration. Nothing here mutates a record; results come back as
//! [`Adjusted`] values that the patcher applies to a copy.
//!
//! - [`weapon`]: speed/reach profiles matched by keyword, plus reach exclusions
//! - [`attack`]: strike angle adjustment on race attack data
//! - [`game_setting`]: editor-id substring table for game settings

pub mod attack;
pub mod game_setting;
pub mod weapon;

use serde::Serialize;

/// A computed field value plus whether it differs from the original.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Adjusted<T> {
    /// The value the field should hold.
    pub value: T,
    /// Whether `value` differs from the field's original value.
    pub changed: bool,
}

impl Adjusted<f32> {
    /// The field keeps its current value.
    #[must_use]
    pub fn unchanged(current: f32) -> Self {
        Self {
            value: current,
            changed: false,
        }
    }

    /// Compare a proposed value against the original.
    #[must_use]
    pub fn compare(original: f32, value: f32) -> Self {
        Self {
            value,
            changed: !same_value(original, value),
        }
    }
}

/// Float equality used for every "did it change" check.
///
/// Values are stored as `f32` in records, so anything closer than one ulp
/// around 1.0 is the same stored value.
#[must_use]
pub fn same_value(a: f32, b: f32) -> bool {
    (a - b).abs() < f32::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_flags_real_changes_only() {
        assert!(Adjusted::compare(0.9, 1.0).changed);
        assert!(!Adjusted::compare(1.0, 1.0).changed);
        assert!(!Adjusted::unchanged(0.5).changed);
    }
}
