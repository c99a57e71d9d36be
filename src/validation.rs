//! Settings validation
//!
//! The store accepts whatever it is given, so every user-supplied value goes
//! through here first. Invalid values leave the store untouched and come back
//! as a field-scoped message.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{error::TimerError, state::TimerStore};

/// A user-editable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    WorkoutDuration,
    RestDuration,
    RepetitionCount,
}

impl SettingField {
    pub const ALL: [SettingField; 3] = [
        SettingField::WorkoutDuration,
        SettingField::RestDuration,
        SettingField::RepetitionCount,
    ];

    /// Accepted values for this field
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            SettingField::WorkoutDuration => 1..=3600,
            SettingField::RestDuration => 0..=600,
            SettingField::RepetitionCount => 1..=100,
        }
    }

    /// Wire name of the field
    pub fn key(self) -> &'static str {
        match self {
            SettingField::WorkoutDuration => "workout_duration",
            SettingField::RestDuration => "rest_duration",
            SettingField::RepetitionCount => "repetition_count",
        }
    }

    fn out_of_range_message(self) -> &'static str {
        match self {
            SettingField::WorkoutDuration => "Time must be between 1 and 3600 seconds",
            SettingField::RestDuration => "Rest must be between 0 and 600 seconds",
            SettingField::RepetitionCount => "Repetitions must be between 1 and 100",
        }
    }
}

/// A rejected value for one field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: SettingField,
    pub message: &'static str,
}

/// Check `value` against the domain of `field`
pub fn validate(field: SettingField, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|v| field.range().contains(v))
        .ok_or(ValidationError {
            field,
            message: field.out_of_range_message(),
        })
}

/// Result of interpreting raw text typed into a settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The field was emptied; any shown error goes away, the store keeps its value
    Cleared,
    /// Not a number; nothing changes
    Ignored,
    /// A value ready for the store
    Valid(u32),
}

/// Interpret raw text for `field` the way the settings form does
pub fn parse_input(field: SettingField, raw: &str) -> Result<InputOutcome, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(InputOutcome::Cleared);
    }

    match trimmed.parse::<i64>() {
        Ok(value) => validate(field, value).map(InputOutcome::Valid),
        Err(_) => {
            debug!("Ignoring non-numeric input for {}: {:?}", field.key(), raw);
            Ok(InputOutcome::Ignored)
        }
    }
}

/// One submitted value: a JSON number, or the raw text of a form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Number(i64),
    Text(String),
}

/// Partial settings edit; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub workout_duration: Option<SettingValue>,
    #[serde(default)]
    pub rest_duration: Option<SettingValue>,
    #[serde(default)]
    pub repetition_count: Option<SettingValue>,
}

impl SettingsUpdate {
    fn get(&self, field: SettingField) -> Option<&SettingValue> {
        match field {
            SettingField::WorkoutDuration => self.workout_duration.as_ref(),
            SettingField::RestDuration => self.rest_duration.as_ref(),
            SettingField::RepetitionCount => self.repetition_count.as_ref(),
        }
    }
}

/// Apply every present and valid field of `update` to the store.
///
/// Invalid fields keep their previous value and are returned as errors; the
/// valid ones are still applied. Text values follow [`parse_input`], so an
/// emptied or non-numeric field changes nothing and is not an error.
pub fn apply_update(
    store: &TimerStore,
    update: &SettingsUpdate,
) -> Result<Vec<ValidationError>, TimerError> {
    let mut rejected = Vec::new();

    for field in SettingField::ALL {
        let outcome = match update.get(field) {
            None => continue,
            Some(SettingValue::Number(raw)) => validate(field, *raw).map(InputOutcome::Valid),
            Some(SettingValue::Text(raw)) => parse_input(field, raw),
        };

        match outcome {
            Ok(InputOutcome::Valid(value)) => {
                match field {
                    SettingField::WorkoutDuration => store.set_workout_duration(value)?,
                    SettingField::RestDuration => store.set_rest_duration(value)?,
                    SettingField::RepetitionCount => store.set_repetition_count(value)?,
                };
            }
            Ok(InputOutcome::Cleared | InputOutcome::Ignored) => {}
            Err(e) => {
                debug!("Rejected {}={:?}: {}", field.key(), update.get(field), e);
                rejected.push(e);
            }
        }
    }

    Ok(rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_bounds() {
        assert_eq!(validate(SettingField::WorkoutDuration, 1), Ok(1));
        assert_eq!(validate(SettingField::WorkoutDuration, 3600), Ok(3600));
        assert!(validate(SettingField::WorkoutDuration, 0).is_err());
        assert!(validate(SettingField::WorkoutDuration, 3601).is_err());

        assert_eq!(validate(SettingField::RestDuration, 0), Ok(0));
        assert_eq!(validate(SettingField::RestDuration, 600), Ok(600));
        assert!(validate(SettingField::RestDuration, 601).is_err());
        assert!(validate(SettingField::RestDuration, -1).is_err());

        assert_eq!(validate(SettingField::RepetitionCount, 100), Ok(100));
        assert!(validate(SettingField::RepetitionCount, 0).is_err());
        assert!(validate(SettingField::RepetitionCount, 101).is_err());
    }

    #[test]
    fn test_error_messages_are_field_scoped() {
        let err = validate(SettingField::RestDuration, 9000).unwrap_err();
        assert_eq!(err.field, SettingField::RestDuration);
        assert_eq!(err.to_string(), "Rest must be between 0 and 600 seconds");

        let err = validate(SettingField::RepetitionCount, i64::MAX).unwrap_err();
        assert_eq!(err.to_string(), "Repetitions must be between 1 and 100");
    }

    #[test]
    fn test_parse_input() {
        let f = SettingField::WorkoutDuration;
        assert_eq!(parse_input(f, ""), Ok(InputOutcome::Cleared));
        assert_eq!(parse_input(f, "   "), Ok(InputOutcome::Cleared));
        assert_eq!(parse_input(f, "abc"), Ok(InputOutcome::Ignored));
        assert_eq!(parse_input(f, " 45 "), Ok(InputOutcome::Valid(45)));
        assert!(parse_input(f, "0").is_err());
    }

    #[test]
    fn test_apply_update_keeps_prior_value_on_rejection() {
        let store = TimerStore::new();
        let update = SettingsUpdate {
            workout_duration: Some(SettingValue::Number(0)),
            rest_duration: Some(SettingValue::Number(15)),
            repetition_count: None,
        };

        let rejected = apply_update(&store, &update).unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].field, SettingField::WorkoutDuration);

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.settings.workout_duration, 120);
        assert_eq!(snapshot.settings.rest_duration, 15);
        assert_eq!(snapshot.settings.repetition_count, 8);
    }

    #[test]
    fn test_apply_update_reads_form_text() {
        let store = TimerStore::new();
        let update = SettingsUpdate {
            workout_duration: Some(SettingValue::Text("".to_string())),
            rest_duration: Some(SettingValue::Text("abc".to_string())),
            repetition_count: Some(SettingValue::Text(" 12 ".to_string())),
        };
        assert!(apply_update(&store, &update).unwrap().is_empty());
        assert_eq!(store.snapshot().unwrap().settings, crate::state::Settings::new(120, 30, 12));

        let update = SettingsUpdate {
            rest_duration: Some(SettingValue::Text("601".to_string())),
            ..SettingsUpdate::default()
        };
        let rejected = apply_update(&store, &update).unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].field, SettingField::RestDuration);
        assert_eq!(store.snapshot().unwrap().settings.rest_duration, 30);
    }
}
