// src/collect.rs
use crate::form::{Error, ExerciseEntry, FeedbackForm};
use crate::rows::{RowEditor, RowList};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The whole editable form. Also the shape of a TOML submission file.
///
/// `None` means the field is not part of the submission at all, which the
/// report treats differently from an empty value (see `sleep_duration`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_soreness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_factors: Option<String>,
    pub rows: RowList,
}

impl FormState {
    /// Reads a submission file.
    ///
    /// # Errors
    /// I/O failures, malformed TOML, or a movement selection outside the catalogue.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        let form: Self = toml::from_str(&content)?;
        tracing::debug!(
            "Loaded submission from {} with {} row(s)",
            path.display(),
            form.rows.len()
        );
        Ok(form)
    }

    /// Renders the form as a submission file.
    ///
    /// # Errors
    /// Serialization failures from `toml`.
    pub fn to_toml(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Parses a numeric input. Blank or unparseable text counts as absent, never zero.
#[must_use]
pub fn parse_number_input(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::debug!("Ignoring non-numeric input '{}'", trimmed);
            None
        }
    }
}

/// Resolves the movement name of a row: free text, then selection, then `动作{N}`.
#[must_use]
pub fn resolve_movement(row: &RowEditor, position: usize) -> String {
    let text = row.movement_text.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    match row.movement_select {
        Some(movement) => movement.to_string(),
        None => format!("动作{position}"),
    }
}

fn collect_rows(rows: &RowList) -> Vec<ExerciseEntry> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| ExerciseEntry {
            movement: resolve_movement(row, idx + 1),
            sets: parse_number_input(&row.sets),
            reps: parse_number_input(&row.reps),
            weight: parse_number_input(&row.weight),
        })
        .filter(|entry| !entry.movement.is_empty())
        .collect()
}

/// Snapshots the form into the record the report is built from.
/// Scalar values are copied through untouched; no range checks are applied.
#[must_use]
pub fn collect_form_data(state: &FormState) -> FeedbackForm {
    let items = collect_rows(&state.rows);
    tracing::debug!("Collected {} exercise entr(ies)", items.len());
    FeedbackForm {
        date: state.date.clone(),
        rpe: state.rpe.clone(),
        energy: state.energy.clone(),
        sleep: state.sleep.clone(),
        sleep_duration: state.sleep_duration.clone(),
        muscle_soreness: state.muscle_soreness.clone(),
        other_factors: state.other_factors.clone(),
        items,
    }
}
