// src/rows.rs
use crate::form::{Error, Movement};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Editable state of one exercise row, holding raw input text like a form control.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RowEditor {
    #[serde(
        serialize_with = "serialize_movement",
        deserialize_with = "deserialize_movement"
    )]
    pub movement_select: Option<Movement>,
    pub movement_text: String,
    pub sets: String,
    pub reps: String,
    pub weight: String,
}

impl RowEditor {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movement_select.is_none()
            && self.movement_text.is_empty()
            && self.sets.is_empty()
            && self.reps.is_empty()
            && self.weight.is_empty()
    }
}

// An unselected dropdown is written as "" so the submission template shows the key
fn serialize_movement<S: Serializer>(
    movement: &Option<Movement>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(movement.as_ref().map_or("", <Movement as AsRef<str>>::as_ref))
}

fn deserialize_movement<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Movement>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_movement(&raw).map_err(serde::de::Error::custom)
}

/// Blank means "nothing selected"; anything else must be one of the listed movements.
///
/// # Errors
/// `Error::UnknownMovement` for names outside the catalogue.
pub fn parse_movement(raw: &str) -> Result<Option<Movement>, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Movement::from_str(trimmed)
        .map(Some)
        .map_err(|_| Error::UnknownMovement(trimmed.to_string()))
}

/// Parses the compact CLI form: `select=硬拉,text=深蹲+,sets=3,reps=5,weight=100`.
/// Every key is optional; an empty spec gives an empty row.
impl FromStr for RowEditor {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut row = Self::default();
        for segment in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| Error::MalformedRowSegment(segment.to_string()))?;
            let value = value.trim().to_string();
            match key.trim().to_lowercase().as_str() {
                "select" | "movement-select" => row.movement_select = parse_movement(&value)?,
                "text" | "movement-text" => row.movement_text = value,
                "sets" => row.sets = value,
                "reps" => row.reps = value,
                "weight" => row.weight = value,
                other => return Err(Error::UnknownRowField(other.to_string())),
            }
        }
        Ok(row)
    }
}

/// The dynamic list of exercise rows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RowList {
    rows: Vec<RowEditor>,
}

impl Default for RowList {
    fn default() -> Self {
        Self::new()
    }
}

impl RowList {
    /// A fresh list holding one empty row.
    #[must_use]
    pub fn new() -> Self {
        let mut list = Self { rows: Vec::new() };
        list.ensure_at_least_one_row();
        list
    }

    /// Builds a list from existing rows, re-adding an empty row if there are none.
    #[must_use]
    pub fn from_rows(rows: Vec<RowEditor>) -> Self {
        let mut list = Self { rows };
        list.ensure_at_least_one_row();
        list
    }

    /// Appends an empty row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(RowEditor::default());
        tracing::debug!("Added row, {} row(s) now", self.rows.len());
        self.rows.len() - 1
    }

    /// Removes the row at `index`. Removing the last remaining row leaves a
    /// fresh empty one in its place. Out-of-range indices change nothing.
    pub fn remove_row(&mut self, index: usize) -> Option<RowEditor> {
        if index >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(index);
        self.ensure_at_least_one_row();
        tracing::debug!("Removed row {}, {} row(s) now", index + 1, self.rows.len());
        Some(removed)
    }

    pub fn ensure_at_least_one_row(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(RowEditor::default());
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[RowEditor] {
        &self.rows
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut RowEditor> {
        self.rows.get_mut(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    // Never true once constructed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowEditor> {
        self.rows.iter()
    }
}

impl<'de> Deserialize<'de> for RowList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<RowEditor>::deserialize(deserializer)?;
        Ok(Self::from_rows(rows))
    }
}
