// src/form.rs
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error reading submission file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse submission file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize submission (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Unknown movement '{0}'. Use a free-text name for movements outside the list.")]
    UnknownMovement(String),
    #[error("Invalid row field '{0}'. Expected one of: select, text, sets, reps, weight.")]
    UnknownRowField(String),
    #[error("Malformed row segment '{0}'. Expected key=value.")]
    MalformedRowSegment(String),
}

/// The common movements offered by the row selector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
pub enum Movement {
    #[strum(serialize = "深蹲")]
    Squat,
    #[strum(serialize = "硬拉")]
    Deadlift,
    #[strum(serialize = "卧推")]
    BenchPress,
    #[strum(serialize = "推举")]
    OverheadPress,
    #[strum(serialize = "划船")]
    Row,
    #[strum(serialize = "引体向上")]
    PullUp,
    #[strum(serialize = "弓步蹲")]
    Lunge,
    #[strum(serialize = "俯卧撑")]
    PushUp,
}

impl Movement {
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Sleep quality choices. Parses from either the label or the advisory key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, AsRefStr)]
pub enum SleepQuality {
    #[strum(to_string = "好", serialize = "good")]
    Good,
    #[strum(to_string = "一般", serialize = "average")]
    Average,
    #[strum(to_string = "差", serialize = "poor")]
    Poor,
}

impl SleepQuality {
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, AsRefStr)]
pub enum MuscleSoreness {
    #[strum(to_string = "无", serialize = "none")]
    NoSoreness,
    #[strum(to_string = "轻微", serialize = "mild")]
    Mild,
    #[strum(to_string = "中等", serialize = "moderate")]
    Moderate,
    #[strum(to_string = "严重", serialize = "severe")]
    Severe,
}

impl MuscleSoreness {
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// One collected exercise line of the report.
///
/// Numbers are kept as `f64` so whatever the user typed (e.g. `2.5` sets)
/// reaches the report unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub movement: String,
    pub sets: Option<f64>,
    pub reps: Option<f64>,
    pub weight: Option<f64>,
}

/// A submission as the report generator sees it.
///
/// Every scalar is `None` when the field was absent from the submission and
/// `Some("")` when it was present but left empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackForm {
    pub date: Option<String>,
    pub rpe: Option<String>,
    pub energy: Option<String>,
    pub sleep: Option<String>,
    pub sleep_duration: Option<String>,
    pub muscle_soreness: Option<String>,
    pub other_factors: Option<String>,
    pub items: Vec<ExerciseEntry>,
}

/// Formats a number the way a browser prints it: `3`, `0`, `62.5`, `1e+21`, `1e-7`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Also folds -0 into 0
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        // Shortest digits in exponent form; the exponent always carries a sign
        let exp = format!("{value:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    format!("{value}")
}
