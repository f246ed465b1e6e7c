use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Duration;

// --- Declare modules ---
pub mod advice;
pub mod collect;
mod config;
pub mod form;
pub mod presenter;
pub mod report;
pub mod rows;

// --- Expose public types ---
pub use advice::{
    energy_analysis, muscle_soreness_analysis, rpe_analysis, sleep_analysis, Advice,
};
pub use collect::{collect_form_data, parse_number_input, resolve_movement, FormState};
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util, parse_color,
    save as save_config_util, Config, Error as ConfigError, StandardColor, Theme,
};
pub use form::{
    format_number, Error as FormError, ExerciseEntry, FeedbackForm, Movement, MuscleSoreness,
    SleepQuality,
};
pub use presenter::{
    copy_report, Clipboard, ClipboardError, CopyButton, CopyOutcome, ResultView, SystemClipboard,
};
pub use report::{format_date, generate_feedback, Report};
pub use rows::{RowEditor, RowList};

/// Front door for the binaries: owns the config and turns forms into reports.
pub struct FeedbackService {
    pub config: Config,
    pub config_path: PathBuf,
}

impl FeedbackService {
    /// Initializes the service from the on-disk config, creating it if needed.
    /// # Errors
    /// Returns `anyhow::Error` if the config path cannot be determined or the file cannot be loaded.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// A blank form as first shown: today's date (if configured), one empty
    /// row, and an untouched sleep-duration input.
    #[must_use]
    pub fn new_form(&self) -> FormState {
        let date = if self.config.default_date_today {
            Local::now().date_naive().format("%Y-%m-%d").to_string()
        } else {
            String::new()
        };
        FormState {
            date: Some(date),
            rpe: Some(String::new()),
            energy: Some(String::new()),
            sleep: Some(String::new()),
            sleep_duration: Some(String::new()),
            muscle_soreness: Some(String::new()),
            other_factors: Some(String::new()),
            rows: RowList::new(),
        }
    }

    /// Loads a TOML submission file.
    /// # Errors
    /// See `FormState::load`.
    pub fn load_submission(&self, path: &Path) -> Result<FormState> {
        FormState::load(path)
            .with_context(|| format!("Failed to load submission from {}", path.display()))
    }

    /// Collects the form and renders its report.
    #[must_use]
    pub fn generate(&self, state: &FormState) -> Report {
        generate_feedback(&collect_form_data(state))
    }

    /// Wraps a fresh report for display with the configured copy-button delay.
    #[must_use]
    pub fn present(&self, report: Report) -> ResultView {
        ResultView::new(report, self.copy_feedback_delay())
    }

    pub fn copy<C: Clipboard + ?Sized>(&self, clipboard: &mut C, report: &Report) -> CopyOutcome {
        copy_report(clipboard, report)
    }

    #[must_use]
    pub const fn copy_feedback_delay(&self) -> Duration {
        self.config.copy_feedback_delay()
    }
}
