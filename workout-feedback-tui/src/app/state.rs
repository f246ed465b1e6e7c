// workout-feedback-tui/src/app/state.rs
use std::time::{Duration, Instant};
use workout_feedback_lib::{FeedbackService, FormState, ResultView, SystemClipboard};

// Scalar inputs of the form, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarField {
    Date,
    Rpe,
    Energy,
    Sleep,
    SleepDuration,
    MuscleSoreness,
    OtherFactors,
}

impl ScalarField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "日期",
            Self::Rpe => "RPE (1-10)",
            Self::Energy => "能量水平 (1-10)",
            Self::Sleep => "睡眠质量",
            Self::SleepDuration => "睡眠时长 (小时)",
            Self::MuscleSoreness => "肌肉酸痛",
            Self::OtherFactors => "其他因素",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Rpe | Self::Energy | Self::SleepDuration)
    }

    // Cycled with ←/→ instead of typed
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Sleep | Self::MuscleSoreness)
    }
}

// Controls inside one exercise row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowField {
    Select,
    Text,
    Sets,
    Reps,
    Weight,
    Remove,
}

impl RowField {
    pub const ALL: [Self; 6] = [
        Self::Select,
        Self::Text,
        Self::Sets,
        Self::Reps,
        Self::Weight,
        Self::Remove,
    ];

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Sets | Self::Reps | Self::Weight)
    }
}

// Represents which control has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Scalar(ScalarField),
    Row { index: usize, field: RowField },
    AddRow,
    Submit,
    Result,
}

// Represents the state of active modals
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveModal {
    None,
    Help,
}

// Holds the application state
pub struct App {
    pub service: FeedbackService,
    pub form: FormState,
    pub focus: Focus,
    pub result: Option<ResultView>,
    // Kept for the whole session so copied text outlives the copy
    pub clipboard: SystemClipboard,
    pub active_modal: ActiveModal,
    pub should_quit: bool,
    pub last_error: Option<String>, // For status bar messages
    pub error_clear_time: Option<Instant>,
}

impl App {
    pub fn new(service: FeedbackService) -> Self {
        let form = service.new_form();
        Self {
            service,
            form,
            focus: Focus::Scalar(ScalarField::Date),
            result: None,
            clipboard: SystemClipboard::new(),
            active_modal: ActiveModal::None,
            should_quit: false,
            last_error: None,
            error_clear_time: None,
        }
    }

    // Method to set status bar messages
    pub fn set_error(&mut self, msg: String) {
        self.last_error = Some(msg);
        self.error_clear_time = Some(Instant::now() + Duration::from_secs(5));
    }

    // Method to clear expired messages (called on every tick)
    pub(crate) fn clear_expired_error(&mut self, now: Instant) {
        if let Some(clear_time) = self.error_clear_time {
            if now >= clear_time {
                self.last_error = None;
                self.error_clear_time = None;
            }
        }
    }

    /// Advances timers: the copy button label and status messages.
    pub fn tick(&mut self, now: Instant) {
        if let Some(result) = self.result.as_mut() {
            result.tick(now);
        }
        self.clear_expired_error(now);
    }

    /// Every focusable control, top to bottom.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Scalar(ScalarField::Date)];
        for index in 0..self.form.rows.len() {
            order.extend(RowField::ALL.iter().map(|&field| Focus::Row { index, field }));
        }
        order.push(Focus::AddRow);
        order.extend(
            [
                ScalarField::Rpe,
                ScalarField::Energy,
                ScalarField::Sleep,
                ScalarField::SleepDuration,
                ScalarField::MuscleSoreness,
                ScalarField::OtherFactors,
            ]
            .map(Focus::Scalar),
        );
        order.push(Focus::Submit);
        if self.result.is_some() {
            order.push(Focus::Result);
        }
        order
    }

    pub fn scalar_value(&self, field: ScalarField) -> &str {
        let value = match field {
            ScalarField::Date => &self.form.date,
            ScalarField::Rpe => &self.form.rpe,
            ScalarField::Energy => &self.form.energy,
            ScalarField::Sleep => &self.form.sleep,
            ScalarField::SleepDuration => &self.form.sleep_duration,
            ScalarField::MuscleSoreness => &self.form.muscle_soreness,
            ScalarField::OtherFactors => &self.form.other_factors,
        };
        value.as_deref().unwrap_or_default()
    }

    // Editing an input makes the field present, even if it was absent before
    pub fn scalar_value_mut(&mut self, field: ScalarField) -> &mut String {
        let value = match field {
            ScalarField::Date => &mut self.form.date,
            ScalarField::Rpe => &mut self.form.rpe,
            ScalarField::Energy => &mut self.form.energy,
            ScalarField::Sleep => &mut self.form.sleep,
            ScalarField::SleepDuration => &mut self.form.sleep_duration,
            ScalarField::MuscleSoreness => &mut self.form.muscle_soreness,
            ScalarField::OtherFactors => &mut self.form.other_factors,
        };
        value.get_or_insert_with(String::new)
    }
}
