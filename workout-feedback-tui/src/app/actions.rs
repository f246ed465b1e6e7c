// src/app/actions.rs
use super::state::{App, Focus, RowField, ScalarField};
use std::time::Instant;
use workout_feedback_lib::{CopyOutcome, Movement, MuscleSoreness, SleepQuality};

// --- Focus navigation ---

pub fn focus_next(app: &mut App) {
    let order = app.focus_order();
    let pos = order.iter().position(|f| *f == app.focus).unwrap_or(0);
    app.focus = order[(pos + 1) % order.len()];
}

pub fn focus_previous(app: &mut App) {
    let order = app.focus_order();
    let pos = order.iter().position(|f| *f == app.focus).unwrap_or(0);
    app.focus = order[(pos + order.len() - 1) % order.len()];
}

// --- Text editing ---

// Mirrors what a number input lets through
fn accepts_char(numeric: bool, c: char) -> bool {
    !numeric || c.is_ascii_digit() || c == '.' || c == '-'
}

pub fn type_char(app: &mut App, c: char) {
    match app.focus {
        Focus::Scalar(field) if !field.is_choice() => {
            if accepts_char(field.is_numeric(), c) {
                app.scalar_value_mut(field).push(c);
            }
        }
        Focus::Row { index, field } => {
            let Some(row) = app.form.rows.get_mut(index) else {
                return;
            };
            let target = match field {
                RowField::Text => &mut row.movement_text,
                RowField::Sets => &mut row.sets,
                RowField::Reps => &mut row.reps,
                RowField::Weight => &mut row.weight,
                RowField::Select | RowField::Remove => return,
            };
            if accepts_char(field.is_numeric(), c) {
                target.push(c);
            }
        }
        _ => {}
    }
}

pub fn backspace(app: &mut App) {
    match app.focus {
        Focus::Scalar(field) if !field.is_choice() => {
            app.scalar_value_mut(field).pop();
        }
        Focus::Row { index, field } => {
            if let Some(row) = app.form.rows.get_mut(index) {
                match field {
                    RowField::Text => {
                        row.movement_text.pop();
                    }
                    RowField::Sets => {
                        row.sets.pop();
                    }
                    RowField::Reps => {
                        row.reps.pop();
                    }
                    RowField::Weight => {
                        row.weight.pop();
                    }
                    RowField::Select => row.movement_select = None, // Back to "no selection"
                    RowField::Remove => {}
                }
            }
        }
        _ => {}
    }
}

// --- Choice cycling ---

// Steps through `options` with a leading blank choice; `current` is the label shown.
fn cycle_label(options: &[String], current: &str, forward: bool) -> String {
    let len = options.len() + 1; // +1 for the blank choice
    let pos = options
        .iter()
        .position(|o| o == current)
        .map_or(0, |p| p + 1);
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    if next == 0 {
        String::new()
    } else {
        options[next - 1].clone()
    }
}

fn cycle_movement(current: Option<Movement>, forward: bool) -> Option<Movement> {
    let options: Vec<String> = Movement::all().iter().map(ToString::to_string).collect();
    let current_label = current.map(|m| m.to_string()).unwrap_or_default();
    let next = cycle_label(&options, &current_label, forward);
    Movement::all().into_iter().find(|m| m.to_string() == next)
}

pub fn cycle_choice(app: &mut App, forward: bool) {
    match app.focus {
        Focus::Scalar(ScalarField::Sleep) => {
            let options: Vec<String> = SleepQuality::all().iter().map(ToString::to_string).collect();
            let next = cycle_label(&options, app.scalar_value(ScalarField::Sleep), forward);
            *app.scalar_value_mut(ScalarField::Sleep) = next;
        }
        Focus::Scalar(ScalarField::MuscleSoreness) => {
            let options: Vec<String> = MuscleSoreness::all()
                .iter()
                .map(ToString::to_string)
                .collect();
            let next = cycle_label(
                &options,
                app.scalar_value(ScalarField::MuscleSoreness),
                forward,
            );
            *app.scalar_value_mut(ScalarField::MuscleSoreness) = next;
        }
        Focus::Row {
            index,
            field: RowField::Select,
        } => {
            if let Some(row) = app.form.rows.get_mut(index) {
                row.movement_select = cycle_movement(row.movement_select, forward);
            }
        }
        _ => {}
    }
}

// --- Row management ---

pub fn add_row(app: &mut App) {
    let index = app.form.rows.add_row();
    app.focus = Focus::Row {
        index,
        field: RowField::Select,
    };
}

/// Removes the focused row (or the last one if focus is elsewhere).
pub fn remove_focused_row(app: &mut App) {
    let index = match app.focus {
        Focus::Row { index, .. } => index,
        _ => app.form.rows.len() - 1,
    };
    app.form.rows.remove_row(index);
    if let Focus::Row { .. } = app.focus {
        app.focus = Focus::Row {
            index: index.min(app.form.rows.len() - 1),
            field: RowField::Select,
        };
    }
}

// --- Submit & copy ---

pub fn submit(app: &mut App) {
    let report = app.service.generate(&app.form);
    app.result = Some(app.service.present(report));
    app.focus = Focus::Result;
}

pub fn copy_result(app: &mut App) {
    let Some(result) = app.result.as_mut() else {
        return;
    };
    match result.copy(&mut app.clipboard, Instant::now()) {
        CopyOutcome::Copied => {}
        CopyOutcome::ManualSelection => {
            app.set_error("剪贴板不可用，已选中全部文本，请手动复制".to_string());
        }
    }
}
