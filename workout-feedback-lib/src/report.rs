// src/report.rs
use crate::form::{format_number, ExerciseEntry, FeedbackForm};
use chrono::{Datelike, NaiveDate};
use std::fmt;

const WEEKDAYS: [&str; 7] = [
    "星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六",
];

/// The finished feedback text. Built once per submission, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report(String);

impl Report {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Report {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Exactly `DDDD-DD-DD`; chrono alone would also take `2024-5-20` or a leading space
fn is_iso_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Formats `YYYY-MM-DD` as `YYYY-MM-DD 星期X`.
/// Anything that is not a calendar date comes back verbatim; absent becomes "".
#[must_use]
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date else {
        return String::new();
    };
    if !is_iso_date_shape(raw) {
        return raw.to_string();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(parsed) => format!(
            "{}-{:02}-{:02} {}",
            parsed.year(),
            parsed.month(),
            parsed.day(),
            WEEKDAYS[parsed.weekday().num_days_from_sunday() as usize]
        ),
        Err(_) => raw.to_string(),
    }
}

// Zero sets/reps are left out like blank ones; a zero weight is still printed.
fn entry_lines(position: usize, entry: &ExerciseEntry) -> Vec<String> {
    let mut lines = vec![format!("  {position}. 动作：{}", entry.movement)];
    if let Some(sets) = entry.sets.filter(|v| *v != 0.0) {
        lines.push(format!("     组数：{} 组", format_number(sets)));
    }
    if let Some(reps) = entry.reps.filter(|v| *v != 0.0) {
        lines.push(format!("     次数：每组 {} 次", format_number(reps)));
    }
    if let Some(weight) = entry.weight {
        lines.push(format!("     重量/负重：{} kg", format_number(weight)));
    }
    lines
}

fn section(out: &mut String, title: &str, value: &str) {
    out.push_str(&format!("{title}：\n{value}\n\n"));
}

/// Builds the feedback report. Pure: same form in, same text out.
#[must_use]
pub fn generate_feedback(form: &FeedbackForm) -> Report {
    let mut out = format!("训练反馈 - {}\n\n", format_date(form.date.as_deref()));

    // --- Completion ---
    out.push_str("完成情况：\n");
    if form.items.is_empty() {
        out.push_str("  未填写动作记录\n");
    } else {
        for (idx, entry) in form.items.iter().enumerate() {
            out.push_str(&entry_lines(idx + 1, entry).join("\n"));
            out.push('\n');
        }
    }
    out.push('\n');

    // --- Subjective metrics, all verbatim ---
    section(&mut out, "RPE评估", form.rpe.as_deref().unwrap_or_default());
    section(&mut out, "能量水平", form.energy.as_deref().unwrap_or_default());
    section(&mut out, "睡眠质量", form.sleep.as_deref().unwrap_or_default());
    if let Some(duration) = form.sleep_duration.as_deref() {
        section(&mut out, "睡眠时长", duration);
    }
    section(
        &mut out,
        "肌肉酸痛",
        form.muscle_soreness.as_deref().unwrap_or_default(),
    );

    // --- Other factors ---
    out.push_str("其他因素：\n");
    match form.other_factors.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => {
            out.push_str(text);
            out.push('\n');
        }
        _ => out.push_str("无\n"),
    }

    tracing::info!(
        "Generated feedback report ({} entr(ies), {} bytes)",
        form.items.len(),
        out.len()
    );
    Report(out)
}
