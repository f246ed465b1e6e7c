// src/advice.rs
//! Canned commentary for the subjective metrics.
//!
//! These tables are not part of the generated report. They are exposed for
//! callers that want to show advice next to it (see the CLI `advice` command).

use crate::form::{FeedbackForm, MuscleSoreness, SleepQuality};
use std::str::FromStr;

/// Commentary for an RPE score.
#[must_use]
pub fn rpe_analysis(rpe: f64) -> &'static str {
    if !rpe.is_finite() {
        return "请确保RPE在1-10范围内。";
    }
    if rpe <= 4.0 {
        "训练强度较轻，作为恢复或技术练习较为合适。可在状态良好时逐步提升强度。"
    } else if rpe <= 6.0 {
        "训练强度中等，刺激适中，可视目标逐步递增负荷。"
    } else if rpe <= 8.0 {
        "训练强度偏高，能带来良好适应。注意控制总量与恢复。"
    } else if rpe <= 9.0 {
        "训练强度很高，已接近极限。请确保充分热身与恢复。"
    } else {
        "极限强度训练（RPE 10）。务必安排充足的恢复，避免连续多次极限训练。"
    }
}

/// Commentary for a 1-10 energy score.
#[must_use]
pub fn energy_analysis(score: f64) -> &'static str {
    if !score.is_finite() {
        return "请确保能量水平在1-10范围内。";
    }
    if score <= 3.0 {
        "能量水平较低，可能影响训练表现。建议关注饮食、睡眠与压力管理。"
    } else if score <= 6.0 {
        "能量水平一般，基本可完成训练。可通过加餐或调整作息进一步提升。"
    } else if score <= 8.0 {
        "能量水平良好，适合进行计划中的训练负荷。"
    } else {
        "能量水平充沛，可在安全前提下尝试小幅提高训练强度或容量。"
    }
}

/// Commentary keyed by sleep quality. Accepts the key (`good`) or the label (`好`).
#[must_use]
pub fn sleep_analysis(sleep: &str) -> &'static str {
    match SleepQuality::from_str(sleep.trim()) {
        Ok(SleepQuality::Poor) => {
            "睡眠质量不佳可能影响了恢复和表现。建议优化睡眠环境，建立规律作息，必要时咨询专业人士。"
        }
        Ok(SleepQuality::Average) => "睡眠质量一般，有改善空间。尝试提前30分钟入睡，创造更好的睡眠环境。",
        Ok(SleepQuality::Good) => "睡眠质量良好，为训练和恢复提供了良好基础。继续保持规律的睡眠习惯。",
        Err(_) => "充足的睡眠是训练恢复的关键因素。",
    }
}

/// Commentary keyed by soreness level. Accepts the key (`mild`) or the label (`轻微`).
#[must_use]
pub fn muscle_soreness_analysis(soreness: &str) -> &'static str {
    match MuscleSoreness::from_str(soreness.trim()) {
        Ok(MuscleSoreness::NoSoreness) => "无肌肉酸痛，恢复状态良好。可以按计划进行下次训练。",
        Ok(MuscleSoreness::Mild) => {
            "轻微肌肉酸痛属于正常现象，表明肌肉得到了适当刺激。注意拉伸和轻度活动促进恢复。"
        }
        Ok(MuscleSoreness::Moderate) => {
            "中度肌肉酸痛，需要关注恢复质量。建议增加拉伸、按摩或轻度有氧运动来缓解。"
        }
        Ok(MuscleSoreness::Severe) => {
            "严重肌肉酸痛可能提示训练强度过大或恢复不足。建议降低下次训练强度，加强恢复措施。"
        }
        Err(_) => "请关注肌肉酸痛程度，适当调整训练计划。",
    }
}

// Blank or non-numeric input lands in the "out of range" bucket
fn score_from_input(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// All four commentaries for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub rpe: &'static str,
    pub energy: &'static str,
    pub sleep: &'static str,
    pub muscle_soreness: &'static str,
}

impl Advice {
    #[must_use]
    pub fn for_form(form: &FeedbackForm) -> Self {
        Self {
            rpe: rpe_analysis(score_from_input(form.rpe.as_deref())),
            energy: energy_analysis(score_from_input(form.energy.as_deref())),
            sleep: sleep_analysis(form.sleep.as_deref().unwrap_or_default()),
            muscle_soreness: muscle_soreness_analysis(
                form.muscle_soreness.as_deref().unwrap_or_default(),
            ),
        }
    }
}
