use anyhow::Result;
use std::fs;
use std::time::{Duration, Instant};
use workout_feedback_lib::{
    collect_form_data, energy_analysis, format_date, format_number, generate_feedback,
    load_config_util, muscle_soreness_analysis, parse_color, parse_number_input, rpe_analysis,
    save_config_util, sleep_analysis, Advice, Clipboard, ClipboardError, Config, CopyButton,
    CopyOutcome, ExerciseEntry, FeedbackForm, FeedbackService, FormError, FormState, Movement,
    ResultView, RowEditor, RowList, StandardColor, SystemClipboard,
};

// Helper function to create a service that never touches the real config dir
fn create_test_service() -> FeedbackService {
    FeedbackService {
        config: Config::default(),
        config_path: "test_config.toml".into(),
    }
}

fn form_with_rows(rows: Vec<RowEditor>) -> FormState {
    FormState {
        date: Some("2024-05-20".to_string()),
        rpe: Some("8".to_string()),
        energy: Some("7".to_string()),
        sleep: Some("好".to_string()),
        sleep_duration: None,
        muscle_soreness: Some("轻微".to_string()),
        other_factors: Some(String::new()),
        rows: RowList::from_rows(rows),
    }
}

fn row(select: Option<Movement>, text: &str, sets: &str, reps: &str, weight: &str) -> RowEditor {
    RowEditor {
        movement_select: select,
        movement_text: text.to_string(),
        sets: sets.to_string(),
        reps: reps.to_string(),
        weight: weight.to_string(),
    }
}

// Fake clipboard so both presenter branches can be driven
struct FakeClipboard {
    fail: bool,
    contents: Option<String>,
}

impl Clipboard for FakeClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Access("no display".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

// --- Row Manager ---

#[test]
fn test_row_list_starts_with_one_empty_row() {
    let rows = RowList::new();
    assert_eq!(rows.len(), 1);
    assert!(rows.rows()[0].is_empty());
}

#[test]
fn test_removing_only_row_leaves_one_empty_row() {
    let mut rows = RowList::new();
    rows.get_mut(0).unwrap().movement_text = "深蹲".to_string();

    let removed = rows.remove_row(0);
    assert_eq!(removed.map(|r| r.movement_text), Some("深蹲".to_string()));
    assert_eq!(rows.len(), 1);
    assert!(rows.rows()[0].is_empty());

    // And again, any number of times
    rows.remove_row(0);
    rows.remove_row(0);
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_add_and_remove_rows_keeps_order() {
    let mut rows = RowList::new();
    assert_eq!(rows.add_row(), 1);
    assert_eq!(rows.add_row(), 2);
    rows.get_mut(0).unwrap().movement_text = "A".to_string();
    rows.get_mut(1).unwrap().movement_text = "B".to_string();
    rows.get_mut(2).unwrap().movement_text = "C".to_string();

    rows.remove_row(1);
    let names: Vec<&str> = rows.iter().map(|r| r.movement_text.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);

    // Out of range is a no-op
    assert!(rows.remove_row(5).is_none());
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_row_spec_parsing() -> Result<()> {
    let parsed: RowEditor = "select=硬拉, text=深蹲+, sets=3, reps=5, weight=100".parse()?;
    assert_eq!(parsed, row(Some(Movement::Deadlift), "深蹲+", "3", "5", "100"));

    let empty: RowEditor = "".parse()?;
    assert!(empty.is_empty());

    assert!(matches!(
        "select=面包".parse::<RowEditor>(),
        Err(FormError::UnknownMovement(_))
    ));
    assert!(matches!(
        "tempo=3".parse::<RowEditor>(),
        Err(FormError::UnknownRowField(_))
    ));
    assert!(matches!(
        "sets".parse::<RowEditor>(),
        Err(FormError::MalformedRowSegment(_))
    ));
    Ok(())
}

// --- Form Collector ---

#[test]
fn test_movement_name_precedence() {
    let form = form_with_rows(vec![
        row(Some(Movement::Deadlift), "深蹲+", "", "", ""),
        row(Some(Movement::Deadlift), "", "", "", ""),
        row(None, "   ", "", "", ""),
    ]);
    let collected = collect_form_data(&form);
    let names: Vec<&str> = collected.items.iter().map(|e| e.movement.as_str()).collect();
    assert_eq!(names, vec!["深蹲+", "硬拉", "动作3"]);
}

#[test]
fn test_numeric_inputs_absent_not_zero() {
    let form = form_with_rows(vec![row(None, "卧推", "", " 8 ", "abc")]);
    let entry = &collect_form_data(&form).items[0];
    assert_eq!(entry.sets, None);
    assert_eq!(entry.reps, Some(8.0));
    assert_eq!(entry.weight, None);

    assert_eq!(parse_number_input("0"), Some(0.0));
    assert_eq!(parse_number_input("62.5"), Some(62.5));
    assert_eq!(parse_number_input("NaN"), None);
    assert_eq!(parse_number_input(""), None);
}

#[test]
fn test_out_of_range_values_pass_through() {
    let mut form = form_with_rows(vec![row(None, "推举", "-2", "2.5", "-10")]);
    form.rpe = Some("42".to_string());
    let collected = collect_form_data(&form);
    assert_eq!(collected.rpe.as_deref(), Some("42"));
    assert_eq!(
        collected.items[0],
        ExerciseEntry {
            movement: "推举".to_string(),
            sets: Some(-2.0),
            reps: Some(2.5),
            weight: Some(-10.0),
        }
    );
}

// --- Report Generator ---

#[test]
fn test_format_date_weekdays() {
    assert_eq!(format_date(Some("2024-05-20")), "2024-05-20 星期一");
    assert_eq!(format_date(Some("2023-10-01")), "2023-10-01 星期日");
    assert_eq!(format_date(Some("2024-02-29")), "2024-02-29 星期四");
}

#[test]
fn test_format_date_fallbacks() {
    assert_eq!(format_date(Some("not a date")), "not a date");
    assert_eq!(format_date(Some("2023-02-30")), "2023-02-30");
    assert_eq!(format_date(Some("")), "");
    assert_eq!(format_date(None), "");

    // Only the exact zero-padded shape is a date
    assert_eq!(format_date(Some("2024-5-20")), "2024-5-20");
    assert_eq!(format_date(Some(" 2024-05-20")), " 2024-05-20");
    assert_eq!(format_date(Some("2024-05-20 ")), "2024-05-20 ");
    assert_eq!(format_date(Some("+002024-05-20")), "+002024-05-20");
    assert_eq!(format_date(Some("2024/05/20")), "2024/05/20");
}

#[test]
fn test_full_report_text() {
    let mut form = form_with_rows(vec![row(Some(Movement::Squat), "", "3", "5", "100")]);
    form.sleep_duration = Some("7.5".to_string());
    form.other_factors = Some("  状态不错 ".to_string());

    let report = generate_feedback(&collect_form_data(&form));
    let expected = "训练反馈 - 2024-05-20 星期一\n\n\
完成情况：\n  1. 动作：深蹲\n     组数：3 组\n     次数：每组 5 次\n     重量/负重：100 kg\n\n\
RPE评估：\n8\n\n\
能量水平：\n7\n\n\
睡眠质量：\n好\n\n\
睡眠时长：\n7.5\n\n\
肌肉酸痛：\n轻微\n\n\
其他因素：\n状态不错\n";
    assert_eq!(report.as_str(), expected);
}

#[test]
fn test_empty_entry_list_uses_no_records_line() {
    let form = FeedbackForm {
        date: Some("2024-05-20".to_string()),
        ..Default::default()
    };
    let report = generate_feedback(&form);
    assert!(report
        .as_str()
        .contains("完成情况：\n  未填写动作记录\n\nRPE评估："));
}

#[test]
fn test_weight_zero_is_printed_absent_is_not() {
    let form = form_with_rows(vec![
        row(None, "俯卧撑", "3", "20", "0"),
        row(None, "引体向上", "3", "8", ""),
    ]);
    let report = generate_feedback(&collect_form_data(&form));
    let lines: Vec<&str> = report.lines().collect();

    assert!(lines.contains(&"     重量/负重：0 kg"));
    let second = lines
        .iter()
        .position(|l| *l == "  2. 动作：引体向上")
        .unwrap();
    assert_eq!(lines[second + 1], "     组数：3 组");
    assert_eq!(lines[second + 2], "     次数：每组 8 次");
    assert_eq!(lines[second + 3], "");
}

#[test]
fn test_zero_sets_and_reps_are_left_out() {
    let form = form_with_rows(vec![row(None, "划船", "0", "0", "")]);
    let report = generate_feedback(&collect_form_data(&form));
    assert!(report.as_str().contains("  1. 动作：划船\n\nRPE评估："));
}

#[test]
fn test_sleep_duration_presence_not_truthiness() {
    let mut form = form_with_rows(vec![]);
    let without = generate_feedback(&collect_form_data(&form));
    assert!(!without.as_str().contains("睡眠时长"));

    form.sleep_duration = Some(String::new());
    let with_empty = generate_feedback(&collect_form_data(&form));
    assert!(with_empty.as_str().contains("睡眠时长：\n\n\n肌肉酸痛："));
}

#[test]
fn test_muscle_soreness_is_verbatim() {
    let mut form = form_with_rows(vec![]);
    form.muscle_soreness = Some(String::new());
    let report = generate_feedback(&collect_form_data(&form));
    assert!(report.as_str().contains("肌肉酸痛：\n\n\n其他因素："));

    form.muscle_soreness = Some(" 有点酸 mild ".to_string());
    let report = generate_feedback(&collect_form_data(&form));
    assert!(report.as_str().contains("肌肉酸痛：\n 有点酸 mild \n\n"));
}

#[test]
fn test_other_factors_whitespace_renders_none() {
    let mut form = form_with_rows(vec![]);
    form.other_factors = Some(" \t\n ".to_string());
    let report = generate_feedback(&collect_form_data(&form));
    assert!(report.as_str().ends_with("其他因素：\n无\n"));

    form.other_factors = None;
    let report = generate_feedback(&collect_form_data(&form));
    assert!(report.as_str().ends_with("其他因素：\n无\n"));
}

#[test]
fn test_format_number_matches_browser_output() {
    assert_eq!(format_number(3.0), "3");
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(62.5), "62.5");
}

#[test]
fn test_format_number_exponent_form_at_extremes() {
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(-2.5e22), "-2.5e+22");
    assert_eq!(format_number(1e-7), "1e-7");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
    // Still plain just inside the bounds
    assert_eq!(format_number(1e20), "100000000000000000000");
    assert_eq!(format_number(0.000001), "0.000001");
}

#[test]
fn test_report_is_deterministic() {
    let form = collect_form_data(&form_with_rows(vec![row(None, "深蹲", "5", "5", "80")]));
    assert_eq!(generate_feedback(&form), generate_feedback(&form));
}

// --- Advisory tables ---

#[test]
fn test_rpe_and_energy_buckets() {
    assert_eq!(rpe_analysis(f64::NAN), "请确保RPE在1-10范围内。");
    assert!(rpe_analysis(3.0).starts_with("训练强度较轻"));
    assert!(rpe_analysis(6.0).starts_with("训练强度中等"));
    assert!(rpe_analysis(7.5).starts_with("训练强度偏高"));
    assert!(rpe_analysis(9.0).starts_with("训练强度很高"));
    assert!(rpe_analysis(10.0).starts_with("极限强度训练"));

    assert_eq!(energy_analysis(f64::INFINITY), "请确保能量水平在1-10范围内。");
    assert!(energy_analysis(2.0).starts_with("能量水平较低"));
    assert!(energy_analysis(5.0).starts_with("能量水平一般"));
    assert!(energy_analysis(8.0).starts_with("能量水平良好"));
    assert!(energy_analysis(10.0).starts_with("能量水平充沛"));
}

#[test]
fn test_sleep_and_soreness_lookup() {
    assert_eq!(sleep_analysis("good"), sleep_analysis("好"));
    assert!(sleep_analysis("poor").starts_with("睡眠质量不佳"));
    assert_eq!(sleep_analysis("??"), "充足的睡眠是训练恢复的关键因素。");

    assert_eq!(muscle_soreness_analysis("severe"), muscle_soreness_analysis("严重"));
    assert!(muscle_soreness_analysis("none").starts_with("无肌肉酸痛"));
    assert_eq!(
        muscle_soreness_analysis(""),
        "请关注肌肉酸痛程度，适当调整训练计划。"
    );
}

#[test]
fn test_advice_for_form_parses_raw_scores() {
    let mut form = collect_form_data(&form_with_rows(vec![]));
    form.energy = Some("abc".to_string());
    let advice = Advice::for_form(&form);
    assert!(advice.rpe.starts_with("训练强度偏高"));
    assert_eq!(advice.energy, "请确保能量水平在1-10范围内。");
    assert!(advice.sleep.starts_with("睡眠质量良好"));
    assert!(advice.muscle_soreness.starts_with("轻微肌肉酸痛"));
}

#[test]
fn test_advice_is_not_part_of_report() {
    let form = collect_form_data(&form_with_rows(vec![]));
    let report = generate_feedback(&form);
    assert!(!report.as_str().contains(Advice::for_form(&form).rpe));
}

// --- Result Presenter ---

#[test]
fn test_copy_success_sets_copied_label_then_reverts() {
    let service = create_test_service();
    let mut view = service.present(service.generate(&form_with_rows(vec![])));
    let mut clipboard = FakeClipboard {
        fail: false,
        contents: None,
    };
    let start = Instant::now();

    assert_eq!(view.copy_button.label(), "复制");
    assert_eq!(view.copy(&mut clipboard, start), CopyOutcome::Copied);
    assert_eq!(clipboard.contents.as_deref(), Some(view.report().as_str()));
    assert_eq!(view.copy_button.label(), "已复制");

    view.tick(start + Duration::from_millis(1999));
    assert_eq!(view.copy_button.label(), "已复制");
    view.tick(start + Duration::from_millis(2000));
    assert_eq!(view.copy_button.label(), "复制");
}

#[test]
fn test_copy_failure_falls_back_to_selection() {
    let service = create_test_service();
    let report = service.generate(&form_with_rows(vec![]));
    let mut clipboard = FakeClipboard {
        fail: true,
        contents: None,
    };
    assert_eq!(
        service.copy(&mut clipboard, &report),
        CopyOutcome::ManualSelection
    );

    let mut view = ResultView::new(report, Duration::from_secs(2));
    assert_eq!(
        view.copy(&mut clipboard, Instant::now()),
        CopyOutcome::ManualSelection
    );
    assert!(view.selection_active);
    assert!(!view.copy_button.is_copied());
}

#[test]
fn test_system_clipboard_opens_on_first_copy_only() {
    // No display server is touched until a copy is requested
    assert!(!SystemClipboard::new().is_open());
    assert!(!SystemClipboard::for_short_lived_process().is_open());
    assert!(!SystemClipboard::default().is_open());
}

#[test]
fn test_copy_button_recopy_extends_delay() {
    let mut button = CopyButton::new(Duration::from_millis(100));
    let start = Instant::now();
    button.mark_copied(start);
    button.mark_copied(start + Duration::from_millis(80));
    button.tick(start + Duration::from_millis(120));
    assert!(button.is_copied());
    button.tick(start + Duration::from_millis(180));
    assert!(!button.is_copied());
}

// --- Service, submission files and config ---

#[test]
fn test_new_form_defaults() {
    let service = create_test_service();
    let form = service.new_form();
    assert_eq!(form.rows.len(), 1);
    assert_eq!(form.sleep_duration.as_deref(), Some(""));
    let date = form.date.unwrap_or_default();
    assert!(format_date(Some(date.as_str())).contains("星期"));

    let mut no_date = create_test_service();
    no_date.config.default_date_today = false;
    assert_eq!(no_date.new_form().date.as_deref(), Some(""));
}

#[test]
fn test_load_submission_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("feedback.toml");
    fs::write(
        &path,
        r#"
date = "2024-05-20"
rpe = "9"
muscle-soreness = ""

[[rows]]
movement-select = "硬拉"
sets = "5"
reps = "3"
weight = "140"

[[rows]]
movement-select = ""
movement-text = "农夫行走"
"#,
    )?;

    let service = create_test_service();
    let form = service.load_submission(&path)?;
    assert_eq!(form.rpe.as_deref(), Some("9"));
    assert_eq!(form.energy, None);
    assert_eq!(form.sleep_duration, None);
    assert_eq!(form.rows.len(), 2);
    assert_eq!(form.rows.rows()[0].movement_select, Some(Movement::Deadlift));

    let report = service.generate(&form);
    assert!(report.as_str().contains("  2. 动作：农夫行走\n"));
    assert!(!report.as_str().contains("睡眠时长"));
    Ok(())
}

#[test]
fn test_submission_without_rows_gets_one_row() -> Result<()> {
    let form: FormState = toml::from_str("rows = []\nrpe = \"5\"\n")?;
    assert_eq!(form.rows.len(), 1);
    let form: FormState = toml::from_str("rpe = \"5\"\n")?;
    assert_eq!(form.rows.len(), 1);
    Ok(())
}

#[test]
fn test_submission_rejects_unknown_movement() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[[rows]]\nmovement-select = \"面包\"\n")?;
    assert!(FormState::load(&path).is_err());
    Ok(())
}

#[test]
fn test_template_round_trips() -> Result<()> {
    let service = create_test_service();
    let template = service.new_form().to_toml()?;
    assert!(template.contains("sleep-duration"));
    assert!(template.contains("movement-select"));
    let parsed: FormState = toml::from_str(&template)?;
    assert_eq!(parsed, service.new_form());
    Ok(())
}

#[test]
fn test_config_created_with_defaults_and_reloaded() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("config.toml");

    let config = load_config_util(&path)?;
    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(config.copy_feedback_delay(), Duration::from_millis(2000));

    let mut changed = config;
    changed.copy_feedback_ms = 500;
    changed.theme.header_color = "cyan".to_string();
    save_config_util(&path, &changed)?;
    let reloaded = load_config_util(&path)?;
    assert_eq!(reloaded.copy_feedback_ms, 500);
    assert_eq!(reloaded.header_color(), comfy_table::Color::Cyan);
    Ok(())
}

#[test]
fn test_config_partial_file_uses_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "copy_feedback_ms = 750\n")?;
    let config = load_config_util(&path)?;
    assert_eq!(config.copy_feedback_ms, 750);
    assert!(config.default_date_today);
    assert_eq!(config.theme.header_color, "Green");
    Ok(())
}

#[test]
fn test_parse_color() {
    assert_eq!(parse_color("darkcyan").ok(), Some(StandardColor::DarkCyan));
    assert!(parse_color("chartreuse").is_err());
}
