// workout-feedback-tui/src/ui/form.rs
use crate::app::{App, Focus, RowField, ScalarField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use workout_feedback_lib::RowEditor;

const CARET: &str = "▏";

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().reversed()
    } else {
        Style::default()
    }
}

// A bracketed input showing the value, or a dimmed placeholder when empty
fn input_span(value: &str, placeholder: &str, focused: bool) -> Span<'static> {
    let caret = if focused { CARET } else { "" };
    if value.is_empty() {
        Span::styled(
            format!("[{placeholder}{caret}]"),
            field_style(focused).add_modifier(Modifier::DIM),
        )
    } else {
        Span::styled(format!("[{value}{caret}]"), field_style(focused))
    }
}

// A dropdown: value plus arrows hinting ←/→ when focused
fn choice_span(value: &str, placeholder: &str, focused: bool) -> Span<'static> {
    let shown = if value.is_empty() { placeholder } else { value };
    let text = if focused {
        format!("[◂ {shown} ▸]")
    } else {
        format!("[{shown}]")
    };
    let style = if value.is_empty() {
        field_style(focused).add_modifier(Modifier::DIM)
    } else {
        field_style(focused)
    };
    Span::styled(text, style)
}

fn button_span(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().reversed().bold()
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(format!("[ {label} ]"), style)
}

fn scalar_line(app: &App, field: ScalarField) -> Line<'static> {
    let focused = app.focus == Focus::Scalar(field);
    let value = app.scalar_value(field);
    let widget = if field.is_choice() {
        choice_span(value, "请选择", focused)
    } else {
        let placeholder = match field {
            ScalarField::Date => "YYYY-MM-DD",
            ScalarField::OtherFactors => "饮食、压力、伤病等",
            _ => "",
        };
        input_span(value, placeholder, focused)
    };
    Line::from(vec![Span::raw(format!("{}：", field.label())), widget])
}

fn row_lines(app: &App, index: usize, row: &RowEditor) -> [Line<'static>; 2] {
    let is = |field: RowField| app.focus == Focus::Row { index, field };
    let select = row
        .movement_select
        .map(|m| m.to_string())
        .unwrap_or_default();

    let first = Line::from(vec![
        Span::raw(format!("  {}. ", index + 1)),
        choice_span(&select, "从常见动作中选择", is(RowField::Select)),
        Span::raw(" 或 "),
        input_span(&row.movement_text, "自定义动作名称", is(RowField::Text)),
    ]);
    let second = Line::from(vec![
        Span::raw("     组数"),
        input_span(&row.sets, "", is(RowField::Sets)),
        Span::raw(" 次数"),
        input_span(&row.reps, "", is(RowField::Reps)),
        Span::raw(" 重量/负重"),
        input_span(&row.weight, "", is(RowField::Weight)),
        Span::raw(" kg  "),
        Span::styled(
            "[删除]",
            if is(RowField::Remove) {
                Style::default().reversed()
            } else {
                Style::default().fg(Color::Red)
            },
        ),
    ]);
    [first, second]
}

pub fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let mut focused_line = 0usize;

    let mut push = |lines: &mut Vec<Line<'static>>, line: Line<'static>, focused: bool| {
        if focused {
            focused_line = lines.len();
        }
        lines.push(line);
    };

    push(
        &mut lines,
        scalar_line(app, ScalarField::Date),
        app.focus == Focus::Scalar(ScalarField::Date),
    );
    push(&mut lines, Line::from(""), false);
    push(
        &mut lines,
        Line::from(Span::styled("完成情况", Style::new().bold().underlined())),
        false,
    );
    for (index, row) in app.form.rows.iter().enumerate() {
        let in_row = matches!(app.focus, Focus::Row { index: i, .. } if i == index);
        let [first, second] = row_lines(app, index, row);
        push(&mut lines, first, in_row);
        push(&mut lines, second, false);
    }
    push(
        &mut lines,
        Line::from(button_span("+ 添加动作", app.focus == Focus::AddRow)),
        app.focus == Focus::AddRow,
    );
    push(&mut lines, Line::from(""), false);

    for field in [
        ScalarField::Rpe,
        ScalarField::Energy,
        ScalarField::Sleep,
        ScalarField::SleepDuration,
        ScalarField::MuscleSoreness,
        ScalarField::OtherFactors,
    ] {
        push(
            &mut lines,
            scalar_line(app, field),
            app.focus == Focus::Scalar(field),
        );
    }
    push(&mut lines, Line::from(""), false);
    push(
        &mut lines,
        Line::from(button_span("生成反馈", app.focus == Focus::Submit)),
        app.focus == Focus::Submit,
    );

    let form_focused = app.focus != Focus::Result;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("反馈表")
        .border_style(if form_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    // Keep the focused control on screen; the row's second line counts too
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (focused_line + 2).saturating_sub(visible);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}
