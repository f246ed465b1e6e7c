// workout-feedback-tui/src/ui/result.rs
use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Result;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let Some(result) = app.result.as_ref() else {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "填写左侧表单后按 Ctrl+S 或「生成反馈」",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("反馈结果")
                .border_style(border_style),
        );
        f.render_widget(placeholder, area);
        return;
    };

    let button = result.copy_button.label();
    let button_style = if result.copy_button.is_copied() {
        Style::default().fg(Color::Green).bold()
    } else if focused {
        Style::default().reversed()
    } else {
        Style::default().fg(Color::Cyan)
    };
    let title = Line::from(vec![
        Span::raw("反馈结果 "),
        Span::styled(format!("[{button}]"), button_style),
    ]);

    // Fallback for a failed copy: show the whole text as selected
    let text_style = if result.selection_active {
        Style::default().reversed()
    } else {
        Style::default()
    };
    let lines: Vec<Line> = result
        .report()
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), text_style)))
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);
}
