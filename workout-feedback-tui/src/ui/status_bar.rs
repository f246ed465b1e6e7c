// workout-feedback-tui/src/ui/status_bar.rs
use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.focus {
        Focus::Result => "[c/Enter] 复制 | [Tab] 返回表单 | [F1] 帮助 | [Esc] 退出",
        Focus::Scalar(field) if field.is_choice() => {
            "[←/→] 选择 | [Tab/↓] 下一项 | [Ctrl+S] 生成 | [F1] 帮助 | [Esc] 退出"
        }
        Focus::Row { .. } => {
            "[Ctrl+N] 添加动作 | [Ctrl+D] 删除本行 | [←/→] 选择动作 | [Ctrl+S] 生成 | [F1] 帮助"
        }
        _ => "[Tab/↓] 下一项 | [Shift+Tab/↑] 上一项 | [Ctrl+S] 生成 | [F1] 帮助 | [Esc] 退出",
    };

    let (text, style) = app.last_error.as_ref().map_or_else(
        || (status_text.to_string(), Style::default().fg(Color::DarkGray)),
        |err| (err.clone(), Style::default().fg(Color::Red)),
    );

    f.render_widget(Paragraph::new(text).style(style), area);
}
