// workout-feedback-tui/src/ui/modals.rs
use crate::{
    app::{ActiveModal, App},
    ui::layout::centered_rect,
};
use ratatui::{
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn render_help_modal(f: &mut Frame) {
    let block = Block::default()
        .title("帮助 (F1/Esc 关闭)")
        .borders(Borders::ALL)
        .border_style(Style::new().yellow());
    let area = centered_rect(60, 70, f.size());
    f.render_widget(Clear, area);

    let text = vec![
        Line::styled("--- 全局 ---", Style::new().bold()),
        Line::from(" Tab / ↓      : 下一项"),
        Line::from(" Shift+Tab / ↑: 上一项"),
        Line::from(" Ctrl+S       : 生成反馈"),
        Line::from(" Esc / Ctrl+Q : 退出"),
        Line::from(""),
        Line::styled("--- 表单 ---", Style::new().bold()),
        Line::from(" 输入字符     : 编辑当前字段"),
        Line::from(" ← / →        : 切换下拉选项"),
        Line::from(" Backspace    : 删除字符 / 清除选择"),
        Line::from(" Enter        : 按下按钮"),
        Line::from(" Ctrl+N       : 添加动作"),
        Line::from(" Ctrl+D       : 删除当前动作行"),
        Line::from(""),
        Line::styled("--- 反馈结果 ---", Style::new().bold()),
        Line::from(" c / Enter    : 复制到剪贴板"),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

pub fn render_modal(f: &mut Frame, app: &App) {
    match app.active_modal {
        ActiveModal::Help => render_help_modal(f),
        ActiveModal::None => {}
    }
}
