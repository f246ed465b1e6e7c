// src/app/input.rs
use super::{
    actions::{
        add_row, backspace, copy_result, cycle_choice, focus_next, focus_previous,
        remove_focused_row, submit, type_char,
    },
    state::{ActiveModal, App, Focus, RowField},
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// Main key event handler method on App
impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Handle based on active modal first
        if self.active_modal != ActiveModal::None {
            self.handle_help_modal_input(key);
            return Ok(());
        }

        // Global keys
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('n') => add_row(self),
                KeyCode::Char('d') => remove_focused_row(self),
                KeyCode::Char('s') => submit(self),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.active_modal = ActiveModal::Help,
            KeyCode::Tab | KeyCode::Down => focus_next(self),
            KeyCode::BackTab | KeyCode::Up => focus_previous(self),
            KeyCode::Left => cycle_choice(self, false),
            KeyCode::Right => cycle_choice(self, true),
            KeyCode::Enter => self.activate_focused(),
            KeyCode::Backspace => backspace(self),
            KeyCode::Char(c) => {
                if self.focus == Focus::Result {
                    if c == 'c' {
                        copy_result(self);
                    }
                } else {
                    type_char(self, c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    // Enter on a button presses it; on an input it moves on like Tab
    fn activate_focused(&mut self) {
        match self.focus {
            Focus::AddRow => add_row(self),
            Focus::Submit => submit(self),
            Focus::Result => copy_result(self),
            Focus::Row {
                field: RowField::Remove,
                ..
            } => remove_focused_row(self),
            _ => focus_next(self),
        }
    }

    fn handle_help_modal_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('q') => {
                self.active_modal = ActiveModal::None;
            }
            _ => {} // Ignore other keys in help
        }
    }
}
