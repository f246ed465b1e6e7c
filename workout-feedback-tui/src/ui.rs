// workout-feedback-tui/src/ui.rs
mod form;
mod layout;
mod modals;
mod result;
mod status_bar;

pub use layout::render_ui;
