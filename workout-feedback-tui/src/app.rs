// workout-feedback-tui/src/app.rs
mod actions;
mod input;
pub mod state;

pub use state::{ActiveModal, App, Focus, RowField, ScalarField};
