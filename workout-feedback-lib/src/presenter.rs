// src/presenter.rs
use crate::report::Report;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const COPY_LABEL: &str = "复制";
pub const COPIED_LABEL: &str = "已复制";

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Access(String),
    #[error("Clipboard write failed: {0}")]
    Write(String),
}

/// Something that can take the report text.
pub trait Clipboard {
    /// # Errors
    /// Any failure to reach or write the clipboard.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard via `arboard`.
///
/// Opened on the first write, so a missing display server only matters when
/// the user actually copies, and then kept open: on Linux the copied text
/// lives in the process that owns the clipboard handle.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
    wait_for_handoff: bool,
}

impl SystemClipboard {
    /// A clipboard for long-running programs, which keep the handle alive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard for programs that exit right after copying. On Linux each
    /// write blocks until another program takes over the clipboard contents.
    #[must_use]
    pub fn for_short_lived_process() -> Self {
        Self {
            handle: None,
            wait_for_handoff: true,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn open(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        let clipboard = match self.handle.take() {
            Some(clipboard) => clipboard,
            None => {
                arboard::Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?
            }
        };
        Ok(self.handle.insert(clipboard))
    }
}

#[cfg(target_os = "linux")]
fn write_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    wait_for_handoff: bool,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    if wait_for_handoff {
        clipboard.set().wait().text(text)
    } else {
        clipboard.set_text(text)
    }
}

#[cfg(not(target_os = "linux"))]
fn write_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    _wait_for_handoff: bool,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.is_open())
            .field("wait_for_handoff", &self.wait_for_handoff)
            .finish()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let wait_for_handoff = self.wait_for_handoff;
        let result = write_text(self.open()?, text, wait_for_handoff);
        result.map_err(|e| {
            // A broken handle is reopened on the next copy
            self.handle = None;
            ClipboardError::Write(e.to_string())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The text is on the clipboard.
    Copied,
    /// The clipboard refused; the caller should select the text for the user instead.
    ManualSelection,
}

/// Writes the report to the clipboard. Failures are logged and turned into
/// `ManualSelection`, never returned.
pub fn copy_report<C: Clipboard + ?Sized>(clipboard: &mut C, report: &Report) -> CopyOutcome {
    match clipboard.set_text(report.as_str()) {
        Ok(()) => {
            tracing::info!("Copied report to clipboard");
            CopyOutcome::Copied
        }
        Err(e) => {
            tracing::warn!("{}; falling back to manual selection", e);
            CopyOutcome::ManualSelection
        }
    }
}

/// The copy button's label, which flips to "已复制" for a while after a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton {
    revert_after: Duration,
    copied_until: Option<Instant>,
}

impl CopyButton {
    #[must_use]
    pub const fn new(revert_after: Duration) -> Self {
        Self {
            revert_after,
            copied_until: None,
        }
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_until = Some(now + self.revert_after);
    }

    /// Reverts the label once the delay has passed. Call on every UI tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.copied_until {
            if now >= until {
                self.copied_until = None;
            }
        }
    }

    #[must_use]
    pub const fn is_copied(&self) -> bool {
        self.copied_until.is_some()
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.is_copied() {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }
}

/// Read-only display of a generated report plus its copy control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    report: Report,
    pub copy_button: CopyButton,
    /// Set when the clipboard failed and the whole text is shown selected.
    pub selection_active: bool,
}

impl ResultView {
    #[must_use]
    pub const fn new(report: Report, copy_revert_after: Duration) -> Self {
        Self {
            report,
            copy_button: CopyButton::new(copy_revert_after),
            selection_active: false,
        }
    }

    #[must_use]
    pub const fn report(&self) -> &Report {
        &self.report
    }

    /// Copy button handler.
    pub fn copy<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C, now: Instant) -> CopyOutcome {
        let outcome = copy_report(clipboard, &self.report);
        match outcome {
            CopyOutcome::Copied => {
                self.selection_active = false;
                self.copy_button.mark_copied(now);
            }
            CopyOutcome::ManualSelection => self.selection_active = true,
        }
        outcome
    }

    pub fn tick(&mut self, now: Instant) {
        self.copy_button.tick(now);
    }
}
