//! Terminal window title

use crossterm::{execute, terminal::SetTitle};
use popcorn_core::TitleSink;
use std::io;

/// Shows titles in the terminal window via an escape sequence
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalTitle;

impl TitleSink for TerminalTitle {
    fn set_title(&self, title: &str) {
        if let Err(e) = execute!(io::stdout(), SetTitle(title)) {
            tracing::debug!(error = %e, "Failed to set terminal title");
        }
    }
}
