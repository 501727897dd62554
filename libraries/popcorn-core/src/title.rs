//! Scoped window title
//!
//! A `TitleGuard` shows a title for as long as it lives and puts the
//! application's default title back when dropped.

use std::fmt;
use std::sync::Arc;

use crate::traits::TitleSink;

/// Title shown when no movie detail is loaded
pub const DEFAULT_TITLE: &str = "usePopcorn";

/// Holds a title on a sink until dropped.
pub struct TitleGuard {
    sink: Arc<dyn TitleSink>,
    default_title: String,
}

impl TitleGuard {
    /// Set `title` on `sink`; the returned guard restores `default_title`.
    pub fn acquire(
        sink: Arc<dyn TitleSink>,
        title: &str,
        default_title: impl Into<String>,
    ) -> Self {
        sink.set_title(title);
        Self {
            sink,
            default_title: default_title.into(),
        }
    }
}

impl Drop for TitleGuard {
    fn drop(&mut self) {
        self.sink.set_title(&self.default_title);
    }
}

impl fmt::Debug for TitleGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleGuard")
            .field("default_title", &self.default_title)
            .finish_non_exhaustive()
    }
}
