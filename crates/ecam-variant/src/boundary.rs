//! Seams to the host application: the address bar, the clipboard, and new
//! browsing contexts.

use thiserror::Error;

/// The page's query string.
pub trait QueryBoundary {
    /// Replaces the current query in place. Must not reload the page or push
    /// a history entry. `query` has no leading `?`.
    fn replace_query(&mut self, query: &str);
}

#[derive(Debug, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

pub trait Clipboard {
    /// # Errors
    ///
    /// Returns [`ClipboardError`] when the host refuses the write.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

pub trait LinkOpener {
    /// Opens `url` in a new tab or window.
    fn open_in_new_context(&mut self, url: &str);
}

/// A [`QueryBoundary`] that just remembers the last query written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryEcho {
    current: String,
    writes: usize,
}

impl QueryEcho {
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Number of times the query has been replaced.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl QueryBoundary for QueryEcho {
    fn replace_query(&mut self, query: &str) {
        query.clone_into(&mut self.current);
        self.writes += 1;
    }
}
