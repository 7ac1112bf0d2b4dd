//! Terminal stand-ins for the browser's clipboard and new-tab behavior.

use std::io::Write;

use ecam_variant::{Clipboard, ClipboardError, LinkOpener};

/// "Copies" text by printing it.
pub struct WriterClipboard<W: Write> {
    out: W,
}

impl<W: Write> WriterClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Clipboard for WriterClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        writeln!(self.out, "{text}").map_err(|e| ClipboardError(e.to_string()))
    }
}

/// "Opens" links by printing them for the user to follow.
pub struct WriterOpener<W: Write> {
    out: W,
}

impl<W: Write> WriterOpener<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> LinkOpener for WriterOpener<W> {
    fn open_in_new_context(&mut self, url: &str) {
        if let Err(e) = writeln!(self.out, "Open: {url}") {
            tracing::warn!(error = %e, "failed to print link");
        }
    }
}
