use arboard::Clipboard;
use client_core::{ClipboardError, ClipboardWriter};

/// The desktop clipboard. A fresh handle is opened for every write.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))
    }
}
