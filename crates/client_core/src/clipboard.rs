use std::time::Duration;

use crate::error::ClipboardError;

/// How long the "copied" acknowledgement stays raised.
pub const COPIED_ACK_DURATION: Duration = Duration::from_secs(2);

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Discards writes. For front-ends without a system clipboard.
#[derive(Debug, Default)]
pub struct NoopClipboard;

impl ClipboardWriter for NoopClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Ok(())
    }
}

/// Self-clearing "copied" flag.
///
/// Each copy raises the flag under a new epoch; only the timer of the latest
/// epoch may lower it again.
#[derive(Debug, Default)]
pub(crate) struct CopyFeedback {
    copied: bool,
    epoch: u64,
}

impl CopyFeedback {
    pub(crate) fn raise(&mut self) -> u64 {
        self.epoch += 1;
        self.copied = true;
        self.epoch
    }

    /// Returns true when the flag was lowered by this call.
    pub(crate) fn clear_if_current(&mut self, epoch: u64) -> bool {
        if self.epoch != epoch || !self.copied {
            return false;
        }
        self.copied = false;
        true
    }

    pub(crate) fn reset(&mut self) -> bool {
        self.epoch += 1;
        std::mem::replace(&mut self.copied, false)
    }

    pub(crate) fn is_copied(&self) -> bool {
        self.copied
    }
}
