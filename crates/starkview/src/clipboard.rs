use std::sync::Mutex;

use crate::error::ClipboardError;

/// Destination for copy-to-clipboard actions.
///
/// Writes may fail; callers log the failure and move on. Nothing in the
/// display layer branches on a clipboard result.
pub trait ClipboardSink {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Discards writes. For hosts without a clipboard integration.
pub struct NullClipboard;

impl ClipboardSink for NullClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Ok(())
    }
}

/// In-memory sink for tests.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last written text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().expect("clipboard lock poisoned").clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock().expect("clipboard lock poisoned") = Some(text.to_string());
        Ok(())
    }
}

/// System clipboard via `arboard`.
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard;

#[cfg(feature = "system-clipboard")]
impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|_| ClipboardError::Unavailable)?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_records_last_write() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);

        clipboard.write_text("first").unwrap();
        clipboard.write_text("second").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("second"));
    }

    #[test]
    fn test_null_clipboard_accepts_writes() {
        assert!(NullClipboard.write_text("anything").is_ok());
    }
}
