use crate::domain::ports::Clipboard;
use crate::utils::error::{ClientError, Result};

/// System clipboard via arboard. The handle is opened lazily because a
/// headless session has no clipboard and that should only fail `copy`.
#[cfg(feature = "clipboard")]
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| ClientError::ClipboardError {
                message: e.to_string(),
            })?;
            self.inner = Some(clipboard);
        }

        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ClientError::ClipboardError {
                    message: e.to_string(),
                }),
            None => Err(ClientError::ClipboardError {
                message: "clipboard unavailable".to_string(),
            }),
        }
    }
}

// 未啟用 clipboard feature 時的空實現
#[cfg(not(feature = "clipboard"))]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(not(feature = "clipboard"))]
impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(feature = "clipboard"))]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, _text: &str) -> Result<()> {
        Err(ClientError::ClipboardError {
            message: "built without clipboard support".to_string(),
        })
    }
}
