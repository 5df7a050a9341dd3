//! System clipboard access through `arboard`.
//!
//! A fresh handle is opened per copy so nothing is held between actions.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy `text` to the system clipboard verbatim.
///
/// Fails without a display server (headless Linux) or when access is denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
