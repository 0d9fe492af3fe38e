//! Status display trait
//!
//! The display is a dumb sink: it only learns the lock status and the masked
//! password entry. Fonts, bitmaps and layout stay in the implementation.

use crate::lock::LockStatus;

/// Sink for user-visible lock status
pub trait StatusDisplay {
    /// Show a status screen
    fn show(&mut self, status: LockStatus);

    /// Show the masked entry line
    ///
    /// `shadow` holds one `*` per entered byte followed by `-` for each
    /// remaining slot, e.g. `"**----------"`.
    fn show_entry(&mut self, shadow: &str);
}
