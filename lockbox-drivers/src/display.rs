//! Serial status display
//!
//! Mirrors the lock status as text menus on a UART, for a terminal or a
//! wireless bridge listening on the other end.

use embedded_io::Write;
use lockbox_core::lock::LockStatus;
use lockbox_core::traits::StatusDisplay;

const LOCKED_MENU: &[&str] = &[
    "Enter your password",
    "  then press",
    "#--------Open",
    "*--------Change password",
    "B--------Proximity alarm on",
    "C--------Proximity alarm off",
    "D--------Stop signal",
];

const UNLOCKED_MENU: &[&str] = &[
    "System unlocked",
    "*--------Lock",
    "B--------Proximity alarm on",
    "C--------Proximity alarm off",
    "D--------Stop signal",
];

const NEW_PASSWORD_MENU: &[&str] = &[
    "Enter the new password",
    "  then press",
    "#--------Save",
    "*--------Save",
];

const UPDATED_MENU: &[&str] = &["Password changed", "#    Back to start"];

fn menu(status: LockStatus) -> &'static [&'static str] {
    match status {
        LockStatus::Locked => LOCKED_MENU,
        LockStatus::Unlocked => UNLOCKED_MENU,
        LockStatus::NewPassword => NEW_PASSWORD_MENU,
        LockStatus::PasswordUpdated => UPDATED_MENU,
        LockStatus::Welcome | LockStatus::AlarmArmed => &[],
    }
}

/// Status display writing text over a serial link
pub struct SerialStatusDisplay<W> {
    tx: W,
    /// Failed writes
    errors: u32,
}

impl<W: Write> SerialStatusDisplay<W> {
    pub fn new(tx: W) -> Self {
        Self { tx, errors: 0 }
    }

    /// Number of failed writes
    pub fn errors(&self) -> u32 {
        self.errors
    }

    fn line(&mut self, text: &str) -> Result<(), W::Error> {
        self.tx.write_all(text.as_bytes())?;
        self.tx.write_all(b"\r\n")
    }

    fn write_status(&mut self, status: LockStatus) -> Result<(), W::Error> {
        self.tx.write_all(b"\r\n")?;
        self.line(status.caption())?;
        for text in menu(status) {
            self.line(text)?;
        }
        self.tx.flush()
    }

    fn write_entry(&mut self, shadow: &str) -> Result<(), W::Error> {
        // Redraw the same terminal line on every key
        self.tx.write_all(b"\r")?;
        self.tx.write_all(shadow.as_bytes())?;
        self.tx.flush()
    }
}

impl<W: Write> StatusDisplay for SerialStatusDisplay<W> {
    fn show(&mut self, status: LockStatus) {
        if self.write_status(status).is_err() {
            self.errors = self.errors.wrapping_add(1);
        }
    }

    fn show_entry(&mut self, shadow: &str) {
        if self.write_entry(shadow).is_err() {
            self.errors = self.errors.wrapping_add(1);
        }
    }
}
