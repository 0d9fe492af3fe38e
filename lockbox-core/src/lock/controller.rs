//! Lock controller
//!
//! Pure state machine over raw keys. Feed it bytes from
//! [`InputMultiplexer::poll_raw`](crate::input::InputMultiplexer::poll_raw)
//! so `*` and `#` stay distinguishable; the sentinel value is accepted as
//! `#` for streams that were already mapped.

use heapless::{String, Vec};

use crate::config::MAX_PASSWORD_LEN;
use crate::password::Password;
use crate::traits::StatusDisplay;

use super::events::{Command, LockEvent};
use super::status::{LockState, LockStatus};

/// Masked entry line: one `*` per entered byte, `-` for each free slot
pub fn shadow(entered: usize) -> String<MAX_PASSWORD_LEN> {
    let mut line = String::new();
    for slot in 0..MAX_PASSWORD_LEN {
        let c = if slot < entered { '*' } else { '-' };
        // Never more than MAX_PASSWORD_LEN chars
        let _ = line.push(c);
    }
    line
}

/// Keypad lock
#[derive(Debug, Clone)]
pub struct LockController {
    state: LockState,
    password: Password,
    /// Bytes typed since the last command key
    entry: Vec<u8, MAX_PASSWORD_LEN>,
    alarm_enabled: bool,
    failed_attempts: u8,
}

impl LockController {
    pub fn new(password: Password) -> Self {
        Self {
            state: LockState::Locked,
            password,
            entry: Vec::new(),
            alarm_enabled: false,
            failed_attempts: 0,
        }
    }

    /// Show the greeting screen
    pub fn boot<D>(&mut self, display: &mut D)
    where
        D: StatusDisplay + ?Sized,
    {
        display.show(LockStatus::Welcome);
    }

    /// Process one raw key
    pub fn handle_key<D>(&mut self, key: u8, display: &mut D) -> Option<LockEvent>
    where
        D: StatusDisplay + ?Sized,
    {
        if self.state == LockState::Enrolling {
            return self.enroll_key(key, display);
        }

        match Command::from_key(key) {
            Command::Enter => Some(self.open(display)),
            Command::Update => Some(self.begin_update(display)),
            Command::StopSignal => Some(LockEvent::SignalStopped),
            Command::AlarmOn => {
                self.alarm_enabled = true;
                display.show(LockStatus::AlarmArmed);
                Some(LockEvent::AlarmArmed)
            }
            Command::AlarmOff => {
                self.alarm_enabled = false;
                Some(LockEvent::AlarmDisarmed)
            }
            Command::Entry(byte) => {
                self.append(byte, display);
                None
            }
        }
    }

    /// Proximity sensor tripped
    ///
    /// Raises [`LockEvent::Alarm`] only when armed and not unlocked.
    pub fn proximity_alert(&self) -> Option<LockEvent> {
        if self.alarm_enabled && self.state.alarm_allowed() {
            Some(LockEvent::Alarm)
        } else {
            None
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn entry_len(&self) -> usize {
        self.entry.len()
    }

    pub fn alarm_enabled(&self) -> bool {
        self.alarm_enabled
    }

    /// Wrong entries since the last correct one
    pub fn failed_attempts(&self) -> u8 {
        self.failed_attempts
    }

    fn open<D>(&mut self, display: &mut D) -> LockEvent
    where
        D: StatusDisplay + ?Sized,
    {
        if self.check_entry() {
            self.state = LockState::Unlocked;
            display.show(LockStatus::Unlocked);
            LockEvent::Unlocked
        } else {
            self.reject(display)
        }
    }

    fn begin_update<D>(&mut self, display: &mut D) -> LockEvent
    where
        D: StatusDisplay + ?Sized,
    {
        if self.check_entry() {
            self.state = LockState::Enrolling;
            display.show(LockStatus::NewPassword);
            display.show_entry(&shadow(0));
            LockEvent::EnrollmentStarted
        } else {
            self.reject(display)
        }
    }

    fn enroll_key<D>(&mut self, key: u8, display: &mut D) -> Option<LockEvent>
    where
        D: StatusDisplay + ?Sized,
    {
        match Command::from_key(key) {
            Command::Enter | Command::Update => {}
            Command::Entry(byte) => {
                self.append(byte, display);
                return None;
            }
            // Command letters can't be typed at the lock prompt, keep them out
            Command::StopSignal | Command::AlarmOn | Command::AlarmOff => return None,
        }

        let new_password = Password::new(&self.entry);
        self.entry.clear();

        match new_password {
            Ok(password) => {
                self.password = password;
                self.state = LockState::Unlocked;
                display.show(LockStatus::PasswordUpdated);
                Some(LockEvent::PasswordChanged)
            }
            // Nothing entered: keep the old password
            Err(_) => Some(self.reject(display)),
        }
    }

    fn append<D>(&mut self, byte: u8, display: &mut D)
    where
        D: StatusDisplay + ?Sized,
    {
        // Overflow bytes are dropped
        if self.entry.push(byte).is_ok() {
            display.show_entry(&shadow(self.entry.len()));
        }
    }

    /// Compare and clear the entry, tracking failures
    fn check_entry(&mut self) -> bool {
        let ok = self.password.matches(&self.entry);
        self.entry.clear();
        if ok {
            self.failed_attempts = 0;
        } else {
            self.failed_attempts = self.failed_attempts.saturating_add(1);
        }
        ok
    }

    fn reject<D>(&mut self, display: &mut D) -> LockEvent
    where
        D: StatusDisplay + ?Sized,
    {
        self.state = LockState::Locked;
        display.show(LockStatus::Locked);
        LockEvent::Rejected
    }
}

impl Default for LockController {
    fn default() -> Self {
        Self::new(Password::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::END_OF_INPUT;

    /// Display that remembers the last status and entry line
    #[derive(Default)]
    struct MockDisplay {
        status: Option<LockStatus>,
        entry: String<MAX_PASSWORD_LEN>,
        shows: usize,
    }

    impl StatusDisplay for MockDisplay {
        fn show(&mut self, status: LockStatus) {
            self.status = Some(status);
            self.shows += 1;
        }

        fn show_entry(&mut self, shadow: &str) {
            self.entry.clear();
            self.entry.push_str(shadow).unwrap();
        }
    }

    fn type_keys(
        lock: &mut LockController,
        keys: &[u8],
        display: &mut MockDisplay,
    ) -> Option<LockEvent> {
        let mut last = None;
        for &key in keys {
            last = lock.handle_key(key, display);
        }
        last
    }

    #[test]
    fn test_shadow() {
        assert_eq!(shadow(0).as_str(), "------------");
        assert_eq!(shadow(3).as_str(), "***---------");
        assert_eq!(shadow(12).as_str(), "************");
        assert_eq!(shadow(20).as_str(), "************");
    }

    #[test]
    fn test_boot_shows_welcome() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();
        lock.boot(&mut display);
        assert_eq!(display.status, Some(LockStatus::Welcome));
        assert_eq!(lock.state(), LockState::Locked);
    }

    #[test]
    fn test_correct_password_unlocks() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        let event = type_keys(&mut lock, b"2000#", &mut display);
        assert_eq!(event, Some(LockEvent::Unlocked));
        assert_eq!(lock.state(), LockState::Unlocked);
        assert_eq!(display.status, Some(LockStatus::Unlocked));
        assert_eq!(lock.entry_len(), 0);
    }

    #[test]
    fn test_sentinel_enters() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        type_keys(&mut lock, b"2000", &mut display);
        let event = lock.handle_key(END_OF_INPUT, &mut display);
        assert_eq!(event, Some(LockEvent::Unlocked));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        let event = type_keys(&mut lock, b"1234#", &mut display);
        assert_eq!(event, Some(LockEvent::Rejected));
        assert_eq!(lock.state(), LockState::Locked);
        assert_eq!(display.status, Some(LockStatus::Locked));
        assert_eq!(lock.failed_attempts(), 1);
    }

    #[test]
    fn test_longer_entry_rejected() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        let event = type_keys(&mut lock, b"20001#", &mut display);
        assert_eq!(event, Some(LockEvent::Rejected));
    }

    #[test]
    fn test_failures_reset_on_success() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        type_keys(&mut lock, b"1#", &mut display);
        type_keys(&mut lock, b"2#", &mut display);
        assert_eq!(lock.failed_attempts(), 2);

        type_keys(&mut lock, b"2000#", &mut display);
        assert_eq!(lock.failed_attempts(), 0);
    }

    #[test]
    fn test_entry_shadow_and_overflow() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        type_keys(&mut lock, b"12", &mut display);
        assert_eq!(display.entry.as_str(), "**----------");

        type_keys(&mut lock, b"34567890123456", &mut display);
        assert_eq!(lock.entry_len(), MAX_PASSWORD_LEN);
        assert_eq!(display.entry.as_str(), "************");
    }

    #[test]
    fn test_password_update() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        let event = type_keys(&mut lock, b"2000*", &mut display);
        assert_eq!(event, Some(LockEvent::EnrollmentStarted));
        assert_eq!(lock.state(), LockState::Enrolling);
        assert_eq!(display.status, Some(LockStatus::NewPassword));
        assert_eq!(display.entry.as_str(), "------------");

        let event = type_keys(&mut lock, b"91", &mut display);
        assert_eq!(event, None);
        assert_eq!(display.entry.as_str(), "**----------");

        let event = lock.handle_key(b'#', &mut display);
        assert_eq!(event, Some(LockEvent::PasswordChanged));
        assert_eq!(lock.state(), LockState::Unlocked);
        assert_eq!(display.status, Some(LockStatus::PasswordUpdated));
        assert_eq!(lock.password().as_bytes(), b"91");

        // Old password no longer opens, the new one does
        assert_eq!(type_keys(&mut lock, b"2000#", &mut display), Some(LockEvent::Rejected));
        assert_eq!(type_keys(&mut lock, b"91#", &mut display), Some(LockEvent::Unlocked));
    }

    #[test]
    fn test_enrolled_password_with_command_letters_opens() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        type_keys(&mut lock, b"2000*", &mut display);

        // Command letters are ignored while enrolling
        let event = type_keys(&mut lock, b"9D1BC", &mut display);
        assert_eq!(event, None);
        assert_eq!(display.entry.as_str(), "**----------");
        assert_eq!(lock.state(), LockState::Enrolling);

        let event = lock.handle_key(b'#', &mut display);
        assert_eq!(event, Some(LockEvent::PasswordChanged));
        assert_eq!(lock.password().as_bytes(), b"91");
        assert!(!lock.alarm_enabled());

        // Lock again, then open with what was typed
        assert_eq!(lock.handle_key(b'#', &mut display), Some(LockEvent::Rejected));
        assert_eq!(type_keys(&mut lock, b"9D1#", &mut display), Some(LockEvent::Unlocked));
    }

    #[test]
    fn test_update_ends_with_star() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        type_keys(&mut lock, b"2000*", &mut display);
        let event = type_keys(&mut lock, b"42*", &mut display);
        assert_eq!(event, Some(LockEvent::PasswordChanged));
        assert_eq!(lock.password().as_bytes(), b"42");

        assert_eq!(type_keys(&mut lock, b"42#", &mut display), Some(LockEvent::Unlocked));
    }

    #[test]
    fn test_empty_update_keeps_password() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        type_keys(&mut lock, b"2000*", &mut display);
        let event = lock.handle_key(b'#', &mut display);
        assert_eq!(event, Some(LockEvent::Rejected));
        assert_eq!(lock.state(), LockState::Locked);
        assert_eq!(display.status, Some(LockStatus::Locked));
        assert_eq!(lock.password().as_bytes(), b"2000");
    }

    #[test]
    fn test_update_needs_password() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        let event = type_keys(&mut lock, b"1111*", &mut display);
        assert_eq!(event, Some(LockEvent::Rejected));
        assert_eq!(lock.state(), LockState::Locked);
    }

    #[test]
    fn test_stop_key() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        assert_eq!(lock.handle_key(b'D', &mut display), Some(LockEvent::SignalStopped));
        assert_eq!(display.shows, 0);
    }

    #[test]
    fn test_alarm_flag() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        assert_eq!(lock.proximity_alert(), None);

        assert_eq!(lock.handle_key(b'B', &mut display), Some(LockEvent::AlarmArmed));
        assert!(lock.alarm_enabled());
        assert_eq!(display.status, Some(LockStatus::AlarmArmed));
        assert_eq!(lock.proximity_alert(), Some(LockEvent::Alarm));

        // No alarm while open
        type_keys(&mut lock, b"2000#", &mut display);
        assert_eq!(lock.proximity_alert(), None);

        type_keys(&mut lock, b"0#", &mut display);
        assert_eq!(lock.proximity_alert(), Some(LockEvent::Alarm));

        assert_eq!(lock.handle_key(b'C', &mut display), Some(LockEvent::AlarmDisarmed));
        assert!(!lock.alarm_enabled());
        assert_eq!(lock.proximity_alert(), None);
    }

    #[test]
    fn test_command_keys_do_not_enter() {
        let mut lock = LockController::default();
        let mut display = MockDisplay::default();

        type_keys(&mut lock, b"20B00#", &mut display);
        assert_eq!(lock.state(), LockState::Unlocked);
    }
}
