//! Lock states and user-visible status screens

/// Lock state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
    #[default]
    Locked,
    Unlocked,
    /// Collecting a new password
    Enrolling,
}

impl LockState {
    /// Whether the proximity alarm may fire in this state
    pub fn alarm_allowed(&self) -> bool {
        !matches!(self, LockState::Unlocked)
    }
}

/// Screen to show on the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockStatus {
    /// Idle greeting
    Welcome,
    Locked,
    Unlocked,
    /// Prompt for a new password
    NewPassword,
    /// New password stored
    PasswordUpdated,
    /// Proximity alarm enabled
    AlarmArmed,
}

impl LockStatus {
    /// Short English caption
    pub fn caption(&self) -> &'static str {
        match self {
            LockStatus::Welcome => "Hello. :3",
            LockStatus::Locked => "Locked",
            LockStatus::Unlocked => "Unlocked",
            LockStatus::NewPassword => "New PW:",
            LockStatus::PasswordUpdated => "Success!",
            LockStatus::AlarmArmed => "Alarm on",
        }
    }
}
