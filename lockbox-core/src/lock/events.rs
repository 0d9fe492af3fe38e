//! Key commands and lock events

use crate::input::END_OF_INPUT;
use crate::morse::{Message, MorseCommand};

/// Meaning of a raw key outside an update session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `#`: check the entry and open
    Enter,
    /// `*`: check the entry and start a password update
    Update,
    /// `D`: silence the signal
    StopSignal,
    /// `B`: arm the proximity alarm
    AlarmOn,
    /// `C`: disarm the proximity alarm
    AlarmOff,
    /// Anything else is part of an entry
    Entry(u8),
}

impl Command {
    /// Classify a raw key
    ///
    /// [`END_OF_INPUT`] is read as `Enter`, so sentinel-mapped streams work
    /// too.
    pub fn from_key(key: u8) -> Self {
        match key {
            b'#' | END_OF_INPUT => Command::Enter,
            b'*' => Command::Update,
            b'D' => Command::StopSignal,
            b'B' => Command::AlarmOn,
            b'C' => Command::AlarmOff,
            other => Command::Entry(other),
        }
    }
}

/// Outcome of a key or alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockEvent {
    /// Correct password, lock open
    Unlocked,
    /// Wrong password or aborted update
    Rejected,
    /// Correct password, now collecting a new one
    EnrollmentStarted,
    /// New password stored
    PasswordChanged,
    SignalStopped,
    AlarmArmed,
    AlarmDisarmed,
    /// Proximity alert while armed
    Alarm,
}

impl LockEvent {
    /// Signal request that goes with this event, if any
    pub fn morse_command(&self) -> Option<MorseCommand> {
        match self {
            LockEvent::Unlocked | LockEvent::PasswordChanged => {
                Some(MorseCommand::Send(Message::Open))
            }
            LockEvent::Rejected => Some(MorseCommand::Send(Message::Close)),
            LockEvent::Alarm => Some(MorseCommand::Send(Message::Sos)),
            LockEvent::SignalStopped | LockEvent::AlarmDisarmed => Some(MorseCommand::Stop),
            LockEvent::EnrollmentStarted | LockEvent::AlarmArmed => None,
        }
    }
}
