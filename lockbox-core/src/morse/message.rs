//! Canned messages and signal commands

/// Distress pattern sent on a proximity alarm
pub const SOS_PATTERN: &str = "...---...";
/// "OPEN", sent when the lock opens
pub const OPEN_PATTERN: &str = "--- .--. . -.";
/// "CLOSE", sent when an entry is rejected
pub const CLOSE_PATTERN: &str = "-.-. .-.. --- ... .";

/// Message the signal can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    Sos,
    Open,
    Close,
    /// Any pattern string, e.g. built with [`encode_text`](super::encode_text)
    Custom(&'static str),
}

impl Message {
    /// Pattern string for this message
    pub fn pattern(&self) -> &'static str {
        match self {
            Message::Sos => SOS_PATTERN,
            Message::Open => OPEN_PATTERN,
            Message::Close => CLOSE_PATTERN,
            Message::Custom(pattern) => pattern,
        }
    }
}

/// Request to the signal owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MorseCommand {
    /// Start playing a message, replacing whatever is playing
    Send(Message),
    /// Silence the output immediately
    Stop,
}
