//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use lockbox_core::MorseCommand;

/// Channel capacity for signal commands
const MORSE_CHANNEL_SIZE: usize = 4;

/// Start/stop requests for the signal task (lock task is the only sender)
pub static MORSE_CMD: Channel<CriticalSectionRawMutex, MorseCommand, MORSE_CHANNEL_SIZE> =
    Channel::new();

/// Proximity sensor tripped
pub static PROXIMITY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
