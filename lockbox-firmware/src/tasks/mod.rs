//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod lock;
pub mod proximity;
pub mod signal;

pub use lock::{lock_task, LockDisplay, LockInput, LockKeypad};
pub use proximity::proximity_task;
pub use signal::{signal_task, SignalConfig};
