//! Configuration types
//!
//! Board-agnostic configuration. Values are fixed when the firmware is
//! built; nothing here changes at run time.

pub mod timing;
pub mod types;

pub use timing::*;
pub use types::*;
