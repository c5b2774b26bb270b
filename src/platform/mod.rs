//! Platform abstraction layer
//!
//! Handles the parts of the loop that touch the host:
//! - Wall-clock timestamps for objects and records
//! - Measured frame delta and frame pacing

pub mod clock;

pub use clock::{Clock, FramePacer, ManualClock, SystemClock};
