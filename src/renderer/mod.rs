//! Presentation boundary
//!
//! The simulation never draws. Each frame the presentation layer captures a
//! `FrameSnapshot` and renders it however it likes.

pub mod instance;
pub mod snapshot;

pub use instance::{ObjectInstance, rgb_to_rgba};
pub use snapshot::{FrameSnapshot, HudSnapshot};
