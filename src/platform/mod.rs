//! Platform abstraction layer
//!
//! Device events are captured by the host; this layer only decides which
//! command, if any, an event means in the current run state.

pub mod input;

pub use input::{command_for_key, command_for_pointer};
