//! CLI command implementations.

pub mod common;
pub mod devices;
pub mod info;
pub mod modes;
pub mod presets;
pub mod process;
pub mod realtime;
