//! Utilities shared by the Broadside binaries: logging setup and clocks.

pub mod logger;
pub mod time;
