//! invite-rs library
//!
//! Command definitions and helpers behind the `invite-rs` binary.

pub mod cli;
pub mod commands;
pub mod utils;
