//! Shared utilities for the invite-rs CLI

pub mod io;
pub mod progress;

pub use io::*;
pub use progress::*;
