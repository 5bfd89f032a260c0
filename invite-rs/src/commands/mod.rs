//! Command implementations

pub mod calendar;
pub mod fx;
pub mod send;
