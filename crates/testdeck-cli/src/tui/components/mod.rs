//! Reusable UI components.

pub mod input;
pub mod log;
pub mod stats;
pub mod table;
