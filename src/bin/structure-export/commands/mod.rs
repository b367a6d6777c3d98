//! Command implementations

pub mod completions;
pub mod dump;
pub mod paths;
