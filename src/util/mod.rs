//! Shared helpers: path expansion and test setup

pub mod path;
pub mod testing;
