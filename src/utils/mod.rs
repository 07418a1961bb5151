//! Miscellaneous helpers

pub mod path;
