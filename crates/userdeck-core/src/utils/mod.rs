//! Utility functions for string formatting.

pub mod format;

pub use format::{fit_column, truncate_string};
