//! Utility modules and helper functions
//!
//! This module contains shared utilities used across the application.

pub mod logging;
pub mod sanitize;

// Re-export commonly used utilities
pub use logging::*;
pub use sanitize::*;
