//! Utility functions.

pub mod env;
pub mod format;

pub use format::mask_token;
