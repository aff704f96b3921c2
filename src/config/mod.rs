//! Configuration module for Plantbook
//!
//! This module handles user preferences and session data, including
//! serialization to JSON and persistent storage in the platform-specific
//! config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
