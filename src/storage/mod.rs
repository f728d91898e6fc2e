//! Storage Layer
//!
//! Reads and writes the JSON settings file.

pub mod config;

pub use config::*;
