//! Data Models
//!
//! Settings, run results and command reports used throughout the application.

pub mod outcome;
pub mod response;
pub mod settings;

pub use outcome::*;
pub use response::*;
pub use settings::*;
