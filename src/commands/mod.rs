//! CLI Commands
//!
//! Handlers behind each subcommand. They return printable text or typed
//! reports; the binary decides what goes to stdout and stderr.

pub mod generate;
pub mod health;
pub mod settings;

pub use generate::*;
pub use health::*;
pub use settings::*;
