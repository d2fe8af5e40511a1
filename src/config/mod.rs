//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file
//!     → loader.rs (read & deserialize FileConfig)
//! environment + flags
//!     → cli.rs (clap, Go-style single-dash flags accepted)
//!     → schema.rs Settings (defaults ← file ← flags)
//!     → validation.rs (semantic checks, all errors reported)
//!     → ProbeConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never reloaded
//! - Every setting has a default except the connection URI
//! - Any configuration error is fatal

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::ConfigError;
pub use schema::{FileConfig, ProbeConfig, Settings};
pub use validation::ValidationError;
