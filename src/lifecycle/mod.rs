//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Init logging → Connect sink → Build prober
//!
//! Scheduling (scheduler.rs):
//!     Single-shot: one cycle → exit code
//!     Repeating:   ticker → one cycle per tick → until signal
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → end the repeating loop → close sink → exit 0
//! ```

pub mod scheduler;
pub mod signals;
pub mod startup;

pub use scheduler::ScheduleMode;
