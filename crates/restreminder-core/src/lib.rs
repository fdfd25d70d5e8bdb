//! # Restreminder Core Library
//!
//! This library provides the core logic for restreminder, a work/rest
//! interval timer that nags the user to take breaks. It implements a
//! CLI-first philosophy: all behavior lives here, and the `restreminder`
//! binary is a thin host layer that drives the engine and delivers its
//! effects to the desktop.
//!
//! ## Architecture
//!
//! - **Interval Engine**: A second-granular state machine that requires
//!   the caller to invoke `tick()` once per second. The engine never
//!   blocks, never fails, and never performs I/O -- it only returns
//!   [`Effect`] values the host must act on.
//! - **Storage**: TOML-based configuration under `~/.config/restreminder/`.
//!   The engine re-reads durations on every tick, so settings edits apply
//!   without a restart.
//!
//! ## Key Components
//!
//! - [`IntervalEngine`]: Core work/rest state machine
//! - [`Effect`]: Side-effecting instructions emitted by the engine
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, Result};
pub use events::{Effect, Snapshot};
pub use storage::Config;
pub use timer::{IntervalConfig, IntervalEngine, Phase};
