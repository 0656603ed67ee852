//! Core library for the `smash` CLI.
//!
//! Holds the building blocks used by the binary: CLI argument types,
//! instruction files and curl translation, the pooled HTTP transport, the
//! parallel executor, and cron scheduling. The `smash` command-line
//! application is the primary interface; library APIs may change with it.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod instruction;
pub mod schedule;
pub mod shutdown;
pub mod smash;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
