//! Command Line Interface (CLI) layer for SIZECOMPARE.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for a single two-image comparison.
//! It wires user-provided options to the library functionality exposed via
//! `sizecompare::api`.
//!
//! If you are embedding SIZECOMPARE into another application, prefer using
//! the high-level `sizecompare::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
