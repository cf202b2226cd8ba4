//! Title labeler CLI library exports for testing.
//!
//! This module exposes the configuration, output and command implementations used by the
//! `title-labeler` binary.

pub mod config;
pub mod errors;
pub mod outputs;
pub mod run;
