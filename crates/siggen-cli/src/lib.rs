//! SigGen CLI library
//!
//! Command implementations and config loading shared by the `siggen` binary
//! and its tests.

pub mod commands;
pub mod input;
