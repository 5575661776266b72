//! extbuild-lib: manifest resolution and build driving for native extensions
//!
//! This crate provides:
//! - `ModuleSpec`: one compilable unit resolved from a manifest line
//! - `BuildConfig`: the immutable compiler configuration of a run
//! - `Compiler`: the seam to the external transpiler, with a command-based
//!   implementation
//! - `RevisionLookup`: best-effort current revision from the VCS tool

pub mod compile;
pub mod config;
pub mod consts;
pub mod manifest;
pub mod revision;
pub mod util;
