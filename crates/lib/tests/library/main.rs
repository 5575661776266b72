//! Integration tests for extbuild-lib.

mod build_tests;
mod manifest_tests;
