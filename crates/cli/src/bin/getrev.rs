//! Print the first 12 characters of the current mercurial revision.
//!
//! On failure prints `unknown` to stdout, the reason to stderr, and exits 1.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use extbuild_lib::revision::{Revision, get_revision};

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match get_revision() {
    Ok(rev) => {
      println!("{}", rev);
      ExitCode::SUCCESS
    }
    Err(e) => {
      println!("{}", Revision::Unknown);
      eprintln!("getrev: {}", e);
      ExitCode::FAILURE
    }
  }
}
