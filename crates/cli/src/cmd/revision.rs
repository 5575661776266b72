//! Implementation of the `extbuild revision` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use extbuild_lib::revision::RevisionLookup;

use crate::output::{OutputFormat, print_json};

#[derive(Debug, Args)]
pub struct RevisionArgs {
  /// Query git instead of mercurial
  #[arg(long)]
  pub git: bool,

  /// Working copy to query (default: current directory)
  #[arg(long, value_name = "DIR")]
  pub dir: Option<PathBuf>,
}

pub fn cmd_revision(args: &RevisionArgs, format: OutputFormat) -> Result<()> {
  let mut lookup = if args.git {
    RevisionLookup::git()
  } else {
    RevisionLookup::mercurial()
  };
  if let Some(dir) = &args.dir {
    lookup = lookup.in_dir(dir);
  }

  let rev = lookup.lookup().context("Failed to look up revision")?;

  if format.is_json() {
    print_json(&serde_json::json!({ "revision": rev, "vcs": lookup.program() }))
  } else {
    println!("{}", rev);
    Ok(())
  }
}
