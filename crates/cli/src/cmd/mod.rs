mod build;
mod resolve;
mod revision;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use extbuild_lib::config::{BuildConfig, load_config};
use extbuild_lib::consts::DEFAULT_MANIFEST;
use extbuild_lib::manifest::{BlankLines, Duplicates, ModuleSpec, ResolveOptions, resolve_file};

pub use build::{BuildArgs, cmd_build};
pub use resolve::cmd_resolve;
pub use revision::{RevisionArgs, cmd_revision};

/// Arguments shared by every command that reads a manifest.
#[derive(Debug, Args)]
pub struct ManifestArgs {
  /// Manifest listing one dotted module name per line
  #[arg(default_value = DEFAULT_MANIFEST)]
  pub manifest: PathBuf,

  /// Build config file (default: $EXTBUILD_CONFIG or extbuild.json next to the manifest)
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Extra include directory, appended after the configured ones.
  /// Relative paths are taken from the current directory; config file
  /// entries stay relative to the manifest directory
  #[arg(short = 'I', long = "include", value_name = "DIR")]
  pub include_dirs: Vec<PathBuf>,

  /// Treat blank lines as module names instead of skipping them
  #[arg(long)]
  pub keep_blank: bool,

  /// Fail when a module name appears more than once
  #[arg(long)]
  pub strict: bool,
}

/// A manifest resolved against its config.
pub struct Resolved {
  /// Directory holding the manifest; derived paths are relative to it.
  pub base_dir: PathBuf,
  pub config: BuildConfig,
  pub modules: Vec<ModuleSpec>,
}

impl ManifestArgs {
  pub fn options(&self) -> ResolveOptions {
    ResolveOptions {
      blank_lines: if self.keep_blank { BlankLines::Keep } else { BlankLines::Skip },
      duplicates: if self.strict { Duplicates::Reject } else { Duplicates::Allow },
    }
  }

  /// Load the config and resolve the manifest. `profile` switches on the
  /// profiling directive for this run; without it the config decides.
  pub fn resolve(&self, profile: bool) -> Result<Resolved> {
    let base_dir = manifest_dir(&self.manifest)?;

    let mut config = load_config(self.config.as_deref(), &base_dir)
      .context("Failed to load build config")?
      .with_include_dirs(self.cli_include_dirs()?);
    if profile {
      config = config.with_profile(true);
    }

    let modules = resolve_file(&self.manifest, &config, &self.options())
      .with_context(|| format!("Failed to resolve manifest: {}", self.manifest.display()))?;

    Ok(Resolved {
      base_dir,
      config,
      modules,
    })
  }

  /// `-I` directories anchored at the current directory, since the compiler
  /// runs from the manifest directory.
  fn cli_include_dirs(&self) -> Result<Vec<PathBuf>> {
    if self.include_dirs.is_empty() {
      return Ok(Vec::new());
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(self.include_dirs.iter().map(|dir| cwd.join(dir)).collect())
  }
}

fn manifest_dir(manifest: &Path) -> Result<PathBuf> {
  let parent = match manifest.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };
  dunce::canonicalize(parent).with_context(|| format!("Failed to resolve manifest directory: {}", parent.display()))
}
