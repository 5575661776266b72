use std::path::{MAIN_SEPARATOR_STR, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BuildConfig;

/// Errors that can occur while resolving a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", path.display())]
  Unreadable { path: PathBuf, source: std::io::Error },

  #[error("manifest {} is not valid UTF-8", path.display())]
  NotUtf8 { path: PathBuf },

  #[error("duplicate module '{name}' on line {line} (first declared on line {first_line})")]
  DuplicateName { name: String, first_line: usize, line: usize },
}

/// One compilable unit resolved from a manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
  /// Dotted module name, exactly as written in the manifest.
  pub name: String,
  pub source_path: PathBuf,
  /// Include directories shared by every module of the run.
  pub include_dirs: Vec<PathBuf>,
}

impl ModuleSpec {
  pub fn new(name: &str, config: &BuildConfig) -> Self {
    Self {
      name: name.to_string(),
      source_path: source_path_for(name, config),
      include_dirs: config.include_dirs.clone(),
    }
  }

  /// Path of the file the compiler generates for this module.
  ///
  /// Derived from the name like the source path, so multi-part source
  /// extensions such as `pyx.in` are replaced whole.
  pub fn output_path(&self, config: &BuildConfig) -> PathBuf {
    module_path(&self.name, &config.root_marker, config.language.output_extension())
  }
}

/// Derive the source path of a dotted module name.
///
/// `a.b.c` becomes `./a/b/c.pyx` with the default config, using the
/// platform path separator between components.
pub fn source_path_for(name: &str, config: &BuildConfig) -> PathBuf {
  module_path(name, &config.root_marker, &config.source_extension)
}

fn module_path(name: &str, root_marker: &str, extension: &str) -> PathBuf {
  let mut path = format!("{}{}", root_marker, name.replace('.', MAIN_SEPARATOR_STR));
  if !extension.is_empty() {
    path.push('.');
    path.push_str(extension);
  }
  PathBuf::from(path)
}

/// What to do with lines that are empty or whitespace only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlankLines {
  /// Skip them, like comments.
  #[default]
  Skip,
  /// Treat them as module names, producing a degenerate module.
  Keep,
}

/// What to do when the same name appears more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Duplicates {
  #[default]
  Allow,
  Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
  pub blank_lines: BlankLines,
  pub duplicates: Duplicates,
}

impl ResolveOptions {
  /// Options reproducing the historical behavior: every non-comment line is
  /// a module and duplicates pass through.
  pub fn legacy() -> Self {
    Self {
      blank_lines: BlankLines::Keep,
      duplicates: Duplicates::Allow,
    }
  }

  pub fn strict() -> Self {
    Self {
      blank_lines: BlankLines::Skip,
      duplicates: Duplicates::Reject,
    }
  }
}

/// Returns true if the manifest line is a comment.
pub fn is_comment(line: &str) -> bool {
  line.starts_with(crate::consts::COMMENT_MARKER)
}
