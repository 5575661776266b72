use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{BuildConfig, Directives, Language};
use crate::manifest::ModuleSpec;

/// Errors that can occur while compiling a module.
#[derive(Debug, Error)]
pub enum CompileError {
  /// The compiler could not be started.
  #[error("failed to run compiler '{program}': {source}")]
  Spawn { program: String, source: std::io::Error },

  /// The compiler ran and reported failure.
  #[error("compiling '{module}' failed with exit code {code:?}")]
  Failed {
    module: String,
    code: Option<i32>,
    stderr: String,
  },
}

/// Everything the compiler collaborator receives for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
  pub language: Language,
  pub directives: Directives,
  pub docstrings: bool,
  pub include_dirs: Vec<PathBuf>,
  pub modules: Vec<ModuleSpec>,
}

impl BuildPlan {
  pub fn new(modules: Vec<ModuleSpec>, config: &BuildConfig) -> Self {
    Self {
      language: config.language,
      directives: config.directives.clone(),
      docstrings: config.docstrings,
      include_dirs: config.include_dirs.clone(),
      modules,
    }
  }
}

/// Result of compiling a single module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOutput {
  pub name: String,
  /// Generated file, relative to the compiler's working directory.
  pub output_path: PathBuf,
}

/// Result of a whole build.
#[derive(Debug, Clone)]
pub struct BuildReport {
  /// One entry per module, in manifest order.
  pub outputs: Vec<CompileOutput>,
  pub duration: Duration,
}
