//! Revision lookup.
//!
//! Asks the version-control tool for the hash of the latest commit and keeps
//! the first [`REVISION_LEN`] characters. The tool is spawned directly with
//! an argument list; no shell is involved.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::REVISION_LEN;

/// Errors that can occur while looking up a revision.
#[derive(Debug, Error)]
pub enum RevisionError {
  /// The tool could not be started, usually because it is not installed.
  #[error("failed to run '{program}': {source}")]
  Spawn { program: String, source: std::io::Error },

  #[error("'{program}' exited with code {code:?}: {stderr}")]
  CommandFailed {
    program: String,
    code: Option<i32>,
    stderr: String,
  },

  #[error("'{program}' printed no revision")]
  EmptyOutput { program: String },

  #[error("'{program}' printed a revision that is not valid UTF-8")]
  NotUtf8 { program: String },
}

/// Best-effort revision of a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
  Known(String),
  Unknown,
}

impl Revision {
  pub fn as_known(&self) -> Option<&str> {
    match self {
      Revision::Known(rev) => Some(rev),
      Revision::Unknown => None,
    }
  }
}

impl fmt::Display for Revision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Revision::Known(rev) => f.write_str(rev),
      Revision::Unknown => f.write_str("unknown"),
    }
  }
}

/// A configured revision query.
#[derive(Debug, Clone)]
pub struct RevisionLookup {
  program: String,
  args: Vec<String>,
  cwd: Option<PathBuf>,
  length: usize,
}

impl RevisionLookup {
  /// Custom query; `program` must print the full hash on stdout.
  pub fn new<I, S>(program: &str, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      program: program.to_string(),
      args: args.into_iter().map(Into::into).collect(),
      cwd: None,
      length: REVISION_LEN,
    }
  }

  /// `hg log -l 1 --template {node}`
  pub fn mercurial() -> Self {
    Self::new("hg", ["log", "-l", "1", "--template", "{node}"])
  }

  /// `git log -1 --format=%H`
  pub fn git() -> Self {
    Self::new("git", ["log", "-1", "--format=%H"])
  }

  /// Run the query inside `dir` instead of the current directory.
  pub fn in_dir(mut self, dir: &Path) -> Self {
    self.cwd = Some(dir.to_path_buf());
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  /// Run the query and return the truncated hash.
  pub fn lookup(&self) -> Result<String, RevisionError> {
    info!(program = %self.program, args = ?self.args, "looking up revision");

    let mut command = Command::new(&self.program);
    command.args(&self.args);
    if let Some(cwd) = &self.cwd {
      command.current_dir(cwd);
    }

    let output = command.output().map_err(|source| RevisionError::Spawn {
      program: self.program.clone(),
      source,
    })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
      return Err(RevisionError::CommandFailed {
        program: self.program.clone(),
        code: output.status.code(),
        stderr,
      });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| RevisionError::NotUtf8 {
      program: self.program.clone(),
    })?;
    let full = stdout.trim();
    if full.is_empty() {
      return Err(RevisionError::EmptyOutput {
        program: self.program.clone(),
      });
    }

    let rev: String = full.chars().take(self.length).collect();
    debug!(rev = %rev, "resolved revision");
    Ok(rev)
  }

  /// Like [`lookup`](Self::lookup), but any failure becomes [`Revision::Unknown`].
  pub fn revision(&self) -> Revision {
    match self.lookup() {
      Ok(rev) => Revision::Known(rev),
      Err(e) => {
        warn!(error = %e, "revision unavailable");
        Revision::Unknown
      }
    }
  }
}

impl Default for RevisionLookup {
  fn default() -> Self {
    Self::mercurial()
  }
}

/// Mercurial revision of the current directory.
pub fn get_revision() -> Result<String, RevisionError> {
  RevisionLookup::mercurial().lookup()
}
