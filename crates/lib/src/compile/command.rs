//! External compiler invocation.
//!
//! Runs a Cython-compatible transpiler once per module. The program is
//! spawned directly with an argument list and never through a shell, so
//! module names cannot inject extra commands.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::{CompileError, CompileOutput, Compiler};
use crate::config::{BuildConfig, Language};
use crate::manifest::ModuleSpec;

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "cython";

/// Compiles modules by running an external program.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
  program: String,
  prefix_args: Vec<String>,
  base_dir: PathBuf,
}

impl CommandCompiler {
  /// `base_dir` is the working directory of every invocation; derived
  /// source paths are relative to it.
  pub fn new(program: &str, base_dir: &Path) -> Self {
    Self {
      program: program.to_string(),
      prefix_args: Vec::new(),
      base_dir: base_dir.to_path_buf(),
    }
  }

  /// Parse a command such as `python3 -m cython` into program and leading
  /// arguments. Splits on whitespace; no quoting is supported.
  pub fn from_command(command: &str, base_dir: &Path) -> Self {
    let mut parts = command.split_whitespace();
    let program = parts.next().unwrap_or(DEFAULT_COMPILER);
    Self::new(program, base_dir).with_prefix_args(parts)
  }

  /// Arguments placed before the generated ones.
  pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.prefix_args = args.into_iter().map(Into::into).collect();
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  /// Arguments passed for `module`, program name excluded.
  ///
  /// Order: prefix arguments, `--cplus`, `-I <dir>` per include dir, `--no-docstrings`,
  /// `-X <directives>`, `-o <output>`, then the source file.
  pub fn args(&self, module: &ModuleSpec, config: &BuildConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = self.prefix_args.iter().map(OsString::from).collect();

    if config.language == Language::Cpp {
      args.push("--cplus".into());
    }
    for dir in &module.include_dirs {
      args.push("-I".into());
      args.push(dir.into());
    }
    if !config.docstrings {
      args.push("--no-docstrings".into());
    }
    args.push("-X".into());
    args.push(config.directives.assignments().join(",").into());
    args.push("-o".into());
    args.push(module.output_path(config).into());
    args.push(module.source_path.clone().into());

    args
  }

  /// Full command line for display, e.g. in a dry run.
  pub fn command_line(&self, module: &ModuleSpec, config: &BuildConfig) -> Vec<String> {
    std::iter::once(self.program.clone())
      .chain(self.args(module, config).iter().map(|a| a.to_string_lossy().into_owned()))
      .collect()
  }
}

impl Default for CommandCompiler {
  fn default() -> Self {
    Self::new(DEFAULT_COMPILER, Path::new("."))
  }
}

impl Compiler for CommandCompiler {
  fn compile(&self, module: &ModuleSpec, config: &BuildConfig) -> Result<CompileOutput, CompileError> {
    let args = self.args(module, config);
    info!(module = %module.name, program = %self.program, "compiling module");
    debug!(args = ?args, cwd = %self.base_dir.display(), "spawning compiler");

    let output = Command::new(&self.program)
      .args(&args)
      .current_dir(&self.base_dir)
      .output()
      .map_err(|source| CompileError::Spawn {
        program: self.program.clone(),
        source,
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
      if !stderr.is_empty() {
        debug!(stderr = %stderr, "compiler stderr");
      }
      return Err(CompileError::Failed {
        module: module.name.clone(),
        code: output.status.code(),
        stderr,
      });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
      debug!(stdout = %stdout.trim(), "compiler output");
    }

    Ok(CompileOutput {
      name: module.name.clone(),
      output_path: module.output_path(config),
    })
  }
}
