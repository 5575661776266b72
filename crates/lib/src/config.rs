//! Immutable build configuration.
//!
//! A [`BuildConfig`] is created once per run and only ever borrowed after
//! that. Compiler directives live here instead of in process-wide state, so
//! two builds with different settings can coexist in the same process.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{CONFIG_ENV_VAR, CONFIG_FILENAME};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read config {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse config {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },
}

/// Target language handed to the compiler collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
  #[default]
  #[serde(rename = "c++")]
  Cpp,
  #[serde(rename = "c")]
  C,
}

impl Language {
  pub fn as_str(self) -> &'static str {
    match self {
      Language::Cpp => "c++",
      Language::C => "c",
    }
  }

  /// Extension of the generated source file.
  pub fn output_extension(self) -> &'static str {
    match self {
      Language::Cpp => "cpp",
      Language::C => "c",
    }
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Compiler directives applied to every module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Directives {
  pub cdivision: bool,
  pub infer_types: bool,
  pub auto_cpdef: bool,
  pub wraparound: bool,
  pub profile: bool,
}

impl Default for Directives {
  fn default() -> Self {
    Self {
      cdivision: true,
      infer_types: true,
      auto_cpdef: true,
      wraparound: false,
      profile: false,
    }
  }
}

impl Directives {
  /// Directive assignments in a stable order, e.g. `cdivision=True`.
  pub fn assignments(&self) -> Vec<String> {
    [
      ("cdivision", self.cdivision),
      ("infer_types", self.infer_types),
      ("auto_cpdef", self.auto_cpdef),
      ("wraparound", self.wraparound),
      ("profile", self.profile),
    ]
    .iter()
    .map(|(name, value)| format!("{}={}", name, if *value { "True" } else { "False" }))
    .collect()
  }
}

/// Configuration shared by every module of one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
  /// Include directories, in search order.
  pub include_dirs: Vec<PathBuf>,
  /// Extension of module source files, without the dot.
  pub source_extension: String,
  /// Prefix of every derived source path.
  pub root_marker: String,
  pub language: Language,
  pub directives: Directives,
  /// Whether docstrings are kept in generated code.
  pub docstrings: bool,
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      include_dirs: Vec::new(),
      source_extension: "pyx".to_string(),
      root_marker: "./".to_string(),
      language: Language::default(),
      directives: Directives::default(),
      docstrings: false,
    }
  }
}

impl BuildConfig {
  /// Load a config from a JSON file. Missing fields take their defaults.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), "loaded build config");
    Ok(config)
  }

  /// Returns a copy with the given include directories appended.
  pub fn with_include_dirs<I>(mut self, dirs: I) -> Self
  where
    I: IntoIterator<Item = PathBuf>,
  {
    self.include_dirs.extend(dirs);
    self
  }

  /// Returns a copy with profiling switched on or off.
  pub fn with_profile(mut self, profile: bool) -> Self {
    self.directives.profile = profile;
    self
  }
}

/// Locate the config file for a run.
///
/// Search order:
/// 1. `explicit`, which must exist
/// 2. the file named by `EXTBUILD_CONFIG`, which must exist
/// 3. `extbuild.json` in `base_dir`
///
/// Returns `Ok(None)` when nothing is found; the defaults apply then.
pub fn find_config_path(explicit: Option<&Path>, base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
  if let Some(path) = explicit {
    if path.exists() {
      return Ok(Some(path.to_path_buf()));
    }
    return Err(ConfigError::NotFound {
      path: path.to_path_buf(),
    });
  }

  if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()).map(PathBuf::from) {
    if path.exists() {
      return Ok(Some(path));
    }
    return Err(ConfigError::NotFound { path });
  }

  let local = base_dir.join(CONFIG_FILENAME);
  if local.exists() {
    return Ok(Some(local));
  }

  Ok(None)
}

/// Resolve and load the config for a run, falling back to defaults.
pub fn load_config(explicit: Option<&Path>, base_dir: &Path) -> Result<BuildConfig, ConfigError> {
  match find_config_path(explicit, base_dir)? {
    Some(path) => BuildConfig::load(&path),
    None => Ok(BuildConfig::default()),
  }
}
