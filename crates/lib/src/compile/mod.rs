//! Handing resolved modules to the compiler.
//!
//! The compiler itself is an external collaborator behind the [`Compiler`]
//! trait. [`build`] drives it over a resolved manifest, one module at a time
//! in manifest order, and stops at the first failure.

mod command;
mod types;

use std::time::Instant;

use tracing::info;

use crate::config::BuildConfig;
use crate::manifest::ModuleSpec;

pub use command::{CommandCompiler, DEFAULT_COMPILER};
pub use types::*;

/// Something that turns one module into generated source.
pub trait Compiler {
  fn compile(&self, module: &ModuleSpec, config: &BuildConfig) -> Result<CompileOutput, CompileError>;
}

/// Compile every module in order. No retries; the first error aborts the build.
pub fn build<C>(modules: &[ModuleSpec], config: &BuildConfig, compiler: &C) -> Result<BuildReport, CompileError>
where
  C: Compiler + ?Sized,
{
  let start = Instant::now();
  let total = modules.len();
  let mut outputs = Vec::with_capacity(total);

  for (index, module) in modules.iter().enumerate() {
    info!(module = %module.name, "[{}/{}] building", index + 1, total);
    outputs.push(compiler.compile(module, config)?);
  }

  let duration = start.elapsed();
  info!(modules = total, elapsed = ?duration, "build complete");

  Ok(BuildReport { outputs, duration })
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::path::PathBuf;

  use super::*;
  use crate::manifest::{ResolveOptions, resolve};

  /// Records the modules it sees and fails on a chosen name.
  #[derive(Default)]
  struct RecordingCompiler {
    seen: RefCell<Vec<String>>,
    fail_on: Option<&'static str>,
  }

  impl Compiler for RecordingCompiler {
    fn compile(&self, module: &ModuleSpec, config: &BuildConfig) -> Result<CompileOutput, CompileError> {
      self.seen.borrow_mut().push(module.name.clone());
      if self.fail_on == Some(module.name.as_str()) {
        return Err(CompileError::Failed {
          module: module.name.clone(),
          code: Some(1),
          stderr: String::new(),
        });
      }
      Ok(CompileOutput {
        name: module.name.clone(),
        output_path: module.output_path(config),
      })
    }
  }

  fn modules(text: &str, config: &BuildConfig) -> Vec<ModuleSpec> {
    resolve(text, config, &ResolveOptions::default()).unwrap()
  }

  #[test]
  fn builds_in_manifest_order() {
    let config = BuildConfig::default();
    let compiler = RecordingCompiler::default();

    let report = build(&modules("b\na\n# c\nc.d", &config), &config, &compiler).unwrap();

    assert_eq!(*compiler.seen.borrow(), vec!["b", "a", "c.d"]);
    let names: Vec<_> = report.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "c.d"]);
  }

  #[test]
  fn stops_at_first_failure() {
    let config = BuildConfig::default();
    let compiler = RecordingCompiler {
      fail_on: Some("two"),
      ..Default::default()
    };

    let result = build(&modules("one\ntwo\nthree", &config), &config, &compiler);

    assert!(matches!(result, Err(CompileError::Failed { ref module, .. }) if module == "two"));
    assert_eq!(*compiler.seen.borrow(), vec!["one", "two"]);
  }

  #[test]
  fn empty_manifest_builds_nothing() {
    let config = BuildConfig::default();
    let compiler = RecordingCompiler::default();

    let report = build(&[], &config, &compiler).unwrap();
    assert!(report.outputs.is_empty());
    assert!(compiler.seen.borrow().is_empty());
  }

  #[test]
  fn plan_carries_config() {
    let config = BuildConfig::default()
      .with_include_dirs([PathBuf::from("inc")])
      .with_profile(true);
    let plan = BuildPlan::new(modules("x.y", &config), &config);

    assert_eq!(plan.language, config.language);
    assert!(plan.directives.profile);
    assert_eq!(plan.include_dirs, vec![PathBuf::from("inc")]);
    assert_eq!(plan.modules.len(), 1);

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["language"], "c++");
    assert_eq!(json["modules"][0]["name"], "x.y");
  }

  #[test]
  fn trait_object_compiler_is_accepted() {
    let config = BuildConfig::default();
    let compiler: Box<dyn Compiler> = Box::new(RecordingCompiler::default());

    let report = build(&modules("m", &config), &config, compiler.as_ref()).unwrap();
    assert_eq!(report.outputs.len(), 1);
  }
}
