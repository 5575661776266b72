//! Implementation of the `extbuild resolve` command.
//!
//! Resolves the manifest and prints the compilation units that a build would
//! hand to the compiler, without running anything.

use anyhow::Result;

use extbuild_lib::compile::BuildPlan;

use super::ManifestArgs;
use crate::output::{OutputFormat, print_info, print_json, print_mapping, print_stat, print_success, print_warning};

pub fn cmd_resolve(args: &ManifestArgs, format: OutputFormat) -> Result<()> {
  let resolved = args.resolve(false)?;
  let config = &resolved.config;

  for (index, module) in resolved.modules.iter().enumerate() {
    if module.name.trim().is_empty() {
      print_warning(&format!("module #{} has a blank name", index + 1));
    }
  }

  if format.is_json() {
    let plan = BuildPlan::new(resolved.modules, config);
    return print_json(&plan);
  }

  if resolved.modules.is_empty() {
    print_info(&format!("No modules listed in {}", args.manifest.display()));
    return Ok(());
  }

  print_success(&format!(
    "Resolved {} module(s) from {}",
    resolved.modules.len(),
    args.manifest.display()
  ));
  for module in &resolved.modules {
    print_mapping(&module.name, &module.source_path.display().to_string());
  }

  println!();
  print_stat("Language", config.language.as_str());
  print_stat("Directives", &config.directives.assignments().join(","));
  if config.include_dirs.is_empty() {
    print_stat("Include dirs", "(none)");
  } else {
    let dirs: Vec<String> = config.include_dirs.iter().map(|d| d.display().to_string()).collect();
    print_stat("Include dirs", &dirs.join(", "));
  }

  Ok(())
}
