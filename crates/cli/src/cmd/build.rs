//! Implementation of the `extbuild build` command.
//!
//! Resolves the manifest and runs the compiler once per module, in manifest
//! order, stopping at the first failure.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use extbuild_lib::compile::{CommandCompiler, DEFAULT_COMPILER, build};

use super::ManifestArgs;
use crate::output::{OutputFormat, format_duration, print_info, print_json, print_mapping, print_success};

#[derive(Debug, Args)]
pub struct BuildArgs {
  #[command(flatten)]
  pub manifest: ManifestArgs,

  /// Compiler command, e.g. "cython" or "python3 -m cython"
  #[arg(long, default_value = DEFAULT_COMPILER, value_name = "CMD")]
  pub compiler: String,

  /// Enable the profiling directive
  #[arg(long)]
  pub profile: bool,

  /// Print the compiler invocations without running them
  #[arg(long)]
  pub dry_run: bool,
}

pub fn cmd_build(args: &BuildArgs, format: OutputFormat, verbose: bool) -> Result<()> {
  let resolved = args.manifest.resolve(args.profile)?;
  let compiler = CommandCompiler::from_command(&args.compiler, &resolved.base_dir);

  if resolved.modules.is_empty() {
    if format.is_json() {
      return print_json(&serde_json::json!({ "modules": [] }));
    }
    print_info("No modules to build");
    return Ok(());
  }

  if args.dry_run {
    let commands: Vec<Vec<String>> = resolved
      .modules
      .iter()
      .map(|m| compiler.command_line(m, &resolved.config))
      .collect();

    if format.is_json() {
      return print_json(&serde_json::json!({ "dry_run": true, "commands": commands }));
    }
    for command in &commands {
      println!("{}", command.join(" "));
    }
    return Ok(());
  }

  info!(
    modules = resolved.modules.len(),
    compiler = %compiler.program(),
    base_dir = %resolved.base_dir.display(),
    "starting build"
  );

  let report = build(&resolved.modules, &resolved.config, &compiler).context("Build failed")?;

  if format.is_json() {
    let json_output = serde_json::json!({ "modules": report.outputs, "duration_ms": report.duration.as_millis() as u64 });
    return print_json(&json_output);
  }

  print_success(&format!(
    "Built {} module(s) in {}",
    report.outputs.len(),
    format_duration(report.duration)
  ));
  if verbose {
    for output in &report.outputs {
      print_mapping(&output.name, &output.output_path.display().to_string());
    }
  }

  Ok(())
}
