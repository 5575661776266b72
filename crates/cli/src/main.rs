mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{BuildArgs, ManifestArgs, RevisionArgs};
use output::{OutputFormat, print_error};

/// extbuild - resolve and build native extension modules from a manifest
#[derive(Parser)]
#[command(name = "extbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the modules a manifest resolves to
  Resolve(ManifestArgs),

  /// Compile every module listed in a manifest
  Build(BuildArgs),

  /// Print the current revision of the working copy
  Revision(RevisionArgs),
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match &cli.command {
    Commands::Resolve(args) => cmd::cmd_resolve(args, cli.format),
    Commands::Build(args) => cmd::cmd_build(args, cli.format, cli.verbose),
    Commands::Revision(args) => cmd::cmd_revision(args, cli.format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
