use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::{cmd_bench, cmd_build, cmd_info};
use output::OutputFormat;

/// forge - build declared modules and benchmark commands
#[derive(Parser)]
#[command(name = "forge")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project root (where forge.json lives, if any)
  #[arg(short = 'C', long, global = true, default_value = ".")]
  root: PathBuf,

  /// Print every compiler command line before running it
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format for the final report
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Defaults to `build`
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile every module and link its test binary
  Build,

  /// Compile the comparison program and time each benchmark command
  Bench {
    /// Invocations per command (overrides the manifest)
    #[arg(short = 'n', long)]
    iterations: Option<u32>,
  },

  /// Show the resolved project
  Info,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let cli = Cli::parse();

  let success = match cli.command.unwrap_or(Commands::Build) {
    Commands::Build => cmd_build(&cli.root, cli.verbose, cli.format)?,
    Commands::Bench { iterations } => cmd_bench(&cli.root, iterations, cli.verbose, cli.format)?,
    Commands::Info => {
      cmd_info(&cli.root, cli.format)?;
      true
    }
  };

  if !success {
    std::process::exit(1);
  }

  Ok(())
}
