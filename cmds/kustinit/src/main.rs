use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod telemetry;

#[derive(Parser)]
#[command(name = "kustinit")]
#[command(about = "Kustomization file generator", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Create a new kustomization in the current directory
	#[command(after_help = "\
Examples:
  # Create a new overlay from the base '../base'.
  kustinit create --resource ../base

  # Detect k8s resources in the current directory and generate a kustomization.
  kustinit create --autodetect

  # Set resources and a name prefix.
  kustinit create --resource deployment.yaml --resource service.yaml --nameprefix acme-")]
	Create(commands::create::CreateArgs),
}

/// Extract log level from command
fn get_log_level(cmd: &Commands) -> Option<&str> {
	match cmd {
		Commands::Create(args) => args.log_level.as_deref(),
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	telemetry::init(get_log_level(&cli.command).and_then(telemetry::parse_level));

	let stdout = std::io::stdout().lock();

	match cli.command {
		Commands::Create(args) => commands::create::run(args, stdout),
	}
}
