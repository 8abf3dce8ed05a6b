//! Create command handler.

use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use kustfile::CreateOptions;

use crate::config::KustinitConfig;

#[derive(Args, Debug)]
pub struct CreateArgs {
	/// Name of a file containing a file to add to the kustomization file
	#[arg(long = "resource", value_delimiter = ',')]
	pub resources: Vec<String>,

	/// Add one or more common annotations
	#[arg(long = "annotation", value_delimiter = ',')]
	pub annotations: Vec<String>,

	/// Add one or more common labels
	#[arg(long = "label", value_delimiter = ',')]
	pub labels: Vec<String>,

	/// Sets the value of the namePrefix field in the kustomization file
	#[arg(long = "nameprefix")]
	pub name_prefix: Option<String>,

	/// Sets the value of the nameSuffix field in the kustomization file
	#[arg(long = "namesuffix")]
	pub name_suffix: Option<String>,

	/// Search for kubernetes resources in the current directory to be added to the kustomization file
	#[arg(long)]
	pub autodetect: bool,

	/// Enable recursive directory searching for resource auto-detection
	#[arg(long)]
	pub recursive: bool,

	/// Directory to create the kustomization in
	#[arg(long, default_value = ".")]
	pub path: PathBuf,

	/// Log level (possible values: trace, debug, info, warn, error); defaults to RUST_LOG, then info
	#[arg(long)]
	pub log_level: Option<String>,
}

impl CreateArgs {
	/// Combine the flags with an optional config file into the options for a run.
	pub fn into_options(self, config: Option<KustinitConfig>) -> CreateOptions {
		let config = config.unwrap_or_default();

		let mut labels = config.labels;
		labels.extend(self.labels);
		let mut annotations = config.annotations;
		annotations.extend(self.annotations);

		CreateOptions::builder()
			.dir(self.path)
			.resources(self.resources)
			.labels(labels)
			.annotations(annotations)
			.name_prefix(self.name_prefix.or(config.name_prefix).unwrap_or_default())
			.name_suffix(self.name_suffix.or(config.name_suffix).unwrap_or_default())
			.detect(self.autodetect || config.autodetect)
			.recursive(self.recursive || config.recursive)
			.build()
	}
}

/// Run the create command.
pub fn run<W: Write>(args: CreateArgs, mut writer: W) -> Result<()> {
	let config = KustinitConfig::load_from_directory(&args.path)?;
	let opts = args.into_options(config);
	let dir = opts.dir.clone();

	let kustomization = kustfile::create(opts)
		.with_context(|| format!("creating kustomization in {}", dir.display()))?;

	for resource in &kustomization.resources {
		writeln!(writer, "{resource}")?;
	}
	Ok(())
}
