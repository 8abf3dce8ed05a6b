//! Configuration file support for kustinit
//!
//! A `.kustinit.yaml` placed in the target directory or any of its parents
//! supplies project-wide defaults. The nearest file wins; command-line flags
//! are applied on top of it.

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// The name of the config file kustinit looks for
pub const CONFIG_FILE_NAME: &str = ".kustinit.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KustinitConfig {
	/// `key:value` tokens added to `commonLabels` before the ones given with `--label`
	#[serde(default)]
	pub labels: Vec<String>,

	/// `key:value` tokens added to `commonAnnotations` before the ones given with `--annotation`
	#[serde(default)]
	pub annotations: Vec<String>,

	/// Used when `--nameprefix` is not given
	#[serde(default)]
	pub name_prefix: Option<String>,

	/// Used when `--namesuffix` is not given
	#[serde(default)]
	pub name_suffix: Option<String>,

	/// Always auto-detect resources
	#[serde(default)]
	pub autodetect: bool,

	/// Always detect recursively
	#[serde(default)]
	pub recursive: bool,
}

impl KustinitConfig {
	/// Load config by searching from the given directory upward
	pub fn load_from_directory(start_dir: &Path) -> Result<Option<Self>> {
		if let Some(config_path) = find_config_file(start_dir) {
			debug!("using config {}", config_path.display());
			let config = Self::load_from_file(&config_path)?;
			Ok(Some(config))
		} else {
			Ok(None)
		}
	}

	/// Load config from a specific file path
	pub fn load_from_file(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path)
			.with_context(|| format!("failed to read config file: {}", path.display()))?;
		if content.trim().is_empty() {
			return Ok(Self::default());
		}
		let config: KustinitConfig = serde_yaml::from_str(&content)
			.with_context(|| format!("failed to parse config file: {}", path.display()))?;
		Ok(config)
	}
}

/// Search for a config file starting from `start_dir` and walking up to the filesystem root
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
	let start = start_dir
		.canonicalize()
		.unwrap_or_else(|_| start_dir.to_path_buf());
	start
		.ancestors()
		.map(|dir| dir.join(CONFIG_FILE_NAME))
		.find(|path| path.is_file())
}
