//! Create-once storage of the kustomization file.

use std::{
	fs::{self, OpenOptions},
	io::{self, ErrorKind},
	path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::kustomization::Kustomization;

/// File names kustomize accepts for a kustomization, in lookup order.
pub const KUSTOMIZATION_FILE_NAMES: &[&str] =
	&["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// Name used when creating a new kustomization.
pub const DEFAULT_FILE_NAME: &str = KUSTOMIZATION_FILE_NAMES[0];

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("kustomization file already exists: {}", .0.display())]
	AlreadyExists(PathBuf),

	#[error("no kustomization file found in {}", .0.display())]
	NotFound(PathBuf),

	#[error("creating {}", path.display())]
	Create {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("reading {}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("parsing {}", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("serializing kustomization")]
	Serialize(#[source] serde_yaml::Error),

	#[error("writing {}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Find the kustomization file in `dir`, if there is one.
pub fn find_kustomization_file(dir: &Path) -> Option<PathBuf> {
	KUSTOMIZATION_FILE_NAMES
		.iter()
		.map(|name| dir.join(name))
		.find(|path| path.exists())
}

/// Handle to a kustomization file on disk.
#[derive(Debug, Clone)]
pub struct KustomizationFile {
	path: PathBuf,
}

impl KustomizationFile {
	/// Create an empty kustomization file in `dir`.
	///
	/// Fails with [`StoreError::AlreadyExists`] when `dir` already has one under
	/// any accepted name.
	#[instrument(skip_all, fields(dir = %dir.display()))]
	pub fn create(dir: &Path) -> Result<Self, StoreError> {
		if let Some(existing) = find_kustomization_file(dir) {
			return Err(StoreError::AlreadyExists(existing));
		}

		let path = dir.join(DEFAULT_FILE_NAME);
		let file = OpenOptions::new()
			.write(true)
			.create_new(true)
			.open(&path)
			.map_err(|source| match source.kind() {
				ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.clone()),
				_ => StoreError::Create {
					path: path.clone(),
					source,
				},
			})?;
		// Must be closed before the file is reopened for reading
		drop(file);
		debug!("created {}", path.display());

		Self::open(dir)
	}

	/// Bind to the existing kustomization file in `dir`.
	pub fn open(dir: &Path) -> Result<Self, StoreError> {
		find_kustomization_file(dir)
			.map(|path| Self { path })
			.ok_or_else(|| StoreError::NotFound(dir.to_path_buf()))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Parse the file. An empty file reads as an empty kustomization.
	pub fn read(&self) -> Result<Kustomization, StoreError> {
		let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
			path: self.path.clone(),
			source,
		})?;
		if content.trim().is_empty() {
			return Ok(Kustomization::default());
		}
		serde_yaml::from_str(&content).map_err(|source| StoreError::Parse {
			path: self.path.clone(),
			source,
		})
	}

	/// Replace the file's contents with `kustomization`.
	#[instrument(skip_all, fields(path = %self.path.display()))]
	pub fn write(&self, kustomization: &Kustomization) -> Result<(), StoreError> {
		let mut kustomization = kustomization.clone();
		kustomization.fix_type_meta();
		let yaml = serde_yaml::to_string(&kustomization).map_err(StoreError::Serialize)?;
		fs::write(&self.path, yaml).map_err(|source| StoreError::Write {
			path: self.path.clone(),
			source,
		})?;
		debug!("wrote {} resources", kustomization.resources.len());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn test_create_makes_empty_file() {
		let temp = TempDir::new().unwrap();
		let file = KustomizationFile::create(temp.path()).unwrap();

		assert_eq!(file.path(), temp.path().join("kustomization.yaml"));
		assert_eq!(fs::read(file.path()).unwrap(), b"");
		assert_eq!(file.read().unwrap(), Kustomization::default());
	}

	#[test]
	fn test_create_twice_fails() {
		let temp = TempDir::new().unwrap();
		let file = KustomizationFile::create(temp.path()).unwrap();
		file.write(&Kustomization {
			name_prefix: "first-".to_string(),
			..Default::default()
		})
		.unwrap();

		let second = KustomizationFile::create(temp.path());
		assert_matches!(second, Err(StoreError::AlreadyExists(ref p)) if p == file.path());
		assert_eq!(file.read().unwrap().name_prefix, "first-");
	}

	#[test]
	fn test_any_accepted_name_blocks_create() {
		for name in KUSTOMIZATION_FILE_NAMES {
			let temp = TempDir::new().unwrap();
			fs::write(temp.path().join(name), "").unwrap();
			assert_matches!(
				KustomizationFile::create(temp.path()),
				Err(StoreError::AlreadyExists(_))
			);
		}
	}

	#[test]
	fn test_open_missing() {
		let temp = TempDir::new().unwrap();
		assert_matches!(
			KustomizationFile::open(temp.path()),
			Err(StoreError::NotFound(_))
		);
	}

	#[test]
	fn test_write_replaces_content() {
		let temp = TempDir::new().unwrap();
		let file = KustomizationFile::create(temp.path()).unwrap();
		file.write(&Kustomization {
			resources: vec!["a.yaml".to_string(), "b.yaml".to_string()],
			..Default::default()
		})
		.unwrap();
		file.write(&Kustomization {
			resources: vec!["c.yaml".to_string()],
			..Default::default()
		})
		.unwrap();

		let read = file.read().unwrap();
		assert_eq!(read.resources, vec!["c.yaml"]);
		assert_eq!(read.kind, "Kustomization");
	}

	#[test]
	fn test_read_invalid_yaml() {
		let temp = TempDir::new().unwrap();
		fs::write(temp.path().join("kustomization.yml"), "resources: [\n").unwrap();
		let file = KustomizationFile::open(temp.path()).unwrap();
		assert_matches!(file.read(), Err(StoreError::Parse { .. }));
	}
}
