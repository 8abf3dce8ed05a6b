//! Creation of a new kustomization from explicit and detected resources.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument};

use crate::{
	detect::{self, DetectError},
	kustomization::Kustomization,
	kvpair::{self, InvalidPairError, PairKind},
	paths::{self, ResolveError},
	store::{find_kustomization_file, KustomizationFile, StoreError},
};

#[derive(Debug, Error)]
pub enum CreateError {
	#[error(transparent)]
	Resolve(#[from] ResolveError),

	#[error(transparent)]
	InvalidPair(#[from] InvalidPairError),

	#[error("detecting resources")]
	Detect(#[from] DetectError),

	#[error(transparent)]
	Store(#[from] StoreError),
}

/// Everything needed to create a kustomization, fixed before the run starts.
#[derive(Debug, Clone, bon::Builder)]
pub struct CreateOptions {
	/// Directory the kustomization is created in.
	#[builder(into, default = PathBuf::from("."))]
	pub dir: PathBuf,
	/// Resource paths or glob patterns, relative to `dir`.
	#[builder(default)]
	pub resources: Vec<String>,
	/// `key:value` tokens for `commonLabels`.
	#[builder(default)]
	pub labels: Vec<String>,
	/// `key:value` tokens for `commonAnnotations`.
	#[builder(default)]
	pub annotations: Vec<String>,
	#[builder(into, default)]
	pub name_prefix: String,
	#[builder(into, default)]
	pub name_suffix: String,
	/// Search `dir` for resources to add.
	#[builder(default)]
	pub detect: bool,
	/// Let detection descend into subdirectories.
	#[builder(default)]
	pub recursive: bool,
}

/// Create the kustomization file described by `opts` and return what was
/// written.
///
/// Nothing is written if a kustomization already exists in the directory or if
/// any of the inputs are invalid.
#[instrument(skip_all, fields(dir = %opts.dir.display()))]
pub fn create(opts: CreateOptions) -> Result<Kustomization, CreateError> {
	let CreateOptions {
		dir,
		resources,
		labels,
		annotations,
		name_prefix,
		name_suffix,
		detect: auto_detect,
		recursive,
	} = opts;

	let mut resources = paths::resolve_patterns(&dir, &resources)?;
	if let Some(existing) = find_kustomization_file(&dir) {
		return Err(StoreError::AlreadyExists(existing).into());
	}
	let common_labels = kvpair::build_map(PairKind::Label, &labels)?;
	let common_annotations = kvpair::build_map(PairKind::Annotation, &annotations)?;

	if auto_detect {
		let detected = detect::detect_resources(&dir, recursive)?;
		let detected = detected
			.iter()
			.filter_map(|path| paths::relative_to(&dir, Path::new(path)));
		let added = detect::merge_resources(&mut resources, detected);
		info!("auto-detected {added} new resources");
	}

	let file = KustomizationFile::create(&dir)?;
	let mut kustomization = file.read()?;
	kustomization.add_resources(resources);
	kustomization.name_prefix = name_prefix;
	kustomization.name_suffix = name_suffix;
	kustomization.common_labels = common_labels;
	kustomization.common_annotations = common_annotations;
	kustomization.fix_type_meta();
	file.write(&kustomization)?;

	info!(
		"created {} with {} resources",
		file.path().display(),
		kustomization.resources.len()
	);
	Ok(kustomization)
}
