//! detect - Find Kubernetes resources in directory trees
//!
//! Files are classified with the resource [probe](crate::probe). Directories
//! are only entered in recursive mode, and a directory holding its own
//! kustomization file is treated as a single resource (a nested overlay)
//! without looking inside it.

use std::{
	fs,
	path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument, trace, warn};
use walkdir::WalkDir;

use crate::{probe, store::KUSTOMIZATION_FILE_NAMES};

#[derive(Debug, Error)]
pub enum DetectError {
	#[error("walking {}", root.display())]
	Walk {
		root: PathBuf,
		#[source]
		source: walkdir::Error,
	},

	#[error("reading {}", path.display())]
	ReadFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// What the walker should do after visiting an entry.
#[derive(Debug)]
pub enum WalkDirective {
	Continue,
	/// Don't descend into the current directory, keep walking its siblings.
	SkipSubtree,
	Abort(DetectError),
}

/// Kind of a visited entry, as seen without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
	Dir,
	File,
	Other,
}

impl From<fs::FileType> for EntryKind {
	fn from(ft: fs::FileType) -> Self {
		if ft.is_dir() {
			EntryKind::Dir
		} else if ft.is_file() {
			EntryKind::File
		} else {
			EntryKind::Other
		}
	}
}

/// Per-entry classification state for a single detection pass.
#[derive(Debug)]
pub struct Detector {
	root: PathBuf,
	recursive: bool,
	found: Vec<String>,
}

impl Detector {
	pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Self {
		Self {
			root: root.into(),
			recursive,
			found: Vec::new(),
		}
	}

	/// Classify a single entry, recording it if it is a resource.
	pub fn visit(&mut self, path: &Path, depth: usize, kind: EntryKind) -> WalkDirective {
		if depth == 0 {
			return WalkDirective::Continue;
		}

		match kind {
			EntryKind::Dir => {
				if !self.recursive {
					return WalkDirective::SkipSubtree;
				}
				if is_kustomization_dir(path) {
					trace!("{} is a nested kustomization", path.display());
					self.record(path);
					return WalkDirective::SkipSubtree;
				}
				WalkDirective::Continue
			}
			EntryKind::File => self.visit_file(path),
			// Symlinks are followed for files only
			EntryKind::Other if path.is_file() => self.visit_file(path),
			EntryKind::Other => WalkDirective::Continue,
		}
	}

	fn visit_file(&mut self, path: &Path) -> WalkDirective {
		let contents = match fs::read(path) {
			Ok(c) => c,
			Err(source) => {
				return WalkDirective::Abort(DetectError::ReadFile {
					path: path.to_path_buf(),
					source,
				})
			}
		};
		if probe::classify(&contents).is_resource() {
			self.record(path);
		} else {
			trace!("{} is not a resource", path.display());
		}
		WalkDirective::Continue
	}

	fn record(&mut self, path: &Path) {
		let rendered = if self.root == Path::new(".") {
			crate::paths::relative_to(&self.root, path)
		} else {
			path.to_str().map(ToString::to_string)
		};
		let Some(rendered) = rendered else {
			warn!("skipping non-utf-8 path {}", path.display());
			return;
		};
		debug!("detected resource {rendered}");
		self.found.push(rendered);
	}

	/// Detected paths, in visitation order.
	pub fn finish(self) -> Vec<String> {
		self.found
	}
}

fn is_kustomization_dir(path: &Path) -> bool {
	KUSTOMIZATION_FILE_NAMES
		.iter()
		.any(|name| path.join(name).exists())
}

/// Walk `root` and return the paths of every resource found beneath it.
///
/// Entries are visited depth-first, sorted by file name within each directory,
/// so the result is deterministic. Paths are `root` joined with the entry's
/// relative path, or just the relative path when `root` is `.`.
#[instrument(skip_all, fields(root = %root.display(), recursive = recursive))]
pub fn detect_resources(root: &Path, recursive: bool) -> Result<Vec<String>, DetectError> {
	let mut detector = Detector::new(root, recursive);
	let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

	while let Some(entry) = walker.next() {
		let entry = entry.map_err(|source| DetectError::Walk {
			root: root.to_path_buf(),
			source,
		})?;
		match detector.visit(entry.path(), entry.depth(), entry.file_type().into()) {
			WalkDirective::Continue => {}
			WalkDirective::SkipSubtree => walker.skip_current_dir(),
			WalkDirective::Abort(e) => return Err(e),
		}
	}

	let found = detector.finish();
	debug!("detected {} resources", found.len());
	Ok(found)
}

/// Append `detected` paths to `resources`, skipping any already present.
///
/// Returns the number of paths added.
pub fn merge_resources(
	resources: &mut Vec<String>,
	detected: impl IntoIterator<Item = String>,
) -> usize {
	let before = resources.len();
	for path in detected {
		if resources.contains(&path) {
			trace!("{path} already listed");
			continue;
		}
		resources.push(path);
	}
	resources.len() - before
}
