//! Expansion of user-supplied resource patterns.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ResolveError {
	#[error("invalid glob pattern {pattern:?}")]
	GlobSyntax {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},
}

/// Expand glob `patterns` against the filesystem.
///
/// Relative patterns are anchored at `base` and their matches are reported
/// relative to it. A pattern with no matches is logged and skipped; a pattern
/// that is not valid glob syntax aborts the whole resolution.
pub fn resolve_patterns<S: AsRef<str>>(
	base: &Path,
	patterns: &[S],
) -> Result<Vec<String>, ResolveError> {
	let mut result = Vec::new();
	for pattern in patterns {
		let pattern = pattern.as_ref();
		let anchored = anchor_pattern(base, pattern);
		let paths = glob::glob(&anchored).map_err(|source| ResolveError::GlobSyntax {
			pattern: pattern.to_string(),
			source,
		})?;

		let before = result.len();
		for entry in paths {
			match entry {
				Ok(path) => {
					let Some(rendered) = relative_to(base, &path) else {
						warn!("skipping non-utf-8 match for {pattern}: {}", path.display());
						continue;
					};
					debug!("{pattern} matched {rendered}");
					result.push(rendered);
				}
				Err(e) => warn!("skipping unreadable match for {pattern}: {e}"),
			}
		}
		if result.len() == before {
			warn!("{pattern} has no match");
		}
	}
	Ok(result)
}

fn anchor_pattern(base: &Path, pattern: &str) -> String {
	if Path::new(pattern).is_absolute() || base == Path::new(".") {
		return pattern.to_string();
	}
	let escaped = glob::Pattern::escape(&base.to_string_lossy());
	PathBuf::from(escaped).join(pattern).to_string_lossy().into_owned()
}

/// Render `path` relative to `base` when it lies beneath it, as-is otherwise.
///
/// Returns `None` for paths that are not valid UTF-8.
pub fn relative_to(base: &Path, path: &Path) -> Option<String> {
	let rel = path.strip_prefix(base).unwrap_or(path);
	if rel.as_os_str().is_empty() {
		return Some(".".to_string());
	}
	rel.to_str().map(ToString::to_string)
}
