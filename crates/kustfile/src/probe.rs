//! Resource-shape probe used by auto-detection.
//!
//! A file counts as a resource when it is a YAML stream whose non-empty
//! documents are all objects carrying `apiVersion` and `kind`. Anything else is
//! reported as [`Probe::NotAResource`]; the probe never fails.

use serde::Deserialize;
use serde_yaml::Value;
use tracing::trace;

/// Outcome of probing a file's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
	/// The contents parse as this many (at least one) resource documents.
	Resources(usize),
	NotAResource,
}

impl Probe {
	pub fn is_resource(&self) -> bool {
		matches!(self, Probe::Resources(_))
	}
}

/// Classify raw file contents.
pub fn classify(contents: &[u8]) -> Probe {
	let Ok(text) = std::str::from_utf8(contents) else {
		trace!("not utf-8");
		return Probe::NotAResource;
	};

	let mut count = 0;
	for document in serde_yaml::Deserializer::from_str(text) {
		let value = match Value::deserialize(document) {
			Ok(v) => v,
			Err(e) => {
				trace!("not yaml: {e}");
				return Probe::NotAResource;
			}
		};
		if value.is_null() {
			continue;
		}
		if !is_resource_object(&value) {
			return Probe::NotAResource;
		}
		count += 1;
	}

	if count == 0 {
		Probe::NotAResource
	} else {
		Probe::Resources(count)
	}
}

fn is_resource_object(value: &Value) -> bool {
	let Some(mapping) = value.as_mapping() else {
		return false;
	};
	let has_str = |key: &str| {
		mapping
			.get(key)
			.and_then(Value::as_str)
			.is_some_and(|s| !s.is_empty())
	};
	has_str("apiVersion") && has_str("kind")
}
