//! The kustomization descriptor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::detect::merge_resources;

pub const API_VERSION: &str = "kustomize.config.k8s.io/v1beta1";
pub const KIND: &str = "Kustomization";

/// Contents of a `kustomization.yaml`.
///
/// Only the fields this tool writes are modelled. Absent keys read as empty
/// values and empty values are left out when writing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub api_version: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub kind: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub resources: Vec<String>,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub name_prefix: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub name_suffix: String,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub common_labels: BTreeMap<String, String>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub common_annotations: BTreeMap<String, String>,
}

impl Kustomization {
	/// Append resources, skipping any path already listed (including ones
	/// repeated within `resources` itself).
	pub fn add_resources(&mut self, resources: impl IntoIterator<Item = String>) -> usize {
		merge_resources(&mut self.resources, resources)
	}

	/// Fill in type metadata if it is missing.
	pub fn fix_type_meta(&mut self) {
		if self.api_version.is_empty() {
			self.api_version = API_VERSION.to_string();
		}
		if self.kind.is_empty() {
			self.kind = KIND.to_string();
		}
	}
}
