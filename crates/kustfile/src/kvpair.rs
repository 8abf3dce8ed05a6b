//! Parsing of `key:value` tokens into label and annotation maps.

use std::{collections::BTreeMap, fmt};

use thiserror::Error;

/// Which map a set of tokens is being built for. Only affects error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
	Label,
	Annotation,
}

impl fmt::Display for PairKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PairKind::Label => write!(f, "label"),
			PairKind::Annotation => write!(f, "annotation"),
		}
	}
}

/// A token had an empty key (`:value`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} {token:?}: need k:v pair where v may be quoted")]
pub struct InvalidPairError {
	pub kind: PairKind,
	pub token: String,
}

/// Build a map from `key:value` tokens.
///
/// Each token is split at its first colon. A token without a colon is a key
/// with an empty value. A value wrapped in double quotes loses exactly one
/// layer of them. Later tokens overwrite earlier ones with the same key.
pub fn build_map<S: AsRef<str>>(
	kind: PairKind,
	tokens: &[S],
) -> Result<BTreeMap<String, String>, InvalidPairError> {
	let mut result = BTreeMap::new();
	for token in tokens {
		let token = token.as_ref();
		match token.find(':') {
			Some(0) => {
				return Err(InvalidPairError {
					kind,
					token: token.to_string(),
				})
			}
			Some(idx) => {
				let value = trim_quotes(&token[idx + 1..]);
				result.insert(token[..idx].to_string(), value.to_string());
			}
			None => {
				result.insert(token.to_string(), String::new());
			}
		}
	}
	Ok(result)
}

fn trim_quotes(s: &str) -> &str {
	if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
		&s[1..s.len() - 1]
	} else {
		s
	}
}
