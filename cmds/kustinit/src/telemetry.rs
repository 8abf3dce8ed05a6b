//! Logging setup.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Parse a `--log-level` value. Unknown values fall back to `RUST_LOG`.
pub fn parse_level(level: &str) -> Option<Level> {
	match level.to_lowercase().as_str() {
		"trace" => Some(Level::TRACE),
		"debug" => Some(Level::DEBUG),
		"info" => Some(Level::INFO),
		"warn" | "warning" => Some(Level::WARN),
		"error" => Some(Level::ERROR),
		_ => None,
	}
}

/// Initialize tracing with the given log level.
///
/// Priority for log level:
/// 1. `log_level` argument (from --log-level CLI flag)
/// 2. `RUST_LOG` environment variable
/// 3. Default: info
///
/// Logs go to stderr, pretty-printed on a terminal and as JSON otherwise.
pub fn init(log_level: Option<Level>) {
	let filter_layer = match log_level {
		Some(level) => EnvFilter::new(level.as_str()),
		None => EnvFilter::builder()
			.with_default_directive(Level::INFO.into())
			.from_env_lossy(),
	};

	let fmt_layer = if std::io::stderr().is_terminal() {
		tracing_subscriber::fmt::layer()
			.with_writer(std::io::stderr)
			.without_time()
			.with_target(false)
			.boxed()
	} else {
		tracing_subscriber::fmt::layer()
			.with_writer(std::io::stderr)
			.json()
			.boxed()
	};

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(fmt_layer)
		.init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_level() {
		assert_eq!(parse_level("DEBUG"), Some(Level::DEBUG));
		assert_eq!(parse_level("warning"), Some(Level::WARN));
		assert_eq!(parse_level("loud"), None);
	}
}
