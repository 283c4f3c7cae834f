// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the MeowChat authorization service.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`MEOWCHAT_AUTHZ_*`)
//!
//! # Usage
//!
//! ```ignore
//! use meowchat_authz_config::load_config;
//!
//! let config = load_config()?;
//! println!("Listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::AuthzConfigLayer;
pub use sections::*;
pub use sources::{
	ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource, SYSTEM_CONFIG_PATH,
};

use tracing::{debug, info};

/// Fully resolved service configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthzConfig {
	pub service: ServiceConfig,
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub upstreams: UpstreamsConfig,
}

impl AuthzConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`MEOWCHAT_AUTHZ_*`)
/// 2. Config file (`/etc/meowchat/authz.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<AuthzConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<AuthzConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<AuthzConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = AuthzConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: AuthzConfigLayer) -> Result<AuthzConfig, ConfigError> {
	let service = layer.service.unwrap_or_default().finalize();
	let http = layer.http.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let upstreams = layer.upstreams.unwrap_or_default().finalize();

	validate_upstreams(&upstreams)?;

	info!(
		host = %http.host,
		port = http.port,
		mode = ?service.mode,
		upstream_timeout_secs = upstreams.timeout_secs,
		"Authorization service configuration loaded"
	);

	Ok(AuthzConfig {
		service,
		http,
		logging,
		upstreams,
	})
}

/// Validate upstream endpoints.
fn validate_upstreams(upstreams: &UpstreamsConfig) -> Result<(), ConfigError> {
	for (name, url) in upstreams.endpoints() {
		if !(url.starts_with("http://") || url.starts_with("https://")) {
			return Err(ConfigError::Validation(format!(
				"{name} upstream URL must start with http:// or https://, got '{url}'"
			)));
		}
	}

	if upstreams.timeout_secs == 0 {
		return Err(ConfigError::Validation(
			"upstream timeout must be at least one second".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		let config = finalize(AuthzConfigLayer::default()).unwrap();
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
		assert_eq!(config.service.mode, ServiceMode::Production);
	}

	#[test]
	fn test_rejects_non_http_upstream() {
		let layer = AuthzConfigLayer {
			upstreams: Some(UpstreamsConfigLayer {
				comment_url: Some("grpc://comments:9000".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let err = finalize(layer).unwrap_err();
		assert!(err.to_string().contains("comment upstream URL"));
	}

	#[test]
	fn test_rejects_zero_timeout() {
		let layer = AuthzConfigLayer {
			upstreams: Some(UpstreamsConfigLayer {
				timeout_secs: Some(0),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(matches!(finalize(layer), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_config_file_overrides_defaults() {
		use std::io::Write;

		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[http]\nhost = \"127.0.0.1\"\nport = 7070\n\n[upstreams]\npost_url = \"https://posts.example\""
		)
		.unwrap();

		let config = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(TomlSource::new(file.path())),
		])
		.unwrap();
		assert_eq!(config.socket_addr(), "127.0.0.1:7070");
		assert_eq!(config.upstreams.post_url, "https://posts.example");
		assert_eq!(config.upstreams.system_url, "http://localhost:8081");
	}
}
