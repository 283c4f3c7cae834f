// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deployment mode.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
	Development,
	#[default]
	Production,
}

impl std::str::FromStr for ServiceMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"dev" | "development" => Ok(ServiceMode::Development),
			"prod" | "production" => Ok(ServiceMode::Production),
			other => Err(format!("unknown mode '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
	pub mode: ServiceMode,
}

impl ServiceConfig {
	pub fn is_development(&self) -> bool {
		self.mode == ServiceMode::Development
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfigLayer {
	#[serde(default)]
	pub mode: Option<ServiceMode>,
}

impl ServiceConfigLayer {
	pub fn merge(&mut self, other: ServiceConfigLayer) {
		if other.mode.is_some() {
			self.mode = other.mode;
		}
	}

	pub fn finalize(self) -> ServiceConfig {
		ServiceConfig {
			mode: self.mode.unwrap_or_default(),
		}
	}
}
