// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Upstream service endpoints.

use serde::Deserialize;

const DEFAULT_SYSTEM_URL: &str = "http://localhost:8081";
const DEFAULT_POST_URL: &str = "http://localhost:8082";
const DEFAULT_MOMENT_URL: &str = "http://localhost:8083";
const DEFAULT_COMMENT_URL: &str = "http://localhost:8084";
const DEFAULT_COLLECTION_URL: &str = "http://localhost:8085";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Base URLs of the services that own roles and resources (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamsConfig {
	/// Roles, communities, notices and news.
	pub system_url: String,
	pub post_url: String,
	pub moment_url: String,
	pub comment_url: String,
	/// Cats.
	pub collection_url: String,
	pub timeout_secs: u64,
}

impl Default for UpstreamsConfig {
	fn default() -> Self {
		UpstreamsConfigLayer::default().finalize()
	}
}

impl UpstreamsConfig {
	/// Returns `(name, url)` for every upstream, for logging and validation.
	pub fn endpoints(&self) -> [(&'static str, &str); 5] {
		[
			("system", self.system_url.as_str()),
			("post", self.post_url.as_str()),
			("moment", self.moment_url.as_str()),
			("comment", self.comment_url.as_str()),
			("collection", self.collection_url.as_str()),
		]
	}
}

/// Upstreams configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamsConfigLayer {
	#[serde(default)]
	pub system_url: Option<String>,
	#[serde(default)]
	pub post_url: Option<String>,
	#[serde(default)]
	pub moment_url: Option<String>,
	#[serde(default)]
	pub comment_url: Option<String>,
	#[serde(default)]
	pub collection_url: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl UpstreamsConfigLayer {
	pub fn merge(&mut self, other: UpstreamsConfigLayer) {
		if other.system_url.is_some() {
			self.system_url = other.system_url;
		}
		if other.post_url.is_some() {
			self.post_url = other.post_url;
		}
		if other.moment_url.is_some() {
			self.moment_url = other.moment_url;
		}
		if other.comment_url.is_some() {
			self.comment_url = other.comment_url;
		}
		if other.collection_url.is_some() {
			self.collection_url = other.collection_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> UpstreamsConfig {
		UpstreamsConfig {
			system_url: self
				.system_url
				.unwrap_or_else(|| DEFAULT_SYSTEM_URL.to_string()),
			post_url: self.post_url.unwrap_or_else(|| DEFAULT_POST_URL.to_string()),
			moment_url: self
				.moment_url
				.unwrap_or_else(|| DEFAULT_MOMENT_URL.to_string()),
			comment_url: self
				.comment_url
				.unwrap_or_else(|| DEFAULT_COMMENT_URL.to_string()),
			collection_url: self
				.collection_url
				.unwrap_or_else(|| DEFAULT_COLLECTION_URL.to_string()),
			timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
		}
	}
}
