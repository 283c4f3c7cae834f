// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use meowchat_authz::Upstream;
use thiserror::Error;

/// Errors raised while building upstream clients.
#[derive(Debug, Error)]
pub enum UpstreamError {
	#[error("invalid {upstream} upstream URL '{url}': {message}")]
	InvalidUrl {
		upstream: Upstream,
		url: String,
		message: String,
	},

	#[error("failed to build HTTP client: {0}")]
	Client(#[from] reqwest::Error),
}
