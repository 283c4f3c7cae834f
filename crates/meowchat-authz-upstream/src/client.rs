// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON-over-HTTP lookups shared by every upstream client.

use std::time::Duration;

use meowchat_authz::{GatewayError, Upstream};
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, trace};

use crate::error::UpstreamError;

/// Returns the User-Agent sent on every upstream request.
///
/// Format: `meowchat-authz/{version}`
pub fn user_agent() -> String {
	format!("meowchat-authz/{}", env!("CARGO_PKG_VERSION"))
}

/// Creates a client builder with the standard User-Agent header.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds the HTTP client shared by all upstreams.
pub fn new_client_with_timeout(timeout: Duration) -> Result<Client, UpstreamError> {
	Ok(builder().timeout(timeout).build()?)
}

/// A single upstream service reachable at a base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
	upstream: Upstream,
	http_client: Client,
	base_url: Url,
}

impl UpstreamClient {
	pub fn new(
		upstream: Upstream,
		http_client: Client,
		base_url: &str,
	) -> Result<Self, UpstreamError> {
		let invalid = |message: String| UpstreamError::InvalidUrl {
			upstream,
			url: base_url.to_string(),
			message,
		};

		let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
		if base_url.cannot_be_a_base() {
			return Err(invalid("URL cannot be used as a base".to_string()));
		}

		Ok(Self {
			upstream,
			http_client,
			base_url,
		})
	}

	pub fn upstream(&self) -> Upstream {
		self.upstream
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Builds `{base}/{segments...}`, percent-encoding every segment.
	pub(crate) fn url_for(&self, segments: &[&str]) -> Url {
		let mut url = self.base_url.clone();
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}
		url
	}

	/// GETs a JSON document. A 404 is `Ok(None)`.
	pub(crate) async fn get_json<T: DeserializeOwned>(
		&self,
		segments: &[&str],
	) -> Result<Option<T>, GatewayError> {
		let url = self.url_for(segments);
		debug!(upstream = %self.upstream, url = %url, "upstream lookup");

		let response = self.http_client.get(url).send().await.map_err(|e| {
			if e.is_timeout() {
				error!(upstream = %self.upstream, "upstream request timed out");
				return GatewayError::Transport(format!("{} request timed out", self.upstream));
			}
			error!(upstream = %self.upstream, error = %e, "network error during upstream request");
			GatewayError::Transport(e.to_string())
		})?;

		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			debug!(upstream = %self.upstream, "upstream reports not found");
			return Ok(None);
		}
		if !status.is_success() {
			error!(upstream = %self.upstream, status = status.as_u16(), "unexpected upstream status");
			return Err(GatewayError::Status {
				status: status.as_u16(),
			});
		}

		let body = response.bytes().await.map_err(|e| {
			error!(upstream = %self.upstream, error = %e, "failed to read upstream response body");
			GatewayError::Transport(e.to_string())
		})?;
		trace!(upstream = %self.upstream, bytes = body.len(), "upstream response body");

		serde_json::from_slice(&body).map(Some).map_err(|e| {
			error!(upstream = %self.upstream, error = %e, "failed to parse upstream response");
			GatewayError::InvalidResponse(format!("JSON parse error: {e}"))
		})
	}
}
