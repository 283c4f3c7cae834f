// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP clients for the services that own MeowChat roles and resources.
//!
//! Each client implements one of the gateway traits from `meowchat-authz` by
//! issuing a JSON `GET` against its upstream. A 404 means the resource does not
//! exist; any other failure is reported as a [`GatewayError`] and left to the
//! decision engine to deny. Requests are never retried.
//!
//! [`GatewayError`]: meowchat_authz::GatewayError

mod client;
mod content;
mod error;
mod system;

use std::sync::Arc;
use std::time::Duration;

use meowchat_authz::{Gateways, Upstream};
use meowchat_authz_config::UpstreamsConfig;
use tracing::debug;

pub use client::{builder, new_client_with_timeout, user_agent, UpstreamClient};
pub use content::{CollectionClient, CommentClient, MomentClient, PostClient};
pub use error::UpstreamError;
pub use system::SystemClient;

/// One client per upstream, all sharing a single connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClients {
	pub system: SystemClient,
	pub posts: PostClient,
	pub moments: MomentClient,
	pub comments: CommentClient,
	pub collection: CollectionClient,
}

impl UpstreamClients {
	pub fn from_config(config: &UpstreamsConfig) -> Result<Self, UpstreamError> {
		let http_client = new_client_with_timeout(Duration::from_secs(config.timeout_secs))?;
		let client = |upstream, url: &str| UpstreamClient::new(upstream, http_client.clone(), url);

		let clients = Self {
			system: SystemClient::new(client(Upstream::System, &config.system_url)?),
			posts: PostClient::new(client(Upstream::Post, &config.post_url)?),
			moments: MomentClient::new(client(Upstream::Moment, &config.moment_url)?),
			comments: CommentClient::new(client(Upstream::Comment, &config.comment_url)?),
			collection: CollectionClient::new(client(Upstream::Collection, &config.collection_url)?),
		};

		for (name, url) in config.endpoints() {
			debug!(upstream = name, url = %url, "upstream client built");
		}

		Ok(clients)
	}

	pub fn into_gateways(self) -> Gateways {
		Gateways::new(
			Arc::new(self.system),
			Arc::new(self.posts),
			Arc::new(self.moments),
			Arc::new(self.comments),
			Arc::new(self.collection),
		)
	}
}

impl From<UpstreamClients> for Gateways {
	fn from(clients: UpstreamClients) -> Self {
		clients.into_gateways()
	}
}
