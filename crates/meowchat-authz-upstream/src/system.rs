// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client for the system service: roles, communities, notices and news.

use async_trait::async_trait;
use meowchat_authz::{Community, GatewayError, News, Notice, Role, SystemGateway};
use serde::Deserialize;
use tracing::instrument;

use crate::client::UpstreamClient;

#[derive(Debug, Deserialize)]
struct RolesResponse {
	#[serde(default)]
	roles: Vec<Role>,
}

#[derive(Debug, Clone)]
pub struct SystemClient {
	client: UpstreamClient,
}

impl SystemClient {
	pub fn new(client: UpstreamClient) -> Self {
		Self { client }
	}
}

#[async_trait]
impl SystemGateway for SystemClient {
	/// An unknown user (404) holds no roles.
	#[instrument(level = "debug", skip(self))]
	async fn retrieve_user_roles(&self, user_id: &str) -> Result<Vec<Role>, GatewayError> {
		let response: Option<RolesResponse> =
			self.client.get_json(&["users", user_id, "roles"]).await?;
		Ok(response.map(|r| r.roles).unwrap_or_default())
	}

	async fn retrieve_community(&self, id: &str) -> Result<Option<Community>, GatewayError> {
		self.client.get_json(&["communities", id]).await
	}

	async fn retrieve_notice(&self, id: &str) -> Result<Option<Notice>, GatewayError> {
		self.client.get_json(&["notices", id]).await
	}

	async fn retrieve_news(&self, id: &str) -> Result<Option<News>, GatewayError> {
		self.client.get_json(&["news", id]).await
	}
}
