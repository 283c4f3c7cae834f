// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capabilities the engine consumes from upstream services.
//!
//! Each trait mirrors one upstream service. Lookups return `Ok(None)` when the
//! service answered but the object does not exist, and `Err` when the service
//! could not be asked at all. The engine treats both as "absent" on write paths.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Cat, Comment, Community, Moment, News, Notice, Post, Role};

/// Upstream services the engine talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
	/// Roles, communities, notices and news.
	System,
	Post,
	Moment,
	Comment,
	/// Cats.
	Collection,
}

impl Upstream {
	pub fn as_str(self) -> &'static str {
		match self {
			Upstream::System => "system",
			Upstream::Post => "post",
			Upstream::Moment => "moment",
			Upstream::Comment => "comment",
			Upstream::Collection => "collection",
		}
	}
}

impl fmt::Display for Upstream {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Failure to obtain an answer from an upstream service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
	/// The request never completed (connect error, timeout, reset).
	#[error("transport error: {0}")]
	Transport(String),

	/// The service answered with an unexpected status.
	#[error("unexpected status {status}")]
	Status { status: u16 },

	/// The service answered with a body we could not decode.
	#[error("invalid response: {0}")]
	InvalidResponse(String),
}

/// Identity, community, notice and news lookups.
#[async_trait]
pub trait SystemGateway: Send + Sync {
	/// Returns every role the user holds. An unknown user holds no roles.
	async fn retrieve_user_roles(&self, user_id: &str) -> Result<Vec<Role>, GatewayError>;

	async fn retrieve_community(&self, id: &str) -> Result<Option<Community>, GatewayError>;

	async fn retrieve_notice(&self, id: &str) -> Result<Option<Notice>, GatewayError>;

	async fn retrieve_news(&self, id: &str) -> Result<Option<News>, GatewayError>;
}

#[async_trait]
pub trait PostGateway: Send + Sync {
	async fn retrieve_post(&self, id: &str) -> Result<Option<Post>, GatewayError>;
}

#[async_trait]
pub trait MomentGateway: Send + Sync {
	async fn retrieve_moment(&self, id: &str) -> Result<Option<Moment>, GatewayError>;
}

#[async_trait]
pub trait CommentGateway: Send + Sync {
	async fn retrieve_comment(&self, id: &str) -> Result<Option<Comment>, GatewayError>;
}

#[async_trait]
pub trait CollectionGateway: Send + Sync {
	async fn retrieve_cat(&self, id: &str) -> Result<Option<Cat>, GatewayError>;
}

/// Handles to every upstream service, shared by all concurrent decisions.
#[derive(Clone)]
pub struct Gateways {
	pub system: Arc<dyn SystemGateway>,
	pub posts: Arc<dyn PostGateway>,
	pub moments: Arc<dyn MomentGateway>,
	pub comments: Arc<dyn CommentGateway>,
	pub collection: Arc<dyn CollectionGateway>,
}

impl Gateways {
	pub fn new(
		system: Arc<dyn SystemGateway>,
		posts: Arc<dyn PostGateway>,
		moments: Arc<dyn MomentGateway>,
		comments: Arc<dyn CommentGateway>,
		collection: Arc<dyn CollectionGateway>,
	) -> Self {
		Self {
			system,
			posts,
			moments,
			comments,
			collection,
		}
	}

	/// Uses one object that answers for every upstream service.
	pub fn from_shared<G>(gateway: Arc<G>) -> Self
	where
		G: SystemGateway
			+ PostGateway
			+ MomentGateway
			+ CommentGateway
			+ CollectionGateway
			+ 'static,
	{
		Self {
			system: gateway.clone(),
			posts: gateway.clone(),
			moments: gateway.clone(),
			comments: gateway.clone(),
			collection: gateway,
		}
	}
}

impl fmt::Debug for Gateways {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Gateways").finish_non_exhaustive()
	}
}
