// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Clients for the content services: posts, moments, comments and cats.

use async_trait::async_trait;
use meowchat_authz::{
	Cat, CollectionGateway, Comment, CommentGateway, GatewayError, Moment, MomentGateway, Post,
	PostGateway,
};

use crate::client::UpstreamClient;

#[derive(Debug, Clone)]
pub struct PostClient {
	client: UpstreamClient,
}

impl PostClient {
	pub fn new(client: UpstreamClient) -> Self {
		Self { client }
	}
}

#[async_trait]
impl PostGateway for PostClient {
	async fn retrieve_post(&self, id: &str) -> Result<Option<Post>, GatewayError> {
		self.client.get_json(&["posts", id]).await
	}
}

#[derive(Debug, Clone)]
pub struct MomentClient {
	client: UpstreamClient,
}

impl MomentClient {
	pub fn new(client: UpstreamClient) -> Self {
		Self { client }
	}
}

#[async_trait]
impl MomentGateway for MomentClient {
	async fn retrieve_moment(&self, id: &str) -> Result<Option<Moment>, GatewayError> {
		self.client.get_json(&["moments", id]).await
	}
}

#[derive(Debug, Clone)]
pub struct CommentClient {
	client: UpstreamClient,
}

impl CommentClient {
	pub fn new(client: UpstreamClient) -> Self {
		Self { client }
	}
}

#[async_trait]
impl CommentGateway for CommentClient {
	async fn retrieve_comment(&self, id: &str) -> Result<Option<Comment>, GatewayError> {
		self.client.get_json(&["comments", id]).await
	}
}

/// Client for the collection service, which owns cats.
#[derive(Debug, Clone)]
pub struct CollectionClient {
	client: UpstreamClient,
}

impl CollectionClient {
	pub fn new(client: UpstreamClient) -> Self {
		Self { client }
	}
}

#[async_trait]
impl CollectionGateway for CollectionClient {
	async fn retrieve_cat(&self, id: &str) -> Result<Option<Cat>, GatewayError> {
		self.client.get_json(&["cats", id]).await
	}
}
