// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory gateways.
//!
//! Answers every gateway trait from maps populated up front. Outages can be
//! injected per upstream service, and lookups against the identity store are
//! counted so tests can assert how many calls a decision made.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::gateway::{
	CollectionGateway, CommentGateway, GatewayError, MomentGateway, PostGateway, SystemGateway,
	Upstream,
};
use crate::types::{Cat, Comment, Community, Moment, News, Notice, Post, Role};

#[derive(Debug, Default)]
pub struct InMemoryGateways {
	roles: HashMap<String, Vec<Role>>,
	communities: HashMap<String, Community>,
	notices: HashMap<String, Notice>,
	news: HashMap<String, News>,
	cats: HashMap<String, Cat>,
	posts: HashMap<String, Post>,
	moments: HashMap<String, Moment>,
	comments: HashMap<String, Comment>,
	outages: HashSet<Upstream>,
	community_outage: bool,
	role_lookups: AtomicUsize,
	community_lookups: AtomicUsize,
}

impl InMemoryGateways {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_roles(mut self, user_id: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
		self
			.roles
			.entry(user_id.into())
			.or_default()
			.extend(roles);
		self
	}

	pub fn with_community(mut self, community: Community) -> Self {
		self.communities.insert(community.id.clone(), community);
		self
	}

	pub fn with_notice(mut self, notice: Notice) -> Self {
		self.notices.insert(notice.id.clone(), notice);
		self
	}

	pub fn with_news(mut self, news: News) -> Self {
		self.news.insert(news.id.clone(), news);
		self
	}

	pub fn with_cat(mut self, cat: Cat) -> Self {
		self.cats.insert(cat.id.clone(), cat);
		self
	}

	pub fn with_post(mut self, post: Post) -> Self {
		self.posts.insert(post.id.clone(), post);
		self
	}

	pub fn with_moment(mut self, moment: Moment) -> Self {
		self.moments.insert(moment.id.clone(), moment);
		self
	}

	pub fn with_comment(mut self, comment: Comment) -> Self {
		self.comments.insert(comment.id.clone(), comment);
		self
	}

	/// Makes every call to the given upstream fail.
	pub fn with_outage(mut self, upstream: Upstream) -> Self {
		self.outages.insert(upstream);
		self
	}

	/// Makes community lookups fail while roles, notices and news still answer.
	pub fn with_community_outage(mut self) -> Self {
		self.community_outage = true;
		self
	}

	/// Number of role lookups served so far.
	pub fn role_lookups(&self) -> usize {
		self.role_lookups.load(Ordering::SeqCst)
	}

	/// Number of community lookups served so far.
	pub fn community_lookups(&self) -> usize {
		self.community_lookups.load(Ordering::SeqCst)
	}

	fn check(&self, upstream: Upstream) -> Result<(), GatewayError> {
		if self.outages.contains(&upstream) {
			return Err(GatewayError::Transport(format!(
				"{upstream} service is down"
			)));
		}
		Ok(())
	}
}

#[async_trait]
impl SystemGateway for InMemoryGateways {
	async fn retrieve_user_roles(&self, user_id: &str) -> Result<Vec<Role>, GatewayError> {
		self.role_lookups.fetch_add(1, Ordering::SeqCst);
		self.check(Upstream::System)?;
		Ok(self.roles.get(user_id).cloned().unwrap_or_default())
	}

	async fn retrieve_community(&self, id: &str) -> Result<Option<Community>, GatewayError> {
		self.community_lookups.fetch_add(1, Ordering::SeqCst);
		self.check(Upstream::System)?;
		if self.community_outage {
			return Err(GatewayError::Status { status: 503 });
		}
		Ok(self.communities.get(id).cloned())
	}

	async fn retrieve_notice(&self, id: &str) -> Result<Option<Notice>, GatewayError> {
		self.check(Upstream::System)?;
		Ok(self.notices.get(id).cloned())
	}

	async fn retrieve_news(&self, id: &str) -> Result<Option<News>, GatewayError> {
		self.check(Upstream::System)?;
		Ok(self.news.get(id).cloned())
	}
}

#[async_trait]
impl PostGateway for InMemoryGateways {
	async fn retrieve_post(&self, id: &str) -> Result<Option<Post>, GatewayError> {
		self.check(Upstream::Post)?;
		Ok(self.posts.get(id).cloned())
	}
}

#[async_trait]
impl MomentGateway for InMemoryGateways {
	async fn retrieve_moment(&self, id: &str) -> Result<Option<Moment>, GatewayError> {
		self.check(Upstream::Moment)?;
		Ok(self.moments.get(id).cloned())
	}
}

#[async_trait]
impl CommentGateway for InMemoryGateways {
	async fn retrieve_comment(&self, id: &str) -> Result<Option<Comment>, GatewayError> {
		self.check(Upstream::Comment)?;
		Ok(self.comments.get(id).cloned())
	}
}

#[async_trait]
impl CollectionGateway for InMemoryGateways {
	async fn retrieve_cat(&self, id: &str) -> Result<Option<Cat>, GatewayError> {
		self.check(Upstream::Collection)?;
		Ok(self.cats.get(id).cloned())
	}
}
