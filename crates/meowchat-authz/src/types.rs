// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for authorization decisions.
//!
//! - [`DecisionRequest`] / [`DecisionResponse`]: the decision call itself
//! - [`Role`]: what the identity store says a user holds
//! - [`Community`], [`Notice`], [`News`], [`Cat`], [`Post`], [`Moment`], [`Comment`]:
//!   the resource descriptors fetched from upstream services
//!
//! Resource descriptors are owned by the upstream services. They are fetched fresh
//! for every decision and never mutated here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecisionError;

/// Category of the object being accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
	Community,
	Comment,
	Post,
	Notice,
	News,
	Cat,
	Moment,
}

impl ObjectType {
	pub const ALL: [ObjectType; 7] = [
		ObjectType::Community,
		ObjectType::Comment,
		ObjectType::Post,
		ObjectType::Notice,
		ObjectType::News,
		ObjectType::Cat,
		ObjectType::Moment,
	];

	/// Returns the wire tag for this object type.
	pub fn as_str(self) -> &'static str {
		match self {
			ObjectType::Community => "community",
			ObjectType::Comment => "comment",
			ObjectType::Post => "post",
			ObjectType::Notice => "notice",
			ObjectType::News => "news",
			ObjectType::Cat => "cat",
			ObjectType::Moment => "moment",
		}
	}
}

impl fmt::Display for ObjectType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ObjectType {
	type Err = DecisionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ObjectType::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| DecisionError::UnknownObjectType(s.to_string()))
	}
}

/// The operation being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	Read,
	Write,
}

impl Action {
	pub fn as_str(self) -> &'static str {
		match self {
			Action::Read => "read",
			Action::Write => "write",
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Action {
	type Err = DecisionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"read" => Ok(Action::Read),
			"write" => Ok(Action::Write),
			other => Err(DecisionError::UnknownAction(other.to_string())),
		}
	}
}

/// A single authorization question.
///
/// `user_id` is trusted as already authenticated upstream. `object_id` may be
/// empty for reads or type-level checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRequest {
	pub user_id: String,
	pub object_type: ObjectType,
	#[serde(default)]
	pub object_id: String,
	pub action: Action,
}

impl DecisionRequest {
	pub fn new(
		user_id: impl Into<String>,
		object_type: ObjectType,
		object_id: impl Into<String>,
		action: Action,
	) -> Self {
		Self {
			user_id: user_id.into(),
			object_type,
			object_id: object_id.into(),
			action,
		}
	}

	/// Creates a read request.
	pub fn read(
		user_id: impl Into<String>,
		object_type: ObjectType,
		object_id: impl Into<String>,
	) -> Self {
		Self::new(user_id, object_type, object_id, Action::Read)
	}

	/// Creates a write request.
	pub fn write(
		user_id: impl Into<String>,
		object_type: ObjectType,
		object_id: impl Into<String>,
	) -> Self {
		Self::new(user_id, object_type, object_id, Action::Write)
	}

	/// Parses a request from its wire form.
	pub fn parse(
		user_id: impl Into<String>,
		object_type: &str,
		object_id: impl Into<String>,
		action: &str,
	) -> Result<Self, DecisionError> {
		Ok(Self::new(
			user_id,
			object_type.parse()?,
			object_id,
			action.parse()?,
		))
	}

	/// Builds the request used to evaluate the object this one hangs off.
	///
	/// User and action are carried over unchanged.
	pub fn delegate_to(&self, object_type: ObjectType, object_id: impl Into<String>) -> Self {
		Self {
			user_id: self.user_id.clone(),
			object_type,
			object_id: object_id.into(),
			action: self.action,
		}
	}

	pub fn is_read(&self) -> bool {
		matches!(self.action, Action::Read)
	}
}

/// The answer to a [`DecisionRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResponse {
	pub allowed: bool,
}

impl DecisionResponse {
	pub fn allow() -> Self {
		Self { allowed: true }
	}

	pub fn deny() -> Self {
		Self { allowed: false }
	}
}

impl From<bool> for DecisionResponse {
	fn from(allowed: bool) -> Self {
		Self { allowed }
	}
}

/// Kinds of role the identity store hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoleType {
	User,
	CommunityAdmin,
	SuperAdmin,
	/// A role this service does not interpret. Grants nothing.
	#[serde(other)]
	Other,
}

/// A role held by a user.
///
/// `community_id` is only meaningful for [`RoleType::CommunityAdmin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	#[serde(rename = "type")]
	pub role_type: RoleType,
	#[serde(default)]
	pub community_id: String,
}

impl Role {
	pub fn user() -> Self {
		Self {
			role_type: RoleType::User,
			community_id: String::new(),
		}
	}

	pub fn super_admin() -> Self {
		Self {
			role_type: RoleType::SuperAdmin,
			community_id: String::new(),
		}
	}

	pub fn community_admin(community_id: impl Into<String>) -> Self {
		Self {
			role_type: RoleType::CommunityAdmin,
			community_id: community_id.into(),
		}
	}
}

/// A community. An empty `parent_id` marks a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
	pub id: String,
	#[serde(default)]
	pub parent_id: String,
}

impl Community {
	pub fn root(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			parent_id: String::new(),
		}
	}

	pub fn child(id: impl Into<String>, parent_id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			parent_id: parent_id.into(),
		}
	}

	pub fn is_root(&self) -> bool {
		self.parent_id.is_empty()
	}
}

/// A community notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
	pub id: String,
	pub community_id: String,
}

impl Notice {
	pub fn new(id: impl Into<String>, community_id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			community_id: community_id.into(),
		}
	}
}

/// A news (carousel) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
	pub id: String,
	pub community_id: String,
}

impl News {
	pub fn new(id: impl Into<String>, community_id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			community_id: community_id.into(),
		}
	}
}

/// A cat profile in a community collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
	pub id: String,
	pub community_id: String,
}

impl Cat {
	pub fn new(id: impl Into<String>, community_id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			community_id: community_id.into(),
		}
	}
}

/// A post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
	pub id: String,
	pub owner_user_id: String,
}

impl Post {
	pub fn new(id: impl Into<String>, owner_user_id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			owner_user_id: owner_user_id.into(),
		}
	}
}

/// A moment, posted by a user inside a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
	pub id: String,
	pub owner_user_id: String,
	pub community_id: String,
}

impl Moment {
	pub fn new(
		id: impl Into<String>,
		owner_user_id: impl Into<String>,
		community_id: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			owner_user_id: owner_user_id.into(),
			community_id: community_id.into(),
		}
	}
}

/// What a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentParent {
	Post,
	Moment,
	#[serde(other)]
	Other,
}

/// A comment on a post or a moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
	pub id: String,
	pub author_id: String,
	pub parent_type: CommentParent,
	pub parent_id: String,
}

impl Comment {
	pub fn on_post(
		id: impl Into<String>,
		author_id: impl Into<String>,
		post_id: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			author_id: author_id.into(),
			parent_type: CommentParent::Post,
			parent_id: post_id.into(),
		}
	}

	pub fn on_moment(
		id: impl Into<String>,
		author_id: impl Into<String>,
		moment_id: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			author_id: author_id.into(),
			parent_type: CommentParent::Moment,
			parent_id: moment_id.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod parsing {
		use super::*;

		#[test]
		fn object_type_tags_round_trip() {
			for object_type in ObjectType::ALL {
				assert_eq!(object_type.as_str().parse::<ObjectType>().ok(), Some(object_type));
			}
		}

		#[test]
		fn unknown_object_type_is_rejected() {
			let err = "thread".parse::<ObjectType>().unwrap_err();
			assert!(matches!(err, DecisionError::UnknownObjectType(t) if t == "thread"));
		}

		#[test]
		fn object_type_tags_are_case_sensitive() {
			assert!("Post".parse::<ObjectType>().is_err());
		}

		#[test]
		fn unknown_action_is_rejected() {
			assert!(matches!(
				"delete".parse::<Action>(),
				Err(DecisionError::UnknownAction(a)) if a == "delete"
			));
		}

		#[test]
		fn parse_builds_request() {
			let req = DecisionRequest::parse("u1", "moment", "m1", "write").unwrap();
			assert_eq!(req, DecisionRequest::write("u1", ObjectType::Moment, "m1"));
		}
	}

	mod delegation {
		use super::*;

		#[test]
		fn delegate_keeps_user_and_action() {
			let req = DecisionRequest::write("u1", ObjectType::Comment, "c1");
			let parent = req.delegate_to(ObjectType::Post, "p1");

			assert_eq!(parent.user_id, "u1");
			assert_eq!(parent.action, Action::Write);
			assert_eq!(parent.object_type, ObjectType::Post);
			assert_eq!(parent.object_id, "p1");
		}
	}

	mod wire_format {
		use super::*;

		#[test]
		fn role_types_use_camel_case_tags() {
			let role: Role =
				serde_json::from_str(r#"{"type":"communityAdmin","community_id":"c1"}"#).unwrap();
			assert_eq!(role, Role::community_admin("c1"));
		}

		#[test]
		fn unrecognised_role_type_is_other() {
			let role: Role = serde_json::from_str(r#"{"type":"moderator"}"#).unwrap();
			assert_eq!(role.role_type, RoleType::Other);
			assert!(role.community_id.is_empty());
		}

		#[test]
		fn community_without_parent_is_root() {
			let community: Community = serde_json::from_str(r#"{"id":"c1"}"#).unwrap();
			assert!(community.is_root());
		}

		#[test]
		fn comment_on_unknown_parent_type() {
			let comment: Comment = serde_json::from_str(
				r#"{"id":"c1","author_id":"u1","parent_type":"cat","parent_id":"x"}"#,
			)
			.unwrap();
			assert_eq!(comment.parent_type, CommentParent::Other);
		}
	}
}
