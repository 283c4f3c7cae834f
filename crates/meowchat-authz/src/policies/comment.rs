// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Comment access policy.
//!
//! Whoever may write the post or moment a comment hangs off may also write every
//! comment under it. Delegation is a single hop: the post and moment policies
//! never delegate further.

use tracing::debug;

use crate::error::DecisionError;
use crate::gateway::{Gateways, Upstream};
use crate::policies::{moment, post, require};
use crate::roles::RoleResolver;
use crate::types::{CommentParent, DecisionRequest, ObjectType, RoleType};

/// Anyone may read. Super admins, the comment's author and anyone allowed to
/// write the parent object may write.
pub async fn evaluate(gateways: &Gateways, request: &DecisionRequest) -> Result<bool, DecisionError> {
	if request.is_read() {
		return Ok(true);
	}

	if RoleResolver::new(gateways.system.as_ref())
		.has_role(&request.user_id, RoleType::SuperAdmin)
		.await
	{
		return Ok(true);
	}

	let id = &request.object_id;
	let comment = require(
		Upstream::Comment,
		ObjectType::Comment,
		id,
		gateways.comments.retrieve_comment(id).await,
	)?;

	if comment.author_id == request.user_id {
		return Ok(true);
	}

	match comment.parent_type {
		CommentParent::Post => {
			let parent = request.delegate_to(ObjectType::Post, comment.parent_id);
			post::evaluate(gateways, &parent).await
		}
		CommentParent::Moment => {
			let parent = request.delegate_to(ObjectType::Moment, comment.parent_id);
			moment::evaluate(gateways, &parent).await
		}
		CommentParent::Other => {
			debug!(comment_id = %comment.id, "comment has no delegable parent");
			Ok(false)
		}
	}
}
