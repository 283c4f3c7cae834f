// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Post access policy.

use crate::error::DecisionError;
use crate::gateway::{Gateways, Upstream};
use crate::policies::require;
use crate::roles::RoleResolver;
use crate::types::{DecisionRequest, ObjectType, RoleType};

/// Anyone may read. Super admins and the post's owner may write.
///
/// The super admin check runs before the post is fetched, so a super admin may
/// write even when the post cannot be found.
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
	let post = require(
		Upstream::Post,
		ObjectType::Post,
		id,
		gateways.posts.retrieve_post(id).await,
	)?;

	Ok(post.owner_user_id == request.user_id)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::memory::InMemoryGateways;
	use crate::types::{Post, Role};

	fn gateways(directory: InMemoryGateways) -> Gateways {
		Gateways::from_shared(Arc::new(directory))
	}

	#[tokio::test]
	async fn anyone_can_read() {
		let gw = gateways(InMemoryGateways::new().with_outage(Upstream::Post));
		let req = DecisionRequest::read("u1", ObjectType::Post, "p1");

		assert!(evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn owner_can_write() {
		let gw = gateways(InMemoryGateways::new().with_post(Post::new("p1", "u1")));
		let req = DecisionRequest::write("u1", ObjectType::Post, "p1");

		assert!(evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn non_owner_cannot_write() {
		let gw = gateways(
			InMemoryGateways::new()
				.with_post(Post::new("p1", "someone_else"))
				.with_roles("u1", [Role::user()]),
		);
		let req = DecisionRequest::write("u1", ObjectType::Post, "p1");

		assert!(!evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn community_admin_is_not_enough() {
		let gw = gateways(
			InMemoryGateways::new()
				.with_post(Post::new("p1", "someone_else"))
				.with_roles("u1", [Role::community_admin("c1")]),
		);
		let req = DecisionRequest::write("u1", ObjectType::Post, "p1");

		assert!(!evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn super_admin_can_write_without_lookup() {
		let gw = gateways(
			InMemoryGateways::new()
				.with_roles("admin", [Role::super_admin()])
				.with_outage(Upstream::Post),
		);
		let req = DecisionRequest::write("admin", ObjectType::Post, "");

		assert!(evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn role_outage_falls_back_to_ownership() {
		let gw = gateways(
			InMemoryGateways::new()
				.with_post(Post::new("p1", "u1"))
				.with_outage(Upstream::System),
		);
		let req = DecisionRequest::write("u1", ObjectType::Post, "p1");

		assert!(evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn missing_post_is_not_found() {
		let gw = gateways(InMemoryGateways::new());
		let req = DecisionRequest::write("u1", ObjectType::Post, "p1");

		assert!(matches!(
			evaluate(&gw, &req).await,
			Err(DecisionError::ResourceNotFound {
				object_type: ObjectType::Post,
				..
			})
		));
	}
}
