// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Moment access policy.

use crate::error::DecisionError;
use crate::gateway::{Gateways, Upstream};
use crate::policies::require;
use crate::roles::RoleResolver;
use crate::types::{DecisionRequest, ObjectType};

/// Anyone may read. The moment's owner, super admins and admins of the moment's
/// community may write.
pub async fn evaluate(gateways: &Gateways, request: &DecisionRequest) -> Result<bool, DecisionError> {
	if request.is_read() {
		return Ok(true);
	}

	let id = &request.object_id;
	let moment = require(
		Upstream::Moment,
		ObjectType::Moment,
		id,
		gateways.moments.retrieve_moment(id).await,
	)?;

	if moment.owner_user_id == request.user_id {
		return Ok(true);
	}

	Ok(
		RoleResolver::new(gateways.system.as_ref())
			.is_community_admin_or_super_admin(&request.user_id, &moment.community_id)
			.await,
	)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::memory::InMemoryGateways;
	use crate::types::{Community, Moment, Role};

	fn gateways(directory: InMemoryGateways) -> Gateways {
		Gateways::from_shared(Arc::new(directory))
	}

	#[tokio::test]
	async fn anyone_can_read() {
		let gw = gateways(InMemoryGateways::new());
		let req = DecisionRequest::read("u1", ObjectType::Moment, "m1");

		assert!(evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn owner_can_write_without_role_lookup() {
		let directory = Arc::new(InMemoryGateways::new().with_moment(Moment::new("m1", "u1", "c1")));
		let gw = Gateways::from_shared(directory.clone());
		let req = DecisionRequest::write("u1", ObjectType::Moment, "m1");

		assert!(evaluate(&gw, &req).await.unwrap());
		assert_eq!(directory.role_lookups(), 0);
	}

	#[tokio::test]
	async fn community_admin_can_write() {
		let gw = gateways(
			InMemoryGateways::new()
				.with_moment(Moment::new("m1", "owner", "c1"))
				.with_roles("u1", [Role::community_admin("c1")]),
		);
		let req = DecisionRequest::write("u1", ObjectType::Moment, "m1");

		assert!(evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn parent_community_admin_can_write() {
		let gw = gateways(
			InMemoryGateways::new()
				.with_moment(Moment::new("m1", "owner", "child"))
				.with_community(Community::child("child", "parent"))
				.with_roles("u1", [Role::community_admin("parent")]),
		);
		let req = DecisionRequest::write("u1", ObjectType::Moment, "m1");

		assert!(evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn stranger_cannot_write() {
		let gw = gateways(
			InMemoryGateways::new()
				.with_moment(Moment::new("m1", "owner", "c1"))
				.with_community(Community::root("c1")),
		);
		let req = DecisionRequest::write("u1", ObjectType::Moment, "m1");

		assert!(!evaluate(&gw, &req).await.unwrap());
	}

	#[tokio::test]
	async fn moment_outage_is_unavailable() {
		let gw = gateways(
			InMemoryGateways::new()
				.with_moment(Moment::new("m1", "u1", "c1"))
				.with_outage(Upstream::Moment),
		);
		let req = DecisionRequest::write("u1", ObjectType::Moment, "m1");

		assert!(evaluate(&gw, &req).await.unwrap_err().is_internal());
	}
}
