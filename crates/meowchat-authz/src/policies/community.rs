// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Community-scoped policies: communities, notices, news and cats.
//!
//! Anyone may read. Super admins and admins of the owning community (or of its
//! direct parent) may write.

use crate::error::DecisionError;
use crate::gateway::{Gateways, Upstream};
use crate::policies::require;
use crate::roles::RoleResolver;
use crate::types::{DecisionRequest, ObjectType};

/// Evaluates community access. The object id is the community id.
pub async fn evaluate_community(
	gateways: &Gateways,
	request: &DecisionRequest,
) -> Result<bool, DecisionError> {
	if request.is_read() {
		return Ok(true);
	}

	Ok(
		RoleResolver::new(gateways.system.as_ref())
			.is_community_admin_or_super_admin(&request.user_id, &request.object_id)
			.await,
	)
}

/// Evaluates notice access.
pub async fn evaluate_notice(
	gateways: &Gateways,
	request: &DecisionRequest,
) -> Result<bool, DecisionError> {
	if request.is_read() {
		return Ok(true);
	}

	let id = &request.object_id;
	let notice = require(
		Upstream::System,
		ObjectType::Notice,
		id,
		gateways.system.retrieve_notice(id).await,
	)?;

	Ok(
		RoleResolver::new(gateways.system.as_ref())
			.is_community_admin_or_super_admin(&request.user_id, &notice.community_id)
			.await,
	)
}

/// Evaluates news access.
pub async fn evaluate_news(
	gateways: &Gateways,
	request: &DecisionRequest,
) -> Result<bool, DecisionError> {
	if request.is_read() {
		return Ok(true);
	}

	let id = &request.object_id;
	let news = require(
		Upstream::System,
		ObjectType::News,
		id,
		gateways.system.retrieve_news(id).await,
	)?;

	Ok(
		RoleResolver::new(gateways.system.as_ref())
			.is_community_admin_or_super_admin(&request.user_id, &news.community_id)
			.await,
	)
}

/// Evaluates cat access.
pub async fn evaluate_cat(
	gateways: &Gateways,
	request: &DecisionRequest,
) -> Result<bool, DecisionError> {
	if request.is_read() {
		return Ok(true);
	}

	let id = &request.object_id;
	let cat = require(
		Upstream::Collection,
		ObjectType::Cat,
		id,
		gateways.collection.retrieve_cat(id).await,
	)?;

	Ok(
		RoleResolver::new(gateways.system.as_ref())
			.is_community_admin_or_super_admin(&request.user_id, &cat.community_id)
			.await,
	)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::memory::InMemoryGateways;
	use crate::types::{Cat, Community, News, Notice, Role};

	fn gateways(directory: InMemoryGateways) -> (Arc<InMemoryGateways>, Gateways) {
		let directory = Arc::new(directory);
		(directory.clone(), Gateways::from_shared(directory))
	}

	mod community_policies {
		use super::*;

		#[tokio::test]
		async fn anyone_can_read() {
			let (directory, gw) = gateways(InMemoryGateways::new());
			let req = DecisionRequest::read("u1", ObjectType::Community, "");

			assert!(evaluate_community(&gw, &req).await.unwrap());
			assert_eq!(directory.role_lookups(), 0);
		}

		#[tokio::test]
		async fn plain_user_cannot_write() {
			let (_, gw) = gateways(InMemoryGateways::new().with_roles("u1", [Role::user()]));
			let req = DecisionRequest::write("u1", ObjectType::Community, "c1");

			assert!(!evaluate_community(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn super_admin_can_write() {
			let (_, gw) = gateways(InMemoryGateways::new().with_roles("u1", [Role::super_admin()]));
			let req = DecisionRequest::write("u1", ObjectType::Community, "");

			assert!(evaluate_community(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn admin_can_write_own_community() {
			let (_, gw) = gateways(InMemoryGateways::new().with_roles("u1", [Role::community_admin("c1")]));
			let req = DecisionRequest::write("u1", ObjectType::Community, "c1");

			assert!(evaluate_community(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn admin_can_write_sub_community() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_roles("u1", [Role::community_admin("parent")])
					.with_community(Community::child("child", "parent")),
			);
			let req = DecisionRequest::write("u1", ObjectType::Community, "child");

			assert!(evaluate_community(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn admin_of_other_community_cannot_write() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_roles("u2", [Role::community_admin("c1")])
					.with_community(Community::child("c2", "c9")),
			);
			let req = DecisionRequest::write("u2", ObjectType::Community, "c2");

			assert!(!evaluate_community(&gw, &req).await.unwrap());
		}
	}

	mod notice_policies {
		use super::*;

		#[tokio::test]
		async fn anyone_can_read_missing_notice() {
			let (_, gw) = gateways(InMemoryGateways::new());
			let req = DecisionRequest::read("u1", ObjectType::Notice, "nope");

			assert!(evaluate_notice(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn admin_of_notice_community_can_write() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_notice(Notice::new("n1", "c1"))
					.with_roles("u1", [Role::community_admin("c1")]),
			);
			let req = DecisionRequest::write("u1", ObjectType::Notice, "n1");

			assert!(evaluate_notice(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn admin_of_parent_community_can_write() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_notice(Notice::new("n1", "child"))
					.with_community(Community::child("child", "parent"))
					.with_roles(
						"u1",
						[Role::community_admin("any_parent"), Role::community_admin("parent")],
					),
			);
			let req = DecisionRequest::write("u1", ObjectType::Notice, "n1");

			assert!(evaluate_notice(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn admin_of_other_community_cannot_write() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_notice(Notice::new("n1", "c2"))
					.with_community(Community::root("c2"))
					.with_roles("u1", [Role::community_admin("c1")]),
			);
			let req = DecisionRequest::write("u1", ObjectType::Notice, "n1");

			assert!(!evaluate_notice(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn missing_notice_is_not_found() {
			let (directory, gw) =
				gateways(InMemoryGateways::new().with_roles("u1", [Role::super_admin()]));
			let req = DecisionRequest::write("u1", ObjectType::Notice, "n1");

			let err = evaluate_notice(&gw, &req).await.unwrap_err();
			assert!(matches!(err, DecisionError::ResourceNotFound { object_type: ObjectType::Notice, .. }));
			assert_eq!(directory.role_lookups(), 0);
		}
	}

	mod news_policies {
		use super::*;

		#[tokio::test]
		async fn super_admin_can_write() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_news(News::new("nw1", "c1"))
					.with_roles("u1", [Role::super_admin()]),
			);
			let req = DecisionRequest::write("u1", ObjectType::News, "nw1");

			assert!(evaluate_news(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn plain_user_cannot_write() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_news(News::new("nw1", "c1"))
					.with_roles("u1", [Role::user()]),
			);
			let req = DecisionRequest::write("u1", ObjectType::News, "nw1");

			assert!(!evaluate_news(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn system_outage_is_unavailable() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_news(News::new("nw1", "c1"))
					.with_outage(Upstream::System),
			);
			let req = DecisionRequest::write("u1", ObjectType::News, "nw1");

			let err = evaluate_news(&gw, &req).await.unwrap_err();
			assert!(err.is_internal());
		}
	}

	mod cat_policies {
		use super::*;

		#[tokio::test]
		async fn admin_of_cat_community_can_write() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_cat(Cat::new("cat1", "c1"))
					.with_roles("u1", [Role::community_admin("c1")]),
			);
			let req = DecisionRequest::write("u1", ObjectType::Cat, "cat1");

			assert!(evaluate_cat(&gw, &req).await.unwrap());
		}

		#[tokio::test]
		async fn missing_cat_is_not_found() {
			let (_, gw) = gateways(InMemoryGateways::new().with_roles("u1", [Role::super_admin()]));
			let req = DecisionRequest::write("u1", ObjectType::Cat, "cat1");

			assert!(evaluate_cat(&gw, &req).await.is_err());
		}

		#[tokio::test]
		async fn collection_outage_is_unavailable() {
			let (_, gw) = gateways(
				InMemoryGateways::new()
					.with_cat(Cat::new("cat1", "c1"))
					.with_roles("u1", [Role::super_admin()])
					.with_outage(Upstream::Collection),
			);
			let req = DecisionRequest::write("u1", ObjectType::Cat, "cat1");

			assert!(matches!(
				evaluate_cat(&gw, &req).await,
				Err(DecisionError::GatewayUnavailable {
					upstream: Upstream::Collection,
					..
				})
			));
		}
	}
}
