// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role resolution against the identity store.
//!
//! Community admin scopes reach exactly one level down: an admin of `C1` governs
//! `C1` itself and every community whose immediate parent is `C1`. Grandchildren
//! are not governed.

use tracing::{debug, warn};

use crate::gateway::SystemGateway;
use crate::types::{Role, RoleType};

/// Answers role questions for a single decision.
///
/// Nothing is cached: every call goes to the identity store.
#[derive(Clone, Copy)]
pub struct RoleResolver<'a> {
	system: &'a dyn SystemGateway,
}

impl<'a> RoleResolver<'a> {
	pub fn new(system: &'a dyn SystemGateway) -> Self {
		Self { system }
	}

	/// Returns true if the user holds any role of the given type.
	pub async fn has_role(&self, user_id: &str, role_type: RoleType) -> bool {
		let Some(roles) = self.roles(user_id).await else {
			return false;
		};

		roles.iter().any(|r| r.role_type == role_type)
	}

	/// Returns true if the user is a super admin, or a community admin whose scope
	/// governs `community_id`.
	///
	/// Roles are checked in order and the first match wins. Each community admin
	/// role whose scope differs from `community_id` costs one community lookup.
	pub async fn is_community_admin_or_super_admin(&self, user_id: &str, community_id: &str) -> bool {
		let Some(roles) = self.roles(user_id).await else {
			return false;
		};

		for role in &roles {
			match role.role_type {
				RoleType::SuperAdmin => return true,
				RoleType::CommunityAdmin => {
					if self.governs(&role.community_id, community_id).await {
						return true;
					}
				}
				RoleType::User | RoleType::Other => {}
			}
		}

		false
	}

	/// One-hop ancestry: `scope` governs `target` if they are equal or `scope` is
	/// `target`'s immediate parent.
	async fn governs(&self, scope: &str, target: &str) -> bool {
		if scope.is_empty() {
			debug!("ignoring community admin role without a scope");
			return false;
		}
		if scope == target {
			return true;
		}

		match self.system.retrieve_community(target).await {
			Ok(Some(community)) => community.parent_id == scope,
			Ok(None) => {
				debug!(community_id = %target, "community not found");
				false
			}
			Err(e) => {
				warn!(community_id = %target, error = %e, "community lookup failed");
				false
			}
		}
	}

	async fn roles(&self, user_id: &str) -> Option<Vec<Role>> {
		match self.system.retrieve_user_roles(user_id).await {
			Ok(roles) => Some(roles),
			Err(e) => {
				warn!(user_id = %user_id, error = %e, "role lookup failed");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gateway::Upstream;
	use crate::memory::InMemoryGateways;
	use crate::types::Community;

	mod has_role {
		use super::*;

		#[tokio::test]
		async fn finds_matching_role() {
			let directory = InMemoryGateways::new().with_roles("u1", [Role::user(), Role::super_admin()]);
			let resolver = RoleResolver::new(&directory);

			assert!(resolver.has_role("u1", RoleType::SuperAdmin).await);
			assert!(!resolver.has_role("u1", RoleType::CommunityAdmin).await);
		}

		#[tokio::test]
		async fn user_without_roles_has_none() {
			let directory = InMemoryGateways::new();
			let resolver = RoleResolver::new(&directory);

			assert!(!resolver.has_role("u1", RoleType::User).await);
		}

		#[tokio::test]
		async fn identity_outage_means_no_role() {
			let directory = InMemoryGateways::new()
				.with_roles("u1", [Role::super_admin()])
				.with_outage(Upstream::System);
			let resolver = RoleResolver::new(&directory);

			assert!(!resolver.has_role("u1", RoleType::SuperAdmin).await);
		}
	}

	mod community_scope {
		use super::*;

		#[tokio::test]
		async fn super_admin_governs_everything() {
			let directory = InMemoryGateways::new().with_roles("u1", [Role::super_admin()]);
			let resolver = RoleResolver::new(&directory);

			assert!(resolver.is_community_admin_or_super_admin("u1", "anywhere").await);
			assert_eq!(directory.community_lookups(), 0);
		}

		#[tokio::test]
		async fn admin_governs_own_community_without_lookup() {
			let directory = InMemoryGateways::new().with_roles("u1", [Role::community_admin("c1")]);
			let resolver = RoleResolver::new(&directory);

			assert!(resolver.is_community_admin_or_super_admin("u1", "c1").await);
			assert_eq!(directory.community_lookups(), 0);
		}

		#[tokio::test]
		async fn admin_governs_direct_child() {
			let directory = InMemoryGateways::new()
				.with_roles("u1", [Role::community_admin("parent")])
				.with_community(Community::child("child", "parent"));
			let resolver = RoleResolver::new(&directory);

			assert!(resolver.is_community_admin_or_super_admin("u1", "child").await);
		}

		#[tokio::test]
		async fn admin_does_not_govern_grandchild() {
			let directory = InMemoryGateways::new()
				.with_roles("u1", [Role::community_admin("root")])
				.with_community(Community::child("parent", "root"))
				.with_community(Community::child("child", "parent"));
			let resolver = RoleResolver::new(&directory);

			assert!(!resolver.is_community_admin_or_super_admin("u1", "child").await);
		}

		#[tokio::test]
		async fn admin_does_not_govern_unrelated_community() {
			let directory = InMemoryGateways::new()
				.with_roles("u2", [Role::community_admin("c1")])
				.with_community(Community::child("c2", "c9"));
			let resolver = RoleResolver::new(&directory);

			assert!(!resolver.is_community_admin_or_super_admin("u2", "c2").await);
		}

		#[tokio::test]
		async fn unscoped_admin_role_grants_nothing() {
			let directory = InMemoryGateways::new()
				.with_roles("u1", [Role::community_admin("")])
				.with_community(Community::root("c1"));
			let resolver = RoleResolver::new(&directory);

			assert!(!resolver.is_community_admin_or_super_admin("u1", "c1").await);
			assert!(!resolver.is_community_admin_or_super_admin("u1", "").await);
		}

		#[tokio::test]
		async fn plain_user_is_not_admin() {
			let directory = InMemoryGateways::new()
				.with_roles("u1", [Role::user()])
				.with_community(Community::root("c1"));
			let resolver = RoleResolver::new(&directory);

			assert!(!resolver.is_community_admin_or_super_admin("u1", "c1").await);
		}

		#[tokio::test]
		async fn each_admin_role_looks_up_the_community() {
			let directory = InMemoryGateways::new()
				.with_roles(
					"u1",
					[
						Role::community_admin("elsewhere"),
						Role::community_admin("other"),
						Role::community_admin("parent"),
					],
				)
				.with_community(Community::child("child", "parent"));
			let resolver = RoleResolver::new(&directory);

			assert!(resolver.is_community_admin_or_super_admin("u1", "child").await);
			assert_eq!(directory.community_lookups(), 3);
		}

		#[tokio::test]
		async fn community_outage_skips_role_but_super_admin_still_wins() {
			let directory = InMemoryGateways::new()
				.with_roles("u1", [Role::community_admin("parent"), Role::super_admin()])
				.with_community(Community::child("child", "parent"))
				.with_community_outage();
			let resolver = RoleResolver::new(&directory);

			assert!(resolver.is_community_admin_or_super_admin("u1", "child").await);
		}

		#[tokio::test]
		async fn role_outage_denies() {
			let directory = InMemoryGateways::new()
				.with_roles("u1", [Role::super_admin()])
				.with_outage(Upstream::System);
			let resolver = RoleResolver::new(&directory);

			assert!(!resolver.is_community_admin_or_super_admin("u1", "c1").await);
		}
	}
}
