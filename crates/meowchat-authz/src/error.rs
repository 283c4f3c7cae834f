// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reasons a decision ends in denial.
//!
//! None of these ever reach the caller of [`crate::DecisionEngine::decide`]:
//! the engine logs them and answers `allowed = false`.

use thiserror::Error;

use crate::gateway::{GatewayError, Upstream};
use crate::types::ObjectType;

/// Errors raised while evaluating a policy.
#[derive(Debug, Error)]
pub enum DecisionError {
	/// The upstream call failed.
	#[error("{upstream} service unavailable: {source}")]
	GatewayUnavailable {
		upstream: Upstream,
		#[source]
		source: GatewayError,
	},

	/// The upstream call succeeded but the object does not exist.
	#[error("{object_type} not found: {id:?}")]
	ResourceNotFound { object_type: ObjectType, id: String },

	/// No policy is registered for the object type.
	#[error("unknown object type: {0:?}")]
	UnknownObjectType(String),

	/// The action is neither read nor write.
	#[error("unknown action: {0:?}")]
	UnknownAction(String),
}

impl DecisionError {
	/// Returns true if the denial was caused by infrastructure rather than input.
	pub fn is_internal(&self) -> bool {
		matches!(self, DecisionError::GatewayUnavailable { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gateway_failures_are_internal() {
		let err = DecisionError::GatewayUnavailable {
			upstream: Upstream::Post,
			source: GatewayError::Status { status: 503 },
		};
		assert!(err.is_internal());
	}

	#[test]
	fn input_errors_are_not_internal() {
		assert!(!DecisionError::UnknownObjectType("x".into()).is_internal());
		assert!(!DecisionError::UnknownAction("x".into()).is_internal());
		assert!(!DecisionError::ResourceNotFound {
			object_type: ObjectType::Post,
			id: "p1".into(),
		}
		.is_internal());
	}

	#[test]
	fn not_found_message_names_the_object() {
		let err = DecisionError::ResourceNotFound {
			object_type: ObjectType::Notice,
			id: "n1".into(),
		};
		assert_eq!(err.to_string(), "notice not found: \"n1\"");
	}
}
