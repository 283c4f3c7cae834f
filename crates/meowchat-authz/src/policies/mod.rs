// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-object-type access policies.
//!
//! Every policy has the same shape: reads are allowed outright, writes need an
//! ownership or role check that may first fetch the target. Policies return
//! `Err` for a missing target or an unreachable upstream; the engine turns that
//! into a denial.

pub mod comment;
pub mod community;
pub mod moment;
pub mod post;

use crate::error::DecisionError;
use crate::gateway::{GatewayError, Upstream};
use crate::types::ObjectType;

/// Converts a gateway lookup into the target object or the reason it is absent.
///
/// This is the only place a gateway result is interpreted by the policies.
pub(crate) fn require<T>(
	upstream: Upstream,
	object_type: ObjectType,
	id: &str,
	result: Result<Option<T>, GatewayError>,
) -> Result<T, DecisionError> {
	match result {
		Ok(Some(object)) => Ok(object),
		Ok(None) => Err(DecisionError::ResourceNotFound {
			object_type,
			id: id.to_string(),
		}),
		Err(source) => Err(DecisionError::GatewayUnavailable { upstream, source }),
	}
}
