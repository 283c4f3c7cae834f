// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decision dispatcher.
//!
//! [`DecisionEngine::decide`] routes a request to the policy for its object type
//! and turns the outcome into a [`DecisionResponse`]. This is the single point
//! where a policy error becomes a denial, so the call is total: it always
//! answers and never fails open.

use tracing::{debug, instrument, warn};

use crate::error::DecisionError;
use crate::gateway::Gateways;
use crate::policies::{comment, community, moment, post};
use crate::types::{DecisionRequest, DecisionResponse, ObjectType};

/// Stateless evaluator shared by every request.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
	gateways: Gateways,
}

impl DecisionEngine {
	pub fn new(gateways: Gateways) -> Self {
		Self { gateways }
	}

	pub fn gateways(&self) -> &Gateways {
		&self.gateways
	}

	/// Decides a request given in wire form.
	///
	/// Unknown object types and actions are denied.
	pub async fn decide_raw(
		&self,
		user_id: &str,
		object_type: &str,
		object_id: &str,
		action: &str,
	) -> DecisionResponse {
		match DecisionRequest::parse(user_id, object_type, object_id, action) {
			Ok(request) => self.decide(&request).await,
			Err(e) => {
				debug!(user_id = %user_id, error = %e, "denied: malformed request");
				DecisionResponse::deny()
			}
		}
	}

	/// Decides whether the request is allowed.
	#[instrument(
		level = "debug",
		skip(self, request),
		fields(
			user_id = %request.user_id,
			object_type = %request.object_type,
			object_id = %request.object_id,
			action = %request.action,
		)
	)]
	pub async fn decide(&self, request: &DecisionRequest) -> DecisionResponse {
		match self.evaluate(request).await {
			Ok(allowed) => {
				debug!(allowed, "decision");
				DecisionResponse::from(allowed)
			}
			Err(e) if e.is_internal() => {
				warn!(error = %e, "denied: upstream failure");
				DecisionResponse::deny()
			}
			Err(e) => {
				debug!(error = %e, "denied");
				DecisionResponse::deny()
			}
		}
	}

	async fn evaluate(&self, request: &DecisionRequest) -> Result<bool, DecisionError> {
		let gw = &self.gateways;
		match request.object_type {
			ObjectType::Community => community::evaluate_community(gw, request).await,
			ObjectType::Notice => community::evaluate_notice(gw, request).await,
			ObjectType::News => community::evaluate_news(gw, request).await,
			ObjectType::Cat => community::evaluate_cat(gw, request).await,
			ObjectType::Post => post::evaluate(gw, request).await,
			ObjectType::Moment => moment::evaluate(gw, request).await,
			ObjectType::Comment => comment::evaluate(gw, request).await,
		}
	}
}
