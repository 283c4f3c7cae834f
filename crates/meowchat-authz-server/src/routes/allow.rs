// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization decision handler.

use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use meowchat_authz::DecisionResponse;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::AppState;

/// Wire form of a decision request. Type and action stay strings so that
/// values this service does not know are denied rather than rejected.
#[derive(Debug, Deserialize)]
pub struct AllowRequest {
	pub user_id: String,
	pub object_type: String,
	#[serde(default)]
	pub object_id: String,
	pub action: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
}

/// POST /v1/allow - May the user perform the action on the object?
///
/// Always answers 200 with a decision once the body parses. Only a body that
/// is not a decision request at all gets a 400.
pub async fn check_permission(
	State(state): State<AppState>,
	payload: Result<Json<AllowRequest>, JsonRejection>,
) -> Response {
	let Json(req) = match payload {
		Ok(payload) => payload,
		Err(rejection) => {
			debug!(error = %rejection, "rejected malformed decision request");
			return (
				StatusCode::BAD_REQUEST,
				Json(ErrorResponse {
					error: rejection.body_text(),
				}),
			)
				.into_response();
		}
	};

	let decision: DecisionResponse = state
		.engine
		.decide_raw(&req.user_id, &req.object_type, &req.object_id, &req.action)
		.await;

	Json(decision).into_response()
}
