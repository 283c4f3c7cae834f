// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router wiring.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};
use meowchat_authz::{DecisionEngine, Gateways};

use crate::routes::{allow, health};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
	pub engine: Arc<DecisionEngine>,
}

pub fn create_app_state(gateways: Gateways) -> AppState {
	AppState {
		engine: Arc::new(DecisionEngine::new(gateways)),
	}
}

/// Builds the router. Request tracing is layered on by the binary.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health::health_check))
		.route("/v1/allow", post(allow::check_permission))
		.with_state(state)
}
