// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP front end for the MeowChat authorization decision engine.

pub mod api;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
