// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization decisions for MeowChat resources.
//!
//! Other services ask this crate one question: may user `U` perform action `A`
//! on object `O` of type `T`? The answer is a plain allow/deny.
//!
//! # Evaluation Flow
//!
//! ```text
//! DecisionEngine::decide(request)
//!     │
//!     └── Route on object type:
//!         ├── Community → community::evaluate_community()
//!         ├── Notice    → community::evaluate_notice()
//!         ├── News      → community::evaluate_news()
//!         ├── Cat       → community::evaluate_cat()
//!         ├── Post      → post::evaluate()
//!         ├── Moment    → moment::evaluate()
//!         └── Comment   → comment::evaluate() ──┬── post::evaluate()
//!                                                └── moment::evaluate()
//! ```
//!
//! Reads are always allowed. Writes consult the upstream services through the
//! [`gateway`] traits and the role checks in [`roles`]. Any upstream failure or
//! missing resource denies the write; the engine never fails open and never
//! returns an error to its caller.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use meowchat_authz::memory::InMemoryGateways;
//! use meowchat_authz::{DecisionEngine, DecisionRequest, Gateways, ObjectType, Post};
//!
//! # tokio_test_block_on(async {
//! let directory = InMemoryGateways::new().with_post(Post::new("p1", "u1"));
//! let engine = DecisionEngine::new(Gateways::from_shared(Arc::new(directory)));
//!
//! let request = DecisionRequest::write("u1", ObjectType::Post, "p1");
//! assert!(engine.decide(&request).await.allowed);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod policies;
pub mod roles;
pub mod types;

pub use engine::DecisionEngine;
pub use error::DecisionError;
pub use gateway::{
	CollectionGateway, CommentGateway, GatewayError, Gateways, MomentGateway, PostGateway,
	SystemGateway, Upstream,
};
pub use types::{
	Action, Cat, Comment, CommentParent, Community, DecisionRequest, DecisionResponse, Moment,
	News, Notice, ObjectType, Post, Role, RoleType,
};
