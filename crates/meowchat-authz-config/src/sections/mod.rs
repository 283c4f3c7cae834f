// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for the authorization service.

pub mod http;
pub mod logging;
pub mod service;
pub mod upstreams;

pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use service::{ServiceConfig, ServiceConfigLayer, ServiceMode};
pub use upstreams::{UpstreamsConfig, UpstreamsConfigLayer};
