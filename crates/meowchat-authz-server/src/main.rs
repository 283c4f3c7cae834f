// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! MeowChat authorization server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meowchat_authz_config::{AuthzConfig, LogFormat};
use meowchat_authz_server::{create_app_state, create_router};
use meowchat_authz_upstream::UpstreamClients;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod version;

/// MeowChat authorization server - answers allow/deny decisions.
#[derive(Parser, Debug)]
#[command(
	name = "meowchat-authz-server",
	about = "MeowChat authorization decision server",
	version
)]
struct Args {
	/// Path to the TOML config file (default: /etc/meowchat/authz.toml)
	#[arg(short = 'f', long = "config")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => meowchat_authz_config::load_config_with_file(path)?,
		None => meowchat_authz_config::load_config()?,
	};

	init_tracing(&config);

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		mode = ?config.service.mode,
		"starting meowchat-authz-server"
	);

	if config.service.is_development() {
		for (name, url) in config.upstreams.endpoints() {
			tracing::info!(upstream = name, url = %url, "upstream");
		}
	}

	let gateways = UpstreamClients::from_config(&config.upstreams)?.into_gateways();
	let app = create_router(create_app_state(gateways)).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;
	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	tracing::info!("Server shutdown complete");
	Ok(())
}

fn init_tracing(config: &AuthzConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| config.logging.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);

	match config.logging.format {
		LogFormat::Json => registry.with(fmt::layer().json()).init(),
		LogFormat::Text => registry.with(fmt::layer()).init(),
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
		std::future::pending::<()>().await;
	}
	tracing::info!("Received shutdown signal");
}
