/*
 * SPDX-FileCopyrightText: Copyright (c) 2021-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */
use std::net::SocketAddr;
use std::sync::Arc;

use banksman::common::AppState;
use banksman::config::{Args, RuntimeConfig};
use banksman::finalize::Ipmitool;
use banksman::middleware;
use banksman::render::Renderer;
use banksman::routes;
use clap::Parser;
use libcollins::CollinsClient;
use tower_http::services::ServeDir;
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<(), eyre::Report> {
    let args = Args::parse();
    if args.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
        .add_directive("tower=warn".parse()?)
        .add_directive("hyper=warn".parse()?);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .try_init()?;

    let config = RuntimeConfig::from(args);

    let static_path = std::path::Path::new(&config.static_dir);
    if !static_path.exists() {
        tracing::info!(
            "Static path {} does not exist. Creating directory",
            static_path.display()
        );
        if let Err(err) = std::fs::create_dir_all(static_path) {
            tracing::error!("Could not create directory: {err}");
        }
    }

    tracing::info!("Start banksman version {}", env!("CARGO_PKG_VERSION"));

    let inventory = CollinsClient::new(
        &config.collins_uri,
        &config.collins_user,
        &config.collins_password,
    )?;
    let boot_device = Ipmitool::new(&config);

    let state = AppState {
        inventory: Arc::new(inventory),
        renderer: Arc::new(Renderer::new()),
        boot_device: Arc::new(boot_device),
        config: Arc::new(config.clone()),
    };

    let app = routes::app(state)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(axum::middleware::from_fn(middleware::logging::logger));

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .map_err(|err| {
            tracing::error!("unable to bind to {}: {err}", config.listen);
            err
        })?;
    tracing::info!("Listening on {}", config.listen);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
