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
use axum::Router;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum_extra::extract::Host;

use crate::common::AppState;
use crate::ops;
use crate::routes::respond_error;

pub async fn boot(
    Path(tag): Path<String>,
    Host(host): Host,
    State(state): State<AppState>,
) -> Response {
    match ops::boot_script(&state, &tag, &host).await {
        Ok(script) => script.into_response(),
        Err(error) => respond_error(&state, &tag, error).await,
    }
}

pub fn get_router(path_prefix: &str) -> Router<AppState> {
    Router::new().route(format!("{path_prefix}/{{tag}}").as_str(), get(boot))
}
