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

use crate::common::AppState;
use crate::ops;
use crate::routes::respond_error;

// GET because the rendered boot scripts chain into this URL from iPXE,
// which only fetches.
pub async fn finalize(Path(tag): Path<String>, State(state): State<AppState>) -> Response {
    match ops::finalize_asset(&state, &tag).await {
        Ok(confirmation) => confirmation.into_response(),
        Err(error) => respond_error(&state, &tag, error).await,
    }
}

pub fn get_router(path_prefix: &str) -> Router<AppState> {
    Router::new().route(format!("{path_prefix}/{{tag}}").as_str(), get(finalize))
}
