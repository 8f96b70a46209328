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
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::common::AppState;
use crate::errors::RouterError;
use crate::report;

pub mod config;
pub mod finalize;
pub mod ipxe;

/// Assembles the service router: the three operations plus a liveness
/// probe. The ordered (prefix, operation) pairs live here and only here;
/// the core modules never see route strings.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(ipxe::get_router("/ipxe"))
        .merge(config::get_router("/config"))
        .merge(finalize::get_router("/finalize"))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Funnels a core failure through the error reporter and turns it into the
/// response. A template-execution failure that already emitted output
/// serves those bytes with the error appended; the committed part of the
/// stream is never discarded.
pub(crate) async fn respond_error(state: &AppState, tag: &str, error: RouterError) -> Response {
    let message = report::report(state.inventory.as_ref(), tag, &error).await;

    if let RouterError::TemplateExec { partial, .. } = error
        && !partial.is_empty()
    {
        let mut body = partial;
        body.push(b'\n');
        body.extend_from_slice(message.as_bytes());
        return (StatusCode::OK, body).into_response();
    }

    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
