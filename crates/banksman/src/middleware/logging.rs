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
use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;

pub async fn logger(
    ConnectInfo(socket_addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let mut props = BTreeMap::new();

    props.insert("request_method", request.method().to_string());
    props.insert("request_path", request.uri().path().to_string());
    props.insert(
        "request_query",
        request
            .uri()
            .query()
            .map(|q| q.to_string())
            .unwrap_or_default(),
    );
    if let Some(user_agent) = request
        .headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
    {
        props.insert("request_headers_user-agent", user_agent.to_string());
    }

    let response = next.run(request).await;

    props.insert("response_status", response.status().as_str().to_string());
    props.insert("remote_ip", socket_addr.ip().to_string());
    props.insert("remote_port", socket_addr.port().to_string());

    let formatted = render_logfmt(&props);
    tracing::info!("{formatted}");

    response
}

/// Renders a list of key-value pairs into a logfmt string
fn render_logfmt(props: &BTreeMap<&'static str, String>) -> String {
    let mut msg = String::new();

    for (key, value) in props {
        if !msg.is_empty() {
            msg.push(' ');
        }
        msg += key;
        msg.push('=');
        let needs_quotes = value.is_empty()
            || value
                .as_bytes()
                .iter()
                .any(|c| *c <= b' ' || matches!(*c, b'=' | b'"'));

        if needs_quotes {
            msg.push('"');
        }

        msg.push_str(&value.escape_debug().to_string());

        if needs_quotes {
            msg.push('"');
        }
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logfmt() {
        let mut props = BTreeMap::new();
        props.insert("method", "GET".to_string());
        props.insert("path", "/ipxe/node-1".to_string());
        props.insert("remote_ip", "127.0.0.1".to_string());
        assert_eq!(
            render_logfmt(&props),
            "method=GET path=/ipxe/node-1 remote_ip=127.0.0.1"
        );

        props.insert("z", "with whitespace".to_string());
        props.insert("e", "".to_string());
        assert_eq!(
            render_logfmt(&props),
            "e=\"\" method=GET path=/ipxe/node-1 remote_ip=127.0.0.1 z=\"with whitespace\""
        );
    }
}
