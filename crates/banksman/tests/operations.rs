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
//! End-to-end tests: real router, real Collins client, mock inventory
//! server.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use banksman::common::AppState;
use banksman::config::{Args, RuntimeConfig};
use banksman::finalize::{BootDevice, MockBootDevice};
use banksman::render::Renderer;
use banksman::routes;
use clap::Parser;
use http_body_util::BodyExt;
use libcollins::CollinsClient;
use tower::ServiceExt;

fn state(server: &mockito::Server, boot_device: Arc<dyn BootDevice>) -> AppState {
    let url = server.url();
    let args = Args::parse_from(["banksman", "--uri", &url]);

    AppState {
        config: Arc::new(RuntimeConfig::from(args)),
        inventory: Arc::new(CollinsClient::new(url, "blake", "admin:first").unwrap()),
        renderer: Arc::new(Renderer::new()),
        boot_device,
    }
}

async fn get(app: axum::Router, path: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(path)
                .header("host", "banksman.example:8080")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn asset_body(tag: &str, status: &str, attributes: &[(&str, &str)]) -> String {
    let attribs: Vec<String> = attributes
        .iter()
        .map(|(k, v)| format!(r#""{k}": {}"#, serde_json::to_string(v).unwrap()))
        .collect();
    format!(
        r#"{{"status": "success:ok", "data": {{
            "ASSET": {{"ID": 1, "TAG": "{tag}", "STATUS": "{status}", "TYPE": "SERVER_NODE"}},
            "ATTRIBS": {{"0": {{{}}}}},
            "IPMI": {{"IPMI_ADDRESS": "10.0.0.5/24", "IPMI_USERNAME": "root",
                      "IPMI_PASSWORD": "calvin"}}
        }}}}"#,
        attribs.join(", ")
    )
}

const EMPTY_ADDRESSES: &str = r#"{"data": {"ADDRESSES": []}}"#;

#[tokio::test]
async fn absent_asset_gets_the_registration_script() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-1")
        .with_status(404)
        .create_async()
        .await;
    // No lookups beyond the existence check.
    let role_lookup = server
        .mock("GET", "/asset/role-x")
        .expect(0)
        .create_async()
        .await;

    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/ipxe/node-1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("#!ipxe\ndhcp\n"));
    assert!(body.contains("collins_serial=node-1"));
    assert!(body.contains(&format!("collins_url={}", server.url())));
    assert!(body.ends_with("boot || shell"));
    role_lookup.assert_async().await;
}

#[tokio::test]
async fn maintenance_asset_also_registers() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-5")
        .with_body(asset_body("node-5", "Maintenance", &[]))
        .create_async()
        .await;

    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/ipxe/node-5").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("collins_serial=node-5"));
}

#[tokio::test]
async fn installing_asset_gets_its_role_ipxe_template_verbatim() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-2")
        .with_body(asset_body(
            "node-2",
            "Provisioning",
            &[("PRIMARY_ROLE", "role-x")],
        ))
        .create_async()
        .await;
    let role_lookup = server
        .mock("GET", "/asset/role-x")
        .with_body(asset_body(
            "role-x",
            "Allocated",
            &[("CONFIG_IPXE", "set x 1\nboot")],
        ))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/asset/node-2/addresses")
        .with_body(EMPTY_ADDRESSES)
        .create_async()
        .await;

    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/ipxe/node-2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "set x 1\nboot");
    role_lookup.assert_async().await;
}

#[tokio::test]
async fn templates_see_the_asset_and_callback_urls() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-2")
        .with_body(asset_body(
            "node-2",
            "Provisioning",
            &[("PRIMARY_ROLE", "role-x")],
        ))
        .create_async()
        .await;
    server
        .mock("GET", "/asset/role-x")
        .with_body(asset_body(
            "role-x",
            "Allocated",
            &[("CONFIG_IPXE", "chain {{.FinalizeUrl}} || echo {{.Asset.Tag}}")],
        ))
        .create_async()
        .await;
    server
        .mock("GET", "/asset/node-2/addresses")
        .with_body(EMPTY_ADDRESSES)
        .create_async()
        .await;

    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/ipxe/node-2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "chain http://banksman.example:8080/finalize/node-2 || echo node-2"
    );
}

#[tokio::test]
async fn partial_template_output_is_served_with_the_error_appended() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-2")
        .with_body(asset_body(
            "node-2",
            "Provisioning",
            &[("PRIMARY_ROLE", "role-x")],
        ))
        .create_async()
        .await;
    server
        .mock("GET", "/asset/role-x")
        .with_body(asset_body(
            "role-x",
            "Allocated",
            &[("CONFIG_IPXE", "before {{hasPrefix .Asset.Tag}} after")],
        ))
        .create_async()
        .await;
    server
        .mock("GET", "/asset/node-2/addresses")
        .with_body(EMPTY_ADDRESSES)
        .create_async()
        .await;
    server
        .mock("PUT", "/asset/node-2/log")
        .match_query(mockito::Matcher::Any)
        .with_status(201)
        .create_async()
        .await;

    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/ipxe/node-2").await;

    // The stream was committed before the helper rejected its arguments:
    // the emitted bytes are served, the error rides along after them.
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("before \n"));
    assert!(body.contains("[node-2]: Couldn't render template CONFIG_IPXE"));
}

#[tokio::test]
async fn unsupported_status_is_reported_with_tag_and_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-3")
        .with_body(asset_body("node-3", "Allocated", &[]))
        .create_async()
        .await;
    let log_append = server
        .mock("PUT", "/asset/node-3/log")
        .match_query(mockito::Matcher::Any)
        .with_status(201)
        .expect(1)
        .create_async()
        .await;

    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/ipxe/node-3").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("node-3"));
    assert!(body.contains("'Allocated'"));
    log_append.assert_async().await;
}

#[tokio::test]
async fn config_variant_resolves_the_suffixed_attribute() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-2")
        .with_body(asset_body(
            "node-2",
            "Allocated",
            &[("PRIMARY_ROLE", "role-x")],
        ))
        .expect(2)
        .create_async()
        .await;
    server
        .mock("GET", "/asset/role-x")
        .with_body(asset_body(
            "role-x",
            "Allocated",
            &[("CONFIG_NET", "iface eth0 inet dhcp")],
        ))
        .expect(2)
        .create_async()
        .await;
    server
        .mock("GET", "/asset/node-2/addresses")
        .with_body(EMPTY_ADDRESSES)
        .create_async()
        .await;
    let log_append = server
        .mock("PUT", "/asset/node-2/log")
        .match_query(mockito::Matcher::Any)
        .with_status(201)
        .create_async()
        .await;

    // The named variant exists and renders, whatever the lifecycle state.
    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/config/node-2/net").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "iface eth0 inet dhcp");

    // The base variant does not fall back to CONFIG_NET.
    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/config/node-2").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Attribute CONFIG missing"));
    log_append.assert_async().await;
}

#[tokio::test]
async fn finalize_switches_boot_device_then_updates_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-2")
        .with_body(asset_body("node-2", "Provisioning", &[]))
        .create_async()
        .await;
    let status_update = server
        .mock("POST", "/asset/node-2")
        .match_query(mockito::Matcher::UrlEncoded(
            "status".into(),
            "Provisioned".into(),
        ))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let mut boot_device = MockBootDevice::new();
    boot_device
        .expect_set_persistent_boot_disk()
        .withf(|ipmi| ipmi.address == "10.0.0.5/24" && ipmi.username == "root")
        .times(1)
        .returning(|_| Ok(()));

    let app = routes::app(state(&server, Arc::new(boot_device)));
    let (status, body) = get(app, "/finalize/node-2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("node-2"));
    status_update.assert_async().await;
}

#[tokio::test]
async fn finalize_hardware_failure_leaves_the_status_untouched() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/asset/node-2")
        .with_body(asset_body("node-2", "Provisioning", &[]))
        .create_async()
        .await;
    let status_update = server
        .mock("POST", "/asset/node-2")
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    server
        .mock("PUT", "/asset/node-2/log")
        .match_query(mockito::Matcher::Any)
        .with_status(201)
        .create_async()
        .await;

    let mut boot_device = MockBootDevice::new();
    boot_device
        .expect_set_persistent_boot_disk()
        .times(1)
        .returning(|_| {
            Err(banksman::cmd::CmdError::Failed {
                program: "ipmitool".to_string(),
                code: Some(1),
                output: "no route to host".to_string(),
            })
        });

    let app = routes::app(state(&server, Arc::new(boot_device)));
    let (status, body) = get(app, "/finalize/node-2").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("node-2"));
    status_update.assert_async().await;
}

#[tokio::test]
async fn healthz_answers_without_touching_the_inventory() {
    let mut server = mockito::Server::new_async().await;
    let any_lookup = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let app = routes::app(state(&server, Arc::new(MockBootDevice::new())));
    let (status, body) = get(app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    any_lookup.assert_async().await;
}
