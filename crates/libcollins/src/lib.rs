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
//! Typed client for the Collins asset-inventory HTTP API.
//!
//! The service only ever needs four operations against the inventory: fetch
//! an asset, fetch its addresses, append a log entry and update its status.
//! Those four make up the [`Inventory`] trait; [`CollinsClient`] is the
//! reqwest-backed implementation.

pub mod model;

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client as HttpClient, ClientBuilder, StatusCode};
use tracing::debug;

use crate::model::{Address, Asset, LogSeverity};
pub use crate::model::{ATTRIBUTE_SLOT, PRIMARY_ROLE};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(thiserror::Error, Debug)]
pub enum CollinsError {
    #[error("Could not construct HTTP client. {0}")]
    Build(#[source] reqwest::Error),

    #[error("Network error talking to Collins at {url}. {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status_code} at {url}: {response_body}")]
    HttpStatus {
        url: String,
        status_code: StatusCode,
        response_body: String,
    },

    #[error("Could not deserialize response from {url}. Body: {body}. {source}")]
    JsonDeserialize {
        url: String,
        body: String,
        source: serde_json::Error,
    },
}

/// The inventory operations the provisioning router depends on.
///
/// Mockable so workflow ordering (finalize must never update status after a
/// failed hardware command) can be asserted with call counts.
#[automock]
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Fetches an asset by tag. `Ok(None)` means the inventory answered
    /// 404, which is a meaningful state (unregistered machine), not an
    /// error.
    async fn get_asset(&self, tag: &str) -> Result<Option<Asset>, CollinsError>;

    /// Fetches the address/pool list for an asset.
    async fn get_addresses(&self, tag: &str) -> Result<Vec<Address>, CollinsError>;

    /// Appends a log entry to the asset's audit log.
    async fn append_log(
        &self,
        tag: &str,
        message: &str,
        severity: LogSeverity,
    ) -> Result<(), CollinsError>;

    /// Transitions the asset's lifecycle status.
    async fn update_status(
        &self,
        tag: &str,
        status: &str,
        reason: &str,
    ) -> Result<(), CollinsError>;
}

#[derive(Debug, Clone)]
pub struct CollinsClient {
    base_url: String,
    username: String,
    password: String,
    client: HttpClient,
}

impl CollinsClient {
    /// `base_url` is the API root, e.g. `http://collins:9000/api`.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, CollinsError> {
        let client = ClientBuilder::new()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(CollinsError::Build)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            client,
        })
    }

    fn asset_url(&self, tag: &str) -> String {
        format!("{}/asset/{tag}", self.base_url)
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<String, CollinsError> {
        response.text().await.map_err(|source| CollinsError::Network {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Inventory for CollinsClient {
    async fn get_asset(&self, tag: &str) -> Result<Option<Asset>, CollinsError> {
        let url = self.asset_url(tag);
        debug!("> GET {url}");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|source| CollinsError::Network {
                url: url.clone(),
                source,
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status_code = response.status();
        let body = Self::read_body(&url, response).await?;
        if !status_code.is_success() {
            return Err(CollinsError::HttpStatus {
                url,
                status_code,
                response_body: body,
            });
        }

        let parsed: model::AssetResponse =
            serde_json::from_str(&body).map_err(|source| CollinsError::JsonDeserialize {
                url,
                body,
                source,
            })?;

        Ok(Some(parsed.data))
    }

    async fn get_addresses(&self, tag: &str) -> Result<Vec<Address>, CollinsError> {
        let url = format!("{}/addresses", self.asset_url(tag));
        debug!("> GET {url}");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|source| CollinsError::Network {
                url: url.clone(),
                source,
            })?;

        let status_code = response.status();
        let body = Self::read_body(&url, response).await?;
        if !status_code.is_success() {
            return Err(CollinsError::HttpStatus {
                url,
                status_code,
                response_body: body,
            });
        }

        let parsed: model::AddressesResponse =
            serde_json::from_str(&body).map_err(|source| CollinsError::JsonDeserialize {
                url,
                body,
                source,
            })?;

        Ok(parsed.data.addresses)
    }

    async fn append_log(
        &self,
        tag: &str,
        message: &str,
        severity: LogSeverity,
    ) -> Result<(), CollinsError> {
        let url = format!("{}/log", self.asset_url(tag));
        debug!("> PUT {url}");

        let response = self
            .client
            .put(&url)
            .query(&[("message", message), ("type", severity.as_str())])
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|source| CollinsError::Network {
                url: url.clone(),
                source,
            })?;

        // Collins answers 201 for a created log entry.
        let status_code = response.status();
        if status_code != StatusCode::CREATED {
            let body = Self::read_body(&url, response).await?;
            return Err(CollinsError::HttpStatus {
                url,
                status_code,
                response_body: body,
            });
        }

        Ok(())
    }

    async fn update_status(
        &self,
        tag: &str,
        status: &str,
        reason: &str,
    ) -> Result<(), CollinsError> {
        let url = self.asset_url(tag);
        debug!("> POST {url} status={status}");

        let response = self
            .client
            .post(&url)
            .query(&[("status", status), ("reason", reason)])
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|source| CollinsError::Network {
                url: url.clone(),
                source,
            })?;

        let status_code = response.status();
        if !status_code.is_success() {
            let body = Self::read_body(&url, response).await?;
            return Err(CollinsError::HttpStatus {
                url,
                status_code,
                response_body: body,
            });
        }

        Ok(())
    }
}
