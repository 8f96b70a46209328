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
//! The three operations the HTTP layer dispatches to: boot-script, config
//! and finalize. Each request is handled in sequence, start to finish; no
//! state survives between requests and nothing is retried.

use libcollins::model::Asset;

use crate::boot_action::{BootAction, classify};
use crate::common::AppState;
use crate::config::RuntimeConfig;
use crate::errors::RouterError;
use crate::finalize;
use crate::render::RenderContext;
use crate::resolver::{self, CONFIG_IPXE_ATTRIBUTE};

/// Boot script for a machine the inventory does not know (or has retired):
/// boots the registration kernel, which inventories the hardware and
/// creates the asset, reporting in with the tag it was asked for.
fn registration_script(config: &RuntimeConfig, tag: &str) -> String {
    let options = if config.kernel_options.is_empty() {
        String::new()
    } else {
        format!("{} ", config.kernel_options)
    };

    format!(
        "#!ipxe\n\
         dhcp\n\
         kernel {kernel} {options}collins_url={uri} collins_user={user} \
         collins_password={password} collins_serial={tag}\n\
         initrd {initrd}\n\
         boot || shell",
        kernel = config.kernel_url,
        uri = config.collins_uri,
        user = config.collins_user,
        password = config.collins_password,
        initrd = config.initrd_url,
    )
}

/// Resolves the template attribute from the asset's role descriptor,
/// fetches the address list and renders. Shared by the boot-script and
/// config operations.
async fn resolve_and_render(
    state: &AppState,
    asset: Asset,
    host: &str,
    attribute: &str,
) -> Result<Vec<u8>, RouterError> {
    let template = resolver::resolve(state.inventory.as_ref(), &asset, attribute).await?;

    let tag = asset.tag().to_string();
    let addresses =
        state
            .inventory
            .get_addresses(&tag)
            .await
            .map_err(|source| RouterError::Lookup {
                tag: tag.clone(),
                source,
            })?;

    let context = RenderContext {
        config_url: format!("http://{host}/config/{tag}"),
        finalize_url: format!("http://{host}/finalize/{tag}"),
        asset,
        addresses,
    };

    state.renderer.render(attribute, &template, &context)
}

/// Boot-script operation: what `tag` should boot right now, decided from
/// its lifecycle state on every request.
pub async fn boot_script(state: &AppState, tag: &str, host: &str) -> Result<Vec<u8>, RouterError> {
    let asset = state
        .inventory
        .get_asset(tag)
        .await
        .map_err(|source| RouterError::Lookup {
            tag: tag.to_string(),
            source,
        })?;

    let Some(asset) = asset else {
        return Ok(registration_script(&state.config, tag).into_bytes());
    };

    match classify(Some(&asset), &state.config) {
        BootAction::Register => Ok(registration_script(&state.config, tag).into_bytes()),
        BootAction::Install => resolve_and_render(state, asset, host, CONFIG_IPXE_ATTRIBUTE).await,
        BootAction::Unsupported { tag, status } => {
            Err(RouterError::UnsupportedState { tag, status })
        }
    }
}

/// Config operation: renders `CONFIG` (or `CONFIG_<VARIANT>`) from the
/// asset's role descriptor, whatever lifecycle state the asset is in.
pub async fn config_text(
    state: &AppState,
    tag: &str,
    variant: Option<&str>,
    host: &str,
) -> Result<Vec<u8>, RouterError> {
    let asset = state
        .inventory
        .get_asset(tag)
        .await
        .map_err(|source| RouterError::Lookup {
            tag: tag.to_string(),
            source,
        })?
        .ok_or_else(|| RouterError::NotFound {
            tag: tag.to_string(),
        })?;

    let attribute = resolver::config_attribute(variant);
    resolve_and_render(state, asset, host, &attribute).await
}

/// Finalize operation: see [`crate::finalize`].
pub async fn finalize_asset(state: &AppState, tag: &str) -> Result<String, RouterError> {
    finalize::run(state.inventory.as_ref(), state.boot_device.as_ref(), tag).await
}
