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
//! Renders role-descriptor templates (Go text/template syntax).
//!
//! The dot context is exactly the asset plus the two callback URLs; no
//! other process state is visible to template text. The helper registry is
//! closed: `hasPrefix` and `hasSuffix`, nothing else.

use std::collections::HashMap;

use gtmpl::{Context, Func, Template, Value};
use gtmpl_derive::Gtmpl;
use gtmpl_value::FuncError;
use libcollins::model::{Address, Asset};

use crate::errors::RouterError;

/// Request-scoped render context. Built fresh per request, dropped after
/// rendering.
#[derive(Debug)]
pub struct RenderContext {
    pub asset: Asset,
    pub addresses: Vec<Address>,
    pub config_url: String,
    pub finalize_url: String,
}

//
// Go template objects, hence allow(non_snake_case)
//

#[allow(non_snake_case)]
#[derive(Clone, Gtmpl)]
struct TmplContext {
    Asset: TmplAsset,
    ConfigUrl: String,
    FinalizeUrl: String,
}

#[allow(non_snake_case)]
#[derive(Clone, Gtmpl)]
struct TmplAsset {
    Tag: String,
    Status: String,
    Attributes: HashMap<String, String>,
    Addresses: Vec<TmplAddress>,
}

#[allow(non_snake_case)]
#[derive(Clone, Gtmpl)]
struct TmplAddress {
    Pool: String,
    Address: String,
    Netmask: String,
    Gateway: String,
}

impl From<&RenderContext> for TmplContext {
    fn from(context: &RenderContext) -> Self {
        let attributes = context
            .asset
            .attributes
            .get(libcollins::ATTRIBUTE_SLOT)
            .cloned()
            .unwrap_or_default();
        let addresses = context
            .addresses
            .iter()
            .map(|address| TmplAddress {
                Pool: address.pool.clone(),
                Address: address.address.clone(),
                Netmask: address.netmask.clone(),
                Gateway: address.gateway.clone(),
            })
            .collect();

        Self {
            Asset: TmplAsset {
                Tag: context.asset.tag().to_string(),
                Status: context.asset.status().to_string(),
                Attributes: attributes,
                Addresses: addresses,
            },
            ConfigUrl: context.config_url.clone(),
            FinalizeUrl: context.finalize_url.clone(),
        }
    }
}

fn has_prefix(args: &[Value]) -> Result<Value, FuncError> {
    match args {
        [Value::String(s), Value::String(prefix)] => Ok(s.starts_with(prefix.as_str()).into()),
        _ => Err(FuncError::Generic(
            "hasPrefix requires two string arguments".to_string(),
        )),
    }
}

fn has_suffix(args: &[Value]) -> Result<Value, FuncError> {
    match args {
        [Value::String(s), Value::String(suffix)] => Ok(s.ends_with(suffix.as_str()).into()),
        _ => Err(FuncError::Generic(
            "hasSuffix requires two string arguments".to_string(),
        )),
    }
}

/// Template engine with a fixed helper registry, decided at construction.
pub struct Renderer {
    funcs: Vec<(&'static str, Func)>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            funcs: vec![
                ("hasPrefix", has_prefix as Func),
                ("hasSuffix", has_suffix as Func),
            ],
        }
    }

    /// The names of the registered helpers, for diagnostics and tests.
    pub fn helper_names(&self) -> Vec<&'static str> {
        self.funcs.iter().map(|(name, _)| *name).collect()
    }

    /// Parses and executes `text`. Parse and execution failures are
    /// distinct: a parse error means the stored template is malformed, an
    /// execution error means a referenced field was absent or a helper
    /// rejected its arguments. Execution writes into the output buffer as
    /// it goes; on failure the bytes emitted so far ride along in the
    /// error, because the caller serves them (streamed output is already
    /// committed, there is nothing to take back).
    pub fn render(
        &self,
        attribute: &str,
        text: &str,
        context: &RenderContext,
    ) -> Result<Vec<u8>, RouterError> {
        let mut template = Template::default();
        for (name, func) in &self.funcs {
            template.add_func(name, *func);
        }

        template
            .parse(text)
            .map_err(|source| RouterError::TemplateParse {
                attribute: attribute.to_string(),
                source,
            })?;

        let mut output = Vec::new();
        let dot = Context::from(TmplContext::from(context));
        match template.execute(&mut output, &dot) {
            Ok(()) => Ok(output),
            Err(source) => Err(RouterError::TemplateExec {
                attribute: attribute.to_string(),
                partial: output,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use libcollins::model::AssetHeader;

    use super::*;

    fn context() -> RenderContext {
        RenderContext {
            asset: Asset {
                asset: AssetHeader {
                    tag: "node-2".to_string(),
                    status: "Provisioning".to_string(),
                    ..Default::default()
                },
                attributes: HashMap::from([(
                    libcollins::ATTRIBUTE_SLOT.to_string(),
                    HashMap::from([("HOSTNAME".to_string(), "web01.prod.example".to_string())]),
                )]),
                ..Default::default()
            },
            addresses: vec![Address {
                pool: "PROD".to_string(),
                address: "10.1.2.3".to_string(),
                netmask: "255.255.255.0".to_string(),
                gateway: "10.1.2.1".to_string(),
            }],
            config_url: "http://banksman/config/node-2".to_string(),
            finalize_url: "http://banksman/finalize/node-2".to_string(),
        }
    }

    #[test]
    fn renders_asset_fields_and_callback_urls() {
        let renderer = Renderer::new();
        let out = renderer
            .render(
                "CONFIG_IPXE",
                "tag={{.Asset.Tag}} cb={{.FinalizeUrl}}",
                &context(),
            )
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "tag=node-2 cb=http://banksman/finalize/node-2"
        );
    }

    #[test]
    fn renders_attributes_and_addresses() {
        let renderer = Renderer::new();
        let out = renderer
            .render(
                "CONFIG",
                "{{.Asset.Attributes.HOSTNAME}}{{range .Asset.Addresses}} {{.Address}}/{{.Netmask}}{{end}}",
                &context(),
            )
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "web01.prod.example 10.1.2.3/255.255.255.0"
        );
    }

    #[test]
    fn helper_predicates_branch_on_substrings() {
        let renderer = Renderer::new();
        let out = renderer
            .render(
                "CONFIG",
                "{{if hasSuffix .Asset.Attributes.HOSTNAME \".prod.example\"}}prod{{else}}lab{{end}}\
                 -{{if hasPrefix .Asset.Tag \"node-\"}}node{{end}}",
                &context(),
            )
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "prod-node");
    }

    #[test]
    fn helper_registry_is_closed_and_enumerable() {
        let renderer = Renderer::new();
        assert_eq!(renderer.helper_names(), ["hasPrefix", "hasSuffix"]);
    }

    #[test]
    fn malformed_templates_fail_at_parse_time() {
        let renderer = Renderer::new();
        let err = renderer
            .render("CONFIG", "{{if}} unterminated", &context())
            .unwrap_err();
        assert!(matches!(err, RouterError::TemplateParse { .. }));
    }

    #[test]
    fn execution_failure_keeps_partial_output() {
        let renderer = Renderer::new();
        let err = renderer
            .render(
                "CONFIG",
                "before {{hasPrefix .Asset.Tag}} after",
                &context(),
            )
            .unwrap_err();
        match err {
            RouterError::TemplateExec { partial, .. } => {
                assert_eq!(String::from_utf8(partial).unwrap(), "before ");
            }
            other => panic!("expected TemplateExec, got {other:?}"),
        }
    }
}
