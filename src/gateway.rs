//! Gateway identity resolution and the shared naming convention.
//!
//! Every nested resource id in every fragment is derived here, from the one
//! resolved [`GatewayId`] plus the application's short name. Builders never
//! format ids themselves, which is what keeps the cross-references between
//! fragments (probe ids, pool ids, URL path map ids) consistent.

use std::fmt;
use std::process::Command;
use tracing::debug;

use crate::config::ApplicationConfig;
use crate::error::{AgwError, AgwResult};

/// The cloud CLI performing the lookup.
const AZ_PROGRAM: &str = "az";

/// Fully-qualified Azure resource ID of the target Application Gateway.
///
/// Resolved once per run and passed by reference to all five fragment
/// builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayId(String);

impl GatewayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{id}/backendAddressPools/{name}BackendPool`
    pub fn backend_pool_id(&self, name: &str) -> String {
        format!("{}/backendAddressPools/{}", self.0, backend_pool_name(name))
    }

    /// `{id}/backendHttpSettingsCollection/{name}BackendHttpsSettings`
    pub fn backend_http_settings_id(&self, name: &str) -> String {
        format!(
            "{}/backendHttpSettingsCollection/{}",
            self.0,
            backend_http_settings_name(name)
        )
    }

    /// `{id}/probes/{name}HP`
    pub fn probe_id(&self, name: &str) -> String {
        format!("{}/probes/{}", self.0, health_probe_name(name))
    }

    /// `{id}/listeners/{name}HttpsListener`
    pub fn listener_id(&self, name: &str) -> String {
        format!("{}/listeners/{}", self.0, https_listener_name(name))
    }

    /// `{id}/urlPathMaps/{name}HttpsRule`
    pub fn url_path_map_id(&self, name: &str) -> String {
        format!("{}/urlPathMaps/{}", self.0, https_rule_name(name))
    }

    /// `{id}/urlPathMaps/{name}HttpsRule/pathRules/{application_name}`
    pub fn url_path_map_rule_id(&self, name: &str, application_name: &str) -> String {
        format!("{}/pathRules/{application_name}", self.url_path_map_id(name))
    }

    /// The routing rule's own id.
    ///
    /// No separator before the rule name. Downstream consumers match this
    /// exact string, so it stays byte-for-byte as is.
    pub fn routing_rule_id(&self, name: &str) -> String {
        format!("{}/requestRoutingRules{}", self.0, https_rule_name(name))
    }
}

impl fmt::Display for GatewayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `{name}BackendPool`
pub fn backend_pool_name(name: &str) -> String {
    format!("{name}BackendPool")
}

/// `{name}BackendHttpsSettings`
pub fn backend_http_settings_name(name: &str) -> String {
    format!("{name}BackendHttpsSettings")
}

/// `{name}HP`
pub fn health_probe_name(name: &str) -> String {
    format!("{name}HP")
}

/// `{name}HttpsRule`, naming both the routing rule and its URL path map.
pub fn https_rule_name(name: &str) -> String {
    format!("{name}HttpsRule")
}

/// `{name}HttpsListener`; the listener itself is created outside this tool.
pub fn https_listener_name(name: &str) -> String {
    format!("{name}HttpsListener")
}

/// Resolve the gateway's resource ID with one blocking `az` call.
///
/// No retry and no timeout. A non-zero exit is returned with the
/// subprocess's stderr attached and its exit code is what the process
/// eventually exits with.
pub fn resolve_gateway_id(config: &ApplicationConfig) -> AgwResult<GatewayId> {
    debug!(
        gateway = %config.application_gateway,
        resource_group = %config.resource_group,
        subscription = %config.subscription,
        "resolving application gateway id"
    );

    let output = Command::new(AZ_PROGRAM)
        .args([
            "network",
            "application-gateway",
            "show",
            "--resource-group",
            config.resource_group.as_str(),
            "--subscription",
            config.subscription.as_str(),
            "--name",
            config.application_gateway.as_str(),
            "--query",
            "id",
            "--output",
            "tsv",
        ])
        .output()
        .map_err(|source| AgwError::GatewayLookupSpawn {
            program: AZ_PROGRAM,
            source,
        })?;

    debug!(status = %output.status, "az network application-gateway show finished");

    if !output.status.success() {
        return Err(AgwError::GatewayLookupFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_resource_id(&output.stdout)
}

/// Extract the resource ID from the lookup's stdout.
///
/// `--output tsv` yields one newline-terminated line; some az builds quote
/// the value. Whitespace is trimmed before the quotes so a quoted line
/// still unquotes cleanly. Bytes that do not decode as UTF-8 are rejected
/// outright; a replacement character must never end up inside a derived id.
fn parse_resource_id(stdout: &[u8]) -> AgwResult<GatewayId> {
    let text = std::str::from_utf8(stdout).map_err(|_| AgwError::GatewayIdUnparseable {
        output: String::from_utf8_lossy(stdout).trim_end().to_string(),
    })?;
    let id = text.trim().trim_matches('"');
    if id.is_empty() || id.contains('\n') {
        return Err(AgwError::GatewayIdUnparseable {
            output: text.trim_end().to_string(),
        });
    }
    Ok(GatewayId::new(id))
}
