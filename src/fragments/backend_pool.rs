//! Backend address pool fragment.

use serde::Serialize;

use crate::config::ApplicationConfig;
use crate::gateway::{self, GatewayId};

pub const RESOURCE_TYPE: &str = "Microsoft.Network/applicationGateways/backendAddressPools";

/// One pool member, keyed by how the gateway resolves it.
///
/// Serializes externally tagged, so an entry is `{"fqdn": ...}` or
/// `{"ipAddress": ...}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BackendAddress {
    Fqdn(String),
    IpAddress(String),
}

#[derive(Debug, Serialize)]
pub struct BackendPoolFragment {
    #[serde(rename = "backendAddressPools")]
    pools: Vec<BackendPool>,
}

#[derive(Debug, Serialize)]
struct BackendPool {
    name: String,
    id: String,
    properties: BackendPoolProperties,
    #[serde(rename = "type")]
    resource_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackendPoolProperties {
    backend_addresses: Vec<BackendAddress>,
}

impl BackendPoolFragment {
    /// Fqdn entries win: when `fqdns` is non-empty the ip list is ignored
    /// entirely, even if populated.
    pub fn build(gateway_id: &GatewayId, config: &ApplicationConfig) -> Self {
        let backend_addresses = if config.fqdns.is_empty() {
            config
                .ip_addresses
                .iter()
                .cloned()
                .map(BackendAddress::IpAddress)
                .collect()
        } else {
            config
                .fqdns
                .iter()
                .cloned()
                .map(BackendAddress::Fqdn)
                .collect()
        };

        Self {
            pools: vec![BackendPool {
                name: gateway::backend_pool_name(&config.name),
                id: gateway_id.backend_pool_id(&config.name),
                properties: BackendPoolProperties { backend_addresses },
                resource_type: RESOURCE_TYPE,
            }],
        }
    }

    /// True when neither address list contributed a pool member.
    pub fn has_no_addresses(&self) -> bool {
        self.pools[0].properties.backend_addresses.is_empty()
    }
}
