//! Backend HTTP settings fragment.

use serde::Serialize;

use super::ResourceRef;
use crate::config::ApplicationConfig;
use crate::gateway::{self, GatewayId};

pub const RESOURCE_TYPE: &str =
    "Microsoft.Network/applicationGateways/backendHttpSettingsCollection";

#[derive(Debug, Serialize)]
pub struct HttpSettingsFragment {
    #[serde(rename = "backendHttpSettingsCollection")]
    collection: Vec<HttpSettings>,
}

#[derive(Debug, Serialize)]
struct HttpSettings {
    name: String,
    id: String,
    properties: HttpSettingsProperties,
    #[serde(rename = "type")]
    resource_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HttpSettingsProperties {
    port: u16,
    protocol: &'static str,
    cookie_based_affinity: &'static str,
    host_name: String,
    pick_host_name_from_backend_address: bool,
    affinity_cookie_name: &'static str,
    path: &'static str,
    request_timeout: u32,
    probe: ResourceRef,
    path_rules: Vec<ResourceRef>,
}

impl HttpSettingsFragment {
    /// Terminates TLS towards the backend on 443 with the application's own
    /// host name; the probe and path-rule references are re-derived from the
    /// gateway id rather than read from the sibling fragments.
    pub fn build(gateway_id: &GatewayId, config: &ApplicationConfig) -> Self {
        Self {
            collection: vec![HttpSettings {
                name: gateway::backend_http_settings_name(&config.name),
                id: gateway_id.backend_http_settings_id(&config.name),
                properties: HttpSettingsProperties {
                    port: 443,
                    protocol: "Https",
                    cookie_based_affinity: "Disabled",
                    host_name: config.application_name.clone(),
                    pick_host_name_from_backend_address: false,
                    affinity_cookie_name: "ApplicationGatewayAffinity",
                    path: "/",
                    request_timeout: 120,
                    probe: ResourceRef::new(gateway_id.probe_id(&config.name)),
                    path_rules: vec![ResourceRef::new(
                        gateway_id.url_path_map_rule_id(&config.name, &config.application_name),
                    )],
                },
                resource_type: RESOURCE_TYPE,
            }],
        }
    }
}
