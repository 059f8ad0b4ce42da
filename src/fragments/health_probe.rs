//! Health probe fragment.

use serde::Serialize;

use crate::config::ApplicationConfig;
use crate::gateway::{self, GatewayId};

pub const RESOURCE_TYPE: &str = "Microsoft.Network/applicationGateways/probes";

#[derive(Debug, Serialize)]
pub struct HealthProbeFragment {
    probes: Vec<HealthProbe>,
}

#[derive(Debug, Serialize)]
struct HealthProbe {
    name: String,
    id: String,
    properties: HealthProbeProperties,
    #[serde(rename = "type")]
    resource_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthProbeProperties {
    protocol: &'static str,
    host: String,
    path: String,
    interval: u32,
    timeout: u32,
    unhealthy_threshold: u32,
    pick_host_name_from_backend_http_settings: bool,
    min_servers: u32,
    #[serde(rename = "match")]
    match_condition: ProbeMatch,
}

/// Response classifier: any status in 200-399 with any body counts healthy.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProbeMatch {
    body: &'static str,
    status_codes: Vec<&'static str>,
}

impl HealthProbeFragment {
    /// Probes `healthcheck_path` on the application host every 30 seconds,
    /// marking the backend unhealthy after 3 failures.
    pub fn build(gateway_id: &GatewayId, config: &ApplicationConfig) -> Self {
        Self {
            probes: vec![HealthProbe {
                name: gateway::health_probe_name(&config.name),
                id: gateway_id.probe_id(&config.name),
                properties: HealthProbeProperties {
                    protocol: "Https",
                    host: config.application_name.clone(),
                    path: config.healthcheck_path.clone(),
                    interval: 30,
                    timeout: 30,
                    unhealthy_threshold: 3,
                    pick_host_name_from_backend_http_settings: false,
                    min_servers: 0,
                    match_condition: ProbeMatch {
                        body: "",
                        status_codes: vec!["200-399"],
                    },
                },
                resource_type: RESOURCE_TYPE,
            }],
        }
    }
}
