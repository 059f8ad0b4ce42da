//! Request routing rule fragment.

use serde::Serialize;

use super::ResourceRef;
use crate::config::ApplicationConfig;
use crate::gateway::{self, GatewayId};

pub const RESOURCE_TYPE: &str = "Microsoft.Network/applicationGateways/requestRoutingRules";

#[derive(Debug, Serialize)]
pub struct RoutingRuleFragment {
    #[serde(rename = "requestRoutingRules")]
    rules: Vec<RoutingRule>,
}

#[derive(Debug, Serialize)]
struct RoutingRule {
    name: String,
    id: String,
    properties: RoutingRuleProperties,
    #[serde(rename = "type")]
    resource_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoutingRuleProperties {
    rule_type: &'static str,
    priority: u32,
    listener: ResourceRef,
    url_path_map: ResourceRef,
}

impl RoutingRuleFragment {
    /// Path-based rule binding the `{name}HttpsListener` listener (created
    /// outside this tool) to the `{name}HttpsRule` URL path map.
    pub fn build(gateway_id: &GatewayId, config: &ApplicationConfig) -> Self {
        Self {
            rules: vec![RoutingRule {
                name: gateway::https_rule_name(&config.name),
                id: gateway_id.routing_rule_id(&config.name),
                properties: RoutingRuleProperties {
                    rule_type: "PathBasedRouting",
                    priority: 10,
                    listener: ResourceRef::new(gateway_id.listener_id(&config.name)),
                    url_path_map: ResourceRef::new(gateway_id.url_path_map_id(&config.name)),
                },
                resource_type: RESOURCE_TYPE,
            }],
        }
    }
}
