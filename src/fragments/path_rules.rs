//! Path rule fragment.
//!
//! Unlike the other four fragments this one is not an Azure sub-resource
//! shape; it is the pipeline's own `pathRoutes` structure, later spliced
//! into a URL path map by the deployment step, so it carries no `id` or
//! `type` of its own.

use serde::Serialize;

use super::ResourceRef;
use crate::config::ApplicationConfig;
use crate::gateway::{self, GatewayId};

#[derive(Debug, Serialize)]
pub struct PathRulesFragment {
    #[serde(rename = "pathRoutes")]
    routes: Vec<PathRoute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PathRoute {
    path_rules: Vec<PathRule>,
    url_path_map_name: UrlPathMapName,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PathRule {
    path: String,
    name: String,
    backend_address_pool: ResourceRef,
    backend_http_settings: ResourceRef,
}

#[derive(Debug, Serialize)]
struct UrlPathMapName {
    name: String,
}

impl PathRulesFragment {
    /// Matches `application_path` and routes it to the pool and settings
    /// built from `name`. The target map name is derived from
    /// `appgw_rule_name`, not `name`; downstream pipelines depend on that
    /// distinction, so it is kept as-is.
    pub fn build(gateway_id: &GatewayId, config: &ApplicationConfig) -> Self {
        Self {
            routes: vec![PathRoute {
                path_rules: vec![PathRule {
                    path: config.application_path.clone(),
                    name: config.appgw_rule_name.clone(),
                    backend_address_pool: ResourceRef::new(
                        gateway_id.backend_pool_id(&config.name),
                    ),
                    backend_http_settings: ResourceRef::new(
                        gateway_id.backend_http_settings_id(&config.name),
                    ),
                }],
                url_path_map_name: UrlPathMapName {
                    name: gateway::https_rule_name(&config.appgw_rule_name),
                },
            }],
        }
    }
}
