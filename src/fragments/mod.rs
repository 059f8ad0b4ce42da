//! Typed models of the five Application Gateway configuration fragments.
//!
//! Field names, field order, and the `type` discriminator strings are a
//! wire contract with Azure's resource-manager schema and must round-trip
//! byte-for-byte, which is why every struct declares its fields in wire
//! order and pins the literal strings as constants.

pub mod backend_pool;
pub mod health_probe;
pub mod http_settings;
pub mod path_rules;
pub mod routing_rule;

pub use backend_pool::{BackendAddress, BackendPoolFragment};
pub use health_probe::HealthProbeFragment;
pub use http_settings::HttpSettingsFragment;
pub use path_rules::PathRulesFragment;
pub use routing_rule::RoutingRuleFragment;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{AgwError, AgwResult};

/// Name of the merged document, written to the current working directory.
pub const OUTPUT_FILENAME: &str = "agw-configuration.json";

/// A `{"id": ...}` reference to another gateway sub-resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    pub id: String,
}

impl ResourceRef {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

/// The merged output document.
///
/// Each fragment owns one distinct top-level key, so flattening all five is
/// a collision-free union; declaration order here is the key order of the
/// written file.
#[derive(Debug, Serialize)]
pub struct GatewayConfiguration {
    #[serde(flatten)]
    backend_pool: BackendPoolFragment,
    #[serde(flatten)]
    http_settings: HttpSettingsFragment,
    #[serde(flatten)]
    health_probe: HealthProbeFragment,
    #[serde(flatten)]
    routing_rule: RoutingRuleFragment,
    #[serde(flatten)]
    path_rules: PathRulesFragment,
}

impl GatewayConfiguration {
    pub fn merge(
        backend_pool: BackendPoolFragment,
        http_settings: HttpSettingsFragment,
        health_probe: HealthProbeFragment,
        routing_rule: RoutingRuleFragment,
        path_rules: PathRulesFragment,
    ) -> Self {
        Self {
            backend_pool,
            http_settings,
            health_probe,
            routing_rule,
            path_rules,
        }
    }

    /// Render with 4-space indentation and no trailing newline, matching
    /// what downstream pipeline steps diff against.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the merged document as [`OUTPUT_FILENAME`] under `dir`,
    /// overwriting any previous run's output.
    pub fn write_to_dir(&self, dir: &Path) -> AgwResult<PathBuf> {
        let path = dir.join(OUTPUT_FILENAME);
        let json = self
            .to_json_pretty()
            .map_err(|source| AgwError::OutputWrite {
                path: path.clone(),
                source: source.into(),
            })?;
        fs::write(&path, json).map_err(|source| AgwError::OutputWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
