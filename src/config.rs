//! Input configuration for one application path.
//!
//! The caller supplies a flat JSON object; this module loads it, validates
//! the key set in a fixed order, and announces every key it sees on the
//! diagnostics channels (a `[=]` notice on stdout, a pipeline variable on
//! stderr). Validation stops at the first missing mandatory key.

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{AgwError, AgwResult};
use crate::io::PipelineReporter;

/// Validated input describing one application behind the gateway.
///
/// Loaded once from the caller-supplied JSON file, immutable afterwards.
#[derive(Debug, Clone)]
pub struct ApplicationConfig {
    /// Path probed by the gateway's health check
    pub healthcheck_path: String,

    /// URL path prefix routed to this application
    pub application_path: String,

    /// Short name seeding every generated sub-resource name
    pub name: String,

    /// Name of the path rule inside the URL path map
    pub appgw_rule_name: String,

    /// Public host name of the application
    pub application_name: String,

    /// Name of the target Application Gateway resource
    pub application_gateway: String,

    /// Resource group holding the gateway
    pub resource_group: String,

    /// Subscription holding the gateway
    pub subscription: String,

    /// Backend addresses by FQDN; wins over `ip_addresses` when non-empty
    pub fqdns: Vec<String>,

    /// Backend addresses by IP; used when `fqdns` is empty
    pub ip_addresses: Vec<String>,
}

impl ApplicationConfig {
    /// Load and validate the input file.
    ///
    /// Fails fatally when the file is missing, unreadable, or not a JSON
    /// object; otherwise hands off to [`ApplicationConfig::from_object`].
    pub fn from_file(path: &Path, reporter: &mut PipelineReporter) -> AgwResult<Self> {
        if !path.exists() {
            return Err(AgwError::InputFileMissing {
                path: path.to_path_buf(),
            });
        }
        reporter.notice(format!(
            "Info: File exists at the given path '{}'",
            path.display()
        ))?;

        let raw = fs::read_to_string(path).map_err(|source| AgwError::InputFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let data: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|source| AgwError::InputFileParse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_object(&data, reporter)
    }

    /// Validate an already-parsed JSON object.
    ///
    /// The optional address lists come first, then the mandatory keys, in
    /// the order the downstream pipeline expects its variables.
    pub fn from_object(
        data: &Map<String, Value>,
        reporter: &mut PipelineReporter,
    ) -> AgwResult<Self> {
        let fqdns = optional_string_list(data, "fqdns", reporter)?;
        let ip_addresses = optional_string_list(data, "ip_addresses", reporter)?;
        let healthcheck_path = required_string(data, "healthcheck_path", reporter)?;
        let application_path = required_string(data, "application_path", reporter)?;
        let name = required_string(data, "name", reporter)?;
        let appgw_rule_name = required_string(data, "appgw_rule_name", reporter)?;
        let application_name = required_string(data, "application_name", reporter)?;
        let application_gateway = required_string(data, "application_gateway", reporter)?;
        let resource_group = required_string(data, "resource_group", reporter)?;
        let subscription = required_string(data, "subscription", reporter)?;

        Ok(Self {
            healthcheck_path,
            application_path,
            name,
            appgw_rule_name,
            application_name,
            application_gateway,
            resource_group,
            subscription,
            fqdns,
            ip_addresses,
        })
    }
}

/// Announce a present key: stdout notice plus stderr pipeline variable.
fn announce(key: &str, value: &Value, reporter: &mut PipelineReporter) -> io::Result<()> {
    reporter.notice(format!(
        "Info: '{key}' is present in the json file with a value of {value}"
    ))?;
    reporter.set_variable(key, value)
}

fn required_string(
    data: &Map<String, Value>,
    key: &'static str,
    reporter: &mut PipelineReporter,
) -> AgwResult<String> {
    match data.get(key) {
        Some(value) => {
            announce(key, value, reporter)?;
            value
                .as_str()
                .map(str::to_owned)
                .ok_or(AgwError::InvalidKeyType {
                    key,
                    expected: "string",
                })
        }
        None => Err(AgwError::MissingKey { key }),
    }
}

fn optional_string_list(
    data: &Map<String, Value>,
    key: &'static str,
    reporter: &mut PipelineReporter,
) -> AgwResult<Vec<String>> {
    match data.get(key) {
        Some(value) => {
            announce(key, value, reporter)?;
            let entries = value.as_array().ok_or(AgwError::InvalidKeyType {
                key,
                expected: "list of strings",
            })?;
            entries
                .iter()
                .map(|entry| {
                    entry
                        .as_str()
                        .map(str::to_owned)
                        .ok_or(AgwError::InvalidKeyType {
                            key,
                            expected: "list of strings",
                        })
                })
                .collect()
        }
        None => {
            reporter.notice(format!(
                "You didn't provide '{key}' inside the json, it's optional, we skip it"
            ))?;
            Ok(Vec::new())
        }
    }
}
