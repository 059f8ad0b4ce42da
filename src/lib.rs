//! Application Gateway configuration generator.
//!
//! Reads one JSON file describing an application's routing needs, resolves
//! the target gateway's Azure resource id via the `az` CLI, builds five
//! configuration fragments for it, and writes their merged union as
//! `agw-configuration.json` for the deployment pipeline to pick up.

pub mod config;
pub mod error;
pub mod fragments;
pub mod gateway;
pub mod io;

// Explicit exports for better API clarity
pub use config::ApplicationConfig;
pub use error::{AgwError, AgwResult};
pub use fragments::{
    BackendAddress, BackendPoolFragment, GatewayConfiguration, HealthProbeFragment,
    HttpSettingsFragment, OUTPUT_FILENAME, PathRulesFragment, ResourceRef, RoutingRuleFragment,
};
pub use gateway::{GatewayId, resolve_gateway_id};
pub use io::{ExitCode, PipelineReporter};
