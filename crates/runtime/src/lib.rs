use capcheck_api::{
    CapabilityPaths, CheckOptions, CheckOutcome, CheckResult, EndpointConfig,
};
use capcheck_client::ClientConfig;
use capcheck_core::{CapabilityChecker, InMemoryAccessor};
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;

/// Bootstraps a checker for a repository or registry endpoint.
pub fn build_checker(
    endpoint: &EndpointConfig,
    client: &ClientConfig,
    options: CheckOptions,
) -> capcheck_client::Result<CapabilityChecker> {
    let accessor = capcheck_client::accessor_for(endpoint, client)?;
    Ok(CapabilityChecker::new(accessor, options))
}

/// Bootstraps a checker over an AAS environment file.
pub fn snapshot_checker(
    path: &Path,
    options: CheckOptions,
) -> capcheck_core::Result<CapabilityChecker> {
    let accessor = InMemoryAccessor::from_file(path)?;
    Ok(CapabilityChecker::new(Arc::new(accessor), options))
}

/// Run the capability check for every path against `machine_id`.
///
/// Failures never escape: they are reported as `INTERNAL_ERROR` results.
pub async fn execute_capability_check(
    endpoint: &EndpointConfig,
    submodel_id: &str,
    paths: &CapabilityPaths,
    machine_id: &str,
    options: CheckOptions,
) -> CheckOutcome {
    execute_capability_check_with(
        endpoint,
        &ClientConfig::default(),
        submodel_id,
        paths,
        machine_id,
        options,
    )
    .await
}

pub async fn execute_capability_check_with(
    endpoint: &EndpointConfig,
    client: &ClientConfig,
    submodel_id: &str,
    paths: &CapabilityPaths,
    machine_id: &str,
    options: CheckOptions,
) -> CheckOutcome {
    match build_checker(endpoint, client, options) {
        Ok(checker) => checker.check_all(submodel_id, paths, machine_id).await,
        Err(e) => {
            tracing::error!("Failed to set up data source {}: {}", endpoint, e);
            failed_outcome(&endpoint.to_string(), submodel_id, paths, machine_id, e)
        }
    }
}

/// Outcome reporting the same setup failure for every requested path.
pub fn failed_outcome(
    endpoint: &str,
    submodel_id: &str,
    paths: &CapabilityPaths,
    machine_id: &str,
    error: impl Display,
) -> CheckOutcome {
    let fail = |path: &str| {
        let mut result = CheckResult::pending(endpoint, submodel_id, path, machine_id);
        result.fail(&error);
        result
    };

    match paths {
        CapabilityPaths::Single(path) => CheckOutcome::Single(fail(path)),
        CapabilityPaths::Many(paths) => {
            CheckOutcome::Batch(paths.iter().map(|path| fail(path)).collect())
        }
    }
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(capcheck_core::logging::init_logging(component, to_stderr))
}
