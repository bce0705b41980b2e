//! Check orchestration.
//!
//! One request runs through the steps below and ends in exactly one
//! [`ResultCode`]:
//!
//! 1. resolve the required capability container and its semantic id
//! 2. match it against the machine's `OfferedCapabilities`
//! 3. if the machine needs a tool, collect tool candidates of that type
//! 4. match every candidate's `OfferedCapabilities` concurrently
//! 5. classify by mounted state and mounting paths into the machine
//!
//! Infrastructure faults abort only the current check and surface as
//! `INTERNAL_ERROR`.

use crate::error::{CheckError, Result};
use crate::hierarchy::mounted_leaf_asset_ids;
use crate::matching::{
    CapabilityMatcher, capability_semantic_id, find_capability_container, required_tool_type,
};
use crate::mounting::SlotGraph;
use crate::navigator::{extension_value, resolve_path};
use crate::vocab::{HIERARCHICAL_STRUCTURES, OFFERED_CAPABILITIES, TOOL_TYPE};
use capcheck_api::{
    Asset, AssetAccessor, CapabilityPaths, CheckMode, CheckOptions, CheckOutcome, CheckResult,
    MountingPath, ResultCode, Submodel, SubmodelElement, id_short_is,
};
use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs capability checks against one data source.
#[derive(Clone)]
pub struct CapabilityChecker {
    accessor: Arc<dyn AssetAccessor>,
    options: CheckOptions,
    matcher: CapabilityMatcher,
}

impl CapabilityChecker {
    pub fn new(accessor: Arc<dyn AssetAccessor>, options: CheckOptions) -> Self {
        let matcher = CapabilityMatcher::new(options.unsupported_constraints);
        Self {
            accessor,
            options,
            matcher,
        }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    pub fn endpoint(&self) -> String {
        self.accessor.describe()
    }

    /// Check one required capability container against `machine_id`.
    ///
    /// Never fails: errors are folded into an `INTERNAL_ERROR` result.
    pub async fn check(&self, submodel_id: &str, path: &str, machine_id: &str) -> CheckResult {
        let mut result = CheckResult::pending(self.endpoint(), submodel_id, path, machine_id);

        match self.run(submodel_id, path, machine_id, &mut result).await {
            Ok(()) => info!("Check '{}' on '{}': {}", path, machine_id, result.code),
            Err(e) => {
                warn!("Check '{}' on '{}' failed: {}", path, machine_id, e);
                result.fail(e);
            }
        }

        result
    }

    /// Check every path independently; batch results keep input order.
    pub async fn check_all(
        &self,
        submodel_id: &str,
        paths: &CapabilityPaths,
        machine_id: &str,
    ) -> CheckOutcome {
        match paths {
            CapabilityPaths::Single(path) => {
                CheckOutcome::Single(self.check(submodel_id, path, machine_id).await)
            }
            CapabilityPaths::Many(paths) => {
                let checks = paths
                    .iter()
                    .map(|path| self.check(submodel_id, path, machine_id));
                CheckOutcome::Batch(join_all(checks).await)
            }
        }
    }

    /// Mounting paths of `tool_id` across the whole catalog, optionally
    /// restricted to paths ending at `target_id`.
    pub async fn mounting_paths(
        &self,
        tool_id: &str,
        target_id: Option<&str>,
    ) -> Result<Vec<MountingPath>> {
        let tool = self.accessor.get_asset(tool_id).await?;
        let assets = self.accessor.get_assets(None).await?;
        let graph = SlotGraph::build(std::iter::once(&tool).chain(&assets));

        Ok(match target_id {
            Some(target) => graph.paths_to(tool_id, target),
            None => graph.mounting_paths(tool_id),
        })
    }

    async fn run(
        &self,
        submodel_id: &str,
        path: &str,
        machine_id: &str,
        result: &mut CheckResult,
    ) -> Result<()> {
        let required_submodel = self.accessor.get_submodel(submodel_id).await?;
        let required = resolve_path(&required_submodel, path)
            .ok_or_else(|| CheckError::missing_element(path, submodel_id))?;
        let capability_id = capability_semantic_id(required).ok_or_else(|| {
            CheckError::missing_element(format!("{path}/Capability"), submodel_id)
        })?;
        result.required_capability = Some(capability_id.to_string());

        let machine = self.accessor.get_asset(machine_id).await?;
        let mode = CheckMode::for_machine(machine.kind(), self.options.instance_check);
        result.type_of_check = Some(mode);

        let offered = self.require_submodel(machine_id, OFFERED_CAPABILITIES).await?;
        if !self.matcher.offers_capability(&offered, required) {
            result.conclude(
                ResultCode::CapabilityNotFulfilledByMachine,
                format!(
                    "Asset '{machine_id}' does not offer the required capability '{capability_id}' or does not fulfill all constraints"
                ),
            );
            return Ok(());
        }

        let offered_container = find_capability_container(&offered, capability_id)
            .ok_or_else(|| CheckError::missing_element(capability_id, offered.id.clone()))?;
        let Some(tool_type) = required_tool_type(offered_container) else {
            result.conclude(
                ResultCode::CapabilityFulfilledByMachine,
                format!(
                    "Asset '{machine_id}' offers the required capability '{capability_id}' and fulfills all constraints"
                ),
            );
            return Ok(());
        };
        result.required_tool_type = Some(tool_type.to_string());
        debug!("Capability '{}' requires a tool of type '{}'", capability_id, tool_type);

        // Candidates share the machine's kind; path search runs over the full catalog.
        let assets = self.accessor.get_assets(None).await?;
        let candidates: Vec<&Asset> = assets
            .iter()
            .filter(|asset| {
                asset.kind() == machine.kind()
                    && extension_value(*asset, TOOL_TYPE) == Some(tool_type)
            })
            .collect();

        let mounted_ids = self.mounted_asset_ids(machine_id).await?;
        let mounted: Vec<&Asset> = candidates
            .iter()
            .copied()
            .filter(|tool| {
                tool.global_asset_id()
                    .is_some_and(|id| mounted_ids.iter().any(|m| m == id))
            })
            .collect();
        result.mounted_tools = mounted.iter().map(|tool| tool.id.clone()).collect();

        let evaluated = match mode {
            CheckMode::Instance if mounted.is_empty() => {
                result.conclude(
                    ResultCode::NoSuitableToolMounted,
                    format!(
                        "Asset '{machine_id}' offers the required capability but needs a tool of type '{tool_type}', and none is mounted"
                    ),
                );
                return Ok(());
            }
            CheckMode::Instance => mounted.clone(),
            CheckMode::Type => candidates
                .into_iter()
                .filter(|tool| tool.kind() == mode.asset_kind())
                .collect(),
        };

        let suitable = self.suitable_tools(&evaluated, required).await?;
        if suitable.is_empty() {
            result.conclude(
                ResultCode::NoSuitableToolExists,
                format!("No tool of type '{tool_type}' found that fulfills all constraints"),
            );
            return Ok(());
        }
        result.suitable_tools = suitable.iter().map(|tool| tool.id.clone()).collect();

        let graph = SlotGraph::build(assets.iter().chain(std::iter::once(&machine)));
        for tool in &suitable {
            result
                .mounting_paths_by_tool
                .insert(tool.id.clone(), graph.paths_to(&tool.id, machine_id));
        }

        let any_mounted = suitable
            .iter()
            .any(|tool| mounted.iter().any(|m| m.id == tool.id));
        let any_path = result
            .mounting_paths_by_tool
            .values()
            .flatten()
            .any(|path| !path.is_trivial());

        if any_mounted {
            result.conclude(
                ResultCode::SuitableToolMounted,
                format!(
                    "Asset '{machine_id}' offers the required capability '{capability_id}' and a suitable tool is mounted"
                ),
            );
        } else if any_path {
            result.conclude(
                ResultCode::SuitableToolNeedsToBeMounted,
                format!(
                    "Asset '{machine_id}' offers the required capability '{capability_id}', but a suitable tool needs to be mounted"
                ),
            );
        } else {
            result.conclude(
                ResultCode::NoMountingPathForSuitableToolFound,
                format!(
                    "No option to mount a tool of type '{tool_type}' into asset '{machine_id}' found"
                ),
            );
        }

        Ok(())
    }

    async fn require_submodel(&self, asset_id: &str, id_short: &str) -> Result<Submodel> {
        self.accessor
            .get_first_submodel(asset_id, &id_short_is(id_short))
            .await?
            .ok_or_else(|| CheckError::MissingSubmodel {
                asset_id: asset_id.to_string(),
                id_short: id_short.to_string(),
            })
    }

    // Leaf ids of the machine's bill of material; no BOM means nothing is mounted.
    async fn mounted_asset_ids(&self, machine_id: &str) -> Result<Vec<String>> {
        let bom = self
            .accessor
            .get_first_submodel(machine_id, &id_short_is(HIERARCHICAL_STRUCTURES))
            .await?;

        match bom {
            Some(bom) => mounted_leaf_asset_ids(&bom),
            None => {
                debug!("Asset '{}' has no {} submodel", machine_id, HIERARCHICAL_STRUCTURES);
                Ok(Vec::new())
            }
        }
    }

    async fn suitable_tools<'a>(
        &self,
        tools: &[&'a Asset],
        required: &SubmodelElement,
    ) -> Result<Vec<&'a Asset>> {
        let is_offered = id_short_is(OFFERED_CAPABILITIES);
        let fetches = tools
            .iter()
            .map(|tool| self.accessor.get_first_submodel(&tool.id, &is_offered));
        let offered = try_join_all(fetches).await?;

        Ok(tools
            .iter()
            .zip(offered)
            .filter_map(|(tool, offered)| match offered {
                Some(offered) => self
                    .matcher
                    .offers_capability(&offered, required)
                    .then_some(*tool),
                None => {
                    warn!(
                        "Tool '{}' has no {} submodel, skipped",
                        tool.id, OFFERED_CAPABILITIES
                    );
                    None
                }
            })
            .collect())
    }
}
