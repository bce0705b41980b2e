use super::asset::AssetKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified terminal outcome of one capability check.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultCode {
    CapabilityNotFulfilledByMachine,
    CapabilityFulfilledByMachine,
    NoSuitableToolMounted,
    NoSuitableToolExists,
    NoMountingPathForSuitableToolFound,
    SuitableToolMounted,
    SuitableToolNeedsToBeMounted,
    InternalError,
}

impl ResultCode {
    pub fn is_success(self) -> bool {
        matches!(
            self,
            ResultCode::CapabilityFulfilledByMachine
                | ResultCode::SuitableToolMounted
                | ResultCode::SuitableToolNeedsToBeMounted
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResultCode::CapabilityNotFulfilledByMachine => "CAPABILITY_NOT_FULFILLED_BY_MACHINE",
            ResultCode::CapabilityFulfilledByMachine => "CAPABILITY_FULFILLED_BY_MACHINE",
            ResultCode::NoSuitableToolMounted => "NO_SUITABLE_TOOL_MOUNTED",
            ResultCode::NoSuitableToolExists => "NO_SUITABLE_TOOL_EXISTS",
            ResultCode::NoMountingPathForSuitableToolFound => {
                "NO_MOUNTING_PATH_FOR_SUITABLE_TOOL_FOUND"
            }
            ResultCode::SuitableToolMounted => "SUITABLE_TOOL_MOUNTED",
            ResultCode::SuitableToolNeedsToBeMounted => "SUITABLE_TOOL_NEEDS_TO_BE_MOUNTED",
            ResultCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether tools are considered as concrete mounted items or as types.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckMode {
    Instance,
    Type,
}

impl CheckMode {
    /// Mode implied by a machine's asset kind when the caller does not override it.
    pub fn for_machine(kind: AssetKind, instance_check: Option<bool>) -> Self {
        match instance_check {
            Some(true) => CheckMode::Instance,
            Some(false) => CheckMode::Type,
            None if kind == AssetKind::Instance => CheckMode::Instance,
            None => CheckMode::Type,
        }
    }

    pub fn asset_kind(self) -> AssetKind {
        match self {
            CheckMode::Instance => AssetKind::Instance,
            CheckMode::Type => AssetKind::Type,
        }
    }
}

/// Alternating asset-id / slot-label tokens, starting at the tool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MountingPath(Vec<String>);

impl MountingPath {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    /// Path of an asset that needs no mounting.
    pub fn single(asset_id: impl Into<String>) -> Self {
        Self(vec![asset_id.into()])
    }

    /// Prepend `asset_id` attached through `slot` to an existing path.
    pub fn prepend(asset_id: &str, slot: &str, rest: &MountingPath) -> Self {
        let mut tokens = Vec::with_capacity(rest.0.len() + 2);
        tokens.push(asset_id.to_string());
        tokens.push(slot.to_string());
        tokens.extend(rest.0.iter().cloned());
        Self(tokens)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn origin(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn ends_at(&self, asset_id: &str) -> bool {
        self.destination() == Some(asset_id)
    }

    /// A single-token path carries no actual mounting chain.
    pub fn is_trivial(&self) -> bool {
        self.0.len() <= 1
    }
}

impl fmt::Display for MountingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

/// Verdict policy for constraint shapes the matcher cannot interpret.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedConstraintPolicy {
    /// Treat as satisfied and log a warning.
    #[default]
    Permissive,
    /// Treat as unsatisfied.
    Strict,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckOptions {
    /// Overrides the check mode derived from the machine's asset kind.
    pub instance_check: Option<bool>,
    pub unsupported_constraints: UnsupportedConstraintPolicy,
}

/// One or more idShort paths of required capability containers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CapabilityPaths {
    Single(String),
    Many(Vec<String>),
}

impl CapabilityPaths {
    pub fn as_slice(&self) -> &[String] {
        match self {
            CapabilityPaths::Single(path) => std::slice::from_ref(path),
            CapabilityPaths::Many(paths) => paths,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum CheckOutcome {
    Single(CheckResult),
    Batch(Vec<CheckResult>),
}

impl CheckOutcome {
    pub fn results(&self) -> &[CheckResult] {
        match self {
            CheckOutcome::Single(result) => std::slice::from_ref(result),
            CheckOutcome::Batch(results) => results,
        }
    }
}

/// Caller-facing result of one capability check.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub endpoint: String,
    pub required_capability_submodel_id: String,
    pub required_capability_path: String,
    pub machine_asset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_check: Option<CheckMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_capability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_tool_type: Option<String>,
    pub code: ResultCode,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suitable_tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mounted_tools: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub mounting_paths_by_tool: IndexMap<String, Vec<MountingPath>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    /// Result shell for a check that has not reached a verdict yet.
    pub fn pending(
        endpoint: impl Into<String>,
        submodel_id: impl Into<String>,
        path: impl Into<String>,
        machine_asset_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            required_capability_submodel_id: submodel_id.into(),
            required_capability_path: path.into(),
            machine_asset_id: machine_asset_id.into(),
            type_of_check: None,
            required_capability: None,
            required_tool_type: None,
            code: ResultCode::InternalError,
            success: false,
            message: String::new(),
            suitable_tools: Vec::new(),
            mounted_tools: Vec::new(),
            mounting_paths_by_tool: IndexMap::new(),
            error: None,
        }
    }

    pub fn conclude(&mut self, code: ResultCode, message: impl Into<String>) {
        self.code = code;
        self.success = code.is_success();
        self.message = message.into();
    }

    pub fn fail(&mut self, error: impl fmt::Display) {
        let message = error.to_string();
        self.conclude(ResultCode::InternalError, message.clone());
        self.error = Some(message);
    }
}
