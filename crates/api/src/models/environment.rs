use super::asset::Asset;
use super::submodel::Submodel;
use serde::{Deserialize, Serialize};

/// AAS environment document: a self-contained snapshot of shells and submodels.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(default)]
    pub asset_administration_shells: Vec<Asset>,
    #[serde(default)]
    pub submodels: Vec<Submodel>,
}
