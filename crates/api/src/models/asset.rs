use super::reference::{Extension, Reference};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Type,
    Instance,
    NotApplicable,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetKind::Type => "Type",
            AssetKind::Instance => "Instance",
            AssetKind::NotApplicable => "NotApplicable",
        };
        f.write_str(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetInformation {
    pub asset_kind: AssetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
}

/// Digital-twin record of a machine, tool or resource
/// (wire form: AAS `AssetAdministrationShell`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    pub asset_information: AssetInformation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
    /// References to the submodels attached to this asset.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodels: Vec<Reference>,
}

impl Asset {
    pub fn new(id: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            id: id.into(),
            id_short: None,
            asset_information: AssetInformation {
                asset_kind: kind,
                global_asset_id: None,
            },
            extensions: Vec::new(),
            submodels: Vec::new(),
        }
    }

    pub fn with_global_asset_id(mut self, global_asset_id: impl Into<String>) -> Self {
        self.asset_information.global_asset_id = Some(global_asset_id.into());
        self
    }

    pub fn with_extension(mut self, semantic_id: &str, value: impl Into<String>) -> Self {
        self.extensions.push(Extension::new(semantic_id, value));
        self
    }

    pub fn with_submodel(mut self, submodel_id: impl Into<String>) -> Self {
        self.submodels
            .push(Reference::model([("Submodel", submodel_id.into())]));
        self
    }

    pub fn kind(&self) -> AssetKind {
        self.asset_information.asset_kind
    }

    pub fn global_asset_id(&self) -> Option<&str> {
        self.asset_information.global_asset_id.as_deref()
    }

    /// Ids of the referenced submodels (first key of each reference).
    pub fn submodel_ids(&self) -> impl Iterator<Item = &str> {
        self.submodels.iter().filter_map(|r| r.first_key())
    }
}
