//! In-memory implementation of AssetAccessor.
//!
//! Serves a fixed snapshot of assets and submodels, loaded from an AAS
//! environment document or assembled in code.

use crate::error::Result;
use async_trait::async_trait;
use capcheck_api::{
    ApiError, ApiResult, Asset, AssetAccessor, AssetPredicate, Environment, Submodel,
};
use std::collections::HashMap;
use std::path::Path;

pub struct InMemoryAccessor {
    label: String,
    /// Assets in declaration order
    assets: Vec<Asset>,
    /// Submodel id → submodel
    submodels: HashMap<String, Submodel>,
}

impl InMemoryAccessor {
    pub fn new() -> Self {
        Self {
            label: "memory".to_string(),
            assets: Vec::new(),
            submodels: HashMap::new(),
        }
    }

    pub fn from_environment(environment: Environment) -> Self {
        let mut accessor = Self::new();
        accessor.assets = environment.asset_administration_shells;
        accessor.submodels = environment
            .submodels
            .into_iter()
            .map(|submodel| (submodel.id.clone(), submodel))
            .collect();
        accessor
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let environment: Environment = serde_json::from_str(json)?;
        Ok(Self::from_environment(environment))
    }

    /// Load an AAS environment JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&content)?.with_label(format!("snapshot:{}", path.display())))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn with_submodel(mut self, submodel: Submodel) -> Self {
        self.submodels.insert(submodel.id.clone(), submodel);
        self
    }

    /// Store `submodel` and reference it from the asset `asset_id`.
    pub fn with_attached(mut self, asset_id: &str, submodel: Submodel) -> Self {
        if let Some(asset) = self.assets.iter_mut().find(|a| a.id == asset_id) {
            *asset = asset.clone().with_submodel(submodel.id.clone());
        }
        self.with_submodel(submodel)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn submodel_count(&self) -> usize {
        self.submodels.len()
    }

    fn lookup_asset(&self, id: &str) -> ApiResult<&Asset> {
        self.assets
            .iter()
            .find(|asset| asset.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("asset '{id}'")))
    }
}

impl Default for InMemoryAccessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetAccessor for InMemoryAccessor {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn get_asset(&self, id: &str) -> ApiResult<Asset> {
        self.lookup_asset(id).cloned()
    }

    async fn get_assets(&self, filter: Option<AssetPredicate<'_>>) -> ApiResult<Vec<Asset>> {
        Ok(self
            .assets
            .iter()
            .filter(|asset| filter.is_none_or(|predicate| predicate(asset)))
            .cloned()
            .collect())
    }

    async fn get_submodel(&self, id: &str) -> ApiResult<Submodel> {
        self.submodels
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("submodel '{id}'")))
    }

    async fn get_submodels(&self, asset_id: &str) -> ApiResult<Vec<Submodel>> {
        let asset = self.lookup_asset(asset_id)?;
        let mut submodels = Vec::new();
        for submodel_id in asset.submodel_ids() {
            submodels.push(self.get_submodel(submodel_id).await?);
        }
        Ok(submodels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capcheck_api::{AssetKind, id_short_is};
    use std::io::Write;

    fn accessor() -> InMemoryAccessor {
        InMemoryAccessor::new()
            .with_asset(Asset::new("urn:aas:machine", AssetKind::Instance))
            .with_asset(Asset::new("urn:aas:tool", AssetKind::Type))
            .with_attached(
                "urn:aas:machine",
                Submodel::new("urn:sm:nameplate", "Nameplate"),
            )
            .with_attached(
                "urn:aas:machine",
                Submodel::new("urn:sm:offered", "OfferedCapabilities"),
            )
    }

    #[tokio::test]
    async fn test_first_submodel_by_id_short() {
        let accessor = accessor();
        let offered = accessor
            .get_first_submodel("urn:aas:machine", &id_short_is("OfferedCapabilities"))
            .await
            .unwrap();
        assert_eq!(offered.map(|s| s.id), Some("urn:sm:offered".to_string()));

        let missing = accessor
            .get_first_submodel("urn:aas:machine", &id_short_is("HierarchicalStructures"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_asset_filter_and_not_found() {
        let accessor = accessor();
        let types = accessor
            .get_assets(Some(&|asset: &Asset| asset.kind() == AssetKind::Type))
            .await
            .unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(accessor.get_assets(None).await.unwrap().len(), 2);

        let err = accessor.get_asset("urn:aas:ghost").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_dangling_submodel_reference_is_an_error() {
        let accessor = InMemoryAccessor::new()
            .with_asset(Asset::new("urn:aas:m", AssetKind::Type).with_submodel("urn:sm:gone"));
        assert!(accessor.get_submodels("urn:aas:m").await.is_err());
    }

    #[test]
    fn test_load_environment_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let environment = serde_json::json!({
            "assetAdministrationShells": [{
                "id": "urn:aas:machine",
                "assetInformation": { "assetKind": "Type" },
                "submodels": [{ "type": "ModelReference", "keys": [{ "type": "Submodel", "value": "urn:sm:offered" }] }]
            }],
            "submodels": [{ "id": "urn:sm:offered", "idShort": "OfferedCapabilities", "submodelElements": [] }],
            "conceptDescriptions": []
        });
        write!(file, "{}", environment).unwrap();

        let accessor = InMemoryAccessor::from_file(file.path()).unwrap();
        assert_eq!(accessor.asset_count(), 1);
        assert_eq!(accessor.submodel_count(), 1);
        assert!(accessor.describe().starts_with("snapshot:"));
    }
}
