use crate::error::ApiResult;
use crate::models::{Asset, Submodel};
use async_trait::async_trait;

/// Predicate used to pick a submodel among the ones attached to an asset.
pub type SubmodelPredicate<'a> = &'a (dyn Fn(&Submodel) -> bool + Send + Sync);

/// Predicate used to narrow the asset catalog.
pub type AssetPredicate<'a> = &'a (dyn Fn(&Asset) -> bool + Send + Sync);

/// Read access to a snapshot of assets and submodels.
///
/// The check engine consumes data exclusively through this trait, so the
/// transport (direct repository, registry indirection, in-memory snapshot)
/// is chosen once when the accessor is constructed.
#[async_trait]
pub trait AssetAccessor: Send + Sync {
    /// Human readable description of the data source (used in results and logs).
    fn describe(&self) -> String;

    /// Fetch one asset by its id.
    async fn get_asset(&self, id: &str) -> ApiResult<Asset>;

    /// Fetch the full asset catalog, optionally narrowed by `filter`.
    async fn get_assets(&self, filter: Option<AssetPredicate<'_>>) -> ApiResult<Vec<Asset>>;

    /// Fetch one submodel by its id.
    async fn get_submodel(&self, id: &str) -> ApiResult<Submodel>;

    /// Fetch every submodel referenced by the asset, in reference order.
    async fn get_submodels(&self, asset_id: &str) -> ApiResult<Vec<Submodel>>;

    /// Fetch the first submodel of the asset matching `predicate`.
    async fn get_first_submodel(
        &self,
        asset_id: &str,
        predicate: SubmodelPredicate<'_>,
    ) -> ApiResult<Option<Submodel>> {
        Ok(self
            .get_submodels(asset_id)
            .await?
            .into_iter()
            .find(|submodel| predicate(submodel)))
    }
}

/// Shorthand predicate matching a submodel by its idShort.
pub fn id_short_is(id_short: &str) -> impl Fn(&Submodel) -> bool + Send + Sync + '_ {
    move |submodel: &Submodel| submodel.id_short.as_deref() == Some(id_short)
}
