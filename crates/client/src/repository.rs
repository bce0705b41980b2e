use crate::config::ClientConfig;
use crate::encoding::encode_id;
use crate::error::{ClientError, Result};
use crate::http::{HttpClient, endpoint, parse_base};
use async_trait::async_trait;
use capcheck_api::{ApiResult, Asset, AssetAccessor, AssetPredicate, Reference, Submodel};
use futures::future::try_join_all;
use url::Url;

/// Accessor talking directly to an AAS repository server.
///
/// Resources: `/shells`, `/shells/{id}`, `/shells/{id}/submodel-refs`
/// and `/submodels/{id}`, ids encoded with [`encode_id`].
pub struct RepositoryAccessor {
    base: Url,
    http: HttpClient,
}

impl RepositoryAccessor {
    pub fn new(base_url: &str, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            base: parse_base(base_url)?,
            http: HttpClient::new(config)?,
        })
    }

    pub fn shells_url(&self) -> Result<Url> {
        endpoint(&self.base, &["shells"])
    }

    pub fn shell_url(&self, id: &str) -> Result<Url> {
        endpoint(&self.base, &["shells", &encode_id(id)])
    }

    pub fn submodel_refs_url(&self, id: &str) -> Result<Url> {
        endpoint(&self.base, &["shells", &encode_id(id), "submodel-refs"])
    }

    pub fn submodel_url(&self, id: &str) -> Result<Url> {
        endpoint(&self.base, &["submodels", &encode_id(id)])
    }

    async fn fetch_submodel(&self, id: &str) -> Result<Submodel> {
        self.http.get_json(self.submodel_url(id)?).await
    }

    async fn fetch_submodel_by_ref(&self, reference: &Reference) -> Result<Submodel> {
        let id = reference
            .first_key()
            .ok_or_else(|| ClientError::NotFound("submodel reference without keys".to_string()))?;
        self.fetch_submodel(id).await
    }
}

#[async_trait]
impl AssetAccessor for RepositoryAccessor {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    async fn get_asset(&self, id: &str) -> ApiResult<Asset> {
        Ok(self.http.get_json(self.shell_url(id)?).await?)
    }

    async fn get_assets(&self, filter: Option<AssetPredicate<'_>>) -> ApiResult<Vec<Asset>> {
        let shells: Vec<Asset> = self.http.get_list(self.shells_url()?).await?;
        Ok(shells
            .into_iter()
            .filter(|asset| filter.is_none_or(|predicate| predicate(asset)))
            .collect())
    }

    async fn get_submodel(&self, id: &str) -> ApiResult<Submodel> {
        Ok(self.fetch_submodel(id).await?)
    }

    async fn get_submodels(&self, asset_id: &str) -> ApiResult<Vec<Submodel>> {
        let references: Vec<Reference> =
            self.http.get_list(self.submodel_refs_url(asset_id)?).await?;
        let fetches = references
            .iter()
            .map(|reference| self.fetch_submodel_by_ref(reference));
        Ok(try_join_all(fetches).await?)
    }
}
