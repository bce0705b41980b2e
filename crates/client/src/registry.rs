use crate::config::ClientConfig;
use crate::descriptor::Descriptor;
use crate::encoding::encode_id;
use crate::error::Result;
use crate::http::{HttpClient, endpoint, parse_base};
use async_trait::async_trait;
use capcheck_api::{ApiResult, Asset, AssetAccessor, AssetPredicate, Submodel};
use futures::future::try_join_all;
use tracing::debug;
use url::Url;

/// Accessor resolving shells and submodels through AAS registries.
///
/// Every descriptor lookup is followed by a fetch of the first endpoint's
/// `protocolInformation.href`.
pub struct RegistryAccessor {
    aas_registry: Url,
    submodel_registry: Url,
    http: HttpClient,
}

impl RegistryAccessor {
    pub fn new(aas_registry: &str, submodel_registry: &str, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            aas_registry: parse_base(aas_registry)?,
            submodel_registry: parse_base(submodel_registry)?,
            http: HttpClient::new(config)?,
        })
    }

    pub fn shell_descriptors_url(&self) -> Result<Url> {
        endpoint(&self.aas_registry, &["shell-descriptors"])
    }

    pub fn shell_descriptor_url(&self, id: &str) -> Result<Url> {
        endpoint(&self.aas_registry, &["shell-descriptors", &encode_id(id)])
    }

    pub fn submodel_descriptor_url(&self, id: &str) -> Result<Url> {
        endpoint(&self.submodel_registry, &["submodel-descriptors", &encode_id(id)])
    }

    async fn shell_descriptor(&self, id: &str) -> Result<Descriptor> {
        self.http.get_json(self.shell_descriptor_url(id)?).await
    }

    async fn follow<T: serde::de::DeserializeOwned>(&self, descriptor: &Descriptor) -> Result<T> {
        let href = parse_base(descriptor.href()?)?;
        self.http.get_json(href).await
    }

    async fn fetch_submodel(&self, id: &str) -> Result<Submodel> {
        let descriptor: Descriptor = self.http.get_json(self.submodel_descriptor_url(id)?).await?;
        self.follow(&descriptor).await
    }
}

#[async_trait]
impl AssetAccessor for RegistryAccessor {
    fn describe(&self) -> String {
        format!("{} | {}", self.aas_registry, self.submodel_registry)
    }

    async fn get_asset(&self, id: &str) -> ApiResult<Asset> {
        let descriptor = self.shell_descriptor(id).await?;
        Ok(self.follow(&descriptor).await?)
    }

    async fn get_assets(&self, filter: Option<AssetPredicate<'_>>) -> ApiResult<Vec<Asset>> {
        let descriptors: Vec<Descriptor> =
            self.http.get_list(self.shell_descriptors_url()?).await?;
        let shells: Vec<Asset> =
            try_join_all(descriptors.iter().map(|descriptor| self.follow(descriptor))).await?;
        Ok(shells
            .into_iter()
            .filter(|asset| filter.is_none_or(|predicate| predicate(asset)))
            .collect())
    }

    async fn get_submodel(&self, id: &str) -> ApiResult<Submodel> {
        Ok(self.fetch_submodel(id).await?)
    }

    async fn get_submodels(&self, asset_id: &str) -> ApiResult<Vec<Submodel>> {
        let descriptor = self.shell_descriptor(asset_id).await?;

        if !descriptor.submodel_descriptors.is_empty() {
            let fetches = descriptor
                .submodel_descriptors
                .iter()
                .map(|submodel| self.follow::<Submodel>(submodel));
            return Ok(try_join_all(fetches).await?);
        }

        debug!(
            "Descriptor of '{}' embeds no submodel descriptors, resolving via shell",
            asset_id
        );
        let shell: Asset = self.follow(&descriptor).await?;
        let fetches = shell
            .submodel_ids()
            .map(|submodel_id| self.fetch_submodel(submodel_id));
        Ok(try_join_all(fetches).await?)
    }
}
