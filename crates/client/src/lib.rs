//! HTTP accessors for AAS repositories and registries.

pub mod config;
pub mod descriptor;
pub mod encoding;
pub mod error;
pub mod http;
pub mod registry;
pub mod repository;

pub use config::{ClientConfig, Credentials};
pub use encoding::encode_id;
pub use error::{ClientError, Result};
pub use registry::RegistryAccessor;
pub use repository::RepositoryAccessor;

use capcheck_api::{AssetAccessor, EndpointConfig};
use std::sync::Arc;
use tracing::info;

/// Build the accessor matching the shape of `endpoint`.
pub fn accessor_for(
    endpoint: &EndpointConfig,
    config: &ClientConfig,
) -> Result<Arc<dyn AssetAccessor>> {
    let accessor: Arc<dyn AssetAccessor> = match endpoint {
        EndpointConfig::Repository(url) => Arc::new(RepositoryAccessor::new(url, config)?),
        EndpointConfig::Registry {
            aas_registry,
            submodel_registry,
        } => Arc::new(RegistryAccessor::new(aas_registry, submodel_registry, config)?),
    };
    info!("Using data source {}", accessor.describe());
    Ok(accessor)
}
