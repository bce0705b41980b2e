use serde::{Deserialize, Serialize};
use std::fmt;

/// Where assets and submodels are fetched from.
///
/// On the wire a plain string is a repository URL; an object with both
/// registry endpoints selects registry-mediated lookup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum EndpointConfig {
    Repository(String),
    Registry {
        #[serde(rename = "aasRegistryEndpoint")]
        aas_registry: String,
        #[serde(rename = "submodelRegistryEndpoint")]
        submodel_registry: String,
    },
}

impl EndpointConfig {
    pub fn repository(url: impl Into<String>) -> Self {
        EndpointConfig::Repository(url.into())
    }

    pub fn registry(aas_registry: impl Into<String>, submodel_registry: impl Into<String>) -> Self {
        EndpointConfig::Registry {
            aas_registry: aas_registry.into(),
            submodel_registry: submodel_registry.into(),
        }
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointConfig::Repository(url) => f.write_str(url),
            EndpointConfig::Registry {
                aas_registry,
                submodel_registry,
            } => write!(f, "registry(aas={aas_registry}, submodels={submodel_registry})"),
        }
    }
}
