use capcheck_api::{CheckOptions, EndpointConfig};
use capcheck_client::ClientConfig;
use capcheck_core::CapabilityChecker;
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file read with `--config`; explicit flags take precedence.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub endpoint: Option<EndpointConfig>,
    pub snapshot: Option<PathBuf>,
    pub client: ClientConfig,
    pub options: CheckOptions,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Where the asset data comes from.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// AAS repository base URL
    #[arg(long, value_name = "URL", conflicts_with_all = ["aas_registry", "snapshot"])]
    pub repository: Option<String>,

    /// AAS registry base URL (requires --submodel-registry)
    #[arg(long, value_name = "URL", requires = "submodel_registry", conflicts_with = "snapshot")]
    pub aas_registry: Option<String>,

    /// Submodel registry base URL
    #[arg(long, value_name = "URL", requires = "aas_registry")]
    pub submodel_registry: Option<String>,

    /// AAS environment JSON file to check against offline
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// JSON settings file (endpoint, client, options)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// HTTP basic auth user
    #[arg(long, requires = "password")]
    pub username: Option<String>,

    /// HTTP basic auth password
    #[arg(long, requires = "username")]
    pub password: Option<String>,
}

/// Resolved data source.
#[derive(Debug, PartialEq)]
pub enum Source {
    Endpoint(EndpointConfig, ClientConfig),
    Snapshot(PathBuf),
}

impl Source {
    pub fn label(&self) -> String {
        match self {
            Source::Endpoint(endpoint, _) => endpoint.to_string(),
            Source::Snapshot(path) => format!("snapshot:{}", path.display()),
        }
    }
}

impl SourceArgs {
    /// Merge flags over the config file; returns the source and the file's
    /// check options for further overriding.
    pub fn resolve(&self) -> Result<(Source, CheckOptions), Box<dyn std::error::Error>> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let mut client = file.client;
        if let Some(timeout_ms) = self.timeout_ms {
            client.timeout_ms = timeout_ms;
        }
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            client = client.with_credentials(username, password);
        }

        let flag_endpoint = match (&self.repository, &self.aas_registry, &self.submodel_registry) {
            (Some(url), _, _) => Some(EndpointConfig::repository(url)),
            (None, Some(aas), Some(submodels)) => Some(EndpointConfig::registry(aas, submodels)),
            _ => None,
        };

        let source = if let Some(snapshot) = &self.snapshot {
            Source::Snapshot(snapshot.clone())
        } else if let Some(endpoint) = flag_endpoint {
            Source::Endpoint(endpoint, client)
        } else if let Some(endpoint) = file.endpoint {
            Source::Endpoint(endpoint, client)
        } else if let Some(snapshot) = file.snapshot {
            Source::Snapshot(snapshot)
        } else {
            return Err(
                "No data source: pass --repository, --aas-registry/--submodel-registry, --snapshot or --config"
                    .into(),
            );
        };

        Ok((source, file.options))
    }
}

pub fn build_checker(
    source: &Source,
    options: CheckOptions,
) -> Result<CapabilityChecker, Box<dyn std::error::Error>> {
    Ok(match source {
        Source::Endpoint(endpoint, client) => {
            capcheck_runtime::build_checker(endpoint, client, options)?
        }
        Source::Snapshot(path) => capcheck_runtime::snapshot_checker(path, options)?,
    })
}
