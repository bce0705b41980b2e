//! Registry descriptor payloads.

use crate::error::{ClientError, Result};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolInformation {
    pub href: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorEndpoint {
    #[serde(default)]
    pub interface: Option<String>,
    pub protocol_information: ProtocolInformation,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub id: String,
    #[serde(default)]
    pub endpoints: Vec<DescriptorEndpoint>,
    /// Only present on shell descriptors.
    #[serde(default)]
    pub submodel_descriptors: Vec<Descriptor>,
}

impl Descriptor {
    /// Address of the described resource (first endpoint).
    pub fn href(&self) -> Result<&str> {
        self.endpoints
            .first()
            .map(|endpoint| endpoint.protocol_information.href.as_str())
            .ok_or_else(|| ClientError::MissingEndpoint(self.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_href() {
        let descriptor: Descriptor = serde_json::from_value(serde_json::json!({
            "id": "urn:aas:machine",
            "idShort": "Machine",
            "endpoints": [
                {
                    "interface": "AAS-3.0",
                    "protocolInformation": { "href": "http://repo/shells/dXJuOmFhczptYWNoaW5l" }
                },
                {
                    "interface": "AAS-3.0",
                    "protocolInformation": { "href": "http://mirror/shells/dXJuOmFhczptYWNoaW5l" }
                }
            ]
        }))
        .unwrap();
        assert_eq!(descriptor.href().unwrap(), "http://repo/shells/dXJuOmFhczptYWNoaW5l");

        let bare: Descriptor = serde_json::from_str(r#"{ "id": "urn:sm:x" }"#).unwrap();
        assert!(matches!(bare.href(), Err(ClientError::MissingEndpoint(_))));
    }
}
