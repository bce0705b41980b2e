use serde::{Deserialize, Serialize};

/// One key of an AAS reference.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    #[serde(rename = "type")]
    pub key_type: String,
    pub value: String,
}

/// AAS reference: an ordered chain of keys, most specific last.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Reference {
    #[serde(rename = "type", default = "default_reference_type")]
    pub reference_type: String,
    #[serde(default)]
    pub keys: Vec<Key>,
}

fn default_reference_type() -> String {
    "ExternalReference".to_string()
}

impl Reference {
    /// External reference consisting of a single `GlobalReference` key.
    pub fn external(value: impl Into<String>) -> Self {
        Self {
            reference_type: default_reference_type(),
            keys: vec![Key {
                key_type: "GlobalReference".to_string(),
                value: value.into(),
            }],
        }
    }

    /// Model reference built from `(key type, value)` pairs.
    pub fn model<K, V>(keys: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            reference_type: "ModelReference".to_string(),
            keys: keys
                .into_iter()
                .map(|(key_type, value)| Key {
                    key_type: key_type.into(),
                    value: value.into(),
                })
                .collect(),
        }
    }

    /// Value of the last (most specific) key.
    pub fn last_key(&self) -> Option<&str> {
        self.keys.last().map(|k| k.value.as_str())
    }

    pub fn first_key(&self) -> Option<&str> {
        self.keys.first().map(|k| k.value.as_str())
    }
}

/// Extension attached to an asset, submodel or element.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Extension {
    pub fn new(semantic_id: impl Into<String>, value: impl Into<String>) -> Self {
        let semantic_id = semantic_id.into();
        Self {
            name: semantic_id.rsplit('/').find(|s| !s.is_empty()).map(str::to_string),
            semantic_id: Some(Reference::external(semantic_id)),
            value: Some(value.into()),
        }
    }
}
