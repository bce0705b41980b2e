use super::reference::{Extension, Reference};
use serde::{Deserialize, Serialize};

/// Named, typed document attached to an asset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submodel {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
    #[serde(default)]
    pub submodel_elements: Vec<SubmodelElement>,
}

impl Submodel {
    pub fn new(id: impl Into<String>, id_short: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            id_short: Some(id_short.into()),
            semantic_id: None,
            extensions: Vec::new(),
            submodel_elements: Vec::new(),
        }
    }

    pub fn with_elements(mut self, elements: Vec<SubmodelElement>) -> Self {
        self.submodel_elements = elements;
        self
    }
}

/// Node of the submodel element tree.
///
/// The attributes shared by every element live here; the variant specific
/// payload is carried by [`ElementKind`], discriminated by `modelType` on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "modelType")]
pub enum ElementKind {
    Property {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
    #[serde(rename = "SubmodelElementCollection")]
    Collection {
        #[serde(default)]
        value: Vec<SubmodelElement>,
    },
    #[serde(rename = "SubmodelElementList")]
    List {
        #[serde(default)]
        value: Vec<SubmodelElement>,
    },
    Entity {
        #[serde(default)]
        statements: Vec<SubmodelElement>,
        #[serde(
            rename = "globalAssetId",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        global_asset_id: Option<String>,
    },
    RelationshipElement {
        first: Reference,
        second: Reference,
    },
    Capability,
    /// Any model type the engine does not interpret (operations, files, ...).
    #[serde(other)]
    Other,
}

impl ElementKind {
    pub fn model_type(&self) -> &'static str {
        match self {
            ElementKind::Property { .. } => "Property",
            ElementKind::Range { .. } => "Range",
            ElementKind::Collection { .. } => "SubmodelElementCollection",
            ElementKind::List { .. } => "SubmodelElementList",
            ElementKind::Entity { .. } => "Entity",
            ElementKind::RelationshipElement { .. } => "RelationshipElement",
            ElementKind::Capability => "Capability",
            ElementKind::Other => "Other",
        }
    }
}

impl SubmodelElement {
    fn with_kind(id_short: &str, kind: ElementKind) -> Self {
        Self {
            id_short: Some(id_short.to_string()),
            semantic_id: None,
            extensions: Vec::new(),
            kind,
        }
    }

    pub fn property(id_short: &str, value: impl Into<String>) -> Self {
        Self::with_kind(
            id_short,
            ElementKind::Property {
                value: Some(value.into()),
            },
        )
    }

    pub fn range(id_short: &str, min: impl Into<String>, max: impl Into<String>) -> Self {
        Self::with_kind(
            id_short,
            ElementKind::Range {
                min: Some(min.into()),
                max: Some(max.into()),
            },
        )
    }

    pub fn collection(id_short: &str, value: Vec<SubmodelElement>) -> Self {
        Self::with_kind(id_short, ElementKind::Collection { value })
    }

    pub fn list(id_short: &str, value: Vec<SubmodelElement>) -> Self {
        Self::with_kind(id_short, ElementKind::List { value })
    }

    pub fn entity(
        id_short: &str,
        global_asset_id: Option<&str>,
        statements: Vec<SubmodelElement>,
    ) -> Self {
        Self::with_kind(
            id_short,
            ElementKind::Entity {
                statements,
                global_asset_id: global_asset_id.map(str::to_string),
            },
        )
    }

    pub fn relationship(id_short: &str, first: Reference, second: Reference) -> Self {
        Self::with_kind(id_short, ElementKind::RelationshipElement { first, second })
    }

    pub fn capability(id_short: &str) -> Self {
        Self::with_kind(id_short, ElementKind::Capability)
    }

    /// Attach a single-key external semantic id.
    pub fn with_semantic_id(mut self, semantic_id: impl Into<String>) -> Self {
        self.semantic_id = Some(Reference::external(semantic_id));
        self
    }

    pub fn with_extension(mut self, semantic_id: &str, value: impl Into<String>) -> Self {
        self.extensions.push(Extension::new(semantic_id, value));
        self
    }

    pub fn id_short(&self) -> Option<&str> {
        self.id_short.as_deref()
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, ElementKind::Property { .. })
    }

    pub fn is_entity(&self) -> bool {
        matches!(self.kind, ElementKind::Entity { .. })
    }

    pub fn is_capability(&self) -> bool {
        matches!(self.kind, ElementKind::Capability)
    }

    /// Literal value of a `Property`, `None` for every other variant.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Property { value } => value.as_deref(),
            _ => None,
        }
    }
}
