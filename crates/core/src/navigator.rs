//! Generic traversal over the submodel element tree.
//!
//! Submodels and elements share one navigation surface through
//! [`ElementNode`]; semantic ids and extensions (also carried by assets)
//! through [`Semantic`].

use capcheck_api::{Asset, ElementKind, Extension, Reference, Submodel, SubmodelElement};
use tracing::debug;

/// A node whose children can be walked by idShort.
pub trait ElementNode {
    fn id_short(&self) -> Option<&str>;

    /// Ordered children; leaf variants expose none.
    fn children(&self) -> &[SubmodelElement];
}

impl ElementNode for Submodel {
    fn id_short(&self) -> Option<&str> {
        self.id_short.as_deref()
    }

    fn children(&self) -> &[SubmodelElement] {
        &self.submodel_elements
    }
}

impl ElementNode for SubmodelElement {
    fn id_short(&self) -> Option<&str> {
        self.id_short.as_deref()
    }

    fn children(&self) -> &[SubmodelElement] {
        match &self.kind {
            ElementKind::Collection { value } | ElementKind::List { value } => value,
            ElementKind::Entity { statements, .. } => statements,
            ElementKind::Property { .. }
            | ElementKind::Range { .. }
            | ElementKind::RelationshipElement { .. }
            | ElementKind::Capability
            | ElementKind::Other => &[],
        }
    }
}

/// Anything carrying a semantic reference and extensions.
pub trait Semantic {
    fn semantic_reference(&self) -> Option<&Reference>;
    fn extension_list(&self) -> &[Extension];
}

impl Semantic for Asset {
    fn semantic_reference(&self) -> Option<&Reference> {
        None
    }

    fn extension_list(&self) -> &[Extension] {
        &self.extensions
    }
}

impl Semantic for Submodel {
    fn semantic_reference(&self) -> Option<&Reference> {
        self.semantic_id.as_ref()
    }

    fn extension_list(&self) -> &[Extension] {
        &self.extensions
    }
}

impl Semantic for SubmodelElement {
    fn semantic_reference(&self) -> Option<&Reference> {
        self.semantic_id.as_ref()
    }

    fn extension_list(&self) -> &[Extension] {
        &self.extensions
    }
}

impl Semantic for Extension {
    fn semantic_reference(&self) -> Option<&Reference> {
        self.semantic_id.as_ref()
    }

    fn extension_list(&self) -> &[Extension] {
        &[]
    }
}

pub fn children_of<N: ElementNode + ?Sized>(node: &N) -> &[SubmodelElement] {
    node.children()
}

/// First child (declared order) matching `predicate`.
pub fn find_child<N, P>(node: &N, predicate: P) -> Option<&SubmodelElement>
where
    N: ElementNode + ?Sized,
    P: Fn(&SubmodelElement) -> bool,
{
    node.children().iter().find(|&child| predicate(child))
}

pub fn find_child_by_id_short<'a, N>(node: &'a N, id_short: &str) -> Option<&'a SubmodelElement>
where
    N: ElementNode + ?Sized,
{
    find_child(node, |child| child.id_short() == Some(id_short))
}

/// Children whose idShort starts with `prefix`, in declared order.
pub fn children_with_prefix<'a, N>(
    node: &'a N,
    prefix: &'a str,
) -> impl Iterator<Item = &'a SubmodelElement> + 'a
where
    N: ElementNode + ?Sized,
{
    node.children()
        .iter()
        .filter(move |child| child.id_short().is_some_and(|s| s.starts_with(prefix)))
}

/// Resolve a `/`-separated idShort path below `root`.
///
/// Each segment picks the first matching child; any unmatched segment
/// yields `None`. An empty path resolves to nothing.
pub fn resolve_path<'a, N>(root: &'a N, path: &str) -> Option<&'a SubmodelElement>
where
    N: ElementNode + ?Sized,
{
    let mut segments = path.split('/');
    let first = segments.next().filter(|segment| !segment.is_empty())?;

    let mut current = find_child_by_id_short(root, first)?;
    for segment in segments {
        match find_child_by_id_short(current, segment) {
            Some(child) => current = child,
            None => {
                debug!("idShort path '{}' stops at segment '{}'", path, segment);
                return None;
            }
        }
    }
    Some(current)
}

/// Most specific key of the node's semantic id.
pub fn semantic_id_of<S: Semantic + ?Sized>(node: &S) -> Option<&str> {
    node.semantic_reference().and_then(Reference::last_key)
}

/// Value of the first extension whose semantic id equals `semantic_id`.
pub fn extension_value<'a, S>(node: &'a S, semantic_id: &str) -> Option<&'a str>
where
    S: Semantic + ?Sized,
{
    node.extension_list()
        .iter()
        .find(|extension| semantic_id_of(*extension) == Some(semantic_id))
        .and_then(|extension| extension.value.as_deref())
}
