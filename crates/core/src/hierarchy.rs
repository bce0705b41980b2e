//! Leaf extraction from a `HierarchicalStructures` (bill of material) submodel.

use crate::error::{CheckError, Result};
use crate::navigator::{ElementNode, find_child_by_id_short};
use crate::vocab::ENTRY_NODE;
use capcheck_api::{ElementKind, Submodel, SubmodelElement};

/// Leaf entities below `EntryNode`, depth-first and left to right.
///
/// Only `Entity` children are descended; an entity without entity children
/// is a leaf.
pub fn leaf_entities(bom: &Submodel) -> Result<Vec<&SubmodelElement>> {
    let entry = find_child_by_id_short(bom, ENTRY_NODE)
        .ok_or_else(|| CheckError::missing_element(ENTRY_NODE, bom.id.clone()))?;

    let mut leaves = Vec::new();
    collect_leaves(entry, &mut leaves);
    Ok(leaves)
}

fn collect_leaves<'a>(node: &'a SubmodelElement, leaves: &mut Vec<&'a SubmodelElement>) {
    let mut entities = node.children().iter().filter(|c| c.is_entity()).peekable();

    if entities.peek().is_none() {
        leaves.push(node);
        return;
    }

    for child in entities {
        collect_leaves(child, leaves);
    }
}

/// Global asset ids of the currently mounted leaf parts.
///
/// Leaves that do not name a global asset id contribute nothing.
pub fn mounted_leaf_asset_ids(bom: &Submodel) -> Result<Vec<String>> {
    Ok(leaf_entities(bom)?
        .into_iter()
        .filter_map(|leaf| match &leaf.kind {
            ElementKind::Entity {
                global_asset_id, ..
            } => global_asset_id.clone(),
            _ => None,
        })
        .collect())
}
