//! Mounting path search over the slot compatibility graph.
//!
//! An edge `A -> B` exists iff `A` requires a slot that `B` offers (and
//! `A != B`). A mounting path starts at a tool, alternates asset ids and slot
//! labels, and ends at an asset that needs no further mounting.

use crate::navigator::extension_value;
use crate::vocab::{OFFERED_SLOT, REQUIRED_SLOT};
use capcheck_api::{Asset, MountingPath};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SlotNode<'a> {
    pub id: &'a str,
    pub required_slot: Option<&'a str>,
    pub offered_slot: Option<&'a str>,
}

/// Directed slot compatibility graph built from one asset snapshot.
pub struct SlotGraph<'a> {
    topology: StableDiGraph<SlotNode<'a>, &'a str>,
    index: HashMap<&'a str, NodeIndex>,
}

impl<'a> SlotGraph<'a> {
    /// Build the graph; assets repeating an already seen id are ignored.
    pub fn build<I>(assets: I) -> Self
    where
        I: IntoIterator<Item = &'a Asset>,
    {
        let mut topology = StableDiGraph::new();
        let mut index = HashMap::new();
        let mut offered_by: HashMap<&'a str, Vec<NodeIndex>> = HashMap::new();

        for asset in assets {
            if index.contains_key(asset.id.as_str()) {
                continue;
            }
            let node = SlotNode {
                id: asset.id.as_str(),
                required_slot: extension_value(asset, REQUIRED_SLOT),
                offered_slot: extension_value(asset, OFFERED_SLOT),
            };
            let offered_slot = node.offered_slot;
            let idx = topology.add_node(node);
            index.insert(asset.id.as_str(), idx);
            if let Some(slot) = offered_slot {
                offered_by.entry(slot).or_default().push(idx);
            }
        }

        let requirements: Vec<(NodeIndex, &'a str)> = topology
            .node_indices()
            .filter_map(|idx| topology[idx].required_slot.map(|slot| (idx, slot)))
            .collect();

        for (from, slot) in requirements {
            for &to in offered_by.get(slot).into_iter().flatten() {
                if to != from {
                    topology.add_edge(from, to, slot);
                }
            }
        }

        Self { topology, index }
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.index.contains_key(asset_id)
    }

    /// Every mounting path starting at `asset_id`; empty if the asset is unknown.
    pub fn mounting_paths(&self, asset_id: &str) -> Vec<MountingPath> {
        let Some(&start) = self.index.get(asset_id) else {
            return Vec::new();
        };
        let mut on_path = HashSet::new();
        self.paths_from(start, &mut on_path)
    }

    /// Mounting paths from `asset_id` that end at `target_id`.
    pub fn paths_to(&self, asset_id: &str, target_id: &str) -> Vec<MountingPath> {
        self.mounting_paths(asset_id)
            .into_iter()
            .filter(|path| path.ends_at(target_id))
            .collect()
    }

    // Targets of outgoing edges in asset declaration order.
    fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self.topology.edges(node).map(|e| e.target()).collect();
        targets.sort_by_key(|idx| idx.index());
        targets
    }

    fn paths_from(&self, node: NodeIndex, on_path: &mut HashSet<NodeIndex>) -> Vec<MountingPath> {
        let current = &self.topology[node];
        let Some(slot) = current.required_slot else {
            return vec![MountingPath::single(current.id)];
        };

        on_path.insert(node);
        let mut paths = Vec::new();
        for next in self.successors(node) {
            if on_path.contains(&next) {
                debug!(
                    "Slot cycle: '{}' leads back to '{}', branch dropped",
                    current.id, self.topology[next].id
                );
                continue;
            }
            for sub_path in self.paths_from(next, on_path) {
                paths.push(MountingPath::prepend(current.id, slot, &sub_path));
            }
        }
        on_path.remove(&node);

        paths
    }
}

/// All mounting paths of `asset` within `all_assets`.
///
/// `asset` takes part in the search even when the catalog does not list it.
pub fn mounting_paths(asset: &Asset, all_assets: &[Asset]) -> Vec<MountingPath> {
    SlotGraph::build(std::iter::once(asset).chain(all_assets)).mounting_paths(&asset.id)
}
