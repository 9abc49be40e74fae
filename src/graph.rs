// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Infrastructure Ripple Simulation Suite ("Terra") - World Graph

use std::collections::BTreeMap;

use crate::dataset::{EdgeRecord, NodeRecord, WorldDataset};
use crate::types::{GraphView, NodeKind, NodeView, WorldEdge, WorldNode};

/// Synthetic asset→region coupling: a disrupted asset raises regional
/// stress. Added for every asset in addition to declared edges.
const REGION_COUPLING_WEIGHT: f64 = 0.8;
const REGION_COUPLING_DELAY: u64 = 0;
const REGION_COUPLING_DECAY: f64 = 0.1;

// ─── WorldGraph ──────────────────────────────────────────────────────────────

/// The authoritative node/edge set. Built once, read-only afterwards;
/// safe for unsynchronized concurrent reads across simulation requests.
///
/// Node tables are BTreeMaps so every iteration is total-ordered: the
/// propagation loop's summation order, and therefore its floating-point
/// results, never depend on insertion or hashing order.
#[derive(Debug, Clone)]
pub struct WorldGraph {
    nodes: BTreeMap<String, WorldNode>,
    edges: Vec<WorldEdge>,
    /// Target node id → indices into `edges`.
    incoming: BTreeMap<String, Vec<usize>>,
}

impl WorldGraph {
    /// Build from a dataset: nodes first (an asset whose region is not
    /// yet known is skipped), then declared edges (edges naming unknown
    /// endpoints are skipped), then one synthetic asset→region edge per
    /// asset. Skips are tolerated conditions, never construction faults.
    pub fn from_dataset(dataset: WorldDataset) -> Self {
        let mut graph = Self::empty();

        for record in dataset.nodes {
            graph.insert_node_record(record);
        }
        for record in dataset.edges {
            graph.insert_edge_record(record);
        }
        graph.add_region_couplings();
        graph
    }

    /// Minimal fallback world: three continental regions with two fixed
    /// couplings, so the engine is always queryable even without data.
    pub fn fallback() -> Self {
        let mut graph = Self::empty();
        for (id, name, lat, lon) in [
            ("na", "North America", 45.0, -100.0),
            ("eu", "Europe", 50.0, 10.0),
            ("as", "Asia", 35.0, 100.0),
        ] {
            graph.nodes.insert(
                id.to_string(),
                WorldNode {
                    id: id.to_string(),
                    name: name.to_string(),
                    lat,
                    lon,
                    world: "earth".to_string(),
                    base_impact: 0.0,
                    kind: NodeKind::Region { region: name.to_string() },
                },
            );
        }
        graph.push_edge(WorldEdge {
            source: "na".into(),
            target: "eu".into(),
            weight: 0.5,
            delay_hours: 24,
            decay: 0.1,
        });
        graph.push_edge(WorldEdge {
            source: "eu".into(),
            target: "as".into(),
            weight: 0.5,
            delay_hours: 24,
            decay: 0.1,
        });
        graph
    }

    /// Parse a dataset document, failing over to the fallback world on
    /// any parse error.
    pub fn from_json_str(input: &str) -> Self {
        match WorldDataset::from_json_str(input) {
            Ok(dataset) => Self::from_dataset(dataset),
            Err(_) => Self::fallback(),
        }
    }

    /// Load a dataset file, failing over to the fallback world if the
    /// file is missing, unreadable, or malformed. The path is an explicit
    /// configuration value; no working-directory probing happens here.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_json_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(input) => Self::from_json_str(&input),
            Err(_) => Self::fallback(),
        }
    }

    fn empty() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            incoming: BTreeMap::new(),
        }
    }

    fn insert_node_record(&mut self, record: NodeRecord) {
        match record {
            NodeRecord::Region { id, name, lat, lon, planet } => {
                let node = WorldNode {
                    id: id.clone(),
                    name: name.clone(),
                    lat,
                    lon,
                    world: planet,
                    base_impact: 0.0,
                    kind: NodeKind::Region { region: name },
                };
                self.nodes.insert(id, node);
            }
            NodeRecord::Asset { id, name, lat, lon, asset_type, region_id, capacity, planet } => {
                // An asset naming a region not yet declared is skipped
                // wholesale; declaration order in the dataset matters.
                if !self.nodes.contains_key(&region_id) {
                    return;
                }
                let node = WorldNode {
                    id: id.clone(),
                    name,
                    lat,
                    lon,
                    world: planet,
                    base_impact: 0.0,
                    kind: NodeKind::Asset {
                        asset_type,
                        region_id,
                        capacity: capacity.max(0.0),
                    },
                };
                self.nodes.insert(id, node);
            }
        }
    }

    fn insert_edge_record(&mut self, record: EdgeRecord) {
        if !self.nodes.contains_key(&record.source) || !self.nodes.contains_key(&record.target) {
            return;
        }
        self.push_edge(WorldEdge {
            source: record.source,
            target: record.target,
            weight: record.weight,
            delay_hours: record.delay_hours,
            decay: record.decay,
        });
    }

    fn add_region_couplings(&mut self) {
        let couplings: Vec<(String, String)> = self
            .nodes
            .values()
            .filter_map(|node| {
                node.region_id()
                    .map(|region| (node.id.clone(), region.to_string()))
            })
            .collect();
        for (asset_id, region_id) in couplings {
            self.push_edge(WorldEdge {
                source: asset_id,
                target: region_id,
                weight: REGION_COUPLING_WEIGHT,
                delay_hours: REGION_COUPLING_DELAY,
                decay: REGION_COUPLING_DECAY,
            });
        }
    }

    fn push_edge(&mut self, edge: WorldEdge) {
        let index = self.edges.len();
        self.incoming.entry(edge.target.clone()).or_default().push(index);
        self.edges.push(edge);
    }

    // ─── Structural queries ──────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&WorldNode> {
        self.nodes.get(id)
    }

    /// Nodes in total (id) order.
    pub fn nodes(&self) -> impl Iterator<Item = &WorldNode> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }

    pub fn edges(&self) -> &[WorldEdge] {
        &self.edges
    }

    /// Edges arriving at the given node, in insertion order.
    pub fn incoming(&self, target_id: &str) -> impl Iterator<Item = &WorldEdge> {
        self.incoming
            .get(target_id)
            .into_iter()
            .flatten()
            .map(move |&index| &self.edges[index])
    }

    /// Side-effect-free projection of one world: its nodes, and the edges
    /// whose endpoints both belong to it.
    pub fn graph_view(&self, world: &str) -> GraphView {
        let nodes: Vec<NodeView> = self
            .nodes
            .values()
            .filter(|node| node.world == world)
            .map(node_view)
            .collect();

        let edges: Vec<WorldEdge> = self
            .edges
            .iter()
            .filter(|edge| {
                self.node_in_world(&edge.source, world) && self.node_in_world(&edge.target, world)
            })
            .cloned()
            .collect();

        GraphView { nodes, edges }
    }

    fn node_in_world(&self, id: &str, world: &str) -> bool {
        self.nodes.get(id).map(|n| n.world == world).unwrap_or(false)
    }
}

fn node_view(node: &WorldNode) -> NodeView {
    match &node.kind {
        NodeKind::Region { region } => NodeView {
            id: node.id.clone(),
            name: node.name.clone(),
            node_type: "region".to_string(),
            lat: node.lat,
            lon: node.lon,
            region: region.clone(),
            asset_type: None,
            capacity: 1.0,
            world: node.world.clone(),
        },
        NodeKind::Asset { asset_type, region_id, capacity } => NodeView {
            id: node.id.clone(),
            name: node.name.clone(),
            node_type: "asset".to_string(),
            lat: node.lat,
            lon: node.lon,
            region: region_id.clone(),
            asset_type: Some(*asset_type),
            capacity: *capacity,
            world: node.world.clone(),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::demo_world;
    use crate::types::AssetType;

    #[test]
    fn test_demo_world_builds_with_region_couplings() {
        let graph = WorldGraph::from_dataset(demo_world());
        assert!(graph.contains("suez_canal"));
        assert!(graph.contains("rotterdam"));

        let suez = graph.node("suez_canal").unwrap();
        assert_eq!(suez.lat, 30.5852);
        assert_eq!(suez.lon, 32.2650);

        // Declared shipping lane survives construction.
        assert!(graph
            .incoming("rotterdam")
            .any(|e| e.source == "suez_canal"));

        // Synthetic coupling: suez_canal → af with the fixed parameters.
        let coupling = graph
            .incoming("af")
            .find(|e| e.source == "suez_canal")
            .expect("synthetic asset→region edge missing");
        assert_eq!(coupling.weight, 0.8);
        assert_eq!(coupling.delay_hours, 0);
        assert_eq!(coupling.decay, 0.1);
    }

    #[test]
    fn test_unknown_edge_endpoints_are_skipped() {
        let mut ds = demo_world();
        let before = WorldGraph::from_dataset(ds.clone()).edges().len();
        ds.edges.push(crate::dataset::EdgeRecord {
            source: "suez_canal".into(),
            target: "atlantis".into(),
            weight: 0.9,
            delay_hours: 1,
            decay: 0.1,
        });
        let graph = WorldGraph::from_dataset(ds);
        assert_eq!(graph.edges().len(), before, "edge to unknown node must be skipped");
    }

    #[test]
    fn test_asset_with_unknown_region_is_skipped() {
        let ds = WorldDataset {
            nodes: vec![crate::dataset::NodeRecord::Asset {
                id: "ghost_port".into(),
                name: "Ghost Port".into(),
                lat: 0.0,
                lon: 0.0,
                asset_type: AssetType::Port,
                region_id: "nowhere".into(),
                capacity: 1.0,
                planet: "earth".into(),
            }],
            edges: vec![],
        };
        let graph = WorldGraph::from_dataset(ds);
        assert!(!graph.contains("ghost_port"));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_fallback_world_shape() {
        let graph = WorldGraph::fallback();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edges().len(), 2);
        assert!(graph.contains("na") && graph.contains("eu") && graph.contains("as"));
    }

    #[test]
    fn test_malformed_input_falls_back() {
        let graph = WorldGraph::from_json_str("{ not json");
        assert_eq!(graph.len(), 3, "parse failure must yield the fallback world");
    }

    #[test]
    fn test_graph_view_partitions_by_world() {
        let ds = WorldDataset {
            nodes: vec![
                crate::dataset::NodeRecord::Region {
                    id: "na".into(),
                    name: "North America".into(),
                    lat: 45.0,
                    lon: -100.0,
                    planet: "earth".into(),
                },
                crate::dataset::NodeRecord::Region {
                    id: "tharsis".into(),
                    name: "Tharsis".into(),
                    lat: 0.0,
                    lon: -110.0,
                    planet: "mars".into(),
                },
            ],
            edges: vec![crate::dataset::EdgeRecord {
                source: "na".into(),
                target: "tharsis".into(),
                weight: 0.5,
                delay_hours: 1,
                decay: 0.1,
            }],
        };
        let graph = WorldGraph::from_dataset(ds);

        let earth = graph.graph_view("earth");
        assert_eq!(earth.nodes.len(), 1);
        assert_eq!(earth.nodes[0].id, "na");
        // The cross-world edge is excluded from both views.
        assert!(earth.edges.is_empty());

        let mars = graph.graph_view("mars");
        assert_eq!(mars.nodes.len(), 1);
        assert!(mars.edges.is_empty());
    }
}
