// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Infrastructure Ripple Simulation Suite ("Terra") - World Dataset

use serde::{Deserialize, Serialize};

use crate::types::AssetType;

fn default_world() -> String {
    "earth".to_string()
}

fn default_capacity() -> f64 {
    1.0
}

// ─── Dataset Document ────────────────────────────────────────────────────────

/// Declarative world description consumed by graph construction.
/// Node records are processed in order; assets must appear after the
/// region they belong to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorldDataset {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl WorldDataset {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeRecord {
    Region {
        id: String,
        name: String,
        lat: f64,
        lon: f64,
        #[serde(default = "default_world")]
        planet: String,
    },
    Asset {
        id: String,
        name: String,
        lat: f64,
        lon: f64,
        asset_type: AssetType,
        region_id: String,
        #[serde(default = "default_capacity")]
        capacity: f64,
        #[serde(default = "default_world")]
        planet: String,
    },
}

impl NodeRecord {
    pub fn id(&self) -> &str {
        match self {
            NodeRecord::Region { id, .. } | NodeRecord::Asset { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub delay_hours: u64,
    pub decay: f64,
}

// ─── Demo World ──────────────────────────────────────────────────────────────

fn region(id: &str, name: &str, lat: f64, lon: f64) -> NodeRecord {
    NodeRecord::Region {
        id: id.to_string(),
        name: name.to_string(),
        lat,
        lon,
        planet: default_world(),
    }
}

fn asset(
    id: &str,
    name: &str,
    lat: f64,
    lon: f64,
    asset_type: AssetType,
    region_id: &str,
    capacity: f64,
) -> NodeRecord {
    NodeRecord::Asset {
        id: id.to_string(),
        name: name.to_string(),
        lat,
        lon,
        asset_type,
        region_id: region_id.to_string(),
        capacity,
        planet: default_world(),
    }
}

fn edge(source: &str, target: &str, weight: f64, delay_hours: u64, decay: f64) -> EdgeRecord {
    EdgeRecord {
        source: source.to_string(),
        target: target.to_string(),
        weight,
        delay_hours,
        decay,
    }
}

/// Built-in demo world: continental regions, major ports, and grid
/// regions with shipping-lane and interconnect couplings. Used when no
/// dataset file is configured; keeps the engine demonstrable offline.
pub fn demo_world() -> WorldDataset {
    WorldDataset {
        nodes: vec![
            region("na", "North America", 45.0, -100.0),
            region("eu", "Europe", 50.0, 10.0),
            region("as", "Asia", 35.0, 100.0),
            region("af", "Africa", 5.0, 20.0),
            region("oc", "Oceania", -25.0, 135.0),
            asset("panama_canal", "Panama Canal", 9.0765, -79.6555, AssetType::Port, "na", 0.95),
            asset("suez_canal", "Suez Canal", 30.5852, 32.2650, AssetType::Port, "af", 0.90),
            asset("los_angeles", "Port of Los Angeles", 33.7175, -118.2728, AssetType::Port, "na", 0.85),
            asset("rotterdam", "Port of Rotterdam", 51.9496, 4.1453, AssetType::Port, "eu", 0.88),
            asset("singapore", "Port of Singapore", 1.2644, 103.8220, AssetType::Port, "as", 0.92),
            asset("shanghai", "Port of Shanghai", 31.3389, 121.4914, AssetType::Port, "as", 1.0),
            asset("us_east", "US Eastern Grid", 40.0, -80.0, AssetType::Grid, "na", 1.0),
            asset("eu_central", "Central European Grid", 50.0, 9.0, AssetType::Grid, "eu", 0.9),
            asset("china_east", "East China Grid", 31.0, 120.0, AssetType::Grid, "as", 1.0),
        ],
        edges: vec![
            // Shipping lanes
            edge("suez_canal", "rotterdam", 0.6, 48, 0.05),
            edge("suez_canal", "singapore", 0.5, 72, 0.05),
            edge("panama_canal", "los_angeles", 0.6, 24, 0.05),
            edge("shanghai", "los_angeles", 0.5, 96, 0.05),
            edge("singapore", "shanghai", 0.55, 48, 0.05),
            edge("rotterdam", "los_angeles", 0.3, 120, 0.05),
            // Port congestion loads the regional grid
            edge("los_angeles", "us_east", 0.3, 12, 0.1),
            edge("rotterdam", "eu_central", 0.3, 12, 0.1),
            edge("shanghai", "china_east", 0.35, 12, 0.1),
            // Continental coupling
            edge("na", "eu", 0.5, 24, 0.1),
            edge("eu", "as", 0.5, 24, 0.1),
            edge("as", "na", 0.4, 24, 0.1),
            edge("af", "eu", 0.4, 24, 0.1),
            edge("oc", "as", 0.3, 24, 0.1),
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
