// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Infrastructure Ripple Simulation Suite ("Terra") - Type Definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─── Asset Type ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Port,
    Grid,
    /// Catch-all for asset categories the engine has no KPI for.
    Other,
}

impl Default for AssetType {
    fn default() -> Self { AssetType::Other }
}

// Unrecognized categories fold into Other instead of failing the record.
impl<'de> Deserialize<'de> for AssetType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "port" => AssetType::Port,
            "grid" => AssetType::Grid,
            _ => AssetType::Other,
        })
    }
}

// ─── Node Kind ───────────────────────────────────────────────────────────────

/// Node variant payload. All nodes live in one flat table keyed by id;
/// the kind carries only the variant-specific fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Region {
        /// Geographic grouping name (the region's own display name).
        region: String,
    },
    Asset {
        asset_type: AssetType,
        /// Id of the owning region node.
        region_id: String,
        /// Relative throughput/size, >= 0.
        capacity: f64,
    },
}

// ─── WorldNode ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldNode {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Partition key for independent simulated worlds sharing the engine.
    pub world: String,
    /// Baseline stress, reserved; always 0.0 at construction.
    #[serde(default)]
    pub base_impact: f64,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl WorldNode {
    pub fn is_region(&self) -> bool {
        matches!(self.kind, NodeKind::Region { .. })
    }

    pub fn asset_type(&self) -> Option<AssetType> {
        match self.kind {
            NodeKind::Asset { asset_type, .. } => Some(asset_type),
            NodeKind::Region { .. } => None,
        }
    }

    pub fn region_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Asset { region_id, .. } => Some(region_id),
            NodeKind::Region { .. } => None,
        }
    }
}

// ─── WorldEdge ───────────────────────────────────────────────────────────────

/// Directed coupling between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldEdge {
    pub source: String,
    pub target: String,
    /// Fraction of source impact transmissible to the target, in [0, 1].
    pub weight: f64,
    /// Time steps before source impact reaches the target.
    pub delay_hours: u64,
    /// Exponential attenuation rate, >= 0, evaluated against absolute
    /// elapsed simulation time (not time since the edge's own delay).
    pub decay: f64,
}

// ─── Shock ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ShockError {
    #[error("shock has an empty target set")]
    EmptyTargets,
    #[error("shock magnitude {0} is outside [0, 1]")]
    MagnitudeOutOfRange(f64),
    #[error("shock duration {0}h is below the 1h minimum")]
    DurationTooShort(u64),
}

/// A disruption specification: which nodes, how severely, for how long.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shock {
    pub target_ids: Vec<String>,
    /// Severity in [0, 1].
    pub magnitude: f64,
    /// Whole hours, >= 1. One discrete step per hour.
    pub duration_hours: u64,
    /// Informational start timestamp (epoch millis). Never enters the
    /// numeric algorithm.
    #[serde(default)]
    pub start_ts_ms: Option<u64>,
}

impl Shock {
    pub fn new(target_ids: Vec<String>, magnitude: f64, duration_hours: u64) -> Self {
        Self { target_ids, magnitude, duration_hours, start_ts_ms: None }
    }

    /// Reject structurally invalid shocks before propagation begins.
    /// Unknown target ids are a data-shape condition, not a fault, and
    /// are deliberately not checked here.
    pub fn validate(&self) -> Result<(), ShockError> {
        if self.target_ids.is_empty() {
            return Err(ShockError::EmptyTargets);
        }
        if !(0.0..=1.0).contains(&self.magnitude) {
            return Err(ShockError::MagnitudeOutOfRange(self.magnitude));
        }
        if self.duration_hours < 1 {
            return Err(ShockError::DurationTooShort(self.duration_hours));
        }
        Ok(())
    }
}

// ─── Impact Series ───────────────────────────────────────────────────────────

/// Per-node impact samples: node id → duration_hours + 1 floats, index 0 = t=0.
/// BTreeMap keeps node iteration total-ordered, which keeps floating-point
/// summation order (and therefore the series) bit-identical across runs.
pub type ImpactSeries = BTreeMap<String, Vec<f64>>;

// ─── KPIs ────────────────────────────────────────────────────────────────────

/// Derived indicators over a completed impact series. Absent node
/// categories omit the corresponding key rather than erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Kpis {
    /// Max impact ever reached by any port asset. Absent without ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_trade_index_delta: Option<f64>,
    /// Max impact ever reached by any grid asset. Absent without grids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regional_energy_stress_delta: Option<f64>,
    /// Single maximum across all nodes and time steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_impact: Option<f64>,
    /// First time step, across any node, at which the global maximum is
    /// attained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_impact_time_hours: Option<u64>,
}

// ─── SimulationResult ────────────────────────────────────────────────────────

/// One completed simulation run. Immutable once produced; persisted
/// verbatim by the scenario store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationResult {
    pub scenario_id: String,
    pub shock: Shock,
    pub impact_series: ImpactSeries,
    pub kpis: Kpis,
    pub duration_hours: u64,
}

/// Mint a time-derived scenario id. Collisions within one millisecond are
/// accepted risk (last writer wins in the store).
pub fn next_scenario_id() -> String {
    // On wasm32-unknown-unknown, `std::time::SystemTime` is unavailable;
    // fall back to a process-local counter.
    #[cfg(not(target_arch = "wasm32"))]
    {
        let ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        format!("scenario_{}", ms)
    }
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(1);
        format!("scenario_{}", NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

// ─── Graph View ──────────────────────────────────────────────────────────────

/// Read-only projection of one world's nodes and edges, for visualization
/// and for giving the query interpreter a catalog of addressable names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<WorldEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub lat: f64,
    pub lon: f64,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<AssetType>,
    pub capacity: f64,
    pub world: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
