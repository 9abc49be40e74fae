// Per-Step JSONL Time Series Recorder
// Outputs one JSON line per simulated hour for independent analysis

use serde::Serialize;
use std::io::Write;

use ripple_engine::{AssetType, ImpactSeries, WorldGraph};

#[derive(Debug, Serialize)]
pub struct StepSnapshot {
    pub t: u64,
    pub max_impact: f64,
    pub mean_impact: f64,
    pub saturated_nodes: usize,
    pub port_max: f64,
    pub grid_max: f64,
}

/// Time series recorder that re-slices a per-node series into per-step
/// snapshots and writes JSONL.
pub struct TimeSeriesRecorder {
    snapshots: Vec<StepSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn from_series(graph: &WorldGraph, series: &ImpactSeries) -> Self {
        let steps = series.values().map(|s| s.len()).max().unwrap_or(0);
        let mut snapshots = Vec::with_capacity(steps);

        for t in 0..steps {
            let mut max_impact = 0.0_f64;
            let mut sum = 0.0;
            let mut count = 0usize;
            let mut saturated = 0usize;
            let mut port_max = 0.0_f64;
            let mut grid_max = 0.0_f64;

            for (node_id, samples) in series {
                let value = match samples.get(t) {
                    Some(&v) => v,
                    None => continue,
                };
                max_impact = max_impact.max(value);
                sum += value;
                count += 1;
                if value >= 0.999 {
                    saturated += 1;
                }
                match graph.node(node_id).and_then(|n| n.asset_type()) {
                    Some(AssetType::Port) => port_max = port_max.max(value),
                    Some(AssetType::Grid) => grid_max = grid_max.max(value),
                    _ => {}
                }
            }

            snapshots.push(StepSnapshot {
                t: t as u64,
                max_impact,
                mean_impact: if count > 0 { sum / count as f64 } else { 0.0 },
                saturated_nodes: saturated,
                port_max,
                grid_max,
            });
        }

        Self { snapshots }
    }

    /// Write all snapshots to a JSONL file.
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
