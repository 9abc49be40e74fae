// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Infrastructure Ripple Simulation Suite ("Terra") - Derived KPIs

use crate::graph::WorldGraph;
use crate::types::{AssetType, ImpactSeries, Kpis};

/// Derive summary indicators from a completed impact series, in a single
/// pass over the samples.
///
/// `peak_impact_time_hours` is the first time step, across any node, at
/// which the global maximum is attained. Node identity never influences
/// it: only the earliest attaining step is reported.
pub fn compute_kpis(graph: &WorldGraph, series: &ImpactSeries) -> Kpis {
    let mut port_max: Option<f64> = None;
    let mut grid_max: Option<f64> = None;
    let mut peak: Option<f64> = None;
    let mut peak_time: u64 = 0;

    for (node_id, samples) in series {
        let asset_type = graph.node(node_id).and_then(|n| n.asset_type());

        for (t, &value) in samples.iter().enumerate() {
            match peak {
                None => {
                    peak = Some(value);
                    peak_time = t as u64;
                }
                Some(current) if value > current => {
                    peak = Some(value);
                    peak_time = t as u64;
                }
                Some(current) if value == current => {
                    peak_time = peak_time.min(t as u64);
                }
                Some(_) => {}
            }

            match asset_type {
                Some(AssetType::Port) => track_max(&mut port_max, value),
                Some(AssetType::Grid) => track_max(&mut grid_max, value),
                _ => {}
            }
        }
    }

    Kpis {
        global_trade_index_delta: port_max,
        regional_energy_stress_delta: grid_max,
        peak_impact: peak,
        peak_impact_time_hours: peak.map(|_| peak_time),
    }
}

fn track_max(slot: &mut Option<f64>, value: f64) {
    match slot {
        None => *slot = Some(value),
        Some(current) if value > *current => *slot = Some(value),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
