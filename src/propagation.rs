// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Infrastructure Ripple Simulation Suite ("Terra") - Shock Propagation

use crate::graph::WorldGraph;
use crate::kpi::compute_kpis;
use crate::types::{next_scenario_id, ImpactSeries, Shock, ShockError, SimulationResult};

// ─── Diffusion ───────────────────────────────────────────────────────────────

/// Advance the impact series over discrete time, t = 0..=duration_hours.
///
/// Per step, each node's new value is its previous value plus the sum of
/// incoming contributions `delayed_source * weight * exp(-decay * t)`,
/// capped at 1.0. Decay is evaluated against absolute elapsed time `t`,
/// not time since the edge's delay — a deliberate simplification kept
/// for compatibility. A node's new value reads only t-1 samples, so node
/// iteration order cannot affect the result.
///
/// Shock targets absent from the graph are ignored; an empty graph
/// yields an empty series. Neither is a fault.
pub fn propagate(graph: &WorldGraph, shock: &Shock) -> ImpactSeries {
    let mut series: ImpactSeries = graph
        .node_ids()
        .map(|id| (id.clone(), vec![0.0]))
        .collect();

    // Initial shock: last write wins for duplicated target ids.
    for target in &shock.target_ids {
        if let Some(samples) = series.get_mut(target) {
            samples[0] = shock.magnitude;
        }
    }

    for t in 1..=shock.duration_hours {
        let decay_time = t as f64;
        let mut next: Vec<f64> = Vec::with_capacity(series.len());

        for (node_id, samples) in &series {
            let current = samples[(t - 1) as usize];

            let mut incoming = 0.0;
            for edge in graph.incoming(node_id) {
                let source = match series.get(&edge.source) {
                    Some(s) => s,
                    None => continue,
                };
                // Delayed lookup, clamped to the materialized samples
                // (indices 0..t-1): never negative, never past the end.
                let delayed_step = t.saturating_sub(edge.delay_hours).min(t - 1) as usize;
                incoming += source[delayed_step] * edge.weight * (-edge.decay * decay_time).exp();
            }

            next.push((current + incoming).min(1.0));
        }

        for (samples, value) in series.values_mut().zip(next) {
            samples.push(value);
        }
    }

    series
}

// ─── Simulation entry point ──────────────────────────────────────────────────

/// Validate the shock, run the diffusion, derive KPIs, and assemble an
/// immutable result under a freshly minted scenario id.
pub fn simulate_shock(graph: &WorldGraph, shock: &Shock) -> Result<SimulationResult, ShockError> {
    shock.validate()?;

    let impact_series = propagate(graph, shock);
    let kpis = compute_kpis(graph, &impact_series);

    Ok(SimulationResult {
        scenario_id: next_scenario_id(),
        shock: shock.clone(),
        impact_series,
        kpis,
        duration_hours: shock.duration_hours,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
