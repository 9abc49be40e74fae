// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Infrastructure Ripple Simulation Suite ("Terra") - Query Interpreter

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::graph::WorldGraph;
use crate::propagation::simulate_shock;
use crate::types::{Shock, SimulationResult};

// ─── Interpretation ──────────────────────────────────────────────────────────

/// What the interpreter understood from a free-text query. A fully
/// recognized disruption carries a ready-to-run shock; otherwise the
/// query list describes the best non-simulation reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interpretation {
    pub shock: Option<Shock>,
    pub queries: Vec<String>,
    /// Heuristic confidence in [0, 1]; 0.0 means nothing recognized.
    pub confidence: f64,
}

/// Interpretation plus the simulation outcome, when one was run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub interpretation: Interpretation,
    pub result: Option<SimulationResult>,
    pub error: Option<String>,
}

// ─── Interpreter ─────────────────────────────────────────────────────────────

/// Pattern-matching interpreter turning operator phrasing ("shut down the
/// suez canal for 2 days at 80%") into a structured [`Shock`]. Aliases are
/// derived from the graph's own catalog, so the interpreter tracks whatever
/// world is loaded rather than a fixed vocabulary.
pub struct Interpreter {
    /// Word-bounded matcher per alias phrase, paired with the node id it
    /// names. Boundaries keep short ids ("na", "as") from firing inside
    /// unrelated words.
    aliases: Vec<(Regex, String)>,
    percent_re: Regex,
    duration_re: Regex,
}

impl Interpreter {
    pub fn from_graph(graph: &WorldGraph) -> Self {
        let mut phrases: Vec<(String, String)> = Vec::new();
        for node in graph.nodes() {
            let id = node.id.clone();
            // Two-letter region codes ("as", "oc") collide with ordinary
            // words even at word boundaries; those nodes are addressable
            // only by display name.
            if id.len() >= 3 {
                phrases.push((id.to_lowercase(), id.clone()));
                // "panama_canal" is also recognized as "panama canal".
                if id.contains('_') {
                    phrases.push((id.replace('_', " ").to_lowercase(), id.clone()));
                }
            }
            let name = node.name.to_lowercase();
            if name != id.to_lowercase() {
                phrases.push((name, id.clone()));
            }
        }
        phrases.sort();
        phrases.dedup();

        let aliases = phrases
            .into_iter()
            .map(|(phrase, id)| {
                let pattern = format!(r"\b{}\b", regex::escape(&phrase));
                // Escaped literal phrase wrapped in boundaries; cannot fail.
                (Regex::new(&pattern).expect("alias pattern"), id)
            })
            .collect();

        Self {
            aliases,
            // Static patterns; a failure here is a programming error.
            percent_re: Regex::new(r"(\d+(?:\.\d+)?)\s*(?:%|percent|per\s*cent)")
                .expect("percent pattern"),
            duration_re: Regex::new(r"(\d+)\s*(hours?|hrs?|h\b|days?|d\b|weeks?|w\b)")
                .expect("duration pattern"),
        }
    }

    /// Interpret without running anything.
    pub fn interpret(&self, text: &str) -> Interpretation {
        let text = text.to_lowercase();

        let targets = self.extract_targets(&text);
        let magnitude = self.extract_magnitude(&text);
        let duration = extract_duration(&self.duration_re, &text);

        if let (Some(magnitude), Some(duration)) = (magnitude, duration) {
            if !targets.is_empty() {
                let action = extract_action(&text);
                let targets: Vec<String> = targets.into_iter().collect();
                let summary = format!(
                    "Simulate {} of {} at {:.0}% for {} hours",
                    action,
                    targets.join(", "),
                    magnitude * 100.0,
                    duration
                );
                return Interpretation {
                    shock: Some(Shock::new(targets, magnitude, duration)),
                    queries: vec![summary],
                    confidence: 0.8,
                };
            }
        }

        if text.contains("choke point") || text.contains("bottleneck") {
            return Interpretation {
                shock: None,
                queries: vec!["Identify critical infrastructure choke points".into()],
                confidence: 0.6,
            };
        }
        if text.contains("show") || text.contains("display") {
            return Interpretation {
                shock: None,
                queries: vec!["Display current system status".into()],
                confidence: 0.7,
            };
        }

        Interpretation { shock: None, queries: Vec::new(), confidence: 0.0 }
    }

    /// Interpret and, when a shock was recognized, run it against `graph`.
    pub fn run_query(&self, graph: &WorldGraph, text: &str) -> QueryResponse {
        let interpretation = self.interpret(text);
        match &interpretation.shock {
            Some(shock) => match simulate_shock(graph, shock) {
                Ok(result) => QueryResponse { interpretation, result: Some(result), error: None },
                Err(err) => QueryResponse {
                    interpretation,
                    result: None,
                    error: Some(err.to_string()),
                },
            },
            None => QueryResponse {
                interpretation,
                result: None,
                error: Some("could not recognize a disruption scenario".into()),
            },
        }
    }

    // BTreeSet deduplicates and keeps the target order stable.
    fn extract_targets(&self, text: &str) -> BTreeSet<String> {
        let mut targets = BTreeSet::new();
        for (matcher, id) in &self.aliases {
            if matcher.is_match(text) {
                targets.insert(id.clone());
            }
        }
        targets
    }

    fn extract_magnitude(&self, text: &str) -> Option<f64> {
        if let Some(caps) = self.percent_re.captures(text) {
            if let Ok(value) = caps[1].parse::<f64>() {
                return Some(value / 100.0);
            }
        }
        if text.contains("complete") || text.contains("total") || text.contains("full") {
            return Some(1.0);
        }
        if text.contains("partial") || text.contains("some") {
            return Some(0.5);
        }
        if text.contains("minor") || text.contains("small") {
            return Some(0.2);
        }
        None
    }
}

fn extract_duration(duration_re: &Regex, text: &str) -> Option<u64> {
    if let Some(caps) = duration_re.captures(text) {
        let value: u64 = caps[1].parse().ok()?;
        let unit = &caps[2];
        let hours = if unit.starts_with('h') {
            value
        } else if unit.starts_with('d') {
            value * 24
        } else {
            value * 168
        };
        return Some(hours);
    }
    if text.contains("brief") || text.contains("short") {
        return Some(24);
    }
    if text.contains("extended") || text.contains("long") {
        return Some(168);
    }
    None
}

fn extract_action(text: &str) -> &'static str {
    if text.contains("shutdown") || text.contains("shut down") || text.contains("close") {
        "shutdown"
    } else if text.contains("slowdown") || text.contains("slow") {
        "slowdown"
    } else if text.contains("failure") || text.contains("fail") {
        "failure"
    } else {
        "disruption"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::demo_world;
    use crate::graph::WorldGraph;

    fn demo_interpreter() -> (WorldGraph, Interpreter) {
        let graph = WorldGraph::from_dataset(demo_world());
        let interp = Interpreter::from_graph(&graph);
        (graph, interp)
    }

    #[test]
    fn test_full_scenario_is_recognized() {
        let (_, interp) = demo_interpreter();
        let out = interp.interpret("shut down the panama canal at 80% for 48 hours");
        let shock = out.shock.expect("shock recognized");
        assert_eq!(shock.target_ids, vec!["panama_canal".to_string()]);
        assert_eq!(shock.magnitude, 0.8);
        assert_eq!(shock.duration_hours, 48);
        assert_eq!(out.confidence, 0.8);
        assert!(out.queries[0].contains("shutdown"));
    }

    #[test]
    fn test_alias_with_spaces_maps_to_node_id() {
        let (_, interp) = demo_interpreter();
        let out = interp.interpret("total failure of suez canal for 2 days");
        let shock = out.shock.expect("shock recognized");
        assert_eq!(shock.target_ids, vec!["suez_canal".to_string()]);
        assert_eq!(shock.magnitude, 1.0, "'total' maps to full magnitude");
        assert_eq!(shock.duration_hours, 48, "days convert to hours");
    }

    #[test]
    fn test_qualitative_terms_and_week_units() {
        let (_, interp) = demo_interpreter();
        let out = interp.interpret("minor disruption of rotterdam for 1 week");
        let shock = out.shock.expect("shock recognized");
        assert_eq!(shock.magnitude, 0.2);
        assert_eq!(shock.duration_hours, 168);
    }

    #[test]
    fn test_duplicate_mentions_dedupe() {
        let (_, interp) = demo_interpreter();
        // Both the spaced alias and the raw id hit the same node.
        let out = interp.interpret("close panama canal panama_canal at 50% for 6 hours");
        let shock = out.shock.expect("shock recognized");
        assert_eq!(shock.target_ids, vec!["panama_canal".to_string()]);
    }

    #[test]
    fn test_short_region_ids_do_not_match_common_words() {
        let (_, interp) = demo_interpreter();
        // "as" here is the English conjunction, not the Asia region code.
        let out = interp.interpret("close rotterdam as planned for 6 hours at 50%");
        let shock = out.shock.expect("shock recognized");
        assert_eq!(shock.target_ids, vec!["rotterdam".to_string()]);

        // Short-id regions stay reachable through their display names.
        let out = interp.interpret("partial disruption of asia for 24 hours");
        let shock = out.shock.expect("shock recognized");
        assert_eq!(shock.target_ids, vec!["as".to_string()]);
    }

    #[test]
    fn test_unrecognized_falls_back_to_query_heuristics() {
        let (_, interp) = demo_interpreter();

        let out = interp.interpret("where are the choke points?");
        assert!(out.shock.is_none());
        assert_eq!(out.confidence, 0.6);

        let out = interp.interpret("show me the map");
        assert!(out.shock.is_none());
        assert_eq!(out.confidence, 0.7);

        let out = interp.interpret("what is the meaning of life");
        assert!(out.shock.is_none());
        assert_eq!(out.confidence, 0.0);
        assert!(out.queries.is_empty());
    }

    #[test]
    fn test_run_query_executes_recognized_shock() {
        let (graph, interp) = demo_interpreter();
        let response = interp.run_query(&graph, "partial shutdown of singapore for 12 hours");
        assert!(response.error.is_none());
        let result = response.result.expect("simulation ran");
        assert_eq!(result.duration_hours, 12);
        assert_eq!(result.impact_series["singapore"][0], 0.5);
    }

    #[test]
    fn test_run_query_without_shock_reports_error() {
        let (graph, interp) = demo_interpreter();
        let response = interp.run_query(&graph, "display status");
        assert!(response.result.is_none());
        assert!(response.error.is_some());
    }
}
