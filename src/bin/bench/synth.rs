// Synthetic World Generator — seedable, statistically shaped
// Builds large random infrastructure graphs for scale and invariant scenarios

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ripple_engine::dataset::{EdgeRecord, NodeRecord, WorldDataset};
use ripple_engine::types::AssetType;

/// Asset mix per region: roughly two ports for every grid.
const PORT_SHARE: f64 = 0.66;

/// Parameter ranges for generated edges.
const WEIGHT_RANGE: (f64, f64) = (0.1, 0.9);
const DELAY_RANGE: (u64, u64) = (0, 48);
const DECAY_RANGE: (f64, f64) = (0.01, 0.3);

pub struct SynthSpec {
    pub regions: usize,
    pub assets_per_region: usize,
    /// Random asset-to-asset couplings layered on top of the structural
    /// region-to-asset links.
    pub extra_edges: usize,
}

/// Generate a world dataset from a seeded PRNG. The same spec and rng
/// state always yield the same dataset, so ensemble runs stay reproducible.
pub fn generate_world(rng: &mut ChaCha8Rng, spec: &SynthSpec) -> WorldDataset {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut asset_ids: Vec<String> = Vec::new();

    for r in 0..spec.regions {
        let region_id = format!("r{}", r);
        nodes.push(NodeRecord::Region {
            id: region_id.clone(),
            name: format!("Region {}", r),
            lat: rng.gen_range(-60.0..60.0),
            lon: rng.gen_range(-180.0..180.0),
            planet: "earth".to_string(),
        });

        for a in 0..spec.assets_per_region {
            let is_port = rng.gen::<f64>() < PORT_SHARE;
            let asset_id = format!("r{}_a{}", r, a);
            nodes.push(NodeRecord::Asset {
                id: asset_id.clone(),
                name: format!("{} {}-{}", if is_port { "Port" } else { "Grid" }, r, a),
                lat: rng.gen_range(-60.0..60.0),
                lon: rng.gen_range(-180.0..180.0),
                asset_type: if is_port { AssetType::Port } else { AssetType::Grid },
                region_id: region_id.clone(),
                capacity: rng.gen_range(0.2..1.0),
                planet: "earth".to_string(),
            });
            asset_ids.push(asset_id);
        }
    }

    // Random long-range couplings between assets.
    for _ in 0..spec.extra_edges {
        let source = &asset_ids[rng.gen_range(0..asset_ids.len())];
        let target = &asset_ids[rng.gen_range(0..asset_ids.len())];
        if source == target {
            continue;
        }
        edges.push(EdgeRecord {
            source: source.clone(),
            target: target.clone(),
            weight: rng.gen_range(WEIGHT_RANGE.0..WEIGHT_RANGE.1),
            delay_hours: rng.gen_range(DELAY_RANGE.0..=DELAY_RANGE.1),
            decay: rng.gen_range(DECAY_RANGE.0..DECAY_RANGE.1),
        });
    }

    WorldDataset { nodes, edges }
}

/// Pick shock targets from the generated world: one asset per region up
/// to `count`, spread across the id space.
pub fn pick_targets(spec: &SynthSpec, count: usize) -> Vec<String> {
    (0..count.min(spec.regions))
        .map(|r| format!("r{}_a0", r))
        .collect()
}
