use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::NoiseSource;
use crate::config::TerrainConfig;
use crate::error::TerrainError;
use crate::grid::TerrainGrid;
use crate::neighbors::{NeighborIndex, NeighborSearch};

// Two-pass terrain height generator
//
// Pass 1 gives every vertex a base value: |noise| scaled by how close it sits to
// the configured mountains. Pass 2 adds the base values of all vertices within
// `neighbor_radius`, which sharpens peaks where many high vertices cluster.
pub struct TerrainHeightGenerator {
    config: TerrainConfig,
    search: NeighborSearch,
}

impl TerrainHeightGenerator {
    pub fn new(config: TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        Ok(Self {
            config,
            search: NeighborSearch::default(),
        })
    }

    pub fn with_neighbor_search(mut self, search: NeighborSearch) -> Self {
        self.search = search;
        self
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    // Overwrites elevation and pass-1 values of every vertex.
    // Nothing is touched when the grid is empty.
    pub fn generate(&self, grid: &mut TerrainGrid, noise: &dyn NoiseSource) -> Result<(), TerrainError> {
        if grid.is_empty() {
            return Err(TerrainError::invalid("grid has no vertices"));
        }

        let span = debug_span!("generate", vertices = grid.len(), search = ?self.search);
        let _enter = span.enter();

        let cfg = &self.config;
        let (lattice, elevation, scratch) = grid.parts_mut();
        let points = lattice.points();

        // Pass 1
        let start = Instant::now();
        scratch
            .par_iter_mut()
            .zip(points.par_iter())
            .for_each(|(value, &[x, y])| {
                let nx = x / cfg.domain_width * cfg.noise_frequency;
                let ny = y / cfg.domain_height * cfg.noise_frequency;
                let n = noise.sample(nx, ny).abs();
                let size_mod = cfg.influence_weight(x, y);
                *value = n * (size_mod + cfg.min_baseline) * cfg.height_scale;
            });
        debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "base pass done");

        // Pass 2 only reads pass-1 values, so it starts after the join above
        let start = Instant::now();
        let base: &[f64] = scratch;
        let index = NeighborIndex::build(points, cfg.neighbor_radius, self.search);
        elevation
            .par_iter_mut()
            .enumerate()
            .for_each_init(Vec::new, |buf, (i, z)| {
                index.neighbors_of(i, buf);
                let around = buf.iter().fold(0.0, |acc, &j| acc + base[j].abs());
                *z = base[i] + around;
            });
        debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "neighbor pass done");

        Ok(())
    }
}

// Validate `config` and run both passes over `grid`
pub fn generate(grid: &mut TerrainGrid, noise: &dyn NoiseSource, config: &TerrainConfig) -> Result<(), TerrainError> {
    TerrainHeightGenerator::new(config.clone())?.generate(grid, noise)
}
