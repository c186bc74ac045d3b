// core holds the noise source, lattice, configuration and the height generator
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod neighbors;
pub mod simplex2;
pub mod utils;

pub use config::{GridSpec, Influence, Preset, TerrainConfig};
pub use error::TerrainError;
pub use generator::{TerrainHeightGenerator, generate};
pub use grid::{Lattice, TerrainGrid};
pub use neighbors::NeighborSearch;
pub use simplex2::Simplex2D;
pub use utils::flatten2;

// Deterministic 2D coherent noise.
// Implementations must return values in [-1, 1] and depend only on the
// input coordinates and whatever was fixed at construction (the seed).
pub trait NoiseSource: Send + Sync {
    // Sample the noise field at (x, y).
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}
