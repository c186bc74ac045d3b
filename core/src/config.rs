use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

// Circular "mountain": full weight at the center, fading linearly to zero at `radius`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    pub center: [f64; 2],
    pub radius: f64,
}

impl Influence {
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            center: [x, y],
            radius,
        }
    }

    // max(0, 1 - d / r)
    #[inline]
    pub fn weight(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.center[0];
        let dy = y - self.center[1];
        let d = (dx * dx + dy * dy).sqrt();
        1.0 - (d / self.radius).min(1.0)
    }
}

// Everything the height generator needs apart from the grid and the noise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    pub domain_width: f64,
    pub domain_height: f64,
    // multiplier on normalized coordinates before sampling noise
    pub noise_frequency: f64,
    pub height_scale: f64,
    // vertices closer than this (in xy) feed each other in the second pass
    pub neighbor_radius: f64,
    // floor added to the influence weight so open ground is never perfectly flat
    pub min_baseline: f64,
    #[serde(default)]
    pub influences: Vec<Influence>,
}

impl TerrainConfig {
    // The shipped demo terrain: five overlapping mountains on a 20×20 plane
    pub fn ridgeline() -> Self {
        Self {
            domain_width: 20.0,
            domain_height: 20.0,
            noise_frequency: 10.0,
            height_scale: 0.5,
            neighbor_radius: 0.5,
            min_baseline: 0.18,
            influences: vec![
                Influence::new(-6.0, 2.0, 4.3),
                Influence::new(-2.0, 0.0, 3.0),
                Influence::new(0.0, 4.0, 5.0),
                Influence::new(2.0, 3.0, 2.0),
                Influence::new(5.0, -2.0, 2.4),
            ],
        }
    }

    // Softer, lower-frequency relief around a single broad massif
    pub fn foothills() -> Self {
        Self {
            noise_frequency: 4.0,
            height_scale: 0.35,
            min_baseline: 0.3,
            influences: vec![Influence::new(0.0, 2.0, 8.0)],
            ..Self::ridgeline()
        }
    }

    // Only the baseline term: noise-driven rubble with no mountains
    pub fn flatland() -> Self {
        Self {
            influences: Vec::new(),
            ..Self::ridgeline()
        }
    }

    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Ridgeline => Self::ridgeline(),
            Preset::Foothills => Self::foothills(),
            Preset::Flatland => Self::flatland(),
        }
    }

    // Sum of every influence's falloff at (x, y)
    pub fn influence_weight(&self, x: f64, y: f64) -> f64 {
        self.influences
            .iter()
            .fold(0.0, |acc, inf| acc + inf.weight(x, y))
    }

    // Reject anything that would divide by zero or break neighbor bucketing
    pub fn validate(&self) -> Result<(), TerrainError> {
        if !is_positive(self.domain_width) {
            return Err(TerrainError::invalid(format!(
                "domain width must be positive, got {}",
                self.domain_width
            )));
        }
        if !is_positive(self.domain_height) {
            return Err(TerrainError::invalid(format!(
                "domain height must be positive, got {}",
                self.domain_height
            )));
        }
        if !is_positive(self.neighbor_radius) {
            return Err(TerrainError::invalid(format!(
                "neighbor radius must be positive, got {}",
                self.neighbor_radius
            )));
        }
        for (i, inf) in self.influences.iter().enumerate() {
            if !is_positive(inf.radius) {
                return Err(TerrainError::invalid(format!(
                    "influence #{} radius must be positive, got {}",
                    i, inf.radius
                )));
            }
        }
        Ok(())
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self::ridgeline()
    }
}

#[inline]
fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

// Named configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Ridgeline,
    Foothills,
    Flatland,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Ridgeline, Preset::Foothills, Preset::Flatland];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Ridgeline => "ridgeline",
            Preset::Foothills => "foothills",
            Preset::Flatland => "flatland",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TerrainError::UnknownPreset(s.to_string()))
    }
}

// Plane the terrain is laid out on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: f64,
    pub height: f64,
    pub steps_x: usize,
    pub steps_y: usize,
}

impl GridSpec {
    // Plane spanning the configured domain
    pub fn for_config(config: &TerrainConfig, steps_x: usize, steps_y: usize) -> Self {
        Self {
            width: config.domain_width,
            height: config.domain_height,
            steps_x,
            steps_y,
        }
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            steps_x: 100,
            steps_y: 100,
        }
    }
}
