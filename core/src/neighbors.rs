use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

// Anything closer than this counts as the same spot and is never a neighbor
pub const COINCIDENT_EPSILON: f64 = 0.0001;

// How the second pass finds vertices within the neighbor radius.
// Both strategies yield the same neighbors in the same (ascending index) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSearch {
    // Compare against every vertex, O(V²)
    BruteForce,
    // Hash vertices into square cells one radius wide and only scan the 3×3 block around each vertex
    #[default]
    Bucketed,
}

#[inline]
pub fn planar_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

#[inline]
pub fn is_neighbor(a: [f64; 2], b: [f64; 2], radius: f64) -> bool {
    let d = planar_distance(a, b);
    d < radius && d > COINCIDENT_EPSILON
}

type Cell = (i64, i64);

// Cell coordinates must stay well inside i64 so the ±1 lookups cannot overflow
const MAX_CELL: f64 = (1u64 << 62) as f64;

// Read-only lookup structure built once per generation
pub struct NeighborIndex<'a> {
    points: &'a [[f64; 2]],
    radius: f64,
    buckets: Option<HashMap<Cell, Vec<usize>>>,
}

impl<'a> NeighborIndex<'a> {
    // `radius` must be positive and finite.
    // Bucketing falls back to brute force when some point lies too many
    // radii away from the origin to get a cell coordinate.
    pub fn build(points: &'a [[f64; 2]], radius: f64, search: NeighborSearch) -> Self {
        let buckets = match search {
            NeighborSearch::BruteForce => None,
            NeighborSearch::Bucketed => bucket_points(points, radius),
        };
        Self {
            points,
            radius,
            buckets,
        }
    }

    // Collect the neighbors of vertex `i` into `out` (cleared first), sorted by index
    pub fn neighbors_of(&self, i: usize, out: &mut Vec<usize>) {
        out.clear();
        let p = self.points[i];
        match &self.buckets {
            None => {
                out.extend(
                    self.points
                        .iter()
                        .enumerate()
                        .filter(|&(_, &q)| is_neighbor(p, q, self.radius))
                        .map(|(j, _)| j),
                );
            }
            Some(map) => {
                // every point got a cell when the map was built
                let Some((cx, cy)) = cell_of(p, self.radius) else {
                    return;
                };
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if let Some(bucket) = map.get(&(cx + dx, cy + dy)) {
                            out.extend(
                                bucket
                                    .iter()
                                    .copied()
                                    .filter(|&j| is_neighbor(p, self.points[j], self.radius)),
                            );
                        }
                    }
                }
                out.sort_unstable();
            }
        }
    }

    // Which lookup is in use after any fallback
    pub fn search(&self) -> NeighborSearch {
        if self.buckets.is_some() {
            NeighborSearch::Bucketed
        } else {
            NeighborSearch::BruteForce
        }
    }
}

fn bucket_points(points: &[[f64; 2]], radius: f64) -> Option<HashMap<Cell, Vec<usize>>> {
    let mut map: HashMap<Cell, Vec<usize>> = HashMap::new();
    // indices are pushed in ascending order, so every bucket stays sorted
    for (i, &p) in points.iter().enumerate() {
        let Some(cell) = cell_of(p, radius) else {
            debug!(radius, x = p[0], y = p[1], "point outside bucket range, scanning all vertices");
            return None;
        };
        map.entry(cell).or_default().push(i);
    }
    Some(map)
}

#[inline]
fn cell_of(p: [f64; 2], size: f64) -> Option<Cell> {
    let cx = (p[0] / size).floor();
    let cy = (p[1] / size).floor();
    // also rejects NaN
    if cx.abs() < MAX_CELL && cy.abs() < MAX_CELL {
        Some((cx as i64, cy as i64))
    } else {
        None
    }
}
