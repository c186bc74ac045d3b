use ridge_core::{
    Influence, NeighborSearch, NoiseSource, Simplex2D, TerrainConfig, TerrainError, TerrainGrid,
    TerrainHeightGenerator, generate,
};

// Noise that depends only on position, so expected values are easy to recompute
struct Ramp;

impl NoiseSource for Ramp {
    fn sample(&self, x: f64, y: f64) -> f64 {
        ((x * 0.37 + y * 0.11).sin()).clamp(-1.0, 1.0)
    }
}

fn base_value(cfg: &TerrainConfig, noise: &dyn NoiseSource, x: f64, y: f64) -> f64 {
    let n = noise
        .sample(x / cfg.domain_width * cfg.noise_frequency, y / cfg.domain_height * cfg.noise_frequency)
        .abs();
    n * (cfg.influence_weight(x, y) + cfg.min_baseline) * cfg.height_scale
}

#[test]
fn elevation_never_below_base_value() {
    let cfg = TerrainConfig::ridgeline();
    let noise = Simplex2D::single(11);
    let mut grid = TerrainGrid::plane(20.0, 20.0, 30, 30);
    generate(&mut grid, &noise, &cfg).unwrap();

    for (i, &[x, y]) in grid.positions().iter().enumerate() {
        let base = base_value(&cfg, &noise, x, y);
        assert_eq!(grid.noise_values()[i], base);
        assert!(grid.elevations()[i] >= base, "vertex {}", i);
    }
}

#[test]
fn generation_is_deterministic() {
    let cfg = TerrainConfig::ridgeline();
    let mut a = TerrainGrid::plane(20.0, 20.0, 25, 25);
    let mut b = a.clone();
    generate(&mut a, &Simplex2D::single(42), &cfg).unwrap();
    generate(&mut b, &Simplex2D::single(42), &cfg).unwrap();

    let bits = |g: &TerrainGrid| g.elevations().iter().map(|z| z.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn single_vertex_keeps_base_value() {
    let cfg = TerrainConfig::ridgeline();
    let mut grid = TerrainGrid::from_points(vec![[-2.0, 0.0]]);
    generate(&mut grid, &Ramp, &cfg).unwrap();
    assert_eq!(grid.elevations()[0], grid.noise_values()[0]);
    assert_eq!(grid.noise_values()[0], base_value(&cfg, &Ramp, -2.0, 0.0));
}

// Same value everywhere, so every vertex gets a nonzero base
struct Flat(f64);

impl NoiseSource for Flat {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}

#[test]
fn close_pair_feeds_each_other_far_vertex_isolated() {
    let cfg = TerrainConfig {
        neighbor_radius: 0.5,
        ..TerrainConfig::ridgeline()
    };
    let mut grid = TerrainGrid::from_points(vec![[0.0, 0.0], [0.0, 0.1], [10.0, 10.0]]);
    generate(&mut grid, &Flat(0.5), &cfg).unwrap();

    let base = grid.noise_values().to_vec();
    assert!(base[0] > 0.0 && base[1] > 0.0 && base[2] > 0.0);
    let z = grid.elevations();
    assert_eq!(z[0], base[0] + base[1]);
    assert_eq!(z[1], base[1] + base[0]);
    assert!(z[0] > base[0] && z[1] > base[1]);
    assert_eq!(z[2], base[2]);
}

#[test]
fn tiny_neighbor_radius_generates_without_neighbors() {
    let cfg = TerrainConfig {
        neighbor_radius: 1e-20,
        ..TerrainConfig::ridgeline()
    };
    assert!(cfg.validate().is_ok());
    let mut grid = TerrainGrid::from_points(vec![[1.0, 1.0], [2.0, 2.0]]);
    generate(&mut grid, &Flat(0.5), &cfg).unwrap();
    assert_eq!(grid.elevations(), grid.noise_values());
}

#[test]
fn far_away_vertices_match_brute_force() {
    let cfg = TerrainConfig::ridgeline();
    let points = vec![[5e18, 0.0], [5e18, 0.1], [-5e18, 3.0]];
    let mut bucketed = TerrainGrid::from_points(points.clone());
    let mut brute = TerrainGrid::from_points(points);
    TerrainHeightGenerator::new(cfg.clone())
        .unwrap()
        .generate(&mut bucketed, &Flat(0.5))
        .unwrap();
    TerrainHeightGenerator::new(cfg)
        .unwrap()
        .with_neighbor_search(NeighborSearch::BruteForce)
        .generate(&mut brute, &Flat(0.5))
        .unwrap();
    assert_eq!(bucketed.elevations(), brute.elevations());
    let base = bucketed.noise_values();
    assert_eq!(bucketed.elevations()[0], base[0] + base[1]);
}

#[test]
fn no_influences_uses_baseline_only() {
    let cfg = TerrainConfig {
        min_baseline: 0.18,
        height_scale: 0.5,
        influences: Vec::new(),
        ..TerrainConfig::ridgeline()
    };
    let noise = Simplex2D::single(5);
    let mut grid = TerrainGrid::plane(20.0, 20.0, 12, 12);
    generate(&mut grid, &noise, &cfg).unwrap();

    for (i, &[x, y]) in grid.positions().iter().enumerate() {
        let n = noise.sample(x / 20.0 * cfg.noise_frequency, y / 20.0 * cfg.noise_frequency);
        assert_eq!(grid.noise_values()[i], n.abs() * 0.18 * 0.5);
    }
}

#[test]
fn zero_domain_width_leaves_grid_untouched() {
    let cfg = TerrainConfig {
        domain_width: 0.0,
        ..TerrainConfig::ridgeline()
    };
    let mut grid = TerrainGrid::plane(20.0, 20.0, 4, 4);
    let before = grid.clone();
    let err = generate(&mut grid, &Ramp, &cfg).unwrap_err();
    assert!(matches!(err, TerrainError::InvalidConfiguration(_)));
    assert_eq!(grid, before);
}

#[test]
fn zero_influence_radius_is_rejected() {
    let cfg = TerrainConfig {
        influences: vec![Influence::new(0.0, 0.0, 0.0)],
        ..TerrainConfig::ridgeline()
    };
    assert!(matches!(
        TerrainHeightGenerator::new(cfg),
        Err(TerrainError::InvalidConfiguration(_))
    ));
}

#[test]
fn peaks_sit_near_mountains() {
    // Constant noise isolates the influence term: the vertex on a mountain
    // center must end up higher than one out in the open
    let cfg = TerrainConfig::ridgeline();
    let mut grid = TerrainGrid::plane(20.0, 20.0, 20, 20);
    TerrainHeightGenerator::new(cfg)
        .unwrap()
        .with_neighbor_search(NeighborSearch::BruteForce)
        .generate(&mut grid, &Flat(0.5))
        .unwrap();

    let at = |x: f64, y: f64| {
        grid.positions()
            .iter()
            .position(|p| (p[0] - x).abs() < 1e-9 && (p[1] - y).abs() < 1e-9)
            .map(|i| grid.elevations()[i])
            .unwrap()
    };
    assert!(at(0.0, 4.0) > at(9.0, -9.0));
}
