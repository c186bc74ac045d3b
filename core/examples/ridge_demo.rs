use ridge_core::{Simplex2D, TerrainConfig, TerrainGrid, generate};

fn main() {
    // The demo terrain on a 101×101 vertex plane, noise seed 2025
    let config = TerrainConfig::ridgeline();
    let mut grid = TerrainGrid::plane(config.domain_width, config.domain_height, 100, 100);
    generate(&mut grid, &Simplex2D::single(2025), &config).expect("ridgeline config is valid");

    // Print a 16×16 window around the tallest mountain at (0, 4)
    let columns = 101;
    let (cx, cy) = (50, 30);
    for y in cy - 8..cy + 8 {
        for x in cx - 8..cx + 8 {
            print!("{:>6.3} ", grid.elevations()[y * columns + x]);
        }
        println!();
    }
}
