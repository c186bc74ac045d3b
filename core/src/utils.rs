use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::grid::TerrainGrid;

const GAMMA_CORRECTION: f32 = 1.2;
// Vertical exaggeration used for hillshading normalized heights
const SHADE_Z_SCALE: f32 = 8.0;

// 2D height map: row‐major Vec<Vec<f32>>, access as `map[row][column]`
pub type HeightMap2D = Vec<Vec<f32>>;

// Elevations of a plane grid as rows (first row is the +y edge).
// Point-cloud grids have no row structure and give None.
pub fn to_heightmap(grid: &TerrainGrid) -> Option<HeightMap2D> {
    let (columns, _rows) = grid.lattice().shape()?;
    Some(
        grid.elevations()
            .chunks(columns)
            .map(|row| row.iter().map(|&z| z as f32).collect())
            .collect(),
    )
}

// flatten a 2D height map (row‐major) into a single Vec<f32>
// For storing into MongoDB as a flat array
pub fn flatten2(map: &HeightMap2D) -> Vec<f32> {
    map.iter().flat_map(|row| row.iter().cloned()).collect()
}

// Inverse of flatten2
pub fn unflatten2(flat: &[f32], columns: usize) -> HeightMap2D {
    flat.chunks(columns.max(1)).map(|row| row.to_vec()).collect()
}

// Rescale to [0, 1] and apply a gamma curve for contrast
pub fn normalize2(map: &mut HeightMap2D) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;

    for row in map.iter() {
        for &val in row.iter() {
            min = min.min(val);
            max = max.max(val);
        }
    }

    let range = (max - min).max(0.001); // prevent zero-division
    for row in map.iter_mut() {
        for val in row.iter_mut() {
            *val = ((*val - min) / range).powf(GAMMA_CORRECTION);
        }
    }
}

// Lambert shading from a light at 45° azimuth and altitude, edges left unlit
fn hillshade(map: &HeightMap2D, z_scale: f32) -> HeightMap2D {
    let h = map.len();
    let w = map.first().map_or(0, |r| r.len());
    let mut shade = vec![vec![0.0; w]; h];
    let angle = std::f32::consts::FRAC_PI_4;
    let (sin_alt, cos_alt) = angle.sin_cos();
    let (lx, ly, lz) = (angle.cos() * cos_alt, angle.sin() * cos_alt, sin_alt);

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let dzdx = (map[y][x + 1] - map[y][x - 1]) * 0.5 * z_scale;
            let dzdy = (map[y + 1][x] - map[y - 1][x]) * 0.5 * z_scale;
            let len = (dzdx * dzdx + dzdy * dzdy + 1.0).sqrt();
            shade[y][x] = ((-dzdx * lx - dzdy * ly + lz) / len).max(0.0);
        }
    }
    shade
}

// Render a normalized [0,1] height map as a shaded grayscale-ish relief image
pub fn to_terrain_image(map: &HeightMap2D) -> RgbImage {
    let h = map.len();
    let w = map.first().map_or(0, |r| r.len());
    let shade = hillshade(map, SHADE_Z_SCALE);

    // charcoal lowlands to pale summits
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.02, 0.02, 0.03)),
        (0.40, LinSrgb::new(0.12, 0.12, 0.13)),
        (0.75, LinSrgb::new(0.45, 0.45, 0.47)),
        (1.00, LinSrgb::new(0.92, 0.92, 0.92)),
    ]);

    let mut img = RgbImage::new(w as u32, h as u32);
    for (y, row) in map.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let col: LinSrgb = gradient.get(v.clamp(0.0, 1.0));
            let rgb = col.into_format::<u8>();
            let light = (shade[y][x] * 0.5 + 0.5).clamp(0.0, 1.0);
            img.put_pixel(
                x as u32,
                y as u32,
                Rgb([
                    (rgb.red as f32 * light) as u8,
                    (rgb.green as f32 * light) as u8,
                    (rgb.blue as f32 * light) as u8,
                ]),
            );
        }
    }
    img
}
