// Planar vertex layout (immutable) and the per-vertex values the generator writes.

// Fixed xy positions of every vertex.
// Plane lattices also remember their column/row shape so they can be
// turned back into a row-major height map.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    points: Vec<[f64; 2]>,
    shape: Option<(usize, usize)>,
}

impl Lattice {
    // Regular plane of `width` × `height` world units split into
    // `steps_x` × `steps_y` cells, centered on the origin.
    // Vertices are stored row by row (column index fastest), first row at +height/2.
    pub fn plane(width: f64, height: f64, steps_x: usize, steps_y: usize) -> Self {
        let steps_x = steps_x.max(1);
        let steps_y = steps_y.max(1);
        let columns = steps_x + 1;
        let rows = steps_y + 1;
        let cell_w = width / steps_x as f64;
        let cell_h = height / steps_y as f64;

        let mut points = Vec::with_capacity(columns * rows);
        for iy in 0..rows {
            let y = height / 2.0 - iy as f64 * cell_h;
            for ix in 0..columns {
                let x = ix as f64 * cell_w - width / 2.0;
                points.push([x, y]);
            }
        }

        Self {
            points,
            shape: Some((columns, rows)),
        }
    }

    // Arbitrary vertex cloud, no row/column structure
    pub fn from_points(points: Vec<[f64; 2]>) -> Self {
        Self {
            points,
            shape: None,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    // (columns, rows) for plane lattices
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.shape
    }
}

// A lattice plus the two scratch arrays the generator fills,
// both indexed exactly like `lattice.points()`.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainGrid {
    lattice: Lattice,
    elevation: Vec<f64>,
    noise: Vec<f64>,
}

impl TerrainGrid {
    pub fn new(lattice: Lattice) -> Self {
        let n = lattice.len();
        Self {
            lattice,
            elevation: vec![0.0; n],
            noise: vec![0.0; n],
        }
    }

    pub fn plane(width: f64, height: f64, steps_x: usize, steps_y: usize) -> Self {
        Self::new(Lattice::plane(width, height, steps_x, steps_y))
    }

    pub fn from_points(points: Vec<[f64; 2]>) -> Self {
        Self::new(Lattice::from_points(points))
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn len(&self) -> usize {
        self.lattice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lattice.is_empty()
    }

    pub fn positions(&self) -> &[[f64; 2]] {
        self.lattice.points()
    }

    pub fn elevations(&self) -> &[f64] {
        &self.elevation
    }

    // Pass-1 values (noise × falloff × scale) from the last generation
    pub fn noise_values(&self) -> &[f64] {
        &self.noise
    }

    // Full (x, y, z) of vertex `i`
    pub fn position3(&self, i: usize) -> [f64; 3] {
        let [x, y] = self.lattice.points()[i];
        [x, y, self.elevation[i]]
    }

    // Split borrow: topology read-only, scratch arrays writable
    pub(crate) fn parts_mut(&mut self) -> (&Lattice, &mut [f64], &mut [f64]) {
        (&self.lattice, &mut self.elevation, &mut self.noise)
    }
}
