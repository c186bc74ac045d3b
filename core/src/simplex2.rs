use crate::NoiseSource;

// Skewing/unskewing factors for 2D simplex, (sqrt(3) - 1) / 2 and (3 - sqrt(3)) / 6
const F2: f64 = 0.366_025_403_784_438_6;
const G2: f64 = 0.211_324_865_405_187_1;

// Gradient directions: the edge midpoints of a cube projected onto the xy plane
const GRADIENTS: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

// Seeded 2D Simplex noise, optionally summed over several octaves
pub struct Simplex2D {
    seed: u64,
    frequency: f64,
    persistence: f64,
    octaves: usize,
    perm: [u8; 512],
    // perm[i] % 12, cached so corner hashing is a single lookup
    perm_mod12: [u8; 512],
}

impl Simplex2D {
    pub fn new(seed: u64, frequency: f64, persistence: f64, octaves: usize) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15_u64;
        let mut next = || {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        // Fisher–Yates
        for i in (1..table.len()).rev() {
            let j = (next() % (i as u64 + 1)) as usize;
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for i in 0..512 {
            perm[i] = table[i & 255];
            perm_mod12[i] = perm[i] % 12;
        }

        Self {
            seed,
            frequency,
            persistence,
            octaves: octaves.max(1),
            perm,
            perm_mod12,
        }
    }

    // One octave at unit frequency, the plain `noise2D` field
    pub fn single(seed: u64) -> Self {
        Self::new(seed, 1.0, 0.5, 1)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    fn corner(&self, gi: u8, x: f64, y: f64) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t <= 0.0 {
            return 0.0;
        }
        let (gx, gy) = GRADIENTS[gi as usize];
        let t2 = t * t;
        t2 * t2 * (gx * x + gy * y)
    }

    // Single octave of simplex noise at (xin, yin)
    fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        // Which simplex cell are we in
        let s = (xin + yin) * F2;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let t = (i + j) * G2;
        let x0 = xin - (i - t);
        let y0 = yin - (j - t);

        // Lower or upper triangle of the rhombus
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let gi0 = self.perm_mod12[ii + self.perm[jj] as usize];
        let gi1 = self.perm_mod12[ii + i1 + self.perm[jj + j1] as usize];
        let gi2 = self.perm_mod12[ii + 1 + self.perm[jj + 1] as usize];

        let n = self.corner(gi0, x0, y0) + self.corner(gi1, x1, y1) + self.corner(gi2, x2, y2);
        70.0 * n
    }
}

impl NoiseSource for Simplex2D {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut freq = self.frequency;
        let mut total = 0.0;
        let mut max_amp = 0.0;

        for _ in 0..self.octaves {
            total += self.raw_noise(x * freq, y * freq) * amplitude;
            max_amp += amplitude;
            amplitude *= self.persistence;
            freq *= 2.0;
        }

        (total / max_amp).clamp(-1.0, 1.0)
    }
}
