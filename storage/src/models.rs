use bson::oid::ObjectId;
use ridge_core::{GridSpec, TerrainConfig, TerrainGrid, utils};
use serde::{Deserialize, Serialize};

// Everything needed to regenerate a stored terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    pub noise_type: String, // e.g. "simplex2d"
    pub octaves: usize,
    pub config: TerrainConfig,
    pub grid: GridSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub seed: i64,
    pub params: TerrainParams,
    // Flattened row-major: length = columns×rows
    pub height_map: Vec<f32>,
    pub columns: u64,
    pub rows: u64,
}

impl TerrainDoc {
    // Snapshot a generated grid. Point clouds are stored as a single row.
    pub fn from_grid(name: impl Into<String>, seed: i64, params: TerrainParams, grid: &TerrainGrid) -> Self {
        let (columns, rows) = grid.lattice().shape().unwrap_or((grid.len(), 1));
        let height_map = match utils::to_heightmap(grid) {
            Some(map) => utils::flatten2(&map),
            None => grid.elevations().iter().map(|&z| z as f32).collect(),
        };
        Self {
            id: None,
            name: name.into(),
            seed,
            params,
            height_map,
            columns: columns as u64,
            rows: rows as u64,
        }
    }

    pub fn heightmap(&self) -> utils::HeightMap2D {
        utils::unflatten2(&self.height_map, self.columns as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::{TerrainDoc, TerrainParams};
    use ridge_core::{GridSpec, Simplex2D, TerrainConfig, TerrainGrid, generate};

    fn params() -> TerrainParams {
        TerrainParams {
            noise_type: "simplex2d".to_string(),
            octaves: 1,
            config: TerrainConfig::ridgeline(),
            grid: GridSpec {
                width: 20.0,
                height: 20.0,
                steps_x: 8,
                steps_y: 4,
            },
        }
    }

    #[test]
    fn doc_from_plane_grid() {
        let mut grid = TerrainGrid::plane(20.0, 20.0, 8, 4);
        generate(&mut grid, &Simplex2D::single(9), &TerrainConfig::ridgeline()).unwrap();
        let doc = TerrainDoc::from_grid("ridge", 9, params(), &grid);
        assert_eq!((doc.columns, doc.rows), (9, 5));
        assert_eq!(doc.height_map.len(), 45);
        assert_eq!(doc.heightmap().len(), 5);
        assert_eq!(doc.height_map[10], grid.elevations()[10] as f32);
    }

    #[test]
    fn large_point_cloud_keeps_full_length() {
        let points = (0..70_000).map(|i| [i as f64, 0.0]).collect();
        let grid = TerrainGrid::from_points(points);
        let doc = TerrainDoc::from_grid("cloud", 3, params(), &grid);
        assert_eq!((doc.columns, doc.rows), (70_000, 1));
        assert_eq!(doc.heightmap()[0].len(), 70_000);
    }

    #[test]
    fn doc_bson_roundtrip() {
        let grid = TerrainGrid::plane(20.0, 20.0, 8, 4);
        let doc = TerrainDoc::from_grid("flat", 1, params(), &grid);
        let raw = bson::to_document(&doc).unwrap();
        assert!(!raw.contains_key("_id"));
        let back: TerrainDoc = bson::from_document(raw).unwrap();
        assert_eq!(back.params, doc.params);
        assert_eq!(back.height_map, doc.height_map);
        assert_eq!(back.name, "flat");
        assert_eq!((back.columns, back.rows), (9, 5));
    }
}
