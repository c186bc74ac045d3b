use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ridge_core::{
    GridSpec, NeighborSearch, Preset, Simplex2D, TerrainConfig, TerrainGrid, TerrainHeightGenerator,
    utils::{HeightMap2D, normalize2, to_heightmap, to_terrain_image},
};
use ridge_storage::TerrainStore;
use ridge_storage::models::{TerrainDoc, TerrainParams};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DB_NAME: &str = "terrain_db";
const COLLECTION: &str = "ridge";

/// Procedural ridge terrain generator.
#[derive(Parser)]
#[command(name = "ridge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a terrain and write it as a shaded PNG.
    Generate(GenerateArgs),

    /// List the built-in terrain presets.
    Presets,

    /// Load a stored terrain from MongoDB and write it as a PNG.
    Load {
        /// Seed of the stored terrain.
        #[arg(short, long)]
        seed: i64,

        /// Stored terrain name; the alphabetically first name with this seed is used when omitted.
        #[arg(short, long)]
        name: Option<String>,

        /// MongoDB connection string.
        #[arg(long, default_value = "mongodb://localhost:27017")]
        db: String,

        /// Output PNG.
        #[arg(short, long, default_value = "terrain.png")]
        out: PathBuf,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Built-in configuration to use.
    #[arg(short, long, default_value_t = Preset::Ridgeline, conflicts_with = "config")]
    preset: Preset,

    /// JSON file holding a full terrain configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Noise seed.
    #[arg(short, long, default_value = "2025")]
    seed: u64,

    /// Grid cells along each axis.
    #[arg(long, default_value = "100")]
    steps: usize,

    /// Output PNG.
    #[arg(short, long, default_value = "terrain.png")]
    out: PathBuf,

    /// Also write the raw elevations and parameters as JSON.
    #[arg(long)]
    raw: Option<PathBuf>,

    /// Scan every vertex for neighbors instead of using the bucket index.
    #[arg(long)]
    brute_force: bool,

    /// Store the result in MongoDB at this URI.
    #[arg(long)]
    save_db: Option<String>,

    /// Name used when storing in MongoDB.
    #[arg(long, default_value = "ridge")]
    name: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Presets => {
            for preset in Preset::ALL {
                let cfg = TerrainConfig::preset(preset);
                println!(
                    "{:<10} freq {:>4} scale {:>4} neighbors {:>4} baseline {:>4} mountains {}",
                    preset.name(),
                    cfg.noise_frequency,
                    cfg.height_scale,
                    cfg.neighbor_radius,
                    cfg.min_baseline,
                    cfg.influences.len()
                );
            }
            Ok(())
        }
        Commands::Load { seed, name, db, out } => run_load(seed, name.as_deref(), &db, &out),
    }
}

fn load_config(args: &GenerateArgs) -> Result<TerrainConfig> {
    match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(TerrainConfig::preset(args.preset)),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(&args)?;
    let spec = GridSpec::for_config(&config, args.steps, args.steps);
    let search = if args.brute_force {
        NeighborSearch::BruteForce
    } else {
        NeighborSearch::Bucketed
    };

    let start = Instant::now();
    let generator = TerrainHeightGenerator::new(config.clone())?.with_neighbor_search(search);
    let noise = Simplex2D::single(args.seed);
    let mut grid = TerrainGrid::plane(spec.width, spec.height, spec.steps_x, spec.steps_y);
    generator.generate(&mut grid, &noise)?;
    info!(
        vertices = grid.len(),
        seed = args.seed,
        "generated in {:.2} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    let map = to_heightmap(&grid).context("plane grid has no row layout")?;
    save_png(map, &args.out)?;

    if args.raw.is_none() && args.save_db.is_none() {
        return Ok(());
    }

    let params = TerrainParams {
        noise_type: "simplex2d".into(),
        octaves: 1,
        config,
        grid: spec,
    };
    let doc = TerrainDoc::from_grid(&args.name, stored_seed(args.seed)?, params, &grid);

    if let Some(path) = &args.raw {
        let json = serde_json::to_string(&doc)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("saved raw elevations to {}", path.display());
    }

    if let Some(uri) = &args.save_db {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(async {
            let storage = TerrainStore::init(uri, DB_NAME, COLLECTION).await?;
            storage.create(doc).await
        })
        .context("saving to MongoDB")?;
        info!(name = %args.name, seed = args.seed, "saved to MongoDB");
    }

    Ok(())
}

fn run_load(seed: i64, name: Option<&str>, db: &str, out: &Path) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let found = rt
        .block_on(async {
            let storage = TerrainStore::init(db, DB_NAME, COLLECTION).await?;
            match name {
                Some(name) => storage.read(name, seed).await,
                None => storage.read_by_seed(seed).await,
            }
        })
        .context("reading from MongoDB")?;

    let Some(doc) = found else {
        warn!(seed, "no stored terrain for this seed");
        bail!("no entry for seed {}", seed);
    };
    info!(name = %doc.name, columns = doc.columns, rows = doc.rows, "loaded from MongoDB");
    save_png(doc.heightmap(), out)
}

// MongoDB has no unsigned 64-bit integer, so stored seeds must fit an i64
fn stored_seed(seed: u64) -> Result<i64> {
    i64::try_from(seed).with_context(|| format!("seed {} is too large to store (max {})", seed, i64::MAX))
}

fn save_png(mut map: HeightMap2D, out: &Path) -> Result<()> {
    normalize2(&mut map);
    to_terrain_image(&map)
        .save(out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("saved {}", out.display());
    Ok(())
}
