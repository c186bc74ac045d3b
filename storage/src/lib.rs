//storage holds MongoDB schema & async CRUD for generated terrains

pub mod models;

use crate::models::TerrainDoc;
use bson::doc;
use futures_util::stream::TryStreamExt;
use mongodb::{Client, Collection, IndexModel, options::ClientOptions, options::IndexOptions};
use tracing::debug;

pub struct TerrainStore {
    col: Collection<TerrainDoc>,
}

impl TerrainStore {
    // Connect and make sure the (name, seed) index exists
    pub async fn init(uri: &str, db_name: &str, col_name: &str) -> mongodb::error::Result<Self> {
        let mut opts = ClientOptions::parse(uri).await?;
        opts.app_name = Some("RidgeStorage".to_string());
        let client = Client::with_options(opts)?;
        let col = client.database(db_name).collection(col_name);

        let index_model = IndexModel::builder()
            .keys(doc! { "name": 1, "seed": 1 })
            .options(Some(IndexOptions::builder().unique(true).build()))
            .build();
        col.create_index(index_model).await?;

        debug!(db = db_name, collection = col_name, "terrain store ready");
        Ok(Self { col })
    }

    pub async fn list_names(&self) -> mongodb::error::Result<Vec<String>> {
        let mut cursor = self.col.find(doc! {}).await?;
        let mut names = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            names.push(doc.name);
        }
        Ok(names)
    }

    // A name can be stored under several seeds; the lowest seed is returned
    pub async fn read_by_name(&self, name: &str) -> mongodb::error::Result<Option<TerrainDoc>> {
        self.col
            .find_one(doc! { "name": name })
            .sort(doc! { "seed": 1 })
            .await
    }

    // Insert a terrain, replacing any previous one with the same name and seed
    pub async fn create(&self, doc_obj: TerrainDoc) -> mongodb::error::Result<()> {
        let filter = doc! {
            "name": &doc_obj.name,
            "seed": doc_obj.seed,
        };
        let removed = self.col.delete_one(filter).await?;
        if removed.deleted_count > 0 {
            debug!(name = %doc_obj.name, seed = doc_obj.seed, "replacing stored terrain");
        }

        self.col.insert_one(doc_obj).await?;
        Ok(())
    }

    // Exact lookup on the unique (name, seed) pair
    pub async fn read(&self, name: &str, seed: i64) -> mongodb::error::Result<Option<TerrainDoc>> {
        self.col.find_one(doc! { "name": name, "seed": seed }).await
    }

    // Several names can share a seed; the alphabetically first one is returned
    pub async fn read_by_seed(&self, seed: i64) -> mongodb::error::Result<Option<TerrainDoc>> {
        self.col
            .find_one(doc! { "seed": seed })
            .sort(doc! { "name": 1 })
            .await
    }

    // Delete by seed (for clean-up)
    pub async fn delete_by_seed(&self, seed: i64) -> mongodb::error::Result<()> {
        self.col.delete_many(doc! { "seed": seed }).await?;
        Ok(())
    }
}
