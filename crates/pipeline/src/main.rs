use anyhow::{bail, Context};
use aripari_db::repositories::CatalogRepo;
use aripari_db::store::PgCatalog;
use aripari_media::{S3FileStorage, StorageConfig};
use aripari_pipeline::source::{FsMediaSource, JsonCatalogSource};
use aripari_pipeline::{settle_lock_release, IngestConfig, Ingestion};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aripari_pipeline=info,aripari_media=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = IngestConfig::from_env();
    tracing::info!(data_dir = %config.data_dir.display(), "Starting catalog ingestion");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = aripari_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    aripari_db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    // The advisory lock belongs to this connection's session; keep it open
    // for the whole run.
    let mut lock_conn = pool.acquire().await.context("Failed to acquire lock connection")?;
    if !CatalogRepo::try_acquire_ingest_lock(&mut lock_conn).await? {
        bail!("Another ingestion run holds the catalog lock");
    }

    let storage_config = StorageConfig::from_env()?;
    let storage = S3FileStorage::connect(&storage_config)
        .await
        .context("Failed to initialize object storage")?;

    let store = PgCatalog::new(pool.clone());
    let source = JsonCatalogSource::new(config.clone());
    let mut ingestion = Ingestion::new(
        &store,
        &storage,
        &FsMediaSource,
        &config.photos_dir,
        &config.music_dir,
    );
    let result = ingestion.run(&source).await;
    let released = CatalogRepo::release_ingest_lock(&mut lock_conn).await;
    let report = settle_lock_release(result, released)?;
    tracing::info!(
        regions = report.regions,
        dances = report.dances,
        songs = report.songs,
        videos = report.videos,
        artists = report.artists,
        "Catalog ingestion complete"
    );
    Ok(())
}
