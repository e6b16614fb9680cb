use axum_helpers::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_images::{ImageStore, InMemoryImageStore, S3ImageStore};
use shop_api::{AppState, Config};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    observability::init_metrics()?;

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let (images, served_images): (Arc<dyn ImageStore>, Option<InMemoryImageStore>) = match &config.s3 {
        Some(s3) => {
            info!(bucket = %s3.bucket, region = %s3.region, "Using S3 image store");
            (Arc::new(S3ImageStore::connect(s3.clone()).await), None)
        }
        None => {
            let base_url = format!("http://{}/images", config.server.address());
            warn!(%base_url, "S3_BUCKET not set, keeping uploaded images in memory");
            let store = InMemoryImageStore::new(base_url);
            (Arc::new(store.clone()), Some(store))
        }
    };

    let server = config.server.clone();
    let state = AppState {
        config,
        db: db.clone(),
        images,
        served_images,
    };

    let app = shop_api::build_app(&state).await?;

    info!("Starting shop API with graceful shutdown (30s timeout)");

    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shop API shutdown complete");
    Ok(())
}
