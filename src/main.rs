use bakehouse::{config, core, errors::Result};
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Connect to the database and make sure the tables exist
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| warn!("Failed to connect to the database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 4. Seed the product catalog from config.toml, if present
    match config::products::load_default_config() {
        Ok(seed) => {
            let created = core::product::seed_products(&db, &seed.products).await?;
            info!("Product seed applied: {created} new products.");
        }
        Err(e) => warn!("No product seed applied: {e}"),
    }

    // 5. Report where the books stand
    let products = core::product::list_products(&db).await?;
    let active = core::batch::list_active_batches(&db).await?;
    let submitted = core::batch::list_submitted_batches(&db).await?;
    info!(
        "Catalog: {} products. Production: {} active batches, {} submitted.",
        products.len(),
        active.len(),
        submitted.len()
    );

    Ok(())
}
