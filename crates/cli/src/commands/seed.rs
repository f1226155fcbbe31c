//! Seed the database with demo listings.

use tracing::info;

use lunnar_server::{config, db, seed};

/// Insert `count` approved demo listings.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails or
/// an insert fails.
pub async fn demo(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = config::database_url()?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let inserted = seed::seed_demo(&pool, count).await?;
    info!(inserted, "Seeding complete!");

    Ok(())
}
