use std::{str::FromStr, time::Duration};

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use tracing::{info, warn};

pub use sqlx::MySqlPool;

const SEED_SQL: &str = include_str!("../seed/catalog_seed.sql");

pub async fn connect_with_retry(database_url: &str, max_retries: u32) -> Result<MySqlPool, sqlx::Error> {
    let mut retries = 0;

    let connect_options = MySqlConnectOptions::from_str(database_url)?;

    loop {
        match MySqlPoolOptions::new()
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(connect_options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) if retries < max_retries => {
                warn!(attempt = retries + 1, error = %e, "MySQL not ready yet");
                retries += 1;
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Loads the categories, products and roles of the demo data set.
/// Expects empty tables, ids are fixed.
pub async fn seed_catalog(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SEED_SQL).execute(pool).await?;
    info!("catalog seed loaded");
    Ok(())
}
