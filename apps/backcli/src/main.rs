// apps/backcli/src/main.rs

use clap::{Arg, ArgAction, Command};
use secrecy::{ExposeSecret, SecretString};
use sqlx::migrate::Migrator;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

use catalog_lib::dto::{RoleDto, UserInsertDto};
use catalog_lib::repository::{RoleRepository, UserRepository};
use catalog_lib::user_service::UserService;
use catalog_lib::util::{connect_with_retry, seed_catalog, MySqlPool};

const DEFAULT_MIGRATIONS_DIR: &str = "./libs/catalog-lib/migrations";
const SEED_PASSWORD: &str = "123456";
const ROLE_OPERATOR_ID: i64 = 1;
const ROLE_ADMIN_ID: i64 = 2;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = Command::new("backcli")
        .about("Catalog CLI utility")
        .arg(
            Arg::new("migrations")
                .long("migrations")
                .action(ArgAction::SetTrue)
                .help("Execute database migrations"),
        )
        .arg(
            Arg::new("migrations-dir")
                .long("migrations-dir")
                .default_value(DEFAULT_MIGRATIONS_DIR)
                .help("Directory holding the catalog-lib migrations"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::SetTrue)
                .help("Load the demo categories, products, roles and users"),
        )
        .get_matches();

    let run_migrations = matches.get_flag("migrations");
    let run_seed = matches.get_flag("seed");
    if !run_migrations && !run_seed {
        tracing::warn!("nothing to do, pass --migrations and/or --seed");
        return;
    }

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            process::exit(1);
        }
    };

    if run_migrations {
        let dir = matches
            .get_one::<String>("migrations-dir")
            .map(String::as_str)
            .unwrap_or(DEFAULT_MIGRATIONS_DIR);
        if let Err(e) = run_catalog_migrations(&pool, dir).await {
            tracing::error!(error = %e, "migration failed");
            process::exit(1);
        }
    }

    if run_seed {
        if let Err(e) = run_seed_data(&pool).await {
            tracing::error!(error = %e, "seeding failed");
            process::exit(1);
        }
    }
}

async fn connect() -> Result<MySqlPool, Box<dyn std::error::Error>> {
    let db_url: SecretString = std::env::var("DATABASE_URL")
        .map(SecretString::new)
        .map_err(|_| "DATABASE_URL must be set")?;
    Ok(connect_with_retry(db_url.expose_secret(), 10).await?)
}

async fn run_catalog_migrations(pool: &MySqlPool, dir: &str) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = Migrator::new(Path::new(dir)).await?;

    tracing::info!(dir, "running catalog-lib migrations");
    migrator.run(pool).await?;
    tracing::info!("migrations applied successfully");
    Ok(())
}

async fn run_seed_data(pool: &MySqlPool) -> Result<(), Box<dyn std::error::Error>> {
    seed_catalog(pool).await?;

    let users = UserService::new(UserRepository::new(pool.clone()), RoleRepository::new(pool.clone()));
    let seed_users = [
        ("Alex", "Brown", "alex@gmail.com", vec![ROLE_OPERATOR_ID]),
        ("Maria", "Green", "maria@gmail.com", vec![ROLE_OPERATOR_ID, ROLE_ADMIN_ID]),
    ];

    for (first_name, last_name, email, role_ids) in seed_users {
        let dto = UserInsertDto {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: SEED_PASSWORD.to_string(),
            roles: role_ids
                .into_iter()
                .map(|id| RoleDto { id: Some(id), authority: String::new() })
                .collect(),
        };
        let created = users.create(&dto).await?;
        tracing::info!(user_id = created.id, email, "seed user created");
    }

    Ok(())
}
