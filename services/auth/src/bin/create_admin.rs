//! Provision an admin account, or reset its password if it already exists.

use anyhow::Result;
use auth::{
    password::hash_password,
    repositories::AdminRepository,
    validation::{validate_password, validate_username},
};
use clap::Parser;
use common::database::{DatabaseConfig, init_pool, run_migrations};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "create-admin", about = "Create or update an admin account")]
struct Args {
    /// Admin username
    #[arg(long, default_value = "admin")]
    username: String,

    /// New password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    validate_username(&args.username).map_err(anyhow::Error::msg)?;
    validate_password(&args.password).map_err(anyhow::Error::msg)?;

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let password_hash = hash_password(&args.password)?;
    let admin = AdminRepository::new(pool).upsert(&args.username, &password_hash).await?;

    info!("Admin account ready: id={} username={}", admin.id, admin.username);
    Ok(())
}
