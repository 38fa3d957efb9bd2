use clap::{Parser, Subcommand};
use pizza_catalog_service::{build_pool, run_migrations, seed::seed};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod models;

use config::Config;
use handlers::{AppState, app};

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and serve the HTTP API
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Replace the catalog with sample restaurants and pizzas
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = build_pool(&config.database_url, config.pool_size)?;

    {
        let mut conn = pool.get()?;
        run_migrations(&mut conn)?;
    }

    match cli.command {
        Commands::Serve => {
            let app = app(AppState { pool });

            let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
            info!("Pizza catalog listening on {}", listener.local_addr()?);

            axum::serve(listener, app).await?;
        }
        Commands::Migrate => {}
        Commands::Seed => {
            let mut conn = pool.get()?;
            let summary = seed(&mut conn)?;
            info!(
                restaurants = summary.restaurants,
                pizzas = summary.pizzas,
                restaurant_pizzas = summary.restaurant_pizzas,
                "seeded {}",
                config.database_url
            );
        }
    }

    Ok(())
}
