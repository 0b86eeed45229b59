use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use pizza_restaurant_service::{DEFAULT_DATABASE_URL, DbPool, create_pool, run_migrations, seed};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod handlers;
mod models;

use handlers::{AppState, app};

#[derive(Parser)]
#[command(version, about = "Pizza restaurant HTTP API")]
struct Cli {
    /// SQLite database path; `DB_URI` is read when `DATABASE_URL` is unset
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:5555")]
        bind: String,
    },
    /// Apply pending migrations and exit
    Migrate,
    /// Replace the database contents with sample data
    Seed,
}

fn resolve_database_url(database_url: Option<String>, db_uri: Option<String>) -> String {
    database_url
        .or(db_uri)
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let database_url = resolve_database_url(cli.database_url, std::env::var("DB_URI").ok());
    let pool = create_pool(&database_url)?;
    run_migrations(&pool)?;

    match cli.command {
        Commands::Serve { bind } => serve(pool, &bind).await,
        Commands::Migrate => {
            info!("Database at {} is up to date", database_url);
            Ok(())
        }
        Commands::Seed => {
            let mut conn = pool.get()?;
            seed::seed(&mut conn)?;
            Ok(())
        }
    }
}

async fn serve(pool: DbPool, bind: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = app(AppState::new(pool))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Pizza API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
