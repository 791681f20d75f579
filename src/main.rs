use axum::serve;
use std::sync::Arc;
use stpaul_crime_api::api::routes::create_router;
use stpaul_crime_api::config::AppConfig;
use stpaul_crime_api::seed;
use stpaul_crime_api::store::SqliteStore;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress sqlx debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn)
        .init();

    println!("St. Paul Crime Incident Query Service");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    let database_url = config.database_url();
    println!("Opening SQLite database at {}", database_url);
    let store = SqliteStore::connect(&database_url, config.max_connections()).await?;

    store.migrate().await?;
    println!("Database ready");

    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        println!("Loading seed data...");
        seed::load_seed_data(&store).await?;
        println!("Seed data loaded successfully");
    }

    let store = Arc::new(store);

    run_server(create_router().with_state(store), &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Crime API server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
