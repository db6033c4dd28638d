use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, health_check, init_pool};
use tokio::net::TcpListener;

use trainer::{
    config::AppConfig,
    ledger::SessionLedger,
    routes,
    scenarios::ScenarioRepository,
    state::AppState,
    templates::TemplateStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting trainer service");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Create tables and seed the scenario catalog
    SessionLedger::init_schema(&pool).await?;
    ScenarioRepository::init_schema(&pool).await?;

    // Load the scenario pages; a missing template aborts startup
    let templates = TemplateStore::load(&config.template_dir)?;

    info!("Trainer service initialized successfully");

    let ledger = SessionLedger::new(pool.clone());
    let scenarios = ScenarioRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        ledger,
        scenarios,
        templates,
        session_key: config.session_key.clone(),
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Trainer service listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
