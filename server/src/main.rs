use pantry_server::config::{Config, ConfigError};
use pantry_server::db::{self, DbSetupError};
use pantry_server::{api, app, telemetry, AppState};
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbSetupError),

    #[error("Failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        match api::openapi().to_pretty_json() {
            Ok(spec) => println!("{spec}"),
            Err(e) => {
                eprintln!("Failed to serialize OpenAPI spec: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    dotenvy::dotenv().ok();
    let telemetry = telemetry::init_telemetry();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server stopped");
        drop(telemetry);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url)?;
    let state = AppState::new(pool, &config.public_url);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at {}/swagger-ui/", config.public_url);
    tracing::info!(
        "OpenAPI spec available at {}/api-docs/openapi.json",
        config.public_url
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}
