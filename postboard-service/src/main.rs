//! Service entry point

use postboard_service::{observability, web, AppState, Config, Result, Server};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    observability::init_tracing(&config.service.log_level);

    tracing::info!(
        service = %config.service.name,
        environment = %config.service.environment,
        "Configuration loaded"
    );

    let state = AppState::connect(&config).await?;
    let app = web::router(state);

    Server::new(config).serve(app).await
}
