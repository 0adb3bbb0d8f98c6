mod auth;
mod handlers;
mod validation;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Extension, Router, Server};
use common::{config::Config, logging};
use db::{Database, DatabaseConnection};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::new()?;

    logging::init(&config);

    let Some(server_config) = config.server.as_ref() else {
        return Err(anyhow::Error::msg("unable to load server config"));
    };

    info!("connecting to database");
    let database = Arc::new(Database::connect(&config.database.url).await?);
    let server = Server::bind(&server_config.address);
    let config = Arc::new(config);

    server
        .serve(app_router(database, config).into_make_service())
        .await?;

    Ok(())
}

fn app_router(database: Arc<DatabaseConnection>, config: Arc<Config>) -> Router {
    let protected_routes = Router::new()
        .nest("/auth", handlers::auth::profile_routes())
        .nest("/teams", handlers::teams::routes())
        .nest("/professors", handlers::professors::routes())
        .nest("/mentors", handlers::mentors::routes())
        .nest("/meetings", handlers::meetings::routes())
        .nest("/leaderboard", handlers::leaderboard::routes())
        .nest("/files", handlers::files::routes())
        .route_layer(from_fn_with_state(
            config.clone(),
            auth::require_authentication,
        ));

    Router::new()
        .merge(protected_routes)
        .nest("/auth", handlers::auth::routes())
        .nest("/leaderboard", handlers::leaderboard::public_routes())
        .nest("/health", handlers::health::routes())
        .layer(Extension(config))
        .with_state(database)
}
