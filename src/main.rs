//! Campushub - A lightweight REST backend for campus records and blogs

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campushub::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxBlogRepository, SqlxCommentRepository, SqlxEmployeeRepository,
            SqlxStudentRepository,
        },
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campushub=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Campushub backend...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Build application state
    let state = AppState {
        students: SqlxStudentRepository::boxed(pool.clone()),
        employees: SqlxEmployeeRepository::boxed(pool.clone()),
        blogs: Arc::new(SqlxBlogRepository::new(pool.clone())),
        comments: Arc::new(SqlxCommentRepository::new(pool.clone())),
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
