//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::MediaUploads;
use crate::config::Settings;
use crate::domain::services::{FileStore, ImageInspector};
use crate::domain::{CategoryRepository, ChannelRepository, ServerRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    PgCategoryRepository, PgChannelRepository, PgServerRepository,
};
use crate::infrastructure::storage::{HeaderImageInspector, LocalFileStore};
use crate::presentation::http::handlers::health;
use crate::presentation::http::routes;
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub categories: Arc<dyn CategoryRepository>,
    pub servers: Arc<dyn ServerRepository>,
    pub channels: Arc<dyn ChannelRepository>,
    pub files: Arc<dyn FileStore>,
    pub images: Arc<dyn ImageInspector>,
    pub snowflake: Arc<SnowflakeGenerator>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State backed by PostgreSQL repositories and local-disk media storage.
    pub fn new(db: PgPool, settings: Settings) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::with_epoch(
            settings.snowflake.epoch,
            u64::from(settings.snowflake.machine_id),
            0,
        ));

        Self {
            categories: Arc::new(PgCategoryRepository::new(db.clone())),
            servers: Arc::new(PgServerRepository::new(db.clone())),
            channels: Arc::new(PgChannelRepository::new(db.clone())),
            files: Arc::new(LocalFileStore::new(settings.media.root.clone())),
            images: Arc::new(HeaderImageInspector),
            snowflake,
            settings: Arc::new(settings),
            db,
        }
    }

    /// Upload handling over this state's file store and image inspector.
    pub fn uploads(&self) -> MediaUploads {
        MediaUploads::new(self.files.clone(), self.images.clone())
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to create database pool")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        tokio::fs::create_dir_all(&settings.media.root)
            .await
            .with_context(|| format!("Failed to create media root {}", settings.media.root.display()))?;

        let addr = settings.server_addr();

        health::init_server_start();
        let router = routes::create_router(AppState::new(db, settings));

        // Bind to address
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
