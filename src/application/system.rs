use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::application::model_loader::ModelLoader;
use crate::application::prediction_service::PredictionService;
use crate::config::Config;
use crate::infrastructure::observability::{Metrics, MetricsReporter};
use crate::interfaces::http::create_router;

/// Fully wired server: configuration, the loaded model service and metrics.
pub struct Application {
    pub config: Config,
    pub service: Arc<PredictionService>,
    pub metrics: Metrics,
}

impl Application {
    /// Loads the model once and builds the shared service.
    ///
    /// A model that fails to load does not fail the build; the service
    /// reports the load error on every request instead.
    pub async fn build(config: Config) -> Result<Self> {
        info!("Building application (model: {:?})...", config.model.path);

        let metrics = Metrics::new().context("Failed to create metrics registry")?;

        let path = config.model.path.clone();
        let status = tokio::task::spawn_blocking(move || ModelLoader::default().load(&path))
            .await
            .context("Model loading task panicked")?;

        if !status.is_loaded() {
            warn!("Starting without a model; /predict will answer with errors");
        }

        let service = PredictionService::new(status).with_metrics(metrics.clone());

        Ok(Self {
            config,
            service: Arc::new(service),
            metrics,
        })
    }

    pub fn router(&self) -> Router {
        create_router(self.service.clone())
    }

    /// Serve until ctrl-c. Starts the metrics reporter when enabled.
    pub async fn run(self) -> Result<()> {
        if self.config.observability.enabled {
            let reporter = MetricsReporter::new(
                self.metrics.clone(),
                self.config.observability.interval_seconds,
            );
            tokio::spawn(async move {
                reporter.run().await;
            });
            info!(
                "Metrics reporter started (interval: {}s)",
                self.config.observability.interval_seconds
            );
        } else {
            info!("Metrics reporting disabled.");
        }

        let addr = self.config.server.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("Server stopped.");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
