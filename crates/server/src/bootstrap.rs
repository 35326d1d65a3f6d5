use std::sync::Arc;

use axum::Router;
use pollbot_core::config::{AppConfig, ConfigError, LoadOptions};
use pollbot_slack::gateway::SlackApiClient;
use thiserror::Error;
use tracing::info;

use crate::{health, routes};

pub struct Application {
    pub config: AppConfig,
    pub router: Router,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("slack api client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let gateway =
        Arc::new(SlackApiClient::new(&config.slack).map_err(BootstrapError::HttpClient)?);
    let state = routes::AppState::new(config.slack.verification_token.clone(), gateway);
    let router = routes::router(state).merge(health::router());

    info!(
        event_name = "system.bootstrap.routes_registered",
        correlation_id = "bootstrap",
        "webhook routes registered"
    );

    Ok(Application { config, router })
}
