use crate::config::Settings;
use crate::convert::echo::echo_headers;
use crate::convert::{ConvertHeader, ConvertHeaderStack};
use crate::infrastructure::log_messages::application;
use crate::Result;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
    convert: ConvertHeader,
}

impl Application {
    #[instrument]
    pub fn new() -> Result<Self> {
        Self::from_settings(Settings::new()?)
    }

    /// Build the application, validating the middleware configuration
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let convert = ConvertHeader::new(
            settings.middleware.name.clone(),
            settings.middleware.raw_config(),
        )?;

        info!(
            middleware = %convert.name(),
            from_header = %convert.config().from_header(),
            to_header = %convert.config().to_header(),
            conversion = %convert.config().conversion(),
            substitutions = convert.config().substitutions().len(),
            "{}",
            application::CONFIG_LOADED
        );

        Ok(Self { settings, convert })
    }

    /// The echo service behind the conversion middleware
    pub fn router(&self) -> Router {
        ConvertHeaderStack::new(self.convert.clone())
            .apply_to_router(Router::new().fallback(echo_headers))
    }

    #[instrument(skip(self))]
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.settings.bind_address()).await?;
        info!(
            address = %listener.local_addr()?,
            environment = %self.settings.application.environment,
            "{}",
            application::LISTENING
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("{}", application::STOPPED);
        Ok(())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn convert_header(&self) -> &ConvertHeader {
        &self.convert
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("{}", application::SHUTDOWN_REQUESTED);
    }
}
