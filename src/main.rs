use anyhow::Result;
use convert_header::config::Settings;
use convert_header::infrastructure::{init_tracing, log_messages::application};
use convert_header::Application;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;
    init_tracing(&settings.logging);

    info!("{}", application::STARTING);

    let app = Application::from_settings(settings)?;
    app.run().await?;

    Ok(())
}
