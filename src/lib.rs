pub mod app;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod notification;
pub mod paint;
pub mod storage;
pub mod ui;
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary and by embedding integrations.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting Scrawl");

    let config = config::load_app_config();
    tracing::debug!(?config, "loaded configuration");

    let app = app::App::new(config);
    app.start()?;

    tracing::info!("scrawl exited");
    Ok(())
}
