mod action;
mod app;
mod theme;
mod ui;

use strata_core::{Config, CpalServer, NavigationController};

fn main() -> anyhow::Result<()> {
    let data_dir = strata_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("strata.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("strata log: {}", log_path.display());
    tracing::info!("strata starting…");

    // Everything below here is a hard startup requirement; failing out of
    // main exits with code 1 before the terminal is touched.
    if dirs::home_dir().is_none() {
        anyhow::bail!("could not resolve home directory");
    }

    let config = Config::load().unwrap_or_default();
    tracing::info!("browsing root: {}", config.browser.music_dir.display());

    let server = CpalServer::new(config.audio.device.clone());
    let controller = NavigationController::new(
        server,
        &config.browser.music_dir,
        config.audio.channel_policy,
    )
    .map_err(|e| anyhow::anyhow!("cannot browse {}: {e}", config.browser.music_dir.display()))?;

    let mut app = app::App::new(controller);
    app.run()?;

    tracing::info!("clean exit");
    Ok(())
}
