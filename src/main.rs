use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_core::{
    constants::{DATA_DIR_ENV, MAX_LOAD_DEPTH_ENV},
    Session, TriageConfig,
};

/// Main entry point for the triage desk
///
/// Runs one interactive session on stdin/stdout. Logs go to stderr so that they never mix
/// with the desk transcript.
///
/// # Environment Variables
/// - `TRIAGE_DATA_DIR`: directory for relative `save`/`load` file names (default: ".")
/// - `TRIAGE_MAX_LOAD_DEPTH`: how deeply `load` commands may nest (default: 8)
/// - `RUST_LOG`: tracing filter (default directive: "triage=info")
///
/// # Returns
/// * `Ok(())` - when the session ends through `quit` or end of input
/// * `Err(anyhow::Error)` - if configuration is invalid or the terminal cannot be written
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("triage=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = TriageConfig::from_env_values(
        std::env::var(DATA_DIR_ENV).ok(),
        std::env::var(MAX_LOAD_DEPTH_ENV).ok(),
    )?;
    tracing::info!(data_dir = %cfg.data_dir().display(), "starting triage desk");

    let mut session = Session::new(cfg);
    let stdout = std::io::stdout();
    session.run_interactive(std::io::stdin().lock(), &mut stdout.lock())?;

    Ok(())
}
