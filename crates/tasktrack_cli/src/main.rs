use clap::Parser;
use std::io;
use tasktrack_cli::cli::Cli;
use tasktrack_cli::menu::Menu;
use tasktrack_core::config::{
    load_config_with_fallback, merge_overrides, palette_for_theme, resolve_store_path,
};
use tasktrack_core::error::AppError;
use tasktrack_core::storage::TaskStore;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    // Tracing is opt-in via RUST_LOG.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        warn!(error = %err, "using default configuration");
    }
    let config = merge_overrides(&loaded.config, &cli.overrides());

    let store = TaskStore::new(resolve_store_path(&config)?);
    debug!(path = %store.path().display(), "using task store");
    store.ensure_exists()?;

    let palette = palette_for_theme(config.theme.as_deref());
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&store, stdin.lock(), stdout.lock(), palette).run()
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
