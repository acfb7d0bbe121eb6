//! Boot — logging init, config and preference load, session creation.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::{Preferences, ViewerConfig};
use crate::state::Session;

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viewer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config and preferences, build the session and load the configured
/// input (if any) with the configured filters and sort order applied.
///
/// `input_override` (the command-line path) wins over the configured input.
pub fn boot(
    input_override: Option<String>,
) -> Result<(Session, Preferences, ViewerConfig), Box<dyn std::error::Error>> {
    info!("Starting NDJSON viewer v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ViewerConfig::load()?;
    if input_override.is_some() {
        config.input_path = input_override;
    }
    info!(
        "Inference: max_depth={}, sample_records={}, sample_values={}, inspected_values={}",
        config.inference.max_depth,
        config.inference.sample_records,
        config.inference.sample_values,
        config.inference.inspected_values
    );

    let mut prefs = Preferences::load(&config.preferences_path)?;
    prefs.apply_env();
    prefs.validate()?;
    info!(
        "Preferences: timezone={}, human_readable={}, page_size={}",
        prefs.timezone, prefs.human_readable, prefs.page_size
    );

    let mut session = Session::from_config(config.inference, prefs.page_size)?;

    if let Some(input) = config.input_path.as_deref() {
        session.load_file(input).map_err(|e| {
            error!("Failed to load {}: {}", input, e);
            e
        })?;

        for (column, pattern) in &config.filters {
            session.set_filter(column.as_str(), pattern.as_str());
        }
        session.set_sort(config.sort_order());
        session.set_page(config.page_number);
    } else {
        info!("No input configured (set VIEWER_INPUT or input_path)");
    }

    Ok((session, prefs, config))
}
