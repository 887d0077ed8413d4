pub mod config;
pub mod pipeline;

pub use pipeline::fields::{FieldMap, FieldRecord, FieldTable};
pub use pipeline::runner::{Normalizer, RunReport};
pub use pipeline::NormalizeError;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr so stdout can carry output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{} tracing initialized", config::APP_NAME, config::APP_VERSION);
}
