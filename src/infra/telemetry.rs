use std::{io, sync::Once};

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const METRIC_TILES_RENDERED: &str = "tilecard_tiles_rendered_total";
pub const METRIC_LINKS_RENDERED: &str = "tilecard_links_rendered_total";
pub const METRIC_LINKS_DROPPED: &str = "tilecard_links_dropped_total";
pub const METRIC_DOCUMENT_RENDER_MS: &str = "tilecard_document_render_ms";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Events are written to stderr; stdout is reserved for rendered HTML.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(io::stderr)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_TILES_RENDERED,
            Unit::Count,
            "Total number of tile cards rendered."
        );
        describe_counter!(
            METRIC_LINKS_RENDERED,
            Unit::Count,
            "Total number of tile list links emitted."
        );
        describe_counter!(
            METRIC_LINKS_DROPPED,
            Unit::Count,
            "Total number of tile list links dropped for missing text or url."
        );
        describe_histogram!(
            METRIC_DOCUMENT_RENDER_MS,
            Unit::Milliseconds,
            "Tile document render latency in milliseconds."
        );
    });
}
