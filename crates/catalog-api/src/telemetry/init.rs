use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "info,catalog_api=debug,catalog_db=debug,tower_http=debug";

/// Initialize tracing.
///
/// `log_format` selects the console output: `json` emits one structured object per
/// event, anything else uses the compact human format. `RUST_LOG` overrides the
/// default filter. Calling this twice is not an error; the first subscriber wins.
pub fn init_telemetry(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let result = if log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()
    } else {
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        tracing_subscriber::registry()
            .with(filter)
            .with(console_fmt)
            .try_init()
    };

    // Err means a global subscriber is already installed.
    if result.is_ok() {
        tracing::info!(log_format = %log_format, "Tracing initialized");
    }
}
