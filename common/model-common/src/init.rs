//! Logging setup for the model tools
//!
//! Tools such as `drive-status` print documents on stdout, so the
//! subscriber installed here writes to stderr only.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber for a model tool
///
/// The calling crate logs at `info` unless `RUST_LOG` says otherwise.
/// `LOG_FORMAT=json` switches to one JSON object per event, for log
/// shippers; the default is plain text with ANSI colors off, since stderr
/// is often captured alongside piped output.
///
/// Fails if a subscriber is already installed.
///
/// ```rust,ignore
/// model_common::init_tracing(env!("CARGO_CRATE_NAME"))?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(format!("{crate_name}=info").parse()?);
    let registry = tracing_subscriber::registry().with(filter);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if json_logs_requested() {
        registry.with(stderr_layer.json()).try_init()?;
    } else {
        registry.with(stderr_layer.with_ansi(false)).try_init()?;
    }

    Ok(())
}

fn json_logs_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
