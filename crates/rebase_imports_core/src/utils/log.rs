use once_cell::sync::OnceCell;

static TRACING: OnceCell<()> = OnceCell::new();

/// Installs a global `tracing` subscriber when the `TRACE` environment
/// variable names a level, e.g. `TRACE=DEBUG cargo test`.
pub fn enable_tracing_by_env() {
    let is_enable_tracing = std::env::var("TRACE").is_ok_and(|level| {
        matches!(
            level.to_uppercase().as_str(),
            "TRACE" | "DEBUG" | "INFO" | "WARN" | "ERROR"
        )
    });
    if !is_enable_tracing {
        return;
    }
    TRACING.get_or_init(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        // A subscriber installed by someone else wins.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().pretty().with_file(true))
            .with(EnvFilter::from_env("TRACE"))
            .try_init();
    });
}
