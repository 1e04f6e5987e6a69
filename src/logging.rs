use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming a log file for the terminal client.
pub const UI_LOG_ENV: &str = "COUNTER_APP_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing for the HTTP server: stderr, RFC 3339 UTC timestamps,
/// filter from `RUST_LOG` (default `info`).
pub fn init_server_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize tracing for the terminal client.
///
/// Disabled unless `COUNTER_APP_LOG` names a file, since writing to the
/// terminal would corrupt the display. The file is created as
/// `{path}.{timestamp}.{pid}` so concurrent clients do not collide.
pub fn init_ui_tracing() {
    let Some(log_path) = std::env::var(UI_LOG_ENV).ok() else {
        return;
    };

    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = format!("{}.{}.{}", log_path, timestamp, pid);

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();
}
