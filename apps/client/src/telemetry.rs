//! Process-wide tracing for the console client.
//!
//! Logs go to stderr; stdout belongs to the console renderer. The filter comes
//! from `SACKSON_LOG`, then `RUST_LOG`. `SACKSON_LOG_FORMAT=text` switches from
//! JSON lines to compact text.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "sackson_client=info,warn";

// The websocket crates log every frame at debug.
const WIRE_CAP: &str = "tungstenite=warn,tokio_tungstenite=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    fn from_var(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("text") | Some("compact") => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

fn directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    let base = ["SACKSON_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string());
    if base.contains("tungstenite") {
        base
    } else {
        format!("{base},{WIRE_CAP}")
    }
}

pub fn init_tracing() {
    let lookup = |key: &str| std::env::var(key).ok();
    let filter = EnvFilter::try_new(directives(lookup))
        .unwrap_or_else(|_| EnvFilter::new(format!("{DEFAULT_DIRECTIVES},{WIRE_CAP}")));
    let registry = tracing_subscriber::registry().with(filter);

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false);
    match LogFormat::from_var(lookup("SACKSON_LOG_FORMAT").as_deref()) {
        LogFormat::Json => registry.with(layer.json()).init(),
        LogFormat::Text => registry.with(layer.compact()).init(),
    }
}
