//! Tracing for test processes.
//!
//! Integration binaries install the subscriber from a `ctor` hook; unit tests
//! may call [`init`] directly. Output goes through the test writer so it is
//! captured per test.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

const QUIET: &str = "warn";
const WIRE_CAP: &str = "tungstenite=warn,tokio_tungstenite=warn";

/// Filter directives for a test run.
///
/// `SACKSON_TEST_LOG` wins over `RUST_LOG`; with neither set only warnings
/// show. The websocket crates stay at `warn` unless a directive names them.
pub fn directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    let base = ["SACKSON_TEST_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| QUIET.to_string());
    if base.contains("tungstenite") {
        base
    } else {
        format!("{base},{WIRE_CAP}")
    }
}

/// Install the test subscriber once per process. Later calls are no-ops, as
/// is a subscriber some other harness already installed.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_new(directives(|key| std::env::var(key).ok()))
            .unwrap_or_else(|_| EnvFilter::new(QUIET));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init()
            .ok();
    });
}
