//! Logging setup
//!
//! Every calculator reports through `tracing` under the
//! `repair_pricing_core_rs` target tree:
//!
//! | Target | Level | Event |
//! |--------|-------|-------|
//! | `::pricing::aggregator` | warn | line with no resolvable price |
//! | `::pricing::aggregator` | debug | breakdown totals |
//! | `::pricing::variant` | warn | negative catalog price clamped |
//! | `::pricing::rush` | debug | rush capacity reached |
//! | `::orchestrator::engine` | info / error | quote priced / pricing failed |
//!
//! A service embedding the engine normally installs its own subscriber and
//! never calls these.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "repair_pricing_core_rs=info";

/// Install a fmt subscriber for standalone tools
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`], e.g.
/// `RUST_LOG=repair_pricing_core_rs::pricing=debug` to see every breakdown.
///
/// # Example
/// ```no_run
/// use repair_pricing_core_rs::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Capture engine events at debug level in test output
///
/// Repeat calls are no-ops.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("repair_pricing_core_rs=debug"))
        .with_test_writer()
        .try_init();
}
