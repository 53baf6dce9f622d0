//! Tracing subscriber setup.
//!
//! stdout carries protocol traffic in server mode, so log output is pinned to
//! stderr in every mode.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "xeams_mcp_core=debug,xeams_mcp_server=debug,upstream=debug,mcp_server=debug,config=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
