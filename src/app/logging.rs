//! Tracing subscriber setup for the CLI.

use tracing::debug;
use tracing_subscriber::EnvFilter;

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "funcpipe=info,warn",
        1 => "funcpipe=debug,warn",
        _ => "funcpipe=trace,info",
    }
}

/// `RUST_LOG` wins over the verbosity flag.
pub fn log_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber; logs go to stderr.
pub fn init_logging(verbose: u8) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .try_init()
        .is_ok();

    if installed {
        debug!("funcpipe started with verbosity level: {}", verbose);
    }
}
