use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr; stdout is reserved for the comparison report.
/// `RUST_LOG` overrides the filter chosen here.
pub fn init_cli_logger(verbose: bool, monitor: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, monitor)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn default_directives(verbose: bool, monitor: bool) -> &'static str {
    match (verbose, monitor) {
        (true, _) => "bincmp=debug,info",
        // Monitor stats are logged at info; keep everything else quiet.
        (false, true) => "bincmp=warn,bincmp::utils::monitor=info",
        (false, false) => "bincmp=warn",
    }
}
