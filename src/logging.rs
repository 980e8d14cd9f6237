use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber, `RUST_LOG` wins over the `debug` switch
pub fn init_logging(debug: bool) {
    let default_filter = if debug {
        "counter_console=debug,counter=debug,warn"
    } else {
        "counter_console=warn,warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(env_filter)
        .try_init();
}
