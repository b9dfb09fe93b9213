use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `HUB_LOG` takes a regular `EnvFilter` directive (`hub=debug`,
/// `hub=trace,ureq=debug`). `HUB_DEBUG=1` is shorthand for `hub=debug`.
/// With neither set only errors are shown, which in practice means nothing:
/// user-facing messages go through `eprintln!`.
pub fn init() {
    let filter = match std::env::var("HUB_LOG") {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::new(directive),
        _ if std::env::var("HUB_DEBUG").as_deref() == Ok("1") => EnvFilter::new("hub=debug"),
        _ => EnvFilter::new("error"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
