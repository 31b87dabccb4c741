use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Logs go to stderr so the report on stdout stays machine-readable.
pub fn setup_logger() {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    for noisy in ["hyper=warn", "hyper_util=warn", "reqwest=warn"] {
        if let Ok(directive) = noisy.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        // .with_file(true)
        // .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(true)
        .compact()
        .with_env_filter(filter)
        .init();
}
