use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used when neither `SMASH_LOG` nor `RUST_LOG` is set.
fn default_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("info,smash=debug")
    } else {
        EnvFilter::new("info")
    }
}

pub fn init_logging(debug: bool, no_color: bool) {
    let filter = std::env::var("SMASH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| default_filter(debug),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| default_filter(debug)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_target(debug)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
