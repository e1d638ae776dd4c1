use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Filter directives come from `SNEK_LOG`, falling back to `RUST_LOG`; with
/// neither set nothing is installed and nothing is logged. Setting
/// `SNEK_LOG_TREE` swaps the flat formatter for an indented span tree.
/// Events always go to stderr so they never mix with program output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = std::env::var("SNEK_LOG")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
        else {
            return;
        };

        let registry = tracing_subscriber::registry().with(EnvFilter::new(directives));
        let installed = if std::env::var_os("SNEK_LOG_TREE").is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        if let Err(err) = installed {
            eprintln!("warning: tracing not installed: {err}");
        }
    });
}
