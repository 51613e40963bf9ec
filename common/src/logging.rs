//! Common logging initializer
//!
//! Everything goes through `tracing`, the filter is taken from `RUST_LOG` when it is set.
//!

use std::path::PathBuf;

use eyre::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

/// Default filter when `RUST_LOG` is not set
const DEF_FILTER: &str = "warn";
/// Same with `-D`
const DEBUG_FILTER: &str = "debug";

/// Setup the global subscriber.
///
/// - `use_tree` selects the hierarchical output instead of the compact one on stderr
/// - `use_file` adds an hourly rolling file named after `name` in that directory
///
pub fn init_logging(
    name: &'static str,
    debug: bool,
    use_tree: bool,
    use_file: Option<PathBuf>,
) -> Result<()> {
    // Load filters from environment
    //
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(if debug { DEBUG_FILTER } else { DEF_FILTER }))?;

    // Do we want hierarchical output?
    //
    let tree = if use_tree {
        Some(
            HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_span_retrace(true)
                .with_span_modes(true)
                .with_targets(true)
                .with_verbose_entry(true)
                .with_verbose_exit(true)
                .with_bracketed_fields(true),
        )
    } else {
        None
    };

    let compact = if use_tree {
        None
    } else {
        Some(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
    };

    // Log to file?
    //
    let file = use_file.map(|dir| {
        let file_appender = tracing_appender::rolling::hourly(dir, name);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });

    // Combine filters & layers
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(compact)
        .with(file)
        .try_init()?;

    Ok(())
}
