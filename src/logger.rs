use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global logger, writing to stderr
///
/// `RUST_LOG` still wins over the flags. Calling this twice is harmless.
pub fn init(quiet: bool, verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(quiet, verbose));
    let _ = Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
