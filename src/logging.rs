use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Filter directive for the crate's own events at `level`.
pub fn directive(level: LogLevel) -> String {
    format!("difftool={}", level.as_str())
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the configured level unless `verbose` is set.
/// Calling this more than once is harmless.
pub fn init(level: LogLevel, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(directive(LogLevel::Debug))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level)))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive() {
        assert_eq!(directive(LogLevel::Warn), "difftool=warn");
        assert_eq!(directive(LogLevel::Trace), "difftool=trace");
    }

    #[test]
    fn test_init_twice() {
        init(LogLevel::Error, false);
        init(LogLevel::Debug, true);
    }
}
