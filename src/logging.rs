//! Log setup.
//!
//! Logs go to stderr so they never mix with command output.

use tracing_subscriber::EnvFilter;

/// Filter directive for the `-v` count, falling back to `configured`.
#[must_use]
pub fn filter_directive(verbose: u8, configured: &str) -> String {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("studyfocus={level}")
}

/// Install the global subscriber. `RUST_LOG` wins over everything else.
pub fn init(verbose: u8, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, configured)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(0, "warn"), "studyfocus=warn");
        assert_eq!(filter_directive(1, "warn"), "studyfocus=info");
        assert_eq!(filter_directive(2, "error"), "studyfocus=debug");
        assert_eq!(filter_directive(7, "warn"), "studyfocus=trace");
    }
}
