use tracing_subscriber::EnvFilter;

/// `debug` from `--debug` or the settings wins over `RUST_LOG`, which
/// otherwise decides and defaults to `warn`
pub fn log_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_debug_raises_filter() {
        assert_eq!(log_filter(true).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
