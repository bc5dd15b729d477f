use std::env;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "FSH_LOG";

/// Process-level settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    /// Printed before every read, without a trailing newline.
    pub prompt: String,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `debug` or `fsh=trace`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default settings with the log filter taken from [`LOG_ENV`] when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_filter: lookup(LOG_ENV)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_filter),
            ..defaults
        }
    }
}
