//! Log subscriber setup.
//!
//! Diagnostics are written to stderr; stdout is reserved for results so
//! `--json` output stays machine-readable. `RUST_LOG`, when set, replaces
//! the levels from the settings file:
//!
//! ```bash
//! RUST_LOG=calc_core=debug calc_cli add 2 3
//! ```

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

use crate::settings::LoggingSettings;

/// Wall-clock time of day in the local zone.
struct LocalClock;

impl FormatTime for LocalClock {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Pick the filter: an explicit environment directive wins over settings.
fn filter_for(env_directive: Option<&str>, settings: &LoggingSettings) -> EnvFilter {
    env_directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(settings.filter_directive()))
}

/// Install the global subscriber.
///
/// A subscriber that is already installed is left in place.
pub fn init(settings: &LoggingSettings) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_for(env.as_deref(), settings);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(LocalClock)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_filter_without_env() {
        let settings = LoggingSettings::default();
        let filter = filter_for(None, &settings);
        assert_eq!(filter.to_string(), EnvFilter::new(settings.filter_directive()).to_string());
    }

    #[test]
    fn test_env_directive_wins() {
        let settings = LoggingSettings::default();
        let filter = filter_for(Some("calc_core=trace"), &settings);
        assert_eq!(filter.to_string(), "calc_core=trace");
    }

    #[test]
    fn test_invalid_env_directive_falls_back() {
        let settings = LoggingSettings::default();
        let filter = filter_for(Some("calc_core=loud"), &settings);
        assert_eq!(filter.to_string(), EnvFilter::new(settings.filter_directive()).to_string());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let settings = LoggingSettings::default();
        init(&settings);
        init(&settings);
    }
}
