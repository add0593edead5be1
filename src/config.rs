use std::env;

use crate::domain::validate::SolverTimeLimits;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
}

/// Server and dashboard settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub json_limit: usize,
    pub app_title: String,
    pub theme: ThemeColors,
    pub solver_time: SolverTimeLimits,
    pub debug: bool,
    pub sentry_dsn: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_f64 = |key: &str, default: f64| {
            lookup(key)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default)
        };

        let min = parse_f64("SOLVER_TIME_MIN", 10.0);
        let max = parse_f64("SOLVER_TIME_MAX", 300.0).max(min);
        let default = parse_f64("SOLVER_TIME_DEFAULT", min).clamp(min, max);

        AppConfig {
            port: lookup("PORT")
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            json_limit: lookup("JSON_PAYLOAD_LIMIT")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(DEFAULT_JSON_LIMIT),
            app_title: lookup("APP_TITLE").unwrap_or_else(|| "Vehicle Routing Demo".to_string()),
            theme: ThemeColors {
                primary: lookup("THEME_COLOR").unwrap_or_else(|| "#074C91".to_string()),
                secondary: lookup("THEME_COLOR_SECONDARY").unwrap_or_else(|| "#2A7DE1".to_string()),
            },
            solver_time: SolverTimeLimits { min, max, default },
            debug: lookup("DEBUG")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.json_limit, 2 * 1024 * 1024);
        assert_eq!(config.solver_time.min, 10.0);
        assert_eq!(config.solver_time.max, 300.0);
        assert_eq!(config.solver_time.default, 10.0);
        assert!(!config.debug);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("APP_TITLE", "Routing"),
            ("THEME_COLOR", "#000000"),
            ("SOLVER_TIME_MIN", "5"),
            ("SOLVER_TIME_DEFAULT", "20"),
            ("DEBUG", "True"),
            ("SENTRY_DSN", "https://key@example.invalid/1"),
        ]);
        assert_eq!(config.port, 9100);
        assert_eq!(config.app_title, "Routing");
        assert_eq!(config.theme.primary, "#000000");
        assert_eq!(config.solver_time.min, 5.0);
        assert_eq!(config.solver_time.default, 20.0);
        assert!(config.debug);
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("SOLVER_TIME_MAX", "-3"), ("SENTRY_DSN", "")]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.solver_time.max, 300.0);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_default_time_is_clamped_into_bounds() {
        let config = config_from(&[("SOLVER_TIME_DEFAULT", "1000")]);
        assert_eq!(config.solver_time.default, 300.0);
    }
}
