//! Runtime settings resolved from the environment.

pub const DEFAULT_SOURCE: &str = "uber_data.csv";
pub const DEFAULT_CURRENCY: &str = "BRL";
pub const DEFAULT_LOG_FILE: &str = "logs/ride_report.log";

/// Where the trip log lives and how results are labeled.
///
/// Read from (`.env` is loaded first by the binary):
/// ```text
/// RIDES_SOURCE=uber_data.csv        # path or http(s) URL
/// REPORT_CURRENCY=BRL
/// LOG_FILE_PATH=logs/ride_report.log
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub source: String,
    pub currency: String,
    pub log_file_path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            log_file_path: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl ReportConfig {
    /// Reads the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            source: get("RIDES_SOURCE", DEFAULT_SOURCE),
            currency: get("REPORT_CURRENCY", DEFAULT_CURRENCY),
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE),
        }
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, source: Option<String>, currency: Option<String>) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        if let Some(currency) = currency {
            self.currency = currency;
        }
        self
    }
}
