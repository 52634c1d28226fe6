//! Security validation for application configuration
//!
//! Validates configuration for security issues and provides warnings at startup.
//! Critical issues in production will prevent startup unless explicitly allowed.

use std::fmt;

use crate::config::{AppConfig, ProviderKind};

/// Severity level for security warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WarningSeverity {
    /// Informational - no action required
    Info,
    /// Warning - should be addressed but not critical
    Warning,
    /// Critical - must be addressed in production
    Critical,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A security warning with severity and description
#[derive(Debug, Clone)]
pub struct SecurityWarning {
    /// Severity level of the warning
    pub severity: WarningSeverity,
    /// Short code identifying the warning type
    pub code: String,
    /// Human-readable description of the issue
    pub message: String,
    /// Recommended action to resolve the issue
    pub recommendation: String,
}

impl SecurityWarning {
    /// Create a new security warning
    #[must_use]
    pub fn new(
        severity: WarningSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }

    /// Create a critical warning
    #[must_use]
    pub fn critical(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Critical, code, message, recommendation)
    }

    /// Create a warning-level issue
    #[must_use]
    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self::new(WarningSeverity::Warning, code, message, recommendation)
    }

    /// Check if this warning is critical
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self.severity, WarningSeverity::Critical)
    }
}

impl fmt::Display for SecurityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.code, self.message, self.recommendation
        )
    }
}

/// Environment variable that permits production startup despite critical findings
pub const ALLOW_INSECURE_VAR: &str = "SKYCAST_ALLOW_INSECURE_CONFIG";

/// Minimum recommended secret key length in characters
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// Validates application configuration for security issues
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityValidator;

impl SecurityValidator {
    /// Validate configuration and return all security warnings
    ///
    /// Returns a list of warnings sorted by severity (critical first).
    #[must_use]
    pub fn validate(config: &AppConfig) -> Vec<SecurityWarning> {
        let mut warnings = Vec::new();
        let is_production = config.is_production();

        Self::check_secret_key(config, is_production, &mut warnings);
        Self::check_cors_configuration(config, is_production, &mut warnings);
        Self::check_error_exposure(config, is_production, &mut warnings);
        Self::check_provider_credentials(config, &mut warnings);

        // Sort by severity (critical first)
        warnings.sort_by(|a, b| b.severity.cmp(&a.severity));

        warnings
    }

    /// Check if startup should be blocked due to critical security issues
    ///
    /// Reads `SKYCAST_ALLOW_INSECURE_CONFIG` from the environment.
    #[must_use]
    pub fn should_block_startup(config: &AppConfig, warnings: &[SecurityWarning]) -> bool {
        let allow_insecure = std::env::var(ALLOW_INSECURE_VAR)
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self::blocks_startup(config, warnings, allow_insecure)
    }

    /// Startup is blocked in production when a critical warning exists and
    /// insecure startup was not explicitly allowed
    #[must_use]
    pub fn blocks_startup(
        config: &AppConfig,
        warnings: &[SecurityWarning],
        allow_insecure: bool,
    ) -> bool {
        let has_critical = warnings.iter().any(SecurityWarning::is_critical);
        config.is_production() && has_critical && !allow_insecure
    }

    /// Log all warnings using tracing
    pub fn log_warnings(warnings: &[SecurityWarning]) {
        for warning in warnings {
            match warning.severity {
                WarningSeverity::Critical => {
                    tracing::error!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration issue"
                    );
                },
                WarningSeverity::Warning => {
                    tracing::warn!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration warning"
                    );
                },
                WarningSeverity::Info => {
                    tracing::info!(
                        code = %warning.code,
                        message = %warning.message,
                        recommendation = %warning.recommendation,
                        "Security configuration notice"
                    );
                },
            }
        }
    }

    fn check_secret_key(
        config: &AppConfig,
        is_production: bool,
        warnings: &mut Vec<SecurityWarning>,
    ) {
        match config.security.secret_key_len() {
            None => {
                let severity = if is_production {
                    WarningSeverity::Critical
                } else {
                    WarningSeverity::Warning
                };
                warnings.push(SecurityWarning::new(
                    severity,
                    "SEC001",
                    "No secret key configured",
                    "Set SECRET_KEY in the environment or .env file",
                ));
            },
            Some(len) if len < MIN_SECRET_KEY_LEN => {
                warnings.push(SecurityWarning::warning(
                    "SEC002",
                    format!("Secret key is only {len} characters long"),
                    format!("Use a random secret key of at least {MIN_SECRET_KEY_LEN} characters"),
                ));
            },
            Some(_) => {},
        }
    }

    fn check_cors_configuration(
        config: &AppConfig,
        is_production: bool,
        warnings: &mut Vec<SecurityWarning>,
    ) {
        if config.server.allows_any_origin() {
            let severity = if is_production {
                WarningSeverity::Critical
            } else {
                WarningSeverity::Info
            };

            warnings.push(SecurityWarning::new(
                severity,
                "SEC003",
                "CORS allows requests from any origin",
                "Specify server.allowed_origins in production to restrict cross-origin requests",
            ));
        }
    }

    fn check_error_exposure(
        config: &AppConfig,
        is_production: bool,
        warnings: &mut Vec<SecurityWarning>,
    ) {
        if is_production && config.security.expose_internal_errors {
            warnings.push(SecurityWarning::critical(
                "SEC004",
                "Internal error details are exposed in HTTP responses",
                "Set security.expose_internal_errors = false in production",
            ));
        }
    }

    fn check_provider_credentials(config: &AppConfig, warnings: &mut Vec<SecurityWarning>) {
        let weather = &config.weather;
        if weather.providers.contains(&ProviderKind::OpenWeatherMap)
            && !weather.openweathermap.has_api_key()
        {
            warnings.push(SecurityWarning::warning(
                "SEC005",
                "OpenWeatherMap is configured without an API key and will be skipped",
                "Set WEATHER_API_KEY or remove openweathermap from weather.providers",
            ));
        }
    }
}
