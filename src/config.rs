//! Runtime configuration, resolved once at startup.
//!
//! [`Config`] is built from the parsed `run` arguments (which in turn may
//! come from `PROFILE`, `VERSION`, and friends) and handed to the router
//! state. Nothing reads the environment after this point.

use crate::cli::RunArgs;
use crate::severity::LogSeverity;

pub const DEFAULT_VERSION: &str = "0.0.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    Production,
    Development,
}

impl DeploymentMode {
    /// `PROD` (any case) selects production; anything else is development.
    #[must_use]
    pub fn from_profile(profile: Option<&str>) -> Self {
        match profile {
            Some(p) if p.trim().eq_ignore_ascii_case("prod") => Self::Production,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub const fn default_severity(self) -> LogSeverity {
        match self {
            Self::Production => LogSeverity::Info,
            Self::Development => LogSeverity::Debug,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: DeploymentMode,
    /// Value of the `Version` response header.
    pub version: String,
    pub initial_severity: LogSeverity,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DeploymentMode::Development, None, None)
    }
}

impl Config {
    /// An empty or missing version falls back to [`DEFAULT_VERSION`].
    #[must_use]
    pub fn new(
        mode: DeploymentMode,
        version: Option<String>,
        severity_override: Option<LogSeverity>,
    ) -> Self {
        let version = version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        Self {
            mode,
            version,
            initial_severity: severity_override.unwrap_or_else(|| mode.default_severity()),
        }
    }

    #[must_use]
    pub fn from_run_args(args: &RunArgs) -> Self {
        Self::new(
            DeploymentMode::from_profile(args.profile.as_deref()),
            args.app_version.clone(),
            args.log_level,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prod_profile_is_production() {
        assert_eq!(
            DeploymentMode::from_profile(Some("PROD")),
            DeploymentMode::Production
        );
        assert_eq!(
            DeploymentMode::from_profile(Some("prod")),
            DeploymentMode::Production
        );
    }

    #[test]
    fn other_profiles_are_development() {
        assert_eq!(
            DeploymentMode::from_profile(None),
            DeploymentMode::Development
        );
        assert_eq!(
            DeploymentMode::from_profile(Some("staging")),
            DeploymentMode::Development
        );
    }

    #[test]
    fn initial_severity_follows_mode() {
        let prod = Config::new(DeploymentMode::Production, None, None);
        assert_eq!(prod.initial_severity, LogSeverity::Info);

        let dev = Config::new(DeploymentMode::Development, None, None);
        assert_eq!(dev.initial_severity, LogSeverity::Debug);
    }

    #[test]
    fn explicit_level_overrides_mode() {
        let config = Config::new(DeploymentMode::Production, None, Some(LogSeverity::Warn));
        assert_eq!(config.initial_severity, LogSeverity::Warn);
    }

    #[test]
    fn version_defaults_when_unset_or_empty() {
        assert_eq!(Config::default().version, DEFAULT_VERSION);
        let empty = Config::new(DeploymentMode::Development, Some(String::new()), None);
        assert_eq!(empty.version, DEFAULT_VERSION);
        let set = Config::new(DeploymentMode::Development, Some("2.3.1".into()), None);
        assert_eq!(set.version, "2.3.1");
    }
}
