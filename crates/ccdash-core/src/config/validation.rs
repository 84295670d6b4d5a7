//! Configuration validation and error reporting

use super::types::DashboardConfig;
use crate::error::{DashboardError, Result};

/// Configuration validator
pub struct ConfigValidator;

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    /// Create a new config validator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::ConfigInvalid`] for blank entries.
    pub fn validate(config: &DashboardConfig) -> Result<()> {
        if config.workspaces.iter().any(|w| w.trim().is_empty()) {
            return Err(invalid("Workspace path cannot be empty"));
        }

        if config.home.as_deref().is_some_and(|h| h.trim().is_empty()) {
            return Err(invalid("Home directory cannot be empty"));
        }

        if config.ignore.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("Ignore pattern cannot be empty"));
        }

        if config.include.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("Include pattern cannot be empty"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> anyhow::Error {
    DashboardError::ConfigInvalid(message.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = DashboardConfig {
            workspaces: vec!["~/workspace".to_string()],
            home: Some("/home/dev".to_string()),
            ignore: vec!["node_modules/".to_string()],
            include: Vec::new(),
        };
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_blank_workspace_rejected() {
        let config = DashboardConfig {
            workspaces: vec!["  ".to_string()],
            ..DashboardConfig::default()
        };

        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::ConfigInvalid(
                "Workspace path cannot be empty".to_string()
            ))
        );
    }

    #[test]
    fn test_blank_patterns_rejected() {
        let ignore = DashboardConfig {
            ignore: vec![String::new()],
            ..DashboardConfig::default()
        };
        let include = DashboardConfig {
            include: vec![" ".to_string()],
            ..DashboardConfig::default()
        };

        assert!(ConfigValidator::validate(&ignore).is_err());
        assert!(ConfigValidator::validate(&include).is_err());
    }

    #[test]
    fn test_blank_home_rejected() {
        let config = DashboardConfig {
            home: Some(String::new()),
            ..DashboardConfig::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
