use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Deployment environment
///
/// Only `development` unlocks diagnostic detail in error responses. Any other
/// value, including typos, is treated as production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Environment {
    /// Local or staging deployment where internals may be shown
    Development,
    /// Everything else
    #[default]
    Production,
}

impl Environment {
    /// Whether diagnostic detail may be attached to responses
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_development_is_development() {
        assert_eq!(Environment::from("development"), Environment::Development);
        assert_eq!(Environment::from(" Development "), Environment::Development);
        assert_eq!(Environment::from("production"), Environment::Production);
        assert_eq!(Environment::from("staging"), Environment::Production);
        assert_eq!(Environment::from("dev"), Environment::Production);
        assert_eq!(Environment::from(""), Environment::Production);
    }

    #[test]
    fn deserializes_from_any_string() {
        let env: Environment = serde_json::from_str("\"development\"").unwrap();
        assert!(env.is_development());

        let env: Environment = serde_json::from_str("\"qa\"").unwrap();
        assert_eq!(env, Environment::Production);
    }

    #[test]
    fn defaults_to_production() {
        assert!(!Environment::default().is_development());
    }
}
