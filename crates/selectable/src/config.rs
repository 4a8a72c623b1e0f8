use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Lowercase textual selectors and queries before comparing them.
    pub case_fold: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { case_fold: true }
    }
}

impl RegistryConfig {
    pub fn case_sensitive() -> Self {
        Self { case_fold: false }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::RegistryConfig;

    #[test]
    fn case_fold_defaults_on() -> anyhow::Result<()> {
        assert!(RegistryConfig::default().case_fold);
        assert_eq!(RegistryConfig::from_json_str("{}")?, RegistryConfig::default());
        Ok(())
    }

    #[test]
    fn case_fold_can_be_disabled_from_json() -> anyhow::Result<()> {
        let config = RegistryConfig::from_json_str(r#"{"case_fold": false}"#)?;
        assert_eq!(config, RegistryConfig::case_sensitive());
        Ok(())
    }
}
