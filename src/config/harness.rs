//! Root configuration for the support layer.

use serde::{Deserialize, Serialize};

use super::fonts::FontConfig;
use super::pool::TaskPoolConfig;

/// Root configuration: one task pool plus one font cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Background task pool settings.
    pub pool: TaskPoolConfig,
    /// Font cache settings.
    pub fonts: FontConfig,
}

impl HarnessConfig {
    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field, prefixed with
    /// the section it belongs to.
    pub fn validate(&self) -> Result<(), String> {
        self.pool
            .validate()
            .map_err(|e| format!("pool invalid: {e}"))?;
        self.fonts
            .validate()
            .map_err(|e| format!("fonts invalid: {e}"))?;
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// Returns a parse error or the first validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFamily;

    #[test]
    fn parse_full_config() {
        let cfg = HarnessConfig::from_json_str(
            r#"{
                "pool": {
                    "worker_count": 2,
                    "thread_name_prefix": "bg",
                    "thread_stack_size": null
                },
                "fonts": {
                    "default_family": "intel_one_mono",
                    "default_size": 15.0,
                    "icon_scale": 0.9
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.pool.worker_count, 2);
        assert_eq!(cfg.pool.thread_name_prefix, "bg");
        assert_eq!(cfg.fonts.default_family, FontFamily::IntelOneMono);
    }

    #[test]
    fn invalid_section_is_reported_with_prefix() {
        let cfg = HarnessConfig::from_json_str(
            r#"{
                "pool": {
                    "worker_count": 0,
                    "thread_name_prefix": "",
                    "thread_stack_size": null
                },
                "fonts": {
                    "default_family": "cousine",
                    "default_size": 15.0,
                    "icon_scale": 0.9
                }
            }"#,
        );
        let err = cfg.unwrap_err();
        assert!(err.starts_with("pool invalid:"), "unexpected error: {err}");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = HarnessConfig::from_json_str("{").unwrap_err();
        assert!(err.starts_with("parse error:"), "unexpected error: {err}");
    }
}
