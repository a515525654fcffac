use std::path::Path;

use crate::config::schema::ShopConfig;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ShopConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<ShopConfig, ConfigError> {
    let config: ShopConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &ShopConfig) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.shop_name.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "shop_name must not be empty".to_string(),
        });
    }

    if config.labor_rate_cents <= 0 {
        return Err(ConfigError::Validation {
            message: format!("labor_rate_cents must be positive, got {}", config.labor_rate_cents),
        });
    }

    if config.parts_markup < 1.0 {
        return Err(ConfigError::Validation {
            message: format!("parts_markup must be at least 1.0, got {}", config.parts_markup),
        });
    }

    if !(0.0..1.0).contains(&config.tax_rate) {
        return Err(ConfigError::Validation {
            message: format!("tax_rate must be in [0, 1), got {}", config.tax_rate),
        });
    }

    if config.warranty.standard_months == 0 || config.warranty.premium_months == 0 {
        return Err(ConfigError::Validation {
            message: "warranty durations must be positive".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gets_all_defaults() {
        let config = load_config_from_str("{}").unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.shop_name, "Collision Club");
        assert_eq!(config.labor_rate_cents, 8500);
        assert_eq!(config.parts_markup, 1.3);
        assert_eq!(config.tax_rate, 0.08);
        assert_eq!(config.warranty.standard_months, 12);
        assert_eq!(config.value_props.len(), 4);
    }

    #[test]
    fn test_overrides_are_honored() {
        let config = load_config_from_str(
            r#"{
                "shop_name": "Northeast Collision",
                "labor_rate_cents": 9500,
                "tax_rate": 0.06,
                "warranty": { "premium_price_cents": 20000 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.shop_name, "Northeast Collision");
        assert_eq!(config.labor_rate_cents, 9500);
        assert_eq!(config.tax_rate, 0.06);
        assert_eq!(config.warranty.premium_price_cents, 20000);
        // Untouched nested fields keep their defaults.
        assert_eq!(config.warranty.standard_months, 12);
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let err = load_config_from_str(r#"{"version": "2.0"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for bad in [
            r#"{"labor_rate_cents": 0}"#,
            r#"{"parts_markup": 0.9}"#,
            r#"{"tax_rate": 1.0}"#,
            r#"{"tax_rate": -0.1}"#,
            r#"{"shop_name": "  "}"#,
            r#"{"warranty": {"standard_months": 0}}"#,
        ] {
            assert!(
                matches!(load_config_from_str(bad), Err(ConfigError::Validation { .. })),
                "expected validation error for {}",
                bad
            );
        }
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = load_config_from_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseJson(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        std::fs::write(&path, r#"{"labor_rate_cents": 9000}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.labor_rate_cents, 9000);

        let err = load_config(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
