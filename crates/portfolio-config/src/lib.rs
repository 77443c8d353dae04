//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// The risk section is validated before the configuration is handed out,
/// so an engine is never constructed from an invalid file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("PORTFOLIO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    app_config
        .risk
        .validate()
        .map_err(|e| ConfigError::Message(e.to_string()))?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_from_file() {
        let (_dir, path) = write_config(
            r#"
[app]
name = "engine-test"
environment = "test"

[risk]
initial_capital = 50000
max_position_size = 0.2
max_total_exposure = 0.8
stop_loss_pct = 0.05
take_profit_pct = 0.15
max_daily_loss = 0.03
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.app.name, "engine-test");
        assert_eq!(config.risk.initial_capital, dec!(50000));
        assert!((config.risk.max_position_size - dec!(0.2)).abs() < dec!(0.0000001));
        // Sections not present in the file keep their defaults.
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_risk_section_fails_closed() {
        let (_dir, path) = write_config(
            r#"
[risk]
initial_capital = 0
max_position_size = 0.1
max_total_exposure = 0.8
stop_loss_pct = 0.05
take_profit_pct = 0.15
max_daily_loss = 0.03
"#,
        );

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().risk.validate().is_ok());
        assert!(AppConfig::default().risk.initial_capital > Decimal::ZERO);
    }
}
