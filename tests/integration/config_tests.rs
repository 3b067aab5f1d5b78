//! Configuration loading and validation tests

#[cfg(test)]
mod tests {
    use directory_import::config::{Config, DatabaseConfig, ImportSettings, Validate};
    use directory_import::ImportError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let file = write_yaml(
            r#"
import:
  batch_size: 25
database:
  url: "sqlite::memory:"
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.import.batch_size, 25);
        assert_eq!(config.import.batch_delay_ms, 100);
        assert_eq!(config.import.confirm_threshold, 100);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.level, "info");
    }

    #[tokio::test]
    async fn test_invalid_batch_size_rejected() {
        let file = write_yaml("import:\n  batch_size: 0\n");

        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(ImportError::Config(msg)) if msg.contains("batch size")));
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_yaml("import: [this is not a mapping");
        assert!(matches!(
            Config::from_file(file.path()).await,
            Err(ImportError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let result = Config::from_file("/nonexistent/directory-import.yaml").await;
        assert!(matches!(result, Err(ImportError::Config(_))));
    }

    #[test]
    fn test_unsupported_database_rejected() {
        let config = DatabaseConfig {
            url: "mysql://localhost/directory".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
        assert!(ImportSettings::default().validate().is_ok());
    }
}
