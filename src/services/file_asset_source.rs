//! Asset inventory read from a YAML or JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{AppError, ConfigError, DataError, Record, validate_batches};
use crate::ports::AssetSourcePlugin;
use crate::services::ErrorLog;

/// Asset source backed by a list of asset mappings on disk.
///
/// Files ending in `.json` are parsed as JSON; anything else as YAML.
#[derive(Debug)]
pub struct FileAssetSource {
    path: PathBuf,
    name: String,
    content: Option<String>,
    log: ErrorLog,
}

impl FileAssetSource {
    pub fn new(path: impl Into<PathBuf>, log: ErrorLog) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name, content: None, log }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_connected(&self) -> bool {
        self.content.is_some()
    }

    fn parse(&self, content: &str) -> Result<Value, DataError> {
        let is_json = self.path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            serde_json::from_str::<Value>(content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())
        };
        parsed.map_err(|details| {
            self.log.error(&format!("Unreadable asset inventory {}: {details}", self.path.display()));
            DataError::UnexpectedDataType
        })
    }
}

impl AssetSourcePlugin for FileAssetSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&mut self) -> Result<(), AppError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                self.content = Some(content);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.log.error(&format!("Asset inventory not found: {}.", self.path.display()));
                Err(ConfigError::NotFound { path: self.path.clone() }.into())
            }
            Err(err) => {
                self.log.error(&format!(
                    "Failed to open asset inventory {}: {err}",
                    self.path.display()
                ));
                Err(err.into())
            }
        }
    }

    fn fetch_assets(&mut self) -> Result<Vec<Record>, AppError> {
        let Some(content) = self.content.as_deref() else {
            return Err(AppError::NotConnected(self.name.clone()));
        };

        let value = self.parse(content)?;
        validate_batches(&[value]).map_err(|rejection| {
            self.log.error(&rejection.detail);
            AppError::Data(rejection.error)
        })
    }

    fn disconnect(&mut self) {
        self.content = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_yaml_inventory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assets.yaml");
        fs::write(&path, "- id: web-01\n  hostname: web-01.corp\n  ip_address: 10.0.0.5\n- id: 42\n")
            .unwrap();

        let mut source = FileAssetSource::new(&path, ErrorLog::disabled());
        source.connect().unwrap();
        let assets = source.fetch_assets().unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0]["hostname"], "web-01.corp");
        assert_eq!(assets[1]["id"], 42);
    }

    #[test]
    fn reads_json_inventory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assets.json");
        fs::write(&path, r#"[{"id": "db-01", "ip_address": "10.0.0.9"}]"#).unwrap();

        let mut source = FileAssetSource::new(&path, ErrorLog::disabled());
        source.connect().unwrap();
        assert_eq!(source.fetch_assets().unwrap()[0]["id"], "db-01");
    }

    #[test]
    fn fetch_before_connect_fails() {
        let mut source = FileAssetSource::new("assets.yaml", ErrorLog::disabled());
        assert!(matches!(source.fetch_assets(), Err(AppError::NotConnected(_))));
    }

    #[test]
    fn missing_inventory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let mut source = FileAssetSource::new(temp.path().join("absent.yaml"), ErrorLog::disabled());

        match source.connect() {
            Err(AppError::Config(err)) => assert!(err.is_not_found()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn assets_without_id_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assets.yaml");
        fs::write(&path, "- hostname: orphan\n").unwrap();

        let mut source = FileAssetSource::new(&path, ErrorLog::disabled());
        source.connect().unwrap();
        assert!(matches!(source.fetch_assets(), Err(AppError::Data(DataError::MissingRequiredKeys))));
    }

    #[test]
    fn disconnect_drops_state() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("assets.yaml");
        fs::write(&path, "[]\n").unwrap();

        let mut source = FileAssetSource::new(&path, ErrorLog::disabled());
        source.connect().unwrap();
        assert!(source.is_connected());
        source.disconnect();
        assert!(!source.is_connected());
    }
}
