use crate::error::{CatalogueError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use zecode_catalogue_common::catalogue::{DEFAULT_POSE_FOLDER, DEFAULT_PRODUCT_FOLDER};

/// APIキーの環境変数名
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// ローカルの秘密情報ファイル（リポジトリにはコミットしない）
pub const ENV_FILE_NAME: &str = ".env.local";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub garments_folder: String,
    pub poses_folder: String,
    pub timeout_seconds: u64,
    /// 判定失敗後に次の画像へ進むまでの待ち時間
    pub error_pause_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".into(),
            garments_folder: DEFAULT_PRODUCT_FOLDER.into(),
            poses_folder: DEFAULT_POSE_FOLDER.into(),
            timeout_seconds: 60,
            error_pause_ms: 2000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CatalogueError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("zecode-catalogue").join("config.json"))
    }

    /// APIキーを取得
    ///
    /// 優先順位: 環境変数 → `.env.local` → 設定ファイル
    pub fn get_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        if let Some(key) = load_env_file(Path::new(ENV_FILE_NAME)).remove(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(CatalogueError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}

/// `.env` 形式のファイルを読み込む（存在しなければ空）
///
/// 同じキーは最初の定義を採用。パースできない行は読み飛ばす。
pub fn load_env_file(path: &Path) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    let Ok(iter) = dotenvy::from_path_iter(path) else {
        return vars;
    };

    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.entry(key).or_insert(value);
            }
            Err(dotenvy::Error::LineParse(line, index)) => {
                tracing::warn!(file = %path.display(), line = %line, index, "解釈できない行をスキップ");
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, ".env ファイルを読み込めません");
                break;
            }
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.garments_folder, "extracted-products");
        assert_eq!(config.poses_folder, "model-poses");
        assert_eq!(config.error_pause_ms, 2000);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"model": "gemini-2.0-flash"}"#).unwrap();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.poses_folder, "model-poses");
        assert_eq!(config.timeout_seconds, 60);
    }

    fn write_env(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ENV_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_env_file_quotes_and_first_wins() {
        let (_dir, path) = write_env(
            "# comment\nGOOGLE_API_KEY=\"abc123\"\nCLOUDINARY_CLOUD_NAME='demo'\nGOOGLE_API_KEY=second\n",
        );
        let vars = load_env_file(&path);
        assert_eq!(vars.get("GOOGLE_API_KEY").map(String::as_str), Some("abc123"));
        assert_eq!(vars.get("CLOUDINARY_CLOUD_NAME").map(String::as_str), Some("demo"));
    }

    #[test]
    fn test_load_env_file_export_and_inline_comment() {
        let (_dir, path) = write_env("export GOOGLE_API_KEY=abc\nOTHER=xyz # note\n");
        let vars = load_env_file(&path);
        assert_eq!(vars.get("GOOGLE_API_KEY").map(String::as_str), Some("abc"));
        assert_eq!(vars.get("OTHER").map(String::as_str), Some("xyz"));
    }

    #[test]
    fn test_load_env_file_missing() {
        let vars = load_env_file(Path::new("/nonexistent/.env.local"));
        assert!(vars.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"error_pause_ms": 0, "api_key": "k"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.error_pause_ms, 0);
        assert_eq!(config.api_key.as_deref(), Some("k"));
    }
}
