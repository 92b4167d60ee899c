//! # Config 模块
//!
//! 终端播放器的配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (story-cli.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 播放器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 是否在场景文本前显示场景 ID
    #[serde(default)]
    pub show_scene_id: bool,

    /// 以 JSON 输出场景快照，而不是文本
    #[serde(default)]
    pub json_output: bool,

    /// 故事结束时显示的消息
    #[serde(default = "default_end_message")]
    pub end_message: String,

    /// 故事结束后是否询问重新开始
    #[serde(default = "default_ask_restart")]
    pub ask_restart: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_end_message() -> String {
    "游戏结束。".to_string()
}

fn default_ask_restart() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            show_scene_id: false,
            json_output: false,
            end_message: default_end_message(),
            ask_restart: default_ask_restart(),
        }
    }
}

impl CliConfig {
    /// 加载配置文件
    ///
    /// 文件不存在时返回默认配置。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if tracing::Level::from_str(&self.log_level).is_err() {
            return Err(ConfigError::Validation(format!(
                "未知的日志级别: {}",
                self.log_level
            )));
        }
        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(String),
    /// 解析失败
    #[error("配置解析失败: {0}")]
    Parse(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "warn");
        assert!(config.ask_restart);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(dir.path().join("none.json")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story-cli.json");
        fs::write(&path, r#"{ "show_scene_id": true, "log_level": "debug" }"#).unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert!(config.show_scene_id);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.end_message, "游戏结束。");
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story-cli.json");

        let config = CliConfig {
            end_message: "The End".to_string(),
            ask_restart: false,
            ..CliConfig::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story-cli.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(CliConfig::load(&path), Err(ConfigError::Parse(_))));

        let config = CliConfig {
            log_level: "loud".to_string(),
            ..CliConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
