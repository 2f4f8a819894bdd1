// ==========================================
// Klinke 生产计划 - 排产配置
// ==========================================
// 存储: JSON 文件
// 示例: {"capacity": {"TORRES": 210, "PUXADORES": 55}, "horizon_years": 2, "locale": "pt-BR"}
// ==========================================

use crate::domain::capacity::CapacityTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 排产窗口允许范围（年）
pub const MIN_HORIZON_YEARS: u32 = 1;
pub const MAX_HORIZON_YEARS: u32 = 10;

pub const DEFAULT_HORIZON_YEARS: u32 = 2;
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件写入失败 ({path}): {message}")]
    WriteError { path: String, message: String },

    #[error("配置格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("无法确定配置目录")]
    NoConfigDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// SchedulerConfig - 排产配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub capacity: CapacityTable, // 产品族日产能
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32, // 排产窗口（年）
    #[serde(default = "default_locale")]
    pub locale: String, // 报表语言
}

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            capacity: CapacityTable::default(),
            horizon_years: DEFAULT_HORIZON_YEARS,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl SchedulerConfig {
    /// 从 JSON 字符串解析并校验
    pub fn from_json(raw: &str, origin: &str) -> ConfigResult<Self> {
        let config: SchedulerConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置值
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(ConfigError::ValueError {
                key: "horizon_years".to_string(),
                value: self.horizon_years.to_string(),
                message: format!(
                    "排产窗口必须在 [{}, {}] 年之间",
                    MIN_HORIZON_YEARS, MAX_HORIZON_YEARS
                ),
            });
        }
        if self.locale.trim().is_empty() {
            return Err(ConfigError::ValueError {
                key: "locale".to_string(),
                value: self.locale.clone(),
                message: "语言代码不能为空".to_string(),
            });
        }
        Ok(())
    }

    pub fn to_pretty_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<memory>".to_string(),
            message: e.to_string(),
        })
    }
}
