// ==========================================
// Klinke 生产计划 - 配置管理器
// ==========================================
// 职责: 配置文件定位、加载、环境变量覆写、保存
// 优先级: 显式路径 > KLINKE_CONFIG > 用户配置目录
// 文件不存在时使用默认配置
// ==========================================

use crate::config::config_reader::SchedulerConfigReader;
use crate::config::scheduler_config::{ConfigError, ConfigResult, SchedulerConfig};
use crate::domain::capacity::CapacityTable;
use crate::domain::types::Family;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// 配置键（环境变量）
// ==========================================
pub mod config_keys {
    // 配置文件路径
    pub const CONFIG_PATH: &str = "KLINKE_CONFIG";

    // 排产窗口覆写
    pub const HORIZON_YEARS: &str = "KLINKE_HORIZON_YEARS";

    // 应用目录名
    pub const APP_DIR: &str = "klinke-planejamento";
    pub const CONFIG_FILE: &str = "config.json";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    config: SchedulerConfig,
}

impl ConfigManager {
    /// 加载配置（读取真实环境变量）
    ///
    /// # 参数
    /// - explicit: 命令行指定的配置文件路径
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_env(explicit, |key| std::env::var(key).ok())
    }

    /// 加载配置（环境变量通过闭包注入，便于测试）
    pub fn load_with_env<F>(explicit: Option<&Path>, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = Self::resolve_path_with_env(explicit, &env)?;

        let config = Self::read_file(&path)?;
        let config = Self::apply_env_overrides(config, &env)?;

        info!(
            path = %path.display(),
            horizon_years = config.horizon_years,
            torres = config.capacity.torres,
            puxadores = config.capacity.puxadores,
            "配置加载完成"
        );

        Ok(Self { path, config })
    }

    /// 只定位配置文件，不读取内容（init-config 覆盖损坏文件时使用）
    pub fn resolve_path(explicit: Option<&Path>) -> ConfigResult<PathBuf> {
        Self::resolve_path_with_env(explicit, &|key: &str| std::env::var(key).ok())
    }

    pub fn resolve_path_with_env<F>(explicit: Option<&Path>, env: &F) -> ConfigResult<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        match explicit {
            Some(p) => Ok(p.to_path_buf()),
            None => match env(config_keys::CONFIG_PATH) {
                Some(p) if !p.trim().is_empty() => Ok(PathBuf::from(p.trim())),
                _ => Self::default_config_path(),
            },
        }
    }

    /// 由内存配置构建（不关联真实文件时 path 仅用于保存）
    pub fn from_config(path: PathBuf, config: SchedulerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { path, config })
    }

    /// 默认配置文件路径: <config_dir>/klinke-planejamento/config.json
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(config_keys::APP_DIR).join(config_keys::CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// 读取配置文件；文件不存在返回默认配置
    fn read_file(path: &Path) -> ConfigResult<SchedulerConfig> {
        if !path.exists() {
            debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Ok(SchedulerConfig::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        SchedulerConfig::from_json(&raw, &path.display().to_string())
    }

    fn apply_env_overrides<F>(mut config: SchedulerConfig, env: &F) -> ConfigResult<SchedulerConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = env(config_keys::HORIZON_YEARS) {
            let years = raw.trim().parse::<u32>().map_err(|_| ConfigError::ValueError {
                key: config_keys::HORIZON_YEARS.to_string(),
                value: raw.clone(),
                message: "无法解析为正整数".to_string(),
            })?;
            config.horizon_years = years;
        }
        config.validate()?;
        Ok(config)
    }

    // ==========================================
    // 查询与修改
    // ==========================================

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// 修改某产品族日产能（需调用 save 落盘）
    pub fn set_capacity(&mut self, family: Family, capacity: u64) {
        self.config.capacity = self.config.capacity.with(family, capacity);
    }

    /// 修改排产窗口
    pub fn set_horizon_years(&mut self, years: u32) -> ConfigResult<()> {
        let mut candidate = self.config.clone();
        candidate.horizon_years = years;
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// 获取当前配置快照（JSON）
    pub fn config_snapshot(&self) -> ConfigResult<String> {
        self.config.to_pretty_json()
    }

    /// 保存配置（自动创建父目录）
    pub fn save(&self) -> ConfigResult<()> {
        let write_err = |e: std::io::Error| ConfigError::WriteError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(&self.path, self.config_snapshot()?).map_err(write_err)?;

        info!(path = %self.path.display(), "配置已保存");
        Ok(())
    }
}

impl SchedulerConfigReader for ConfigManager {
    fn capacity_table(&self) -> CapacityTable {
        self.config.capacity
    }

    fn horizon_years(&self) -> u32 {
        self.config.horizon_years
    }

    fn locale(&self) -> String {
        self.config.locale.clone()
    }
}
