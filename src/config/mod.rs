// ==========================================
// Klinke 生产计划 - 配置层
// ==========================================
// 职责: 产能表 / 排产窗口 / 报表语言的加载与保存
// 存储: JSON 文件（可被环境变量覆写）
// ==========================================

pub mod config_manager;
pub mod config_reader;
pub mod scheduler_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use config_reader::SchedulerConfigReader;
pub use scheduler_config::{ConfigError, ConfigResult, SchedulerConfig};
