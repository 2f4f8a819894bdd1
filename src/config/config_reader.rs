// ==========================================
// Klinke 生产计划 - 配置读取 Trait
// ==========================================
// 职责: 定义排产所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::scheduler_config::SchedulerConfig;
use crate::domain::capacity::CapacityTable;

// ==========================================
// SchedulerConfigReader Trait
// ==========================================
// 实现者: SchedulerConfig（内存）/ ConfigManager（文件 + 环境变量）
pub trait SchedulerConfigReader: Send + Sync {
    /// 产品族日产能表
    fn capacity_table(&self) -> CapacityTable;

    /// 排产窗口（年）
    fn horizon_years(&self) -> u32;

    /// 报表语言
    fn locale(&self) -> String;
}

impl SchedulerConfigReader for SchedulerConfig {
    fn capacity_table(&self) -> CapacityTable {
        self.capacity
    }

    fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    fn locale(&self) -> String {
        self.locale.clone()
    }
}
