// ==========================================
// Klinke 生产计划 - 核心库
// ==========================================
// 系统定位: 按产品族日产能把订单数量分配到工作日
// 技术栈: Rust + CSV/Excel 导入 + JSON 配置
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排产规则
pub mod engine;

// 导入层 - 外部订单
pub mod importer;

// 配置层 - 产能与排产窗口
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 性能统计
pub mod perf;

// 文本报表
pub mod report;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Family, Finishing, OrderStatus};

// 领域实体
pub use domain::{
    AllocationPlan, CapacityTable, DayAllocation, DqReport, DqViolation, Fragment, Order,
    OrderAllocation, OrderImportResult,
};

// 引擎
pub use engine::{
    CapacityAllocator, DueDateSummary, MonthView, OrderSorter, ScheduleOrchestrator,
    ScheduleResult,
};

// 导入
pub use importer::{ImportError, OrderImporter};

// 配置
pub use config::{ConfigManager, SchedulerConfig, SchedulerConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Klinke Planejamento";
