// ==========================================
// Klinke 生产计划 - 领域模型层
// ==========================================
// 职责: 定义订单、产能、排产结果与导入 DQ 模型
// 红线: 不含文件读写逻辑，不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod capacity;
pub mod import;
pub mod order;
pub mod types;

// 重导出核心类型
pub use allocation::{AllocationPlan, DayAllocation, Fragment, OrderAllocation};
pub use capacity::{CapacityConstraint, CapacityTable, FamilyDayLoad};
pub use import::{DqLevel, DqReport, DqSummary, DqViolation, OrderImportResult, RawOrderRecord};
pub use order::Order;
pub use types::{Family, Finishing, OrderStatus};
