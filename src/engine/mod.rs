// ==========================================
// Klinke 生产计划 - 引擎层
// ==========================================
// 职责: 实现排产规则（排序 / 日历 / 产能分配 / 视图派生）
// 红线: 引擎不修改订单，只产出新的排产结果
// ==========================================

pub mod calendar;
pub mod capacity_allocator;
pub mod due_summary;
pub mod month_view;
pub mod orchestrator;
pub mod order_sorter;

// 重导出核心引擎
pub use capacity_allocator::CapacityAllocator;
pub use due_summary::DueDateSummary;
pub use month_view::{FamilyOccupancy, MonthDay, MonthView};
pub use orchestrator::{ScheduleOrchestrator, ScheduleResult};
pub use order_sorter::OrderSorter;
