// ==========================================
// Klinke 生产计划 - 订单导入领域模型
// ==========================================
// 用途: 导入管道的中间结构与数据质量（DQ）报告
// ==========================================

use crate::domain::order::Order;
use serde::{Deserialize, Serialize};

// ==========================================
// RawOrderRecord - 原始订单行
// ==========================================
// 字段映射后、清洗前的中间结构，全部保留字符串
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOrderRecord {
    pub id: Option<String>,              // 外部订单 ID（可空，导入时生成）
    pub number: Option<String>,          // 订单号
    pub family: Option<String>,          // 产品族
    pub item: Option<String>,            // 品项
    pub quantity: Option<String>,        // 数量
    pub due_date: Option<String>,        // 交期
    pub finishing: Option<String>,       // 表面处理
    pub status: Option<String>,          // 状态
    pub production_line: Option<String>, // 生产线

    // 元信息
    pub row_number: usize, // 原始文件行号（表头为第 1 行）
}

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,    // 错误（该行不导入）
    Warning,  // 警告（修正后导入）
    Conflict, // 冲突（重复订单号，仍导入）
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,            // 原始文件行号
    pub order_number: Option<String>, // 订单号（如果可解析）
    pub level: DqLevel,               // 违规级别
    pub field: String,                // 违规字段
    pub message: String,              // 违规描述
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize, // 总行数
    pub success: usize,    // 成功导入
    pub blocked: usize,    // 阻断（ERROR）
    pub warning: usize,    // 含警告的行
    pub conflict: usize,   // 冲突行
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub batch_id: String,
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    pub fn has_errors(&self) -> bool {
        self.summary.blocked > 0
    }

    pub fn violations_for_row(&self, row_number: usize) -> impl Iterator<Item = &DqViolation> {
        self.violations
            .iter()
            .filter(move |v| v.row_number == row_number)
    }
}

// ==========================================
// OrderImportResult - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderImportResult {
    pub batch_id: String,
    pub file_name: Option<String>,
    pub orders: Vec<Order>, // 可排产订单（已清洗）
    pub dq_report: DqReport,
    pub elapsed_ms: u64,
}
