// ==========================================
// Klinke 生产计划 - 订单导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 阶段: 0 文件解析 → 1 字段映射 → 2 清洗 → 3 DQ 校验
// ==========================================

use crate::domain::import::{DqReport, DqViolation, RawOrderRecord};
use crate::importer::error::ImportResult;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>），跳过全空行
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 RawOrderRecord（支持列名别名）
    fn map_to_raw_order(&self, row: &HashMap<String, String>, row_number: usize) -> RawOrderRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM + 可选 UPPER）
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 数量清洗
    ///
    /// # 返回
    /// (清洗后数量 ≥ 0, 是否发生修正)
    /// - 非数字 → 0
    /// - 负数 → 0
    /// - 小数 → 截断
    fn sanitize_quantity(&self, value: Option<&str>) -> (i64, bool);

    /// 解析日期（YYYY-MM-DD / YYYYMMDD / DD/MM/YYYY / Excel 序列号）
    fn parse_date(&self, value: &str, row: usize, field: &str) -> ImportResult<NaiveDate>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 用途: 数据质量校验接口（阶段 3）
pub trait DqValidator: Send + Sync {
    /// 校验订单号（非空；同批次重复记为冲突）
    fn validate_primary_key(&self, records: &[RawOrderRecord]) -> Vec<DqViolation>;

    /// 校验单行字段
    fn validate_fields(&self, record: &RawOrderRecord) -> Vec<DqViolation>;

    /// 生成 DQ 报告
    fn generate_dq_report(
        &self,
        batch_id: String,
        total_rows: usize,
        violations: Vec<DqViolation>,
    ) -> DqReport;
}
