// ==========================================
// Klinke 生产计划 - 数据质量校验器实现
// ==========================================
// 职责: 订单行 DQ 校验 + DQ 报告生成
// ERROR: 行不导入（订单号缺失 / 产品族无法识别）
// WARNING: 修正后导入（数量修正 / 交期缺失 / 未知标签回落默认）
// CONFLICT: 同批次订单号重复，仍导入
// ==========================================

use crate::domain::import::{DqLevel, DqReport, DqSummary, DqViolation, RawOrderRecord};
use crate::domain::types::{Family, Finishing, OrderStatus};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::order_importer_trait::{DataCleaner as _, DqValidator as DqValidatorTrait};
use std::collections::HashSet;
use std::str::FromStr;

pub struct DqValidator {
    cleaner: DataCleaner,
}

impl DqValidator {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    fn violation(
        record: &RawOrderRecord,
        level: DqLevel,
        field: &str,
        message: String,
    ) -> DqViolation {
        DqViolation {
            row_number: record.row_number,
            order_number: record.number.clone(),
            level,
            field: field.to_string(),
            message,
        }
    }
}

impl Default for DqValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl DqValidatorTrait for DqValidator {
    /// 校验订单号（非空；同批次重复记为冲突）
    fn validate_primary_key(&self, records: &[RawOrderRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen_numbers = HashSet::new();

        for record in records {
            let number = match &record.number {
                Some(n) => n,
                None => {
                    violations.push(Self::violation(
                        record,
                        DqLevel::Error,
                        "number",
                        "número do pedido ausente".to_string(),
                    ));
                    continue;
                }
            };

            if !seen_numbers.insert(number.clone()) {
                violations.push(Self::violation(
                    record,
                    DqLevel::Conflict,
                    "number",
                    format!("número do pedido repetido no lote: {}", number),
                ));
            }
        }

        violations
    }

    /// 校验单行字段
    fn validate_fields(&self, record: &RawOrderRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        // 产品族: 决定产能池，无法识别则阻断
        match &record.family {
            None => violations.push(Self::violation(
                record,
                DqLevel::Error,
                "family",
                "família ausente".to_string(),
            )),
            Some(raw) if Family::from_str(raw).is_err() => violations.push(Self::violation(
                record,
                DqLevel::Error,
                "family",
                format!("família desconhecida: {}", raw),
            )),
            Some(_) => {}
        }

        if record.item.is_none() {
            violations.push(Self::violation(
                record,
                DqLevel::Warning,
                "item",
                "item ausente".to_string(),
            ));
        }

        // 数量: 负数/非数字 → 0，小数截断
        let (quantity, altered) = self.cleaner.sanitize_quantity(record.quantity.as_deref());
        if altered {
            let raw = record.quantity.as_deref().unwrap_or("");
            violations.push(Self::violation(
                record,
                DqLevel::Warning,
                "quantity",
                format!("quantidade inválida '{}', ajustada para {}", raw, quantity),
            ));
        }

        // 交期: 缺失或无法解析时订单排在最后
        match &record.due_date {
            None => violations.push(Self::violation(
                record,
                DqLevel::Warning,
                "due_date",
                "prazo ausente, pedido vai para o fim da fila".to_string(),
            )),
            Some(raw) => {
                if self
                    .cleaner
                    .parse_date(raw, record.row_number, "due_date")
                    .is_err()
                {
                    violations.push(Self::violation(
                        record,
                        DqLevel::Warning,
                        "due_date",
                        format!("prazo inválido: {}", raw),
                    ));
                }
            }
        }

        if let Some(raw) = &record.finishing {
            if Finishing::from_str(raw).is_err() {
                violations.push(Self::violation(
                    record,
                    DqLevel::Warning,
                    "finishing",
                    format!(
                        "acabamento desconhecido '{}', usando {}",
                        raw,
                        Finishing::default()
                    ),
                ));
            }
        }

        if let Some(raw) = &record.status {
            if OrderStatus::from_str(raw).is_err() {
                violations.push(Self::violation(
                    record,
                    DqLevel::Warning,
                    "status",
                    format!(
                        "status desconhecido '{}', usando {}",
                        raw,
                        OrderStatus::default()
                    ),
                ));
            }
        }

        violations
    }

    /// 生成 DQ 报告（按行去重计数）
    fn generate_dq_report(
        &self,
        batch_id: String,
        total_rows: usize,
        violations: Vec<DqViolation>,
    ) -> DqReport {
        let rows_at = |level: DqLevel| {
            violations
                .iter()
                .filter(|v| v.level == level)
                .map(|v| v.row_number)
                .collect::<HashSet<_>>()
                .len()
        };

        let blocked = rows_at(DqLevel::Error);
        let summary = DqSummary {
            total_rows,
            success: total_rows.saturating_sub(blocked),
            blocked,
            warning: rows_at(DqLevel::Warning),
            conflict: rows_at(DqLevel::Conflict),
        };

        DqReport {
            batch_id,
            summary,
            violations,
        }
    }
}
