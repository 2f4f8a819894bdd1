// ==========================================
// Klinke 生产计划 - 订单导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到可排产订单
// 流程: 解析 → 映射 → 校验 → 清洗转换
// 行级问题进入 DQ 报告，只有文件级问题返回错误
// ==========================================

use crate::domain::import::{DqLevel, DqViolation, OrderImportResult, RawOrderRecord};
use crate::domain::order::Order;
use crate::domain::types::{Family, Finishing, OrderStatus};
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::dq_validator::DqValidator as DqValidatorImpl;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::order_importer_trait::{DataCleaner, DqValidator, FieldMapper};
use crate::perf::PerfGuard;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// OrderImporter - 订单导入器
// ==========================================
pub struct OrderImporter {
    // 导入组件
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    dq_validator: Box<dyn DqValidator>,
}

impl OrderImporter {
    /// 创建导入器（使用默认组件）
    pub fn new() -> Self {
        Self {
            file_parser: UniversalFileParser,
            field_mapper: Box::new(FieldMapperImpl),
            data_cleaner: Box::new(DataCleanerImpl),
            dq_validator: Box::new(DqValidatorImpl::new()),
        }
    }

    /// 从文件导入订单（.csv / .xlsx / .xls）
    ///
    /// # 返回
    /// - Ok(OrderImportResult): 可排产订单 + DQ 报告
    /// - Err(ImportError): 文件不存在、格式不支持、解析失败
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<OrderImportResult> {
        let path = file_path.as_ref();
        info!("开始导入订单文件");

        // === 步骤 0: 文件解析 ===
        let rows = self.file_parser.parse(path)?;
        info!(total_rows = rows.len(), "文件解析完成");

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string());

        Ok(self.import_rows(&rows, file_name))
    }

    /// 从已解析的行记录导入（行号从 2 开始，第 1 行为表头）
    pub fn import_rows(
        &self,
        rows: &[HashMap<String, String>],
        file_name: Option<String>,
    ) -> OrderImportResult {
        let mut perf = PerfGuard::new("import_orders");
        perf.set_items(rows.len());

        let batch_id = Uuid::new_v4().to_string();

        // === 步骤 1: 字段映射 ===
        let records: Vec<RawOrderRecord> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.clean_record(self.field_mapper.map_to_raw_order(row, idx + 2)))
            .collect();

        // === 步骤 2: DQ 校验 ===
        let mut violations = self.dq_validator.validate_primary_key(&records);
        for record in &records {
            violations.extend(self.dq_validator.validate_fields(record));
        }

        let blocked_rows: HashSet<usize> = violations
            .iter()
            .filter(|v| v.level == DqLevel::Error)
            .map(|v| v.row_number)
            .collect();

        for violation in violations.iter().filter(|v| v.level == DqLevel::Error) {
            warn!(
                row = violation.row_number,
                field = %violation.field,
                message = %violation.message,
                "订单行被阻断"
            );
        }

        // === 步骤 3: 转换为领域订单 ===
        let orders: Vec<Order> = records
            .iter()
            .filter(|record| !blocked_rows.contains(&record.row_number))
            .filter_map(|record| self.convert_to_order(record))
            .collect();

        let dq_report =
            self.dq_validator
                .generate_dq_report(batch_id.clone(), records.len(), violations);

        perf.set_output(orders.len());
        info!(
            batch_id = %batch_id,
            total = dq_report.summary.total_rows,
            imported = orders.len(),
            blocked = dq_report.summary.blocked,
            warnings = dq_report.summary.warning,
            conflicts = dq_report.summary.conflict,
            "订单导入完成"
        );

        OrderImportResult {
            batch_id,
            file_name,
            orders,
            dq_report,
            elapsed_ms: perf.elapsed_ms(),
        }
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 清洗原始记录（TRIM / NULL 标准化，产品族等标签转大写）
    fn clean_record(&self, record: RawOrderRecord) -> RawOrderRecord {
        let cleaner = &self.data_cleaner;
        let upper =
            |v: Option<String>| cleaner.normalize_null(v.map(|s| cleaner.clean_text(&s, true)));
        let plain = |v: Option<String>| cleaner.normalize_null(v);

        RawOrderRecord {
            id: plain(record.id),
            number: DataCleanerImpl.clean_order_number(record.number),
            family: upper(record.family),
            item: plain(record.item),
            quantity: plain(record.quantity),
            due_date: plain(record.due_date),
            finishing: upper(record.finishing),
            status: upper(record.status),
            production_line: plain(record.production_line),
            row_number: record.row_number,
        }
    }

    /// 转换为领域订单；阻断字段（订单号/产品族）缺失时返回 None
    fn convert_to_order(&self, record: &RawOrderRecord) -> Option<Order> {
        let number = record.number.clone()?;
        let family = Family::from_str(record.family.as_deref()?).ok()?;

        let (quantity, _) = self
            .data_cleaner
            .sanitize_quantity(record.quantity.as_deref());
        let due_date = record.due_date.as_deref().and_then(|raw| {
            self.data_cleaner
                .parse_date(raw, record.row_number, "due_date")
                .ok()
        });
        let finishing = record
            .finishing
            .as_deref()
            .and_then(|raw| Finishing::from_str(raw).ok())
            .unwrap_or_default();
        let status = record
            .status
            .as_deref()
            .and_then(|raw| OrderStatus::from_str(raw).ok())
            .unwrap_or_default();

        let mut order = Order::new(
            number,
            family,
            record.item.clone().unwrap_or_default(),
            quantity,
            due_date,
        )
        .with_finishing(finishing)
        .with_status(status);

        if let Some(id) = &record.id {
            order = order.with_id(id.clone());
        }
        order.production_line = record.production_line.clone();

        Some(order)
    }
}

impl Default for OrderImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// 汇总某行的违规信息（CLI 输出使用）
pub fn describe_violation(violation: &DqViolation) -> String {
    let level = match violation.level {
        DqLevel::Error => "ERROR",
        DqLevel::Warning => "WARNING",
        DqLevel::Conflict => "CONFLICT",
    };
    format!(
        "[{}] #{} {}: {}",
        level, violation.row_number, violation.field, violation.message
    )
}
