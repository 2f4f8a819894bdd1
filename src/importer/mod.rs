// ==========================================
// Klinke 生产计划 - 导入层
// ==========================================
// 职责: 外部订单文件 → 可排产订单 + DQ 报告
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod order_importer;
pub mod order_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use order_importer::{describe_violation, OrderImporter};

// 重导出 Trait 接口
pub use order_importer_trait::{DataCleaner, DqValidator, FieldMapper, FileParser};
