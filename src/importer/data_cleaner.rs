// ==========================================
// Klinke 生产计划 - 数据清洗器实现
// ==========================================
// 职责: TRIM / UPPER / NULL 标准化 / 数量修正 / 日期解析
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::order_importer_trait::DataCleaner as DataCleanerTrait;
use chrono::{Duration, NaiveDate};

// Excel 序列日期基准（1900 日期系统）
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn sanitize_quantity(&self, value: Option<&str>) -> (i64, bool) {
        let raw = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return (0, true),
        };

        // 整数直接通过
        if let Ok(n) = raw.parse::<i64>() {
            return if n < 0 { (0, true) } else { (n, false) };
        }

        // 小数: 逗号视为小数点，截断；超出 i64 范围按非法处理
        match raw.replace(',', ".").parse::<f64>() {
            Ok(f) if f.is_finite() && f >= 0.0 && f < i64::MAX as f64 => {
                let truncated = f.trunc();
                (truncated as i64, truncated != f)
            }
            _ => (0, true),
        }
    }

    fn parse_date(&self, value: &str, row: usize, field: &str) -> ImportResult<NaiveDate> {
        let value = value.trim();
        // 带时间部分的 ISO 字符串只取日期
        let date_part = value.split(['T', ' ']).next().unwrap_or(value);

        let parsed = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                (date_part.len() == 8 && date_part.chars().all(|c| c.is_ascii_digit()))
                    .then(|| NaiveDate::parse_from_str(date_part, "%Y%m%d").ok())
                    .flatten()
            })
            .or_else(|| NaiveDate::parse_from_str(date_part, "%d/%m/%Y").ok())
            .or_else(|| Self::from_excel_serial(date_part));

        parsed.ok_or_else(|| ImportError::DateFormatError {
            row,
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

impl DataCleaner {
    /// Excel 数字单元格中的日期（序列号）
    fn from_excel_serial(value: &str) -> Option<NaiveDate> {
        let serial = value.parse::<f64>().ok()?;
        if !(1.0..=EXCEL_MAX_SERIAL).contains(&serial) {
            return None;
        }
        let (y, m, d) = EXCEL_EPOCH;
        NaiveDate::from_ymd_opt(y, m, d)?.checked_add_signed(Duration::days(serial.trunc() as i64))
    }

    /// 清洗订单号（TRIM，Excel 数字单元格去掉 ".0"）
    pub fn clean_order_number(&self, value: Option<String>) -> Option<String> {
        self.normalize_null(value).map(|v| match v.strip_suffix(".0") {
            Some(stripped) if stripped.chars().all(|c| c.is_ascii_digit()) => stripped.to_string(),
            _ => v,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  torres  ", false), "torres");
        assert_eq!(cleaner.clean_text("  torres  ", true), "TORRES");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("   ".to_string())), None);
        assert_eq!(
            cleaner.normalize_null(Some(" 7397 ".to_string())),
            Some("7397".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_sanitize_quantity() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.sanitize_quantity(Some("300")), (300, false));
        assert_eq!(cleaner.sanitize_quantity(Some("0")), (0, false));
        assert_eq!(cleaner.sanitize_quantity(Some("150.0")), (150, false));
        // 负数 → 0
        assert_eq!(cleaner.sanitize_quantity(Some("-5")), (0, true));
        // 非数字 → 0
        assert_eq!(cleaner.sanitize_quantity(Some("abc")), (0, true));
        assert_eq!(cleaner.sanitize_quantity(None), (0, true));
        // 小数截断（含逗号小数）
        assert_eq!(cleaner.sanitize_quantity(Some("12.7")), (12, true));
        assert_eq!(cleaner.sanitize_quantity(Some("1,5")), (1, true));
        // 超出 i64 范围 → 0
        assert_eq!(cleaner.sanitize_quantity(Some("1e30")), (0, true));
        assert_eq!(cleaner.sanitize_quantity(Some("99999999999999999999")), (0, true));
        assert_eq!(cleaner.sanitize_quantity(Some("9223372036854775807")), (i64::MAX, false));
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        let expected = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        assert_eq!(cleaner.parse_date("2026-03-02", 2, "prazo").unwrap(), expected);
        assert_eq!(cleaner.parse_date("20260302", 2, "prazo").unwrap(), expected);
        assert_eq!(cleaner.parse_date("02/03/2026", 2, "prazo").unwrap(), expected);
        assert_eq!(cleaner.parse_date("2026-03-02T00:00:00", 2, "prazo").unwrap(), expected);
        // Excel 序列号
        assert_eq!(cleaner.parse_date("46083", 2, "prazo").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_invalid() {
        let cleaner = DataCleaner;
        let result = cleaner.parse_date("31/02/2026", 5, "prazo");
        assert!(matches!(
            result,
            Err(ImportError::DateFormatError { row: 5, .. })
        ));
        assert!(cleaner.parse_date("amanhã", 5, "prazo").is_err());
    }

    #[test]
    fn test_clean_order_number() {
        let cleaner = DataCleaner;
        assert_eq!(
            cleaner.clean_order_number(Some("7397.0".to_string())),
            Some("7397".to_string())
        );
        assert_eq!(
            cleaner.clean_order_number(Some("A-12".to_string())),
            Some("A-12".to_string())
        );
        assert_eq!(cleaner.clean_order_number(Some(" ".to_string())), None);
    }
}
