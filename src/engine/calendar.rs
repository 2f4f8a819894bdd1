// ==========================================
// Klinke 生产计划 - 工作日日历
// ==========================================
// 工作日: 周一至周五，不含节假日日历
// ==========================================

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

/// 是否工作日
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 严格晚于 date 的下一个工作日；超出 NaiveDate 表示范围时返回 None
pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(1))
        .and_then(first_business_day_on_or_after)
}

/// date 当天或之后的第一个工作日；超出 NaiveDate 表示范围时返回 None
pub fn first_business_day_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_add_signed(Duration::days(2)),
        Weekday::Sun => date.checked_add_signed(Duration::days(1)),
        _ => Some(date),
    }
}

/// 排产窗口末日（含）: start + horizon_years 年
///
/// 2 月 29 日起算落到平年时取 2 月 28 日；溢出时取 NaiveDate::MAX。
pub fn horizon_end(start: NaiveDate, horizon_years: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(horizon_years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MAX)
}

/// 月份平移（支持跨年）；年份超出 i32 时取边界
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = i64::from(year) * 12 + (i64::from(month) - 1) + i64::from(delta);
    let shifted_year = index
        .div_euclid(12)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (shifted_year, index.rem_euclid(12) as u32 + 1)
}

/// 某月全部日期；月份非法时返回空
pub fn days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first
            .iter_days()
            .take_while(|d| d.month() == month)
            .collect(),
        None => Vec::new(),
    }
}
