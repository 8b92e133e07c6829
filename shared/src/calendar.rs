//! 日历模块
//!
//! 报表的时间维度：
//! - `Weekday`: 固定的 7 个印尼语星期名（按日历顺序）
//! - `Week`: 月内周序号 1..=4
//! - `Period`: (年, 月) 组合，标识一次报表提交

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

// =========================================================
// Weekday
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Senin,
    Selasa,
    Rabu,
    Kamis,
    Jumat,
    Sabtu,
    Minggu,
}

impl Weekday {
    /// 日历顺序
    pub const ALL: [Weekday; 7] = [
        Weekday::Senin,
        Weekday::Selasa,
        Weekday::Rabu,
        Weekday::Kamis,
        Weekday::Jumat,
        Weekday::Sabtu,
        Weekday::Minggu,
    ];

    /// 显示用名称（首字母大写）
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Senin => "Senin",
            Weekday::Selasa => "Selasa",
            Weekday::Rabu => "Rabu",
            Weekday::Kamis => "Kamis",
            Weekday::Jumat => "Jumat",
            Weekday::Sabtu => "Sabtu",
            Weekday::Minggu => "Minggu",
        }
    }

    /// 提交给后端的名称（全小写）
    pub fn api_name(&self) -> String {
        self.name().to_lowercase()
    }

    /// 解析星期名，忽略大小写（"senin" / "SENIN" / "Senin" 均可）
    pub fn from_name(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(raw))
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =========================================================
// Week
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week(u8);

impl Week {
    pub const FIRST: Week = Week(1);
    pub const ALL: [Week; 4] = [Week(1), Week(2), Week(3), Week(4)];

    /// 仅接受 1..=4
    pub fn new(number: u32) -> Option<Self> {
        (1..=4)
            .contains(&number)
            .then(|| Week(number as u8))
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl Display for Week {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Minggu {}", self.0)
    }
}

// =========================================================
// Period
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// 月份必须在 1..=12，年份必须为正数
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if year > 0 && (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// 本地时钟的当前年月
    pub fn current() -> Self {
        let now = chrono::Local::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("-")
    }

    /// 从查询字符串解析（如 `year=2025&month=3`，允许带前导 `?`）
    ///
    /// 缺失、为 0 或无法解析的参数都视为无效。
    pub fn from_query(query: &str) -> Option<Self> {
        let mut year = None;
        let mut month = None;
        for pair in query.trim_start_matches('?').split('&') {
            let mut kv = pair.splitn(2, '=');
            let key = kv.next().unwrap_or_default();
            let value = kv.next().unwrap_or_default();
            let value = urlencoding::decode(value).ok()?;
            match key {
                "year" => year = value.trim().parse::<i32>().ok(),
                "month" => month = value.trim().parse::<u32>().ok(),
                _ => {}
            }
        }
        Self::new(year?, month?)
    }

    pub fn to_query(&self) -> String {
        format!("year={}&month={}", self.year, self.month)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

pub fn month_name(month: u32) -> Option<&'static str> {
    MONTHS.get((month as usize).checked_sub(1)?).copied()
}

/// 按年份分组已有数据的期间
///
/// 年份按降序排列；同一年内的月份保持接收顺序，不再排序。
pub fn group_periods(periods: &[Period]) -> Vec<(i32, Vec<u32>)> {
    let mut groups: Vec<(i32, Vec<u32>)> = Vec::new();
    for p in periods {
        match groups.iter_mut().find(|(year, _)| *year == p.year) {
            Some((_, months)) => months.push(p.month),
            None => groups.push((p.year, vec![p.month])),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_from_name_is_case_insensitive() {
        assert_eq!(Weekday::from_name("senin"), Some(Weekday::Senin));
        assert_eq!(Weekday::from_name("JUMAT"), Some(Weekday::Jumat));
        assert_eq!(Weekday::from_name("Minggu"), Some(Weekday::Minggu));
        assert_eq!(Weekday::from_name("monday"), None);
        assert_eq!(Weekday::from_name(""), None);
    }

    #[test]
    fn test_weekday_order_and_api_name() {
        let names: Vec<_> = Weekday::ALL.iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"]
        );
        assert_eq!(Weekday::Rabu.api_name(), "rabu");
    }

    #[test]
    fn test_week_bounds() {
        assert!(Week::new(0).is_none());
        assert!(Week::new(5).is_none());
        assert_eq!(Week::new(4).map(|w| w.number()), Some(4));
    }

    #[test]
    fn test_period_from_query() {
        assert_eq!(Period::from_query("year=2025&month=3"), Period::new(2025, 3));
        assert_eq!(Period::from_query("?month=12&year=2024"), Period::new(2024, 12));
        assert_eq!(Period::from_query("year=2025"), None);
        assert_eq!(Period::from_query("year=0&month=3"), None);
        assert_eq!(Period::from_query("year=2025&month=13"), None);
        assert_eq!(Period::from_query("year=abc&month=3"), None);
        assert_eq!(Period::from_query(""), None);
    }

    #[test]
    fn test_period_display() {
        let p = Period::new(2025, 3).unwrap();
        assert_eq!(p.to_string(), "Maret 2025");
        assert_eq!(p.to_query(), "year=2025&month=3");
    }

    #[test]
    fn test_group_periods_keeps_month_order() {
        let periods = vec![Period::new(2025, 3).unwrap(), Period::new(2025, 1).unwrap()];
        assert_eq!(group_periods(&periods), vec![(2025, vec![3, 1])]);
    }

    #[test]
    fn test_group_periods_sorts_years_descending() {
        let periods = vec![
            Period::new(2024, 11).unwrap(),
            Period::new(2025, 2).unwrap(),
            Period::new(2024, 12).unwrap(),
        ];
        assert_eq!(
            group_periods(&periods),
            vec![(2025, vec![2]), (2024, vec![11, 12])]
        );
    }

    #[test]
    fn test_group_periods_empty() {
        assert!(group_periods(&[]).is_empty());
    }
}
