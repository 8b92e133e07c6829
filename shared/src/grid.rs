//! 报表网格状态模块
//!
//! 一个期间（月）的录入数据：7 天 × 4 周 × N 行。
//!
//! 存储为扁平的 `GridEntry` 列表，每一行都带有 (day, week) 标签；
//! 按天 / 按周的分组视图全部由查询函数派生，不保存嵌套映射。
//!
//! 不变量：28 个 (day, week) 分桶中每一个始终至少有一行，
//! 以保证界面结构稳定。空的默认行在提交时被丢弃。

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::amount::{format_amount, parse_amount, parse_quantity};
use crate::calendar::{Period, Week, Weekday};
use crate::{MasterData, ReportPayload, ReportRecord};


// =========================================================
// Row
// =========================================================

/// 一条门店 / 商品销售记录，所有字段保持输入时的文本形式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// 门店编码
    pub outlet_id: String,
    /// 商品编码
    pub item_id: String,
    pub qty_order: String,
    pub qty_sold: String,
    pub deposit: String,
}

impl Row {
    /// 门店、商品、订货量都未填写的行视为"从未填写"
    pub fn is_blank(&self) -> bool {
        self.outlet_id.is_empty() && self.item_id.is_empty() && self.qty_order.is_empty()
    }

    pub fn get(&self, field: RowField) -> &str {
        match field {
            RowField::OutletId => &self.outlet_id,
            RowField::ItemId => &self.item_id,
            RowField::QtyOrder => &self.qty_order,
            RowField::QtySold => &self.qty_sold,
            RowField::Deposit => &self.deposit,
        }
    }

    fn slot(&mut self, field: RowField) -> &mut String {
        match field {
            RowField::OutletId => &mut self.outlet_id,
            RowField::ItemId => &mut self.item_id,
            RowField::QtyOrder => &mut self.qty_order,
            RowField::QtySold => &mut self.qty_sold,
            RowField::Deposit => &mut self.deposit,
        }
    }

    /// 剩余量 = 订货量 - 售出量（可以为负数）
    pub fn remaining(&self) -> i64 {
        parse_quantity(&self.qty_order) - parse_quantity(&self.qty_sold)
    }

    fn from_record(record: &ReportRecord) -> Self {
        Self {
            outlet_id: record.outlet_code.clone(),
            item_id: record.item_code.clone(),
            qty_order: record.qty_order.clone(),
            qty_sold: record.qty_sold.clone(),
            deposit: record.deposit.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    OutletId,
    ItemId,
    QtyOrder,
    QtySold,
    Deposit,
}

impl RowField {
    /// 修改这些字段时需要重新计算押金
    fn affects_deposit(&self) -> bool {
        matches!(self, RowField::QtySold | RowField::ItemId)
    }
}

// =========================================================
// Totals
// =========================================================

/// 一组行的合计（派生值，不存储）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub qty_order: i64,
    pub qty_sold: i64,
    pub qty_remaining: i64,
    pub deposit: f64,
}

impl Totals {
    pub fn of(row: &Row) -> Self {
        let qty_order = parse_quantity(&row.qty_order);
        let qty_sold = parse_quantity(&row.qty_sold);
        Self {
            qty_order,
            qty_sold,
            qty_remaining: qty_order - qty_sold,
            deposit: parse_amount(&row.deposit),
        }
    }

    /// 剩余量为正时需要在界面上提示
    pub fn has_surplus(&self) -> bool {
        self.qty_remaining > 0
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            qty_order: self.qty_order + rhs.qty_order,
            qty_sold: self.qty_sold + rhs.qty_sold,
            qty_remaining: self.qty_remaining + rhs.qty_remaining,
            deposit: self.deposit + rhs.deposit,
        }
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Totals) {
        *self = *self + rhs;
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), Add::add)
    }
}

/// 计算一组行的合计，空序列返回全零
pub fn compute_totals<'a, I>(rows: I) -> Totals
where
    I: IntoIterator<Item = &'a Row>,
{
    rows.into_iter().map(Totals::of).sum()
}

// =========================================================
// ReportGrid
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridEntry {
    pub day: Weekday,
    pub week: Week,
    pub row: Row,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGrid {
    /// 按 (day, week) 的日历顺序排列，同一分桶内保持行顺序
    entries: Vec<GridEntry>,
}

impl Default for ReportGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGrid {
    /// 每个 (day, week) 分桶各放入一行空记录
    pub fn new() -> Self {
        let entries = Weekday::ALL
            .iter()
            .flat_map(|&day| {
                Week::ALL.iter().map(move |&week| GridEntry {
                    day,
                    week,
                    row: Row::default(),
                })
            })
            .collect();
        Self { entries }
    }

    /// 将后端返回的扁平记录分组到网格中
    ///
    /// 分桶收到第一条真实记录时替换掉默认空行。
    /// 星期名无法识别或周序号不在 1..=4 的记录会被丢弃（仅记录日志）。
    pub fn hydrate(records: &[ReportRecord]) -> Self {
        let mut grid = Self::new();
        let mut filled: Vec<(Weekday, Week)> = Vec::new();

        for record in records {
            let Some(day) = Weekday::from_name(&record.day_name) else {
                log::warn!(
                    "[Grid] dropping record with unknown day name {:?}",
                    record.day_name
                );
                continue;
            };
            let Some(week) = Week::new(record.week) else {
                log::warn!("[Grid] dropping record with invalid week {}", record.week);
                continue;
            };

            let row = Row::from_record(record);
            if filled.contains(&(day, week)) {
                grid.insert_into_bucket(day, week, row);
            } else {
                filled.push((day, week));
                // 新建网格中每个分桶恰好只有默认空行
                if let Some(pos) = grid.position(day, week, 0) {
                    grid.entries[pos].row = row;
                }
            }
        }
        grid
    }

    /// 某个分桶中的行（按顺序）
    pub fn rows_in(&self, day: Weekday, week: Week) -> impl Iterator<Item = &Row> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.day == day && e.week == week)
            .map(|e| &e.row)
    }

    pub fn row(&self, day: Weekday, week: Week, index: usize) -> Option<&Row> {
        self.rows_in(day, week).nth(index)
    }

    pub fn bucket_len(&self, day: Weekday, week: Week) -> usize {
        self.rows_in(day, week).count()
    }

    /// 分桶内第 `index` 行在扁平列表中的位置
    fn position(&self, day: Weekday, week: Week, index: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.day == day && e.week == week)
            .nth(index)
            .map(|(pos, _)| pos)
    }

    /// 插入到分桶末尾，保持扁平列表的日历顺序
    fn insert_into_bucket(&mut self, day: Weekday, week: Week, row: Row) {
        let key = (day, week);
        let at = self
            .entries
            .iter()
            .rposition(|e| (e.day, e.week) <= key)
            .map(|p| p + 1)
            .unwrap_or(0);
        self.entries.insert(at, GridEntry { day, week, row });
    }

    /// 修改单元格
    ///
    /// 修改 `qty_sold` 或 `item_id` 时，如果能找到对应商品且价格已知，
    /// 押金自动设为 `price * qty_sold`；否则保留原值。索引越界时不做任何事。
    ///
    /// 售出量按提交时的整数取值，押金与提交的数量始终一致。
    pub fn update_cell(
        &mut self,
        day: Weekday,
        week: Week,
        index: usize,
        field: RowField,
        value: impl Into<String>,
        master: &MasterData,
    ) {
        let Some(pos) = self.position(day, week, index) else {
            return;
        };
        let row = &mut self.entries[pos].row;
        *row.slot(field) = value.into();

        if field.affects_deposit() && !row.qty_sold.is_empty() {
            let price = master.item_by_code(&row.item_id).and_then(|i| i.price);
            if let Some(price) = price {
                row.deposit = format_amount(price * parse_quantity(&row.qty_sold) as f64);
            }
        }
    }

    pub fn add_row(&mut self, day: Weekday, week: Week) {
        self.insert_into_bucket(day, week, Row::default());
    }

    /// 删除一行；分桶被删空时重新放入一行空记录
    pub fn delete_row(&mut self, day: Weekday, week: Week, index: usize) {
        let Some(pos) = self.position(day, week, index) else {
            return;
        };
        self.entries.remove(pos);
        if self.bucket_len(day, week) == 0 {
            self.insert_into_bucket(day, week, Row::default());
        }
    }

    /// 展平为提交用的记录列表
    ///
    /// 顺序：星期 → 周 → 行。跳过空行，数值字段转换为数字（无法解析按 0）。
    pub fn flatten_for_submit(&self, period: Period) -> Vec<ReportPayload> {
        let mut payload = Vec::new();
        for day in Weekday::ALL {
            for week in Week::ALL {
                for row in self.rows_in(day, week).filter(|r| !r.is_blank()) {
                    payload.push(ReportPayload {
                        day_name: day.api_name(),
                        week: week.number(),
                        month: period.month,
                        year: period.year,
                        outlet_id: row.outlet_id.clone(),
                        item_id: row.item_id.clone(),
                        qty_order: parse_quantity(&row.qty_order),
                        qty_sold: parse_quantity(&row.qty_sold),
                        deposit: parse_amount(&row.deposit),
                    });
                }
            }
        }
        payload
    }

    pub fn totals(&self, day: Weekday, week: Week) -> Totals {
        compute_totals(self.rows_in(day, week))
    }

    pub fn day_totals(&self, day: Weekday) -> Totals {
        compute_totals(self.entries.iter().filter(|e| e.day == day).map(|e| &e.row))
    }

    pub fn grand_totals(&self) -> Totals {
        compute_totals(self.entries.iter().map(|e| &e.row))
    }
}
