//! 期间锁模块
//!
//! 新建报表页面：期间数据加载前为 `Unknown`，后端无数据为 `Unlocked`，
//! 已有任意一行数据为 `Locked`。锁定后所有修改操作变为空操作，提交被拒绝。
//! 提交成功后乐观地直接转为 `Locked`，不重新获取。
//!
//! 编辑页面是另一套约定：始终允许修改，完全绕过锁。

use serde::Serialize;
use std::fmt::Display;

use crate::calendar::{Period, Week, Weekday};
use crate::grid::{ReportGrid, RowField};
use crate::{MasterData, ReportPayload, ReportRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PeriodLock {
    #[default]
    Unknown,
    Unlocked,
    Locked,
}

impl PeriodLock {
    pub fn from_row_count(count: usize) -> Self {
        if count == 0 {
            PeriodLock::Unlocked
        } else {
            PeriodLock::Locked
        }
    }

    /// 提交成功后的乐观转换
    pub fn mark_submitted(&mut self) {
        if *self == PeriodLock::Unlocked {
            *self = PeriodLock::Locked;
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, PeriodLock::Locked)
    }

    pub fn permits_mutation(&self) -> bool {
        matches!(self, PeriodLock::Unlocked)
    }
}

/// 报表表单所在的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// 新建报表，受期间锁约束
    Create,
    /// 编辑已提交的期间，期间由 URL 参数固定
    Edit(Period),
}

/// 提交被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// 期间数据尚未成功获取，锁状态未知
    NotLoaded,
    /// 期间已锁定
    Locked,
    /// 没有可提交的行
    Empty(FormMode),
}

impl Display for SubmitBlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitBlocked::NotLoaded => {
                f.write_str("Data periode ini belum berhasil dimuat. Silakan coba lagi.")
            }
            SubmitBlocked::Locked => f.write_str(
                "Data bulan ini sudah diisi. Silakan ke menu Rekap untuk mengedit.",
            ),
            SubmitBlocked::Empty(FormMode::Create) => f.write_str("Tidak ada data untuk disimpan."),
            SubmitBlocked::Empty(FormMode::Edit(_)) => {
                f.write_str("Data kosong, tidak bisa disimpan.")
            }
        }
    }
}

/// 网格 + 锁 + 页面模式
///
/// 页面只通过它修改网格，锁的判断集中在这里。
#[derive(Debug, Clone, PartialEq)]
pub struct ReportForm {
    pub grid: ReportGrid,
    pub lock: PeriodLock,
    pub mode: FormMode,
}

impl ReportForm {
    pub fn new(mode: FormMode) -> Self {
        Self {
            grid: ReportGrid::new(),
            lock: PeriodLock::Unknown,
            mode,
        }
    }

    /// 载入期间数据：重建网格并根据行数确定锁状态
    pub fn load(&mut self, records: &[ReportRecord]) {
        self.grid = ReportGrid::hydrate(records);
        self.lock = PeriodLock::from_row_count(records.len());
    }

    /// 切换期间前清空（新建页面在获取新数据之前使用）
    pub fn reset(&mut self) {
        self.grid = ReportGrid::new();
        self.lock = PeriodLock::Unknown;
    }

    pub fn has_existing_data(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn is_editable(&self) -> bool {
        match self.mode {
            FormMode::Create => self.lock.permits_mutation(),
            FormMode::Edit(_) => true,
        }
    }

    pub fn update_cell(
        &mut self,
        day: Weekday,
        week: Week,
        index: usize,
        field: RowField,
        value: impl Into<String>,
        master: &MasterData,
    ) {
        if self.is_editable() {
            self.grid.update_cell(day, week, index, field, value, master);
        }
    }

    pub fn add_row(&mut self, day: Weekday, week: Week) {
        if self.is_editable() {
            self.grid.add_row(day, week);
        }
    }

    pub fn delete_row(&mut self, day: Weekday, week: Week, index: usize) {
        if self.is_editable() {
            self.grid.delete_row(day, week, index);
        }
    }

    /// 提交前检查并生成提交数据
    ///
    /// 编辑模式始终使用 URL 中的期间，忽略传入参数。
    pub fn prepare_submit(&self, period: Period) -> Result<Vec<ReportPayload>, SubmitBlocked> {
        let period = match self.mode {
            FormMode::Create => match self.lock {
                PeriodLock::Unknown => return Err(SubmitBlocked::NotLoaded),
                PeriodLock::Locked => return Err(SubmitBlocked::Locked),
                PeriodLock::Unlocked => period,
            },
            FormMode::Edit(fixed) => fixed,
        };

        let payload = self.grid.flatten_for_submit(period);
        if payload.is_empty() {
            return Err(SubmitBlocked::Empty(self.mode));
        }
        Ok(payload)
    }

    pub fn mark_submitted(&mut self) {
        self.lock.mark_submitted();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ReportRecord {
        ReportRecord {
            day_name: "senin".to_string(),
            week: 1,
            outlet_code: "OUT-001".to_string(),
            item_code: "ITEM-A".to_string(),
            qty_order: "10".to_string(),
            qty_sold: "4".to_string(),
            deposit: "60000".to_string(),
        }
    }

    fn period() -> Period {
        Period::new(2025, 3).unwrap()
    }

    fn w1() -> Week {
        Week::FIRST
    }

    #[test]
    fn test_lock_from_row_count() {
        assert_eq!(PeriodLock::from_row_count(0), PeriodLock::Unlocked);
        assert_eq!(PeriodLock::from_row_count(1), PeriodLock::Locked);
        assert_eq!(PeriodLock::from_row_count(42), PeriodLock::Locked);
    }

    #[test]
    fn test_mark_submitted_only_from_unlocked() {
        let mut lock = PeriodLock::Unlocked;
        lock.mark_submitted();
        assert_eq!(lock, PeriodLock::Locked);

        let mut lock = PeriodLock::Unknown;
        lock.mark_submitted();
        assert_eq!(lock, PeriodLock::Unknown);
    }

    #[test]
    fn test_load_sets_existing_data_flag() {
        let mut form = ReportForm::new(FormMode::Create);
        form.load(&[]);
        assert!(!form.has_existing_data());

        form.load(&[record()]);
        assert!(form.has_existing_data());
    }

    #[test]
    fn test_existing_data_even_when_rows_are_dropped() {
        // 锁状态取决于后端行数，而不是成功放入网格的行数
        let mut bad = record();
        bad.day_name = "monday".to_string();
        let mut form = ReportForm::new(FormMode::Create);
        form.load(&[bad]);
        assert!(form.has_existing_data());
        assert_eq!(form.grid, ReportGrid::new());
    }

    #[test]
    fn test_locked_create_form_ignores_mutations() {
        let mut form = ReportForm::new(FormMode::Create);
        form.load(&[record()]);
        let before = form.grid.clone();

        form.update_cell(Weekday::Senin, w1(), 0, RowField::QtyOrder, "99", &MasterData::default());
        form.add_row(Weekday::Selasa, w1());
        form.delete_row(Weekday::Senin, w1(), 0);
        assert_eq!(form.grid, before);
    }

    #[test]
    fn test_unknown_create_form_ignores_mutations() {
        let mut form = ReportForm::new(FormMode::Create);
        form.add_row(Weekday::Senin, w1());
        assert_eq!(form.grid, ReportGrid::new());
    }

    #[test]
    fn test_submit_blocked_until_period_loaded() {
        // 获取失败时锁保持 Unknown：不可编辑，提交给出明确原因
        let mut form = ReportForm::new(FormMode::Create);
        assert!(!form.is_editable());
        let err = form.prepare_submit(period()).unwrap_err();
        assert_eq!(err, SubmitBlocked::NotLoaded);
        assert_eq!(
            err.to_string(),
            "Data periode ini belum berhasil dimuat. Silakan coba lagi."
        );

        form.load(&[]);
        assert!(form.is_editable());
        assert_eq!(
            form.prepare_submit(period()),
            Err(SubmitBlocked::Empty(FormMode::Create))
        );

        form.reset();
        assert_eq!(form.prepare_submit(period()), Err(SubmitBlocked::NotLoaded));
    }

    #[test]
    fn test_edit_form_always_mutable() {
        let mut form = ReportForm::new(FormMode::Edit(period()));
        form.load(&[record()]);
        assert!(form.has_existing_data());
        assert!(form.is_editable());

        form.update_cell(Weekday::Senin, w1(), 0, RowField::QtyOrder, "99", &MasterData::default());
        assert_eq!(form.grid.row(Weekday::Senin, w1(), 0).unwrap().qty_order, "99");
    }

    #[test]
    fn test_submit_blocked_when_locked() {
        let mut form = ReportForm::new(FormMode::Create);
        form.load(&[record()]);
        assert_eq!(form.prepare_submit(period()), Err(SubmitBlocked::Locked));
    }

    #[test]
    fn test_submit_blocked_when_empty() {
        let mut form = ReportForm::new(FormMode::Create);
        form.load(&[]);
        let err = form.prepare_submit(period()).unwrap_err();
        assert_eq!(err, SubmitBlocked::Empty(FormMode::Create));
        assert_eq!(err.to_string(), "Tidak ada data untuk disimpan.");
    }

    #[test]
    fn test_submit_then_lock() {
        let mut form = ReportForm::new(FormMode::Create);
        form.load(&[]);
        form.update_cell(Weekday::Senin, w1(), 0, RowField::OutletId, "OUT-001", &MasterData::default());
        let payload = form.prepare_submit(period()).unwrap();
        assert_eq!(payload.len(), 1);

        form.mark_submitted();
        assert!(form.has_existing_data());
        assert!(!form.is_editable());
        assert_eq!(form.prepare_submit(period()), Err(SubmitBlocked::Locked));
    }

    #[test]
    fn test_edit_submit_uses_fixed_period() {
        let mut form = ReportForm::new(FormMode::Edit(period()));
        form.load(&[record()]);
        let payload = form.prepare_submit(Period::new(1999, 1).unwrap()).unwrap();
        assert_eq!(payload[0].year, 2025);
        assert_eq!(payload[0].month, 3);
    }

    #[test]
    fn test_reset_returns_to_unknown() {
        let mut form = ReportForm::new(FormMode::Create);
        form.load(&[record()]);
        form.reset();
        assert_eq!(form.lock, PeriodLock::Unknown);
        assert_eq!(form.grid, ReportGrid::new());
    }
}
