//! Date grids for the week, month and year views.
//!
//! Weeks start on Sunday. The month view is always 6 rows of 7 days, padded
//! with days of the previous and next month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;

/// Cells in the month view: 6 weeks of 7 days.
pub const MONTH_GRID_CELLS: usize = 6 * DAYS_PER_WEEK;

pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Week,
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Week, ViewMode::Month, ViewMode::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Week => "week",
            ViewMode::Month => "month",
            ViewMode::Year => "year",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == lower)
            .ok_or_else(|| format!("Unknown view '{}'. Expected week, month or year", s))
    }
}

/// Where a day cell sits relative to the month being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPosition {
    Leading,
    Current,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub position: CellPosition,
}

impl DayCell {
    pub fn is_current(&self) -> bool {
        self.position == CellPosition::Current
    }
}

/// One month of the year view: every day of the month, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCell {
    pub first: NaiveDate,
    pub days: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grid {
    Week(Vec<DayCell>),
    Month(Vec<DayCell>),
    Year(Vec<MonthCell>),
}

pub fn grid_for(reference: NaiveDate, mode: ViewMode) -> Grid {
    match mode {
        ViewMode::Week => Grid::Week(week_grid(reference)),
        ViewMode::Month => Grid::Month(month_grid(reference)),
        ViewMode::Year => Grid::Year(year_grid(reference)),
    }
}

/// Padding around a month in a 42-cell layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLayout {
    pub first: NaiveDate,
    pub leading: usize,
    pub days: usize,
    pub trailing: usize,
}

pub fn month_layout(anchor: NaiveDate) -> MonthLayout {
    let first = first_of_month(anchor);
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first.year(), first.month()) as usize;
    MonthLayout {
        first,
        leading,
        days,
        // At most 6 + 31 = 37 cells are used, so a sixth row always fits.
        trailing: MONTH_GRID_CELLS.saturating_sub(leading + days),
    }
}

/// The 42 days shown for the month containing `reference`.
pub fn month_grid(reference: NaiveDate) -> Vec<DayCell> {
    let layout = month_layout(reference);
    let start = layout.first - Days::new(layout.leading as u64);

    start
        .iter_days()
        .take(MONTH_GRID_CELLS)
        .enumerate()
        .map(|(i, date)| DayCell {
            date,
            position: if i < layout.leading {
                CellPosition::Leading
            } else if i < layout.leading + layout.days {
                CellPosition::Current
            } else {
                CellPosition::Trailing
            },
        })
        .collect()
}

/// Sunday through Saturday of the week containing `reference`.
pub fn week_grid(reference: NaiveDate) -> Vec<DayCell> {
    week_start(reference)
        .iter_days()
        .take(DAYS_PER_WEEK)
        .map(|date| DayCell {
            date,
            position: position_in_month(date, reference),
        })
        .collect()
}

/// All twelve months of the year containing `reference`.
pub fn year_grid(reference: NaiveDate) -> Vec<MonthCell> {
    let january = add_months(first_of_month(reference), -(reference.month0() as i32));

    (0..12)
        .map(|i| {
            let first = add_months(january, i);
            let count = days_in_month(first.year(), first.month()) as usize;
            MonthCell {
                first,
                days: first.iter_days().take(count).collect(),
            }
        })
        .collect()
}

/// Mini-calendar layout: 42 slots, blank where the big grid would pad.
pub fn mini_month(anchor: NaiveDate) -> Vec<Option<NaiveDate>> {
    let layout = month_layout(anchor);
    std::iter::repeat_n(None, layout.leading)
        .chain(layout.first.iter_days().take(layout.days).map(Some))
        .chain(std::iter::repeat_n(None, layout.trailing))
        .collect()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.day0() as u64)
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.weekday().num_days_from_sunday() as u64)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = add_months(first, 1);
    (next - first).num_days() as u32
}

/// Move by whole months, clamping the day to the end of a shorter month.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Move `reference` by `steps` units of the view: weeks, months or years.
pub fn shift(reference: NaiveDate, mode: ViewMode, steps: i32) -> NaiveDate {
    match mode {
        ViewMode::Week => {
            let days = Days::new(7 * steps.unsigned_abs() as u64);
            let shifted = if steps >= 0 {
                reference.checked_add_days(days)
            } else {
                reference.checked_sub_days(days)
            };
            shifted.unwrap_or(reference)
        }
        ViewMode::Month => add_months(reference, steps),
        ViewMode::Year => add_months(reference, steps.saturating_mul(12)),
    }
}

fn position_in_month(date: NaiveDate, reference: NaiveDate) -> CellPosition {
    let key = |d: NaiveDate| (d.year(), d.month());
    match key(date).cmp(&key(reference)) {
        std::cmp::Ordering::Less => CellPosition::Leading,
        std::cmp::Ordering::Equal => CellPosition::Current,
        std::cmp::Ordering::Greater => CellPosition::Trailing,
    }
}
