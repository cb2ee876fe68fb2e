//! Dashboard metric derivation.
//!
//! Everything here is a pure function of the record collections, the
//! selected month/year and a reference "today". Nothing is cached or
//! persisted; callers recompute whenever the selection or the data changes.
//!
//! Percentages are rounded to one decimal place and forced to 0.0 when the
//! pair total is zero, so an empty month never produces NaN.

use chrono::{Datelike, NaiveDate};

use crate::models::{FinancialRecord, Frequency};

/// Full month names as the backend's users see them.
pub const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Qualitative reading of one month's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Overspent,
    NoRecords,
    BreakEven,
    Positive,
}

impl BalanceStatus {
    /// The four-way branch, evaluated in order: a negative balance wins,
    /// then the empty month, then exact break-even.
    fn classify(total_gains: f64, total_expenses: f64) -> Self {
        let balance = total_gains - total_expenses;
        if balance < 0.0 {
            BalanceStatus::Overspent
        } else if total_gains == 0.0 && total_expenses == 0.0 {
            BalanceStatus::NoRecords
        } else if balance == 0.0 {
            BalanceStatus::BreakEven
        } else {
            BalanceStatus::Positive
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            BalanceStatus::Overspent => "Que triste!",
            BalanceStatus::NoRecords => "Ops!",
            BalanceStatus::BreakEven => "Ufaa!",
            BalanceStatus::Positive => "Muito bem!",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BalanceStatus::Overspent => "Neste mês, você gastou mais do que deveria.",
            BalanceStatus::NoRecords => "Neste mês, não há registros de entradas e saídas.",
            BalanceStatus::BreakEven => "Neste mês, você gastou exatamente o que deveria.",
            BalanceStatus::Positive => "Sua carteira está positiva!",
        }
    }
}

/// Totals for the selected month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub total_gains: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub status: BalanceStatus,
}

/// An amount plus its share of a two-way total, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioEntry {
    pub amount: f64,
    pub percent: f64,
}

/// Gains and expenses as shares of their combined total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainsVersusExpenses {
    pub gains: RatioEntry,
    pub expenses: RatioEntry,
}

/// Recurring and one-off records as shares of their combined total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBreakdown {
    pub recurring: RatioEntry,
    pub eventual: RatioEntry,
}

/// One row of the year history chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthHistory {
    /// 1-based calendar month.
    pub month: u32,
    /// Three-letter label ("Jan", "Fev", ...).
    pub label: String,
    pub gains: f64,
    pub expenses: f64,
}

fn sum_in_month(records: &[FinancialRecord], month: u32, year: i32) -> f64 {
    records
        .iter()
        .filter(|r| r.in_month(month, year))
        .map(|r| r.amount)
        .sum()
}

/// Share of `amount` in `total`, rounded to one decimal; 0.0 for an empty
/// total.
fn percent_of(amount: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    (amount / total * 1000.0).round() / 10.0
}

/// Totals, balance and qualitative status for the selected month.
pub fn summarize(
    gains: &[FinancialRecord],
    expenses: &[FinancialRecord],
    month: u32,
    year: i32,
) -> MonthlySummary {
    let total_gains = sum_in_month(gains, month, year);
    let total_expenses = sum_in_month(expenses, month, year);
    MonthlySummary {
        total_gains,
        total_expenses,
        balance: total_gains - total_expenses,
        status: BalanceStatus::classify(total_gains, total_expenses),
    }
}

/// Gains vs expenses as a percentage pair over the month's combined volume.
pub fn gains_versus_expenses(summary: &MonthlySummary) -> GainsVersusExpenses {
    let total = summary.total_gains + summary.total_expenses;
    GainsVersusExpenses {
        gains: RatioEntry {
            amount: summary.total_gains,
            percent: percent_of(summary.total_gains, total),
        },
        expenses: RatioEntry {
            amount: summary.total_expenses,
            percent: percent_of(summary.total_expenses, total),
        },
    }
}

/// Month-by-month gain and expense sums for `year`.
///
/// When `year` is the current year (relative to `today`), months after the
/// current one are dropped; past years keep all twelve months; future years
/// yield nothing.
pub fn monthly_history(
    gains: &[FinancialRecord],
    expenses: &[FinancialRecord],
    year: i32,
    today: NaiveDate,
) -> Vec<MonthHistory> {
    (1..=12u32)
        .filter(|&month| {
            (year == today.year() && month <= today.month()) || year < today.year()
        })
        .map(|month| MonthHistory {
            month,
            label: MONTHS[(month - 1) as usize].chars().take(3).collect(),
            gains: sum_in_month(gains, month, year),
            expenses: sum_in_month(expenses, month, year),
        })
        .collect()
}

/// Recurring vs one-off share of one record set in the selected month.
pub fn frequency_breakdown(
    records: &[FinancialRecord],
    month: u32,
    year: i32,
) -> FrequencyBreakdown {
    let mut recurring = 0.0;
    let mut eventual = 0.0;

    for record in records.iter().filter(|r| r.in_month(month, year)) {
        match record.frequency {
            Frequency::Recurring => recurring += record.amount,
            Frequency::Eventual => eventual += record.amount,
        }
    }

    let total = recurring + eventual;
    FrequencyBreakdown {
        recurring: RatioEntry {
            amount: recurring,
            percent: percent_of(recurring, total),
        },
        eventual: RatioEntry {
            amount: eventual,
            percent: percent_of(eventual, total),
        },
    }
}

/// Distinct years present in either collection, newest first. Drives the
/// year selector.
pub fn available_years(gains: &[FinancialRecord], expenses: &[FinancialRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = gains
        .iter()
        .chain(expenses.iter())
        .map(|r| r.date.year())
        .collect();
    years.sort_unstable();
    years.dedup();
    years.reverse();
    years
}
