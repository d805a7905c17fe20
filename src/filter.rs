//! Search and date-range narrowing of the rendered transaction lists.

use chrono::{Datelike, Duration, NaiveDate};

use crate::clock::Clock;
use crate::models::Transaction;
use crate::summary::SplitByKind;

/// Date window selection.
///
/// Presets resolve against "today" at every filter call; nothing is cached,
/// so a filter held across midnight stays correct.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    /// Current week, starting Sunday.
    Week,
    /// Current calendar month.
    Month,
    /// Current calendar year.
    Year,
    /// Inclusive bounds; behaves as `All` when either bound is missing.
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateRange {
    /// Resolve to inclusive `[start, end]` bounds anchored on `today`.
    /// `None` means no date filtering applies.
    pub fn resolve(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DateRange::All => None,
            DateRange::Today => Some((today, today)),
            DateRange::Week => {
                let start =
                    today - Duration::days(today.weekday().num_days_from_sunday() as i64);
                Some((start, start + Duration::days(6)))
            }
            DateRange::Month => {
                let start =
                    NaiveDate::from_ymd_opt(today.year(), today.month(), 1).expect("valid date");
                Some((start, last_day_of_month(today.year(), today.month())))
            }
            DateRange::Year => Some((
                NaiveDate::from_ymd_opt(today.year(), 1, 1).expect("valid date"),
                NaiveDate::from_ymd_opt(today.year(), 12, 31).expect("valid date"),
            )),
            DateRange::Custom {
                start: Some(start),
                end: Some(end),
            } => Some((*start, *end)),
            DateRange::Custom { .. } => None,
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid date");
    first_next - Duration::days(1)
}

/// Text search composed with a date window.
///
/// A transaction passes when it passes the text match (vacuously true for a
/// blank term) AND the date predicate (vacuously true for [`DateRange::All`]).
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring matched against description and category.
    pub search: String,
    pub range: DateRange,
}

impl TransactionFilter {
    pub fn new(search: impl Into<String>, range: DateRange) -> Self {
        Self {
            search: search.into(),
            range,
        }
    }

    pub fn apply(&self, transactions: &[Transaction], clock: &dyn Clock) -> Vec<Transaction> {
        let bounds = self.range.resolve(clock.today());
        let term = self.search.trim().to_lowercase();
        transactions
            .iter()
            .filter(|tx| passes(tx, &term, bounds))
            .cloned()
            .collect()
    }

    /// Filter both partitions of a split independently with the same
    /// parameters.
    pub fn apply_split(&self, split: &SplitByKind, clock: &dyn Clock) -> SplitByKind {
        let bounds = self.range.resolve(clock.today());
        let term = self.search.trim().to_lowercase();
        SplitByKind {
            income: split
                .income
                .iter()
                .filter(|tx| passes(tx, &term, bounds))
                .cloned()
                .collect(),
            expense: split
                .expense
                .iter()
                .filter(|tx| passes(tx, &term, bounds))
                .cloned()
                .collect(),
        }
    }
}

fn passes(tx: &Transaction, term: &str, bounds: Option<(NaiveDate, NaiveDate)>) -> bool {
    let text_ok = term.is_empty()
        || tx.description.to_lowercase().contains(term)
        || tx.category.to_lowercase().contains(term);
    let date_ok = bounds.map_or(true, |(start, end)| tx.date >= start && tx.date <= end);
    text_ok && date_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{Id, TransactionKind};
    use rust_decimal::Decimal;

    fn tx(id: &str, description: &str, category: &str, date: NaiveDate) -> Transaction {
        Transaction {
            id: Id::from_string(id),
            kind: TransactionKind::Expense,
            amount: Decimal::from(10),
            description: description.to_string(),
            date,
            category: category.to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_range_starts_on_sunday() {
        // 2023-06-14 is a Wednesday; its week runs Sun 11th through Sat 17th.
        let (start, end) = DateRange::Week.resolve(date(2023, 6, 14)).unwrap();
        assert_eq!(start, date(2023, 6, 11));
        assert_eq!(end, date(2023, 6, 17));
    }

    #[test]
    fn month_and_year_ranges_cover_the_calendar_period() {
        let (start, end) = DateRange::Month.resolve(date(2023, 2, 14)).unwrap();
        assert_eq!((start, end), (date(2023, 2, 1), date(2023, 2, 28)));

        let (start, end) = DateRange::Year.resolve(date(2023, 6, 14)).unwrap();
        assert_eq!((start, end), (date(2023, 1, 1), date(2023, 12, 31)));
    }

    #[test]
    fn custom_range_with_missing_bound_filters_nothing() {
        let range = DateRange::Custom {
            start: Some(date(2023, 1, 1)),
            end: None,
        };
        assert_eq!(range.resolve(date(2023, 6, 14)), None);
    }

    #[test]
    fn search_matches_description_and_category_case_insensitively() {
        let clock = FixedClock::on_date(date(2023, 6, 14));
        let list = vec![
            tx("1", "Weekly groceries", "Food", date(2023, 6, 1)),
            tx("2", "Bus ticket", "Transport", date(2023, 6, 2)),
        ];

        let by_description = TransactionFilter::new("GROCER", DateRange::All);
        let hits = by_description.apply(&list, &clock);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "1");

        let by_category = TransactionFilter::new("transport", DateRange::All);
        let hits = by_category.apply(&list, &clock);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "2");
    }

    #[test]
    fn text_and_date_predicates_combine_with_and() {
        let clock = FixedClock::on_date(date(2023, 6, 14));
        let list = vec![
            tx("1", "Lunch", "Food", date(2023, 6, 14)),
            tx("2", "Lunch", "Food", date(2023, 5, 1)),
        ];
        let filter = TransactionFilter::new("lunch", DateRange::Today);
        let hits = filter.apply(&list, &clock);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "1");
    }

    #[test]
    fn split_partitions_filter_independently() {
        let clock = FixedClock::on_date(date(2023, 6, 14));
        let mut income = tx("1", "Salary", "Salary", date(2023, 6, 1));
        income.kind = TransactionKind::Income;
        let split = SplitByKind {
            income: vec![income],
            expense: vec![tx("2", "Salary advance repayment", "Bills", date(2023, 6, 2))],
        };

        let filter = TransactionFilter::new("salary", DateRange::All);
        let filtered = filter.apply_split(&split, &clock);
        assert_eq!(filtered.income.len(), 1);
        assert_eq!(filtered.expense.len(), 1);

        let filter = TransactionFilter::new("repayment", DateRange::All);
        let filtered = filter.apply_split(&split, &clock);
        assert!(filtered.income.is_empty());
        assert_eq!(filtered.expense.len(), 1);
    }
}
