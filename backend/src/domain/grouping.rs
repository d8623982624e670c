//! Date filtering and grouping for expense records.
//!
//! Day boundaries are always computed as `[start_of_day,
//! start_of_next_day)` in one configured zone. Bucketing by integer
//! division of raw epoch milliseconds is not timezone-safe and shifts
//! silently across DST transitions, so nothing in here does that.

use crate::domain::models::{Expense, ExpenseCategory};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

/// Grouping mode for a day's expense listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Category,
    Day,
}

/// Key of one group in a grouped view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Category(ExpenseCategory),
    Day(NaiveDate),
}

impl GroupKey {
    pub fn label(&self) -> String {
        match self {
            GroupKey::Category(category) => category.name().to_string(),
            GroupKey::Day(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// One group of a grouped view, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseGroup {
    pub key: GroupKey,
    pub expenses: Vec<Expense>,
}

/// The calendar day a timestamp falls on in the given zone.
pub fn local_day(timestamp: &DateTime<FixedOffset>, zone: &FixedOffset) -> NaiveDate {
    timestamp.with_timezone(zone).date_naive()
}

/// Half-open `[start_of_day, start_of_next_day)` bounds of a calendar
/// day in the given zone.
pub fn day_bounds(
    date: NaiveDate,
    zone: &FixedOffset,
) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    // Midnight always exists and is unambiguous for a fixed offset.
    let start = date
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_local_timezone(*zone)
        .unwrap();
    (start, start + Duration::days(1))
}

/// Exactly the subset of `expenses` whose timestamp falls on `date` in
/// the given zone, preserving input order. Empty input yields an empty
/// list.
pub fn expenses_on_day(
    expenses: &[Expense],
    date: NaiveDate,
    zone: &FixedOffset,
) -> Vec<Expense> {
    let (start, end) = day_bounds(date, zone);
    expenses
        .iter()
        .filter(|e| e.date >= start && e.date < end)
        .cloned()
        .collect()
}

/// Partition `expenses` by category or by local calendar day.
///
/// Groups appear in first-seen order and members keep their relative
/// order from the input. Every input record lands in exactly one group.
pub fn group_expenses(
    expenses: &[Expense],
    mode: GroupBy,
    zone: &FixedOffset,
) -> Vec<ExpenseGroup> {
    let mut groups: Vec<ExpenseGroup> = Vec::new();
    for expense in expenses {
        let key = match mode {
            GroupBy::Category => GroupKey::Category(expense.category),
            GroupBy::Day => GroupKey::Day(local_day(&expense.date, zone)),
        };
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.expenses.push(expense.clone()),
            None => groups.push(ExpenseGroup {
                key,
                expenses: vec![expense.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn expense(id: &str, category: ExpenseCategory, rfc3339: &str) -> Expense {
        Expense {
            id: id.to_string(),
            title: format!("expense {}", id),
            amount: 10.0,
            category,
            notes: None,
            date: DateTime::parse_from_rfc3339(rfc3339).unwrap(),
        }
    }

    #[test]
    fn day_filter_uses_half_open_bounds() {
        let zone = utc();
        let expenses = vec![
            expense("a", ExpenseCategory::Food, "2024-01-15T00:00:00+00:00"),
            expense("b", ExpenseCategory::Food, "2024-01-15T23:59:59.999+00:00"),
            expense("c", ExpenseCategory::Food, "2024-01-16T00:00:00+00:00"),
            expense("d", ExpenseCategory::Food, "2024-01-14T23:59:59+00:00"),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let on_day = expenses_on_day(&expenses, day, &zone);
        let ids: Vec<&str> = on_day.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn day_filter_respects_the_configured_zone() {
        // 23:30 UTC on Jan 15 is already Jan 16 in UTC+5.
        let plus_five = FixedOffset::east_opt(5 * 3600).unwrap();
        let expenses = vec![expense(
            "a",
            ExpenseCategory::Travel,
            "2024-01-15T23:30:00+00:00",
        )];

        let utc_day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let shifted_day = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();

        assert_eq!(expenses_on_day(&expenses, utc_day, &utc()).len(), 1);
        assert_eq!(expenses_on_day(&expenses, utc_day, &plus_five).len(), 0);
        assert_eq!(expenses_on_day(&expenses, shifted_day, &plus_five).len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_results() {
        let zone = utc();
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert!(expenses_on_day(&[], day, &zone).is_empty());
        assert!(group_expenses(&[], GroupBy::Category, &zone).is_empty());
        assert!(group_expenses(&[], GroupBy::Day, &zone).is_empty());
    }

    #[test]
    fn grouping_is_a_partition_of_the_input() {
        let zone = utc();
        let expenses = vec![
            expense("a", ExpenseCategory::Food, "2024-01-15T10:00:00+00:00"),
            expense("b", ExpenseCategory::Travel, "2024-01-15T11:00:00+00:00"),
            expense("c", ExpenseCategory::Food, "2024-01-16T09:00:00+00:00"),
            expense("d", ExpenseCategory::Utility, "2024-01-14T08:00:00+00:00"),
            expense("e", ExpenseCategory::Food, "2024-01-15T12:00:00+00:00"),
        ];

        for mode in [GroupBy::Category, GroupBy::Day] {
            let groups = group_expenses(&expenses, mode, &zone);
            let mut regrouped: Vec<String> = groups
                .iter()
                .flat_map(|g| g.expenses.iter().map(|e| e.id.clone()))
                .collect();
            regrouped.sort();
            assert_eq!(regrouped, vec!["a", "b", "c", "d", "e"]);
        }
    }

    #[test]
    fn grouping_preserves_relative_order_within_groups() {
        let zone = utc();
        let expenses = vec![
            expense("a", ExpenseCategory::Food, "2024-01-15T10:00:00+00:00"),
            expense("b", ExpenseCategory::Travel, "2024-01-15T11:00:00+00:00"),
            expense("c", ExpenseCategory::Food, "2024-01-15T09:00:00+00:00"),
        ];
        let groups = group_expenses(&expenses, GroupBy::Category, &zone);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, GroupKey::Category(ExpenseCategory::Food));
        let food_ids: Vec<&str> = groups[0].expenses.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(food_ids, vec!["a", "c"]);
    }

    #[test]
    fn day_grouping_buckets_by_local_calendar_date() {
        let zone = FixedOffset::west_opt(5 * 3600).unwrap();
        // 02:00 UTC on Jan 16 is still Jan 15 at UTC-5.
        let expenses = vec![
            expense("a", ExpenseCategory::Food, "2024-01-16T02:00:00+00:00"),
            expense("b", ExpenseCategory::Food, "2024-01-15T12:00:00+00:00"),
        ];
        let groups = group_expenses(&expenses, GroupBy::Day, &zone);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].key,
            GroupKey::Day(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn local_day_matches_day_bounds() {
        let zone = FixedOffset::west_opt(8 * 3600).unwrap();
        let ts = zone.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let day = local_day(&ts.fixed_offset(), &zone);
        let (start, end) = day_bounds(day, &zone);
        assert!(ts >= start && ts < end);
    }
}
