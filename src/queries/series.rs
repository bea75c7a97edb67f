//! Time-series reconstruction from daily deltas
//!
//! Rebuilds per-user cumulative progress across a gap-free range of
//! calendar dates, forward-filling days without activity. This is the
//! "daily total points progress" view charting front-ends render; the raw
//! per-day deltas stay internal to the ledger.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::UserId;

/// Cumulative totals of every known user as of one calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub totals: BTreeMap<UserId, u64>,
}

/// Per-user cumulative series over the full observed date range.
///
/// Dates run gap-free ascending from the earliest to the latest day with
/// activity. Each user's value forward-fills their last known cumulative
/// total - 0 before their first submission - so every series is
/// non-decreasing and defined on every date. Empty input yields an empty
/// series ("no data yet" is the caller's message, not an error).
pub fn cumulative_series(daily: &[(NaiveDate, BTreeMap<UserId, u64>)]) -> Vec<SeriesPoint> {
    let by_date: BTreeMap<NaiveDate, &BTreeMap<UserId, u64>> =
        daily.iter().map(|(date, deltas)| (*date, deltas)).collect();

    let (first, last) = match (by_date.keys().next(), by_date.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };

    // Every user that ever submitted appears on every date, starting at 0
    let mut running: BTreeMap<UserId, u64> = by_date
        .values()
        .flat_map(|deltas| deltas.keys())
        .cloned()
        .map(|user| (user, 0))
        .collect();

    let mut series = Vec::new();
    let mut date = first;
    loop {
        if let Some(deltas) = by_date.get(&date) {
            for (user, earned) in deltas.iter() {
                *running.entry(user.clone()).or_insert(0) += earned;
            }
        }
        series.push(SeriesPoint {
            date,
            totals: running.clone(),
        });

        if date == last {
            break;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    series
}

/// Community total earned per observed day (sum across users), ascending.
///
/// Unlike [`cumulative_series`] this keeps only the days that actually had
/// activity - it feeds the simple daily-totals chart.
pub fn daily_totals(daily: &[(NaiveDate, BTreeMap<UserId, u64>)]) -> Vec<(NaiveDate, u64)> {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for (date, deltas) in daily {
        *by_date.entry(*date).or_insert(0) += deltas.values().sum::<u64>();
    }
    by_date.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn deltas(entries: &[(&str, u64)]) -> BTreeMap<UserId, u64> {
        entries
            .iter()
            .map(|(user, earned)| (UserId::from(*user), *earned))
            .collect()
    }

    #[test]
    fn test_forward_fill_over_gap() {
        let daily = vec![
            (date("2024-01-01"), deltas(&[("A", 5)])),
            (date("2024-01-03"), deltas(&[("A", 2)])),
        ];

        let series = cumulative_series(&daily);
        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-01-01"), date("2024-01-02"), date("2024-01-03")]
        );

        let a = UserId::from("A");
        let values: Vec<u64> = series.iter().map(|p| p.totals[&a]).collect();
        assert_eq!(values, vec![5, 5, 7]);
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        assert!(cumulative_series(&[]).is_empty());
        assert!(daily_totals(&[]).is_empty());
    }

    #[test]
    fn test_user_is_zero_before_first_submission() {
        let daily = vec![
            (date("2024-01-01"), deltas(&[("A", 1)])),
            (date("2024-01-02"), deltas(&[("B", 4)])),
        ];

        let series = cumulative_series(&daily);
        let b = UserId::from("B");
        assert_eq!(series[0].totals[&b], 0);
        assert_eq!(series[1].totals[&b], 4);
    }

    #[test]
    fn test_series_is_non_decreasing() {
        let daily = vec![
            (date("2024-02-01"), deltas(&[("A", 3), ("B", 1)])),
            (date("2024-02-04"), deltas(&[("B", 2)])),
            (date("2024-02-06"), deltas(&[("A", 1)])),
        ];

        let series = cumulative_series(&daily);
        for user in ["A", "B"].map(UserId::from) {
            let values: Vec<u64> = series.iter().map(|p| p.totals[&user]).collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", values);
        }
    }

    #[test]
    fn test_single_day() {
        let daily = vec![(date("2024-05-01"), deltas(&[("u1", 7)]))];
        let series = cumulative_series(&daily);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, date("2024-05-01"));
        assert_eq!(series[0].totals[&UserId::from("u1")], 7);
    }

    #[test]
    fn test_daily_totals_sums_across_users() {
        let daily = vec![
            (date("2024-01-02"), deltas(&[("A", 5), ("B", 3)])),
            (date("2024-01-05"), deltas(&[("B", 2)])),
        ];

        assert_eq!(
            daily_totals(&daily),
            vec![(date("2024-01-02"), 8), (date("2024-01-05"), 2)]
        );
    }
}
