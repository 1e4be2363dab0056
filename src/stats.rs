// src/stats.rs
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::record::Reportable;

/// Grouped breakdowns are truncated to this many entries.
pub const TOP_GROUPS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub count: usize,
    /// Rounded share of the subset; an empty subset reports 0, not a
    /// division error.
    pub pct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStat {
    pub key: String,
    pub count: usize,
    pub value_sum: f64,
}

/// Derived aggregate over a record subset. Always recomputed from the
/// current record set, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Stats {
    pub total: usize,
    pub value_sum: f64,
    pub cost_sum: f64,
    pub profit_sum: f64,
    pub by_status: BTreeMap<&'static str, StatusCount>,
    pub top_groups: Vec<GroupStat>,
}

fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string().to_ascii_uppercase()
}

fn tuple_matches<R: Reportable>(record: &R, date: NaiveDate, month: &str) -> bool {
    let recorded = record.month_text().trim().to_ascii_uppercase();
    record.year() == date.year()
        && record.day() == date.day()
        && !recorded.is_empty()
        && month.contains(&recorded)
}

/// Records in the current reporting window: today or yesterday relative
/// to `reference`. The month matches as a case-insensitive substring of
/// the full month name, so a sheet that stores "FEB" still lands in
/// February. Yesterday is plain calendar arithmetic, so the window spans
/// month and year boundaries.
pub fn select_window<R: Reportable>(records: &[R], reference: NaiveDate) -> Vec<&R> {
    let today = reference;
    let yesterday = reference.pred_opt().unwrap_or(reference);
    let today_month = month_name(today);
    let yesterday_month = month_name(yesterday);

    records
        .iter()
        .filter(|r| {
            tuple_matches(*r, today, &today_month) || tuple_matches(*r, yesterday, &yesterday_month)
        })
        .collect()
}

fn pct(count: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (count as f64 / total as f64 * 100.0).round() as u32
    }
}

/// Aggregate sums, per-status counts, and the top grouped breakdown for a
/// subset. Defaulted fields contribute zero, so totals never skew.
pub fn compute_stats<'a, R, I>(records: I) -> Stats
where
    R: Reportable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut stats = Stats::default();
    let mut status_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    // first-encounter order, so descending-sort ties stay stable
    let mut groups: Vec<GroupStat> = Vec::new();
    let mut group_pos: HashMap<String, usize> = HashMap::new();

    for record in records {
        stats.total += 1;
        stats.value_sum += record.value();
        stats.cost_sum += record.cost();
        stats.profit_sum += record.profit();
        *status_counts.entry(record.status_label()).or_insert(0) += 1;

        let key = record.group_key().trim();
        if !key.is_empty() {
            let pos = *group_pos.entry(key.to_string()).or_insert_with(|| {
                groups.push(GroupStat {
                    key: key.to_string(),
                    count: 0,
                    value_sum: 0.0,
                });
                groups.len() - 1
            });
            groups[pos].count += 1;
            groups[pos].value_sum += record.value();
        }
    }

    stats.by_status = status_counts
        .into_iter()
        .map(|(label, count)| {
            (
                label,
                StatusCount {
                    count,
                    pct: pct(count, stats.total),
                },
            )
        })
        .collect();

    groups.sort_by(|a, b| {
        b.value_sum
            .partial_cmp(&a.value_sum)
            .unwrap_or(Ordering::Equal)
    });
    groups.truncate(TOP_GROUPS);
    stats.top_groups = groups;

    stats
}

/// Filter to the reporting window, then aggregate the subset.
pub fn window_stats<R: Reportable>(records: &[R], reference: NaiveDate) -> (Vec<&R>, Stats) {
    let subset = select_window(records, reference);
    let stats = compute_stats(subset.iter().copied());
    (subset, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{InquiryRecord, InquiryStatus};

    fn dated(year: i32, month: &str, date: u32) -> InquiryRecord {
        InquiryRecord {
            year,
            month: month.to_string(),
            date,
            ..Default::default()
        }
    }

    fn priced(vessel: &str, value: f64, status: InquiryStatus) -> InquiryRecord {
        InquiryRecord {
            vessel: vessel.to_string(),
            qtn_value: value,
            qtn_cost: value / 2.0,
            profit: value / 4.0,
            status,
            ..Default::default()
        }
    }

    #[test]
    fn window_keeps_today_and_yesterday_only() {
        let records = vec![
            dated(2026, "FEBRUARY", 19),
            dated(2026, "FEBRUARY", 18),
            dated(2026, "FEBRUARY", 17),
        ];
        let reference = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        let subset = select_window(&records, reference);
        assert_eq!(subset.len(), 2);
        assert_eq!(subset[0].date, 19);
        assert_eq!(subset[1].date, 18);
    }

    #[test]
    fn window_accepts_short_month_forms() {
        let records = vec![dated(2026, "Feb", 19)];
        let reference = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        assert_eq!(select_window(&records, reference).len(), 1);
    }

    #[test]
    fn window_spans_month_and_year_boundaries() {
        let records = vec![
            dated(2026, "MARCH", 1),
            dated(2026, "FEBRUARY", 28),
            dated(2025, "DECEMBER", 31),
        ];

        let march_first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(select_window(&records, march_first).len(), 2);

        let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let subset = select_window(&records, new_year);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].year, 2025);
    }

    #[test]
    fn blank_month_never_matches() {
        let records = vec![dated(2026, "", 19)];
        let reference = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        assert!(select_window(&records, reference).is_empty());
    }

    #[test]
    fn empty_subset_yields_zero_sums_and_percentages() {
        let empty: Vec<InquiryRecord> = Vec::new();
        let stats = compute_stats(empty.iter());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.value_sum, 0.0);
        assert_eq!(stats.cost_sum, 0.0);
        assert_eq!(stats.profit_sum, 0.0);
        assert!(stats.by_status.is_empty());
        assert!(stats.top_groups.is_empty());
        assert_eq!(pct(0, 0), 0);
    }

    #[test]
    fn sums_counts_and_percentages() {
        let records = vec![
            priced("MV A", 1000.0, InquiryStatus::Won),
            priced("MV B", 500.0, InquiryStatus::Won),
            priced("MV C", 250.0, InquiryStatus::Lost),
        ];
        let stats = compute_stats(records.iter());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.value_sum, 1750.0);
        assert_eq!(stats.by_status["WON"].count, 2);
        assert_eq!(stats.by_status["WON"].pct, 67);
        assert_eq!(stats.by_status["LOST"].pct, 33);
    }

    #[test]
    fn top_groups_sort_descending_and_truncate() {
        let mut records: Vec<InquiryRecord> = (0..12)
            .map(|i| priced(&format!("MV {i:02}"), f64::from(i) * 10.0, InquiryStatus::Pending))
            .collect();
        // a repeat visit bumps an existing group rather than adding one
        records.push(priced("MV 03", 500.0, InquiryStatus::Pending));

        let stats = compute_stats(records.iter());
        assert_eq!(stats.top_groups.len(), TOP_GROUPS);
        assert_eq!(stats.top_groups[0].key, "MV 03");
        assert_eq!(stats.top_groups[0].count, 2);
        assert_eq!(stats.top_groups[0].value_sum, 530.0);
    }

    #[test]
    fn tied_groups_keep_first_encountered_order() {
        let records = vec![
            priced("MV FIRST", 100.0, InquiryStatus::Won),
            priced("MV SECOND", 100.0, InquiryStatus::Won),
        ];
        let stats = compute_stats(records.iter());
        assert_eq!(stats.top_groups[0].key, "MV FIRST");
        assert_eq!(stats.top_groups[1].key, "MV SECOND");
    }
}
