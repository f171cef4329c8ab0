use crate::domain::model::{EditCountEntry, EditCountTable, Revision};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

/// 依 UTC 日期分桶計數，單次走訪輸入
///
/// 結果依日期遞增，每一天只出現一次，且 `count >= 1`。
pub fn aggregate_by_day<I>(timestamps: I) -> EditCountTable
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut buckets: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for timestamp in timestamps {
        *buckets.entry(timestamp.date_naive()).or_insert(0) += 1;
    }

    let entries = buckets
        .into_iter()
        .map(|(day, count)| EditCountEntry { day, count })
        .collect();

    EditCountTable::from_sorted(entries)
}

pub fn aggregate_revisions(revisions: &[Revision]) -> EditCountTable {
    aggregate_by_day(revisions.iter().map(|r| r.timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_groups_timestamps_by_utc_day() {
        let input = [
            "2023-01-01T10:00:00Z",
            "2023-01-01T23:00:00Z",
            "2023-01-02T01:00:00Z",
        ];
        let table = aggregate_by_day(input.iter().map(|s| ts(s)));

        assert_eq!(
            table.entries(),
            &[
                EditCountEntry {
                    day: day("2023-01-01"),
                    count: 2
                },
                EditCountEntry {
                    day: day("2023-01-02"),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let table = aggregate_by_day(Vec::<DateTime<Utc>>::new());
        assert!(table.is_empty());
        assert!(table.entries().is_empty());
    }

    #[test]
    fn test_single_revision() {
        let table = aggregate_by_day([ts("2020-02-29T12:34:56Z")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].day, day("2020-02-29"));
        assert_eq!(table.entries()[0].count, 1);
    }

    #[test]
    fn test_day_boundary_splits_buckets() {
        let table = aggregate_by_day([ts("2023-03-04T23:59:59Z"), ts("2023-03-05T00:00:01Z")]);
        assert_eq!(table.len(), 2);
        assert!(table.entries().iter().all(|e| e.count == 1));
    }

    #[test]
    fn test_offset_timestamps_are_truncated_in_utc() {
        // 台北時間 1/2 早上 07:00 仍是 UTC 1/1
        let table = aggregate_by_day([ts("2023-01-02T07:00:00+08:00")]);
        assert_eq!(table.entries()[0].day, day("2023-01-01"));
    }

    #[test]
    fn test_unsorted_input_produces_sorted_unique_days() {
        // API 回傳的修訂通常是新到舊
        let input = [
            "2024-05-03T08:00:00Z",
            "2024-05-01T08:00:00Z",
            "2024-05-03T09:00:00Z",
            "2024-04-30T23:00:00Z",
            "2024-05-01T00:00:00Z",
            "2024-05-03T10:00:00Z",
        ];
        let table = aggregate_by_day(input.iter().map(|s| ts(s)));

        let days: Vec<NaiveDate> = table.entries().iter().map(|e| e.day).collect();
        let mut sorted = days.clone();
        sorted.sort();
        assert_eq!(days, sorted);

        let unique: HashSet<NaiveDate> = days.iter().copied().collect();
        assert_eq!(unique.len(), days.len());

        assert!(table.entries().iter().all(|e| e.count >= 1));
        assert_eq!(table.total_edits(), input.len() as u64);
        assert_eq!(table.max_count(), Some(3));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let revisions: Vec<Revision> = [
            "2022-12-31T23:59:59Z",
            "2023-01-01T00:00:00Z",
            "2023-01-01T15:30:00Z",
        ]
        .iter()
        .map(|s| Revision {
            timestamp: ts(s),
            content: None,
        })
        .collect();

        assert_eq!(aggregate_revisions(&revisions), aggregate_revisions(&revisions));
    }

    #[test]
    fn test_sum_matches_input_length_over_many_days() {
        let start = ts("2023-06-01T00:00:00Z");
        let timestamps: Vec<DateTime<Utc>> = (0..500)
            .map(|i| start + chrono::Duration::minutes(i * 97))
            .collect();

        let table = aggregate_by_day(timestamps.iter().copied());

        assert_eq!(table.total_edits(), 500);
        assert_eq!(table.first_day(), Some(day("2023-06-01")));
        assert_eq!(table.last_day(), Some(timestamps[499].date_naive()));
    }
}
