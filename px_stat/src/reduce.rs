// Top-N reduction and assembly of the published dataset.

use serde::{Deserialize, Serialize};

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::dataset::ResultRow;

/// The presentation layer reserves space for at most 9 parties per chart.
pub const TOP_N: usize = 9;

/// Grouping key for the reduction.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum GroupBy {
    /// National output: one group per year.
    Year,
    /// Regional output: one group per (year, constituency).
    YearConstituency,
}

/// The final artifact consumed by the presentation layer.
///
/// `years` and `constituencies` describe the rows that survived the
/// reduction, not the raw input: a year entirely cut by the top-N filter
/// does not appear here.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Published {
    pub years: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituencies: Option<Vec<String>>,
    pub results: Vec<ResultRow>,
}

/// Keeps the `n` highest-percent rows per group.
///
/// Within a group rows are sorted descending by percent with a stable
/// sort (ties keep input order); groups are emitted in first-seen order.
pub fn reduce_top_n(rows: Vec<ResultRow>, group_by: GroupBy, n: usize) -> Published {
    let mut group_order: Vec<(i32, Option<String>)> = Vec::new();
    let mut groups: HashMap<(i32, Option<String>), Vec<ResultRow>> = HashMap::new();
    for row in rows {
        let key = match group_by {
            GroupBy::Year => (row.year, None),
            GroupBy::YearConstituency => (row.year, row.constituency.clone()),
        };
        if !groups.contains_key(&key) {
            group_order.push(key.clone());
        }
        groups.entry(key).or_insert_with(Vec::new).push(row);
    }

    let mut results: Vec<ResultRow> = Vec::new();
    for key in group_order {
        let mut bucket = groups.remove(&key).unwrap_or_default();
        bucket.sort_by(|a, b| {
            b.percent
                .partial_cmp(&a.percent)
                .unwrap_or(Ordering::Equal)
        });
        bucket.truncate(n);
        results.append(&mut bucket);
    }

    let years: Vec<i32> = results
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<i32>>()
        .into_iter()
        .collect();

    let constituencies = match group_by {
        GroupBy::Year => None,
        GroupBy::YearConstituency => {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut cs: Vec<String> = Vec::new();
            for r in &results {
                if let Some(c) = r.constituency.as_deref() {
                    if seen.insert(c) {
                        cs.push(c.to_string());
                    }
                }
            }
            Some(cs)
        }
    };

    Published {
        years,
        constituencies,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, constituency: Option<&str>, party: &str, percent: f64) -> ResultRow {
        ResultRow {
            year,
            constituency: constituency.map(|c| c.to_string()),
            party: party.to_string(),
            percent: Some(percent),
            seats: None,
        }
    }

    #[test]
    fn keeps_nine_highest_per_year() {
        let rows: Vec<ResultRow> = (0..15)
            .map(|i| row(2021, None, &format!("F{}", i), 20.0 - i as f64))
            .collect();
        let pub_ds = reduce_top_n(rows, GroupBy::Year, TOP_N);
        assert_eq!(pub_ds.results.len(), 9);
        let pcts: Vec<f64> = pub_ds.results.iter().map(|r| r.percent.unwrap()).collect();
        assert_eq!(
            pcts,
            vec![20.0, 19.0, 18.0, 17.0, 16.0, 15.0, 14.0, 13.0, 12.0]
        );
        // The tenth-highest party is gone.
        assert!(pub_ds.results.iter().all(|r| r.party != "F9"));
        assert_eq!(pub_ds.years, vec![2021]);
        assert_eq!(pub_ds.constituencies, None);
    }

    #[test]
    fn ties_keep_input_order() {
        let rows = vec![
            row(2013, None, "Dögun", 3.1),
            row(2013, None, "Regnboginn", 3.1),
            row(2013, None, "Flokkur heimilanna", 3.1),
        ];
        let pub_ds = reduce_top_n(rows, GroupBy::Year, 2);
        let parties: Vec<&str> = pub_ds.results.iter().map(|r| r.party.as_str()).collect();
        assert_eq!(parties, vec!["Dögun", "Regnboginn"]);
    }

    #[test]
    fn groups_stay_in_first_seen_order() {
        let rows = vec![
            row(2024, None, "A", 1.0),
            row(2021, None, "B", 2.0),
            row(2024, None, "C", 3.0),
        ];
        let pub_ds = reduce_top_n(rows, GroupBy::Year, TOP_N);
        let flat: Vec<(i32, &str)> = pub_ds
            .results
            .iter()
            .map(|r| (r.year, r.party.as_str()))
            .collect();
        // 2024 first (descending percent within), then 2021. Years summary
        // is sorted ascending regardless.
        assert_eq!(flat, vec![(2024, "C"), (2024, "A"), (2021, "B")]);
        assert_eq!(pub_ds.years, vec![2021, 2024]);
    }

    #[test]
    fn constituency_grouping_and_summary() {
        let rows = vec![
            row(2021, Some("Norðvesturkjördæmi"), "D", 30.0),
            row(2021, Some("Suðurkjördæmi"), "D", 35.0),
            row(2021, Some("Norðvesturkjördæmi"), "B", 25.0),
        ];
        let pub_ds = reduce_top_n(rows, GroupBy::YearConstituency, 1);
        assert_eq!(pub_ds.results.len(), 2);
        assert_eq!(pub_ds.results[0].party, "D");
        assert_eq!(
            pub_ds.constituencies,
            Some(vec![
                "Norðvesturkjördæmi".to_string(),
                "Suðurkjördæmi".to_string()
            ])
        );
    }

    #[test]
    fn summaries_reflect_post_reduction_rows() {
        // The summaries are derived from the retained rows, not the input:
        // with n = 0 every row is cut and the input years disappear.
        let rows = vec![row(2013, None, "A", 10.0), row(2021, None, "B", 5.0)];
        let cut = reduce_top_n(rows.clone(), GroupBy::Year, 0);
        assert!(cut.results.is_empty());
        assert!(cut.years.is_empty());

        let kept = reduce_top_n(rows, GroupBy::Year, TOP_N);
        assert_eq!(kept.years, vec![2013, 2021]);

        let empty = reduce_top_n(Vec::new(), GroupBy::Year, TOP_N);
        assert!(empty.years.is_empty());
        assert!(empty.results.is_empty());
    }
}
