// Combining decoded row sets into unified records.

use log::debug;

use std::collections::HashMap;

use crate::dataset::ResultRow;

type RowKey = (i32, Option<String>, String);

fn key_of(r: &ResultRow) -> RowKey {
    (r.year, r.constituency.clone(), r.party.clone())
}

/// Merges a primary row set with secondary seat-count sets.
///
/// The primary set defines the output keys. Duplicate primary keys keep
/// the position of the first occurrence but the value of the last one
/// (concatenating yearly files with overlapping years must let the later
/// file win). Each secondary set left-joins its `seats` field on
/// `(year, constituency, party)`; unmatched primary rows keep
/// `seats: None`, unmatched secondary rows are dropped.
pub fn merge_rows(primary: Vec<ResultRow>, secondaries: &[Vec<ResultRow>]) -> Vec<ResultRow> {
    let mut out: Vec<ResultRow> = Vec::new();
    let mut by_key: HashMap<RowKey, usize> = HashMap::new();
    for row in primary {
        let key = key_of(&row);
        match by_key.get(&key).copied() {
            Some(pos) => {
                debug!("duplicate key {:?}, keeping the later row", key);
                out[pos] = row;
            }
            None => {
                by_key.insert(key, out.len());
                out.push(row);
            }
        }
    }

    for secondary in secondaries {
        let seats_by_key: HashMap<RowKey, Option<i64>> = secondary
            .iter()
            .map(|r| (key_of(r), r.seats))
            .collect();
        for row in out.iter_mut() {
            if let Some(&seats) = seats_by_key.get(&key_of(row)) {
                row.seats = seats;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, party: &str, percent: f64) -> ResultRow {
        ResultRow {
            year,
            constituency: None,
            party: party.to_string(),
            percent: Some(percent),
            seats: None,
        }
    }

    fn seats_row(year: i32, party: &str, seats: i64) -> ResultRow {
        ResultRow {
            year,
            constituency: None,
            party: party.to_string(),
            percent: None,
            seats: Some(seats),
        }
    }

    #[test]
    fn merge_with_no_secondary_is_identity_plus_null_seats() {
        let primary = vec![row(2021, "Samfylkingin", 9.9), row(2021, "Píratar", 8.6)];
        let merged = merge_rows(primary.clone(), &[]);
        assert_eq!(merged, primary);
        assert!(merged.iter().all(|r| r.seats.is_none()));
    }

    #[test]
    fn duplicate_keys_keep_last_value_first_position() {
        let primary = vec![
            row(2021, "Samfylkingin", 9.9),
            row(2021, "Píratar", 8.6),
            row(2021, "Samfylkingin", 10.1),
        ];
        let merged = merge_rows(primary, &[]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].party, "Samfylkingin");
        assert_eq!(merged[0].percent, Some(10.1));
        assert_eq!(merged[1].party, "Píratar");
    }

    #[test]
    fn seats_left_join() {
        let primary = vec![row(2021, "Samfylkingin", 9.9), row(2021, "Píratar", 8.6)];
        let seats = vec![
            seats_row(2021, "Samfylkingin", 6),
            // No primary row for this one: dropped.
            seats_row(2021, "Sósíalistaflokkur Íslands", 0),
        ];
        let merged = merge_rows(primary, &[seats]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].seats, Some(6));
        assert_eq!(merged[0].percent, Some(9.9));
        assert_eq!(merged[1].seats, None);
    }

    #[test]
    fn join_key_includes_constituency() {
        let mut primary = vec![row(2021, "Píratar", 8.6)];
        primary[0].constituency = Some("Reykjavík norður".to_string());
        let seats = vec![seats_row(2021, "Píratar", 2)];
        // National seats row must not match a regional percent row.
        let merged = merge_rows(primary, &[seats]);
        assert_eq!(merged[0].seats, None);
    }
}
