// ********* Input data structures ***********
//
// The field names follow the JSON-stat2 responses of the PX-Web API:
// https://json-stat.org/format/

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One cell of the flat value array.
///
/// PX-Web emits numbers for real observations and placeholder strings
/// (or null) for cells with no data.
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// A missing sentinel represents legitimate absence (a party not on the
    /// ballot that year), distinct from zero.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(s) => matches!(s.as_str(), "" | "." | ".."),
            CellValue::Number(_) => false,
        }
    }

    /// Numeric coercion. Missing sentinels and unparseable text yield None.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) if !self.is_missing() => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// The `category` object of one dimension: raw key -> position, and
/// raw key -> human label. Labels may be missing for some keys.
#[derive(PartialEq, Debug, Clone, Default, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub index: HashMap<String, usize>,
    #[serde(default)]
    pub label: HashMap<String, String>,
}

impl Category {
    /// Raw category keys sorted by their `index` position.
    ///
    /// The key order in the source JSON is not guaranteed to match the
    /// enumeration order, only `index` is authoritative.
    pub fn ordered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<(&str, usize)> = self
            .index
            .iter()
            .map(|(k, idx)| (k.as_str(), *idx))
            .collect();
        keys.sort_by_key(|&(k, idx)| (idx, k));
        keys.into_iter().map(|(k, _)| k).collect()
    }

    /// The human label for a raw key, falling back to the key itself.
    pub fn label_or_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.label.get(key).map(|s| s.as_str()).unwrap_or(key)
    }
}

#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct Dimension {
    pub category: Category,
}

/// A JSON-stat2 dataset: named dimensions with ordered categories and a
/// flat row-major value array.
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct Dataset {
    /// Dimension names, in storage order (e.g. `["Ár","Eining","Kjördæmi","Flokkur"]`).
    pub id: Vec<String>,
    /// Cardinality of each dimension, same order as `id`.
    pub size: Vec<usize>,
    /// One cell per combination of category positions, row-major over `id`.
    pub value: Vec<CellValue>,
    pub dimension: HashMap<String, Dimension>,
}

impl Dataset {
    /// The position of a dimension in storage order, if present.
    pub fn dim_pos(&self, name: &str) -> Option<usize> {
        self.id.iter().position(|d| d == name)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.dimension.get(name).map(|d| &d.category)
    }
}

/// One flattened result record. Uniqueness key: `(year, constituency, party)`,
/// with `constituency` implicit for national-level rows.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    pub party: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    // Always serialized: the published contract is `seats | null`.
    #[serde(default)]
    pub seats: Option<i64>,
}

impl ResultRow {
    /// The composite key used for de-duplication and joins.
    pub fn key(&self) -> (i32, Option<&str>, &str) {
        (self.year, self.constituency.as_deref(), self.party.as_str())
    }
}

/// The normalized intermediate file shape: `{"results": [...]}`.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Normalized {
    pub results: Vec<ResultRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cell(v: serde_json::Value) -> CellValue {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn missing_sentinels() {
        assert!(cell(json!(null)).is_missing());
        assert!(cell(json!("")).is_missing());
        assert!(cell(json!(".")).is_missing());
        assert!(cell(json!("..")).is_missing());
        assert!(!cell(json!(0)).is_missing());
        assert!(!cell(json!("0")).is_missing());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(cell(json!(31.2)).as_number(), Some(31.2));
        assert_eq!(cell(json!("31.2")).as_number(), Some(31.2));
        assert_eq!(cell(json!("..")).as_number(), None);
        assert_eq!(cell(json!(null)).as_number(), None);
        assert_eq!(cell(json!("n/a")).as_number(), None);
    }

    #[test]
    fn category_order_follows_index_not_key_order() {
        let cat: Category = serde_json::from_value(json!({
            "index": {"b": 0, "a": 1},
            "label": {"a": "A-listi"}
        }))
        .unwrap();
        assert_eq!(cat.ordered_keys(), vec!["b", "a"]);
        assert_eq!(cat.label_or_key("a"), "A-listi");
        assert_eq!(cat.label_or_key("b"), "b");
    }

    #[test]
    fn national_row_serializes_without_constituency() {
        let row = ResultRow {
            year: 2021,
            constituency: None,
            party: "Samfylkingin".to_string(),
            percent: Some(9.9),
            seats: None,
        };
        let js = serde_json::to_value(&row).unwrap();
        assert_eq!(
            js,
            json!({"year": 2021, "party": "Samfylkingin", "percent": 9.9, "seats": null})
        );
    }
}
