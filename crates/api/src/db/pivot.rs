//! Pivot transformer for KMA realtime observations.
//!
//! Narrow rows keyed by `(region_name, base_date, base_time)` are
//! reshaped into one wide row per key with a fixed category-column
//! set. Categories outside the declared set are dropped; declared
//! categories with no matching row stay null, never omitted.

use std::collections::HashMap;

use itertools::Itertools;
use time::Date;

use crate::models::{NarrowObservation, PivotKey, RealtimePivot};

/// The declared category set of the realtime pivot view. Extending the
/// view means extending this list and [`RealtimePivot`] together.
pub const REALTIME_CATEGORIES: &[&str] = &["T1H", "RN1", "UUU", "VVV", "REH", "PTY", "VEC", "WSD"];

impl RealtimePivot {
    /// A wide row with every declared column null.
    pub fn from_key(key: &PivotKey) -> Self {
        Self {
            sido: key.sido.clone(),
            region_name: key.region_name.clone(),
            base_date: key.base_date,
            base_time: key.base_time.clone(),
            t1h: None,
            rn1: None,
            uuu: None,
            vvv: None,
            reh: None,
            pty: None,
            vec: None,
            wsd: None,
        }
    }

    /// Assign one category's value; undeclared categories are ignored.
    pub fn set_category(&mut self, category: &str, value: Option<f64>) {
        match category {
            "T1H" => self.t1h = value,
            "RN1" => self.rn1 = value,
            "UUU" => self.uuu = value,
            "VVV" => self.vvv = value,
            "REH" => self.reh = value,
            "PTY" => self.pty = value,
            "VEC" => self.vec = value,
            "WSD" => self.wsd = value,
            _ => {}
        }
    }
}

/// Reshape narrow rows into wide rows, one per key, preserving the
/// key order determined by the distinct-key query.
pub fn pivot_observations(keys: &[PivotKey], rows: &[NarrowObservation]) -> Vec<RealtimePivot> {
    let grouped: HashMap<(&str, Date, &str), Vec<&NarrowObservation>> = rows
        .iter()
        .map(|row| {
            (
                (
                    row.region_name.as_str(),
                    row.base_date,
                    row.base_time.as_str(),
                ),
                row,
            )
        })
        .into_group_map();

    keys.iter()
        .map(|key| {
            let mut wide = RealtimePivot::from_key(key);
            let group_key = (
                key.region_name.as_str(),
                key.base_date,
                key.base_time.as_str(),
            );
            if let Some(group) = grouped.get(&group_key) {
                for row in group {
                    if let Some(category) = &row.category {
                        wide.set_category(category, row.obsrvalue);
                    }
                }
            }
            wide
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn key(region: &str, day: Date, time: &str) -> PivotKey {
        PivotKey {
            sido: Some("Gyeonggi".to_string()),
            region_name: region.to_string(),
            base_date: day,
            base_time: time.to_string(),
        }
    }

    fn row(region: &str, day: Date, time: &str, category: &str, value: f64) -> NarrowObservation {
        NarrowObservation {
            region_name: region.to_string(),
            base_date: day,
            base_time: time.to_string(),
            category: Some(category.to_string()),
            obsrvalue: Some(value),
        }
    }

    #[test]
    fn fills_matching_categories_and_leaves_rest_null() {
        let day = date!(2023 - 06 - 15);
        let keys = vec![key("Suwon", day, "1400")];
        let rows = vec![
            row("Suwon", day, "1400", "T1H", 24.5),
            row("Suwon", day, "1400", "REH", 61.0),
            row("Suwon", day, "1400", "WSD", 2.3),
        ];

        let pivoted = pivot_observations(&keys, &rows);
        assert_eq!(pivoted.len(), 1);
        let wide = &pivoted[0];
        assert_eq!(wide.t1h, Some(24.5));
        assert_eq!(wide.reh, Some(61.0));
        assert_eq!(wide.wsd, Some(2.3));
        assert_eq!(wide.rn1, None);
        assert_eq!(wide.uuu, None);
        assert_eq!(wide.vvv, None);
        assert_eq!(wide.pty, None);
        assert_eq!(wide.vec, None);
    }

    #[test]
    fn single_category_row_keeps_every_declared_column() {
        let day = date!(2023 - 06 - 15);
        let keys = vec![key("Suwon", day, "0900")];
        let rows = vec![row("Suwon", day, "0900", "T1H", 18.0)];

        let pivoted = pivot_observations(&keys, &rows);
        let json = serde_json::to_value(&pivoted[0]).unwrap();
        for category in REALTIME_CATEGORIES {
            assert!(
                json.get(*category).is_some(),
                "column {} missing from pivot output",
                category
            );
        }
        assert_eq!(json["T1H"], serde_json::json!(18.0));
        assert_eq!(json["REH"], serde_json::Value::Null);
    }

    #[test]
    fn undeclared_categories_are_dropped() {
        let day = date!(2023 - 06 - 15);
        let keys = vec![key("Suwon", day, "1400")];
        let rows = vec![
            row("Suwon", day, "1400", "T1H", 24.5),
            row("Suwon", day, "1400", "LGT", 1.0),
        ];

        let pivoted = pivot_observations(&keys, &rows);
        let json = serde_json::to_value(&pivoted[0]).unwrap();
        assert!(json.get("LGT").is_none());
        assert_eq!(json["T1H"], serde_json::json!(24.5));
    }

    #[test]
    fn rows_partition_by_key_and_preserve_key_order() {
        let day = date!(2023 - 06 - 15);
        let keys = vec![
            key("Suwon", day, "1400"),
            key("Suwon", day, "1300"),
            key("Icheon", day, "1400"),
        ];
        let rows = vec![
            row("Suwon", day, "1300", "T1H", 23.9),
            row("Icheon", day, "1400", "T1H", 25.1),
            row("Suwon", day, "1400", "T1H", 24.5),
        ];

        let pivoted = pivot_observations(&keys, &rows);
        assert_eq!(pivoted.len(), 3);
        assert_eq!(pivoted[0].t1h, Some(24.5));
        assert_eq!(pivoted[1].t1h, Some(23.9));
        assert_eq!(pivoted[2].t1h, Some(25.1));
        assert_eq!(pivoted[2].region_name, "Icheon");
    }

    #[test]
    fn key_with_no_rows_yields_all_null_row() {
        let day = date!(2023 - 06 - 15);
        let keys = vec![key("Suwon", day, "1400")];

        let pivoted = pivot_observations(&keys, &[]);
        assert_eq!(pivoted.len(), 1);
        assert_eq!(pivoted[0], RealtimePivot::from_key(&keys[0]));
    }
}
