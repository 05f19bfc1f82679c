//! Tabular run history in "split" orientation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashSet;

/// `{"columns": [...], "index": [...], "data": [[...], ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SplitFrame {
    pub columns: Vec<String>,
    pub index: Vec<usize>,
    pub data: Vec<Vec<Value>>,
}

impl SplitFrame {
    /// Lays rows out as a table.
    ///
    /// Columns are the union of row keys in order of first appearance. A row
    /// without a given column holds `null` there. Rows are indexed from 0.
    pub fn from_rows(rows: &[Map<String, Value>]) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for key in rows.iter().flat_map(|row| row.keys()) {
            if seen.insert(key.as_str()) {
                columns.push(key.clone());
            }
        }

        let data = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self {
            index: (0..rows.len()).collect(),
            columns,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Replaces the non-standard `NaN`, `Infinity` and `-Infinity` literals that
/// history rows may contain with `null`. String contents are left alone.
pub fn normalize_non_finite(row: &str) -> Cow<'_, str> {
    if !row.contains("NaN") && !row.contains("Infinity") {
        return Cow::Borrowed(row);
    }

    let mut out = String::with_capacity(row.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = row;

    while let Some(c) = rest.chars().next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            rest = &rest[c.len_utf8()..];
            continue;
        }

        if let Some(literal) = ["-Infinity", "Infinity", "NaN"]
            .into_iter()
            .find(|literal| rest.starts_with(literal))
        {
            out.push_str("null");
            rest = &rest[literal.len()..];
            continue;
        }

        if c == '"' {
            in_string = true;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}
