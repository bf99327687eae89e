//! Grouping, numeric aggregation, and ordering helpers shared by analyzers.
//!
//! Aggregates skip values that do not coerce to a number. An empty input
//! gives `None` for mean, deviation, and max, and `0` for sums.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::{Datelike, NaiveDate};

use crate::domain::table::{LogicalTable, Value};

/// Row indices of a table.
pub fn all_rows(table: &LogicalTable) -> std::ops::Range<usize> {
    0..table.row_count()
}

/// Groups rows by key, keeping groups in first-seen order. Rows whose key
/// is `None` are dropped.
pub fn group_rows<K, I, F>(rows: I, key: F) -> Vec<(K, Vec<usize>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = usize>,
    F: Fn(usize) -> Option<K>,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<usize>)> = Vec::new();
    for row in rows {
        let Some(k) = key(row) else { continue };
        match positions.get(&k) {
            Some(&at) => groups[at].1.push(row),
            None => {
                positions.insert(k.clone(), groups.len());
                groups.push((k, vec![row]));
            }
        }
    }
    groups
}

/// Numeric values of `column` over `rows`, skipping non-numeric cells.
pub fn numbers(table: &LogicalTable, rows: &[usize], column: &str) -> Vec<f64> {
    rows.iter()
        .filter_map(|&row| table.value(row, column).as_f64())
        .collect()
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(sum(values) / values.len() as f64)
    }
}

/// Sample standard deviation (n - 1). Undefined below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Number of distinct non-null keys of `column` over `rows`.
pub fn distinct(table: &LogicalTable, rows: &[usize], column: &str) -> usize {
    rows.iter()
        .filter_map(|&row| table.value(row, column).key())
        .collect::<HashSet<_>>()
        .len()
}

/// Lower-cased trimmed text key of a cell.
pub fn lower_key(value: &Value) -> Option<String> {
    value.key().map(|k| k.to_lowercase())
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Output cell for a mean or ratio, rounded to two decimals.
pub fn rounded(x: Option<f64>) -> Value {
    x.map(|v| Value::float(round2(v))).unwrap_or(Value::Null)
}

/// Output cell for a sum, count, or extreme. Whole numbers stay integers.
pub fn number(x: f64) -> Value {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 9.0e15 {
        Value::Int(x as i64)
    } else {
        Value::float(round2(x))
    }
}

fn nulls_last(a: Option<f64>, b: Option<f64>, cmp: impl Fn(f64, f64) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable descending sort by a numeric key; missing keys sort last.
pub fn sort_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> Option<f64>) {
    items.sort_by(|a, b| nulls_last(key(a), key(b), |x, y| y.total_cmp(&x)));
}

/// Stable ascending sort by a numeric key; missing keys sort last.
pub fn sort_asc_by<T>(items: &mut [T], key: impl Fn(&T) -> Option<f64>) {
    items.sort_by(|a, b| nulls_last(key(a), key(b), |x, y| x.total_cmp(&y)));
}

/// Stable descending sort by date; undated items sort last.
pub fn sort_date_desc_by<T>(items: &mut [T], key: impl Fn(&T) -> Option<NaiveDate>) {
    items.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub fn year(date: NaiveDate) -> i32 {
    date.year()
}

/// Calendar quarter as `(year, 1..=4)`.
pub fn quarter(date: NaiveDate) -> (i32, u32) {
    (date.year(), (date.month() - 1) / 3 + 1)
}

/// Sums numeric values per key, then orders by total descending and keeps
/// the first `n`. Ties keep first-seen order.
pub fn top_totals(
    table: &LogicalTable,
    rows: impl IntoIterator<Item = usize>,
    key_column: &str,
    value_column: &str,
    n: usize,
) -> Vec<(String, Vec<usize>, f64)> {
    let mut totals: Vec<(String, Vec<usize>, f64)> = group_rows(rows, |row| table.value(row, key_column).key())
        .into_iter()
        .map(|(key, members)| {
            let total = sum(&numbers(table, &members, value_column));
            (key, members, total)
        })
        .collect();
    sort_desc_by(&mut totals, |(_, _, total)| Some(*total));
    totals.truncate(n);
    totals
}

/// How a match was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginKind {
    Runs,
    Wickets,
}

/// A parsed result margin, e.g. `12 runs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub amount: f64,
    pub kind: Option<MarginKind>,
}

impl Margin {
    /// Won by fewer than 50 runs or fewer than 5 wickets.
    pub fn is_close(&self) -> bool {
        match self.kind {
            Some(MarginKind::Runs) => self.amount < 50.0,
            Some(MarginKind::Wickets) => self.amount < 5.0,
            None => false,
        }
    }
}

/// Parses a margin cell. The unit comes from `result_type` when it names one,
/// otherwise from the margin text itself ("8 wkts", "Innings and 50 runs").
pub fn parse_margin(margin: &Value, result_type: &Value) -> Option<Margin> {
    let amount = match margin {
        Value::Text(text) => first_number(text)?,
        other => other.as_f64()?,
    };
    let kind = margin_kind(result_type).or_else(|| margin_kind(margin));
    Some(Margin { amount, kind })
}

fn margin_kind(value: &Value) -> Option<MarginKind> {
    let text = value.as_str()?.to_lowercase();
    if text.contains("wicket") || text.contains("wkt") {
        Some(MarginKind::Wickets)
    } else if text.contains("run") {
        Some(MarginKind::Runs)
    } else {
        None
    }
}

fn first_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    rest[..end].trim_end_matches('.').parse().ok()
}
