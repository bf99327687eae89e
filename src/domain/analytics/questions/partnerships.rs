//! Partnership questions.

use crate::domain::analytics::aggregate::{
    all_rows, group_rows, max, mean, number, numbers, rounded, sort_asc_by, sort_desc_by,
};
use crate::domain::analytics::question::require;
use crate::domain::analytics::{AnalysisError, ResultTable};
use crate::domain::table::{LogicalName, LogicalTable, TableRegistry, Value};

const CENTURY_STAND: f64 = 100.0;
const FIFTY_STAND: f64 = 50.0;
const PAIR_MIN_PARTNERSHIPS: usize = 5;

/// Q13: partnerships of 100 or more, biggest first.
///
/// Uses the partnerships table when it carries innings ids. Otherwise pairs
/// batters at consecutive batting positions within the same innings of
/// the same match and adds their runs; the lower position is `player1`.
pub(super) fn century_partnerships(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let mut stands: Vec<(Value, Value, f64, Value)> = match require(
        registry,
        LogicalName::Partnerships,
        &["player1", "player2", "runs", "innings_id"],
    ) {
        Ok(partnerships) => all_rows(partnerships)
            .filter_map(|row| {
                let runs = partnerships.value(row, "runs").as_f64()?;
                Some((
                    partnerships.value(row, "player1").clone(),
                    partnerships.value(row, "player2").clone(),
                    runs,
                    partnerships.value(row, "innings_id").clone(),
                ))
            })
            .collect(),
        Err(primary) => {
            let performances = require(
                registry,
                LogicalName::Performances,
                &["match_id", "innings_id", "player_name", "runs", "batting_position"],
            )
            .map_err(|fallback| primary.or(fallback))?;
            consecutive_pairs(performances)
        }
    };
    stands.retain(|(_, _, runs, _)| *runs >= CENTURY_STAND);
    sort_desc_by(&mut stands, |(_, _, runs, _)| Some(*runs));

    let mut out = ResultTable::new(&["player1", "player2", "runs", "innings_id"]);
    for (player1, player2, runs, innings) in stands {
        out.push_row(vec![player1, player2, number(runs), innings])?;
    }
    Ok(out)
}

fn consecutive_pairs(performances: &LogicalTable) -> Vec<(Value, Value, f64, Value)> {
    let innings = group_rows(all_rows(performances), |row| {
        let match_id = performances.value(row, "match_id").key()?;
        let innings_id = performances.value(row, "innings_id").key()?;
        Some((match_id, innings_id))
    });

    let mut pairs = Vec::new();
    for (_, rows) in innings {
        let mut order: Vec<(usize, f64)> = rows
            .into_iter()
            .filter_map(|row| Some((row, performances.value(row, "batting_position").as_f64()?)))
            .collect();
        sort_asc_by(&mut order, |(_, position)| Some(*position));

        for window in order.windows(2) {
            let ((first, p1), (second, p2)) = (window[0], window[1]);
            if p2 - p1 != 1.0 {
                continue;
            }
            let (Some(r1), Some(r2)) = (
                performances.value(first, "runs").as_f64(),
                performances.value(second, "runs").as_f64(),
            ) else {
                continue;
            };
            pairs.push((
                performances.value(first, "player_name").clone(),
                performances.value(second, "player_name").clone(),
                r1 + r2,
                performances.value(first, "innings_id").clone(),
            ));
        }
    }
    pairs
}

/// Q24: pairs who batted together at least five times, by average stand.
/// Pairs are unordered; "fifty plus" counts stands above 50.
pub(super) fn successful_pairs(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let partnerships = require(registry, LogicalName::Partnerships, &["player1", "player2", "runs"])?;

    let groups = group_rows(all_rows(partnerships), |row| {
        let a = partnerships.value(row, "player1").key()?;
        let b = partnerships.value(row, "player2").key()?;
        Some(if a <= b { (a, b) } else { (b, a) })
    });

    let mut pairs: Vec<(String, String, Vec<f64>, Option<f64>)> = groups
        .into_iter()
        .map(|((a, b), rows)| {
            let runs = numbers(partnerships, &rows, "runs");
            let avg = mean(&runs);
            (a, b, runs, avg)
        })
        .filter(|(_, _, runs, _)| runs.len() >= PAIR_MIN_PARTNERSHIPS)
        .collect();
    sort_desc_by(&mut pairs, |(_, _, _, avg)| *avg);

    let mut out = ResultTable::new(&["player_a", "player_b", "partnerships", "avg_runs", "fifty_plus", "max_runs"]);
    for (a, b, runs, avg) in pairs {
        out.push_row(vec![
            Value::Text(a),
            Value::Text(b),
            Value::from(runs.len()),
            rounded(avg),
            Value::from(runs.iter().filter(|r| **r > FIFTY_STAND).count()),
            max(&runs).map_or(Value::Null, number),
        ])?;
    }
    Ok(out)
}
