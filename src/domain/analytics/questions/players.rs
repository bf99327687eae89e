//! Questions over the players table.

use crate::domain::analytics::aggregate::{all_rows, group_rows, lower_key};
use crate::domain::analytics::question::{require, require_any};
use crate::domain::analytics::{AnalysisError, ResultTable};
use crate::domain::table::{LogicalName, TableRegistry, Value};

/// Q1: players whose country is India, in table order.
pub(super) fn players_from_india(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let (players, variant) = require_any(
        registry,
        LogicalName::Players,
        &[&["country", "full_name"], &["country", "name"]],
    )?;
    let name_column = if variant == 0 { "full_name" } else { "name" };

    let mut out = ResultTable::new(&["player_name", "playing_role", "batting_style", "bowling_style"]);
    for row in all_rows(players) {
        if lower_key(players.value(row, "country")).as_deref() != Some("india") {
            continue;
        }
        out.push_row(vec![
            players.value(row, name_column).clone(),
            players.value(row, "playing_role").clone(),
            players.value(row, "batting_style").clone(),
            players.value(row, "bowling_style").clone(),
        ])?;
    }
    Ok(out)
}

/// Q6: player counts per playing role; missing roles count as "Unknown".
pub(super) fn players_by_role(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let players = require(registry, LogicalName::Players, &["playing_role"])?;

    let mut counts: Vec<(String, usize)> = group_rows(all_rows(players), |row| {
        Some(
            players
                .value(row, "playing_role")
                .key()
                .unwrap_or_else(|| "Unknown".to_string()),
        )
    })
    .into_iter()
    .map(|(role, rows)| (role, rows.len()))
    .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = ResultTable::new(&["role", "count"]);
    for (role, count) in counts {
        out.push_row(vec![Value::Text(role), Value::from(count)])?;
    }
    Ok(out)
}
