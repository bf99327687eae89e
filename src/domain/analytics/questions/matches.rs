//! Questions over the matches table (and teams, for the win-count fallback).

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};

use crate::domain::analytics::aggregate::{
    all_rows, distinct, group_rows, lower_key, mean, numbers, parse_margin, rounded, sort_date_desc_by,
    sort_desc_by,
};
use crate::domain::analytics::question::{require, require_any};
use crate::domain::analytics::{AnalysisError, ResultTable};
use crate::domain::table::{LogicalName, LogicalTable, TableRegistry, Value};

const RECENT_WINDOW_DAYS: i64 = 30;
const RECENT_CAP: usize = 200;
const COMPLETED_CAP: usize = 20;
const HEAD_TO_HEAD_WINDOW_DAYS: i64 = 1095;
const HEAD_TO_HEAD_MIN_MATCHES: usize = 5;
const COMPLETED_STATUSES: [&str; 4] = ["complete", "completed", "finished", "result"];

fn project(table: &LogicalTable, row: usize, columns: &[&str]) -> Vec<Value> {
    columns.iter().map(|c| table.value(row, c).clone()).collect()
}

/// Q2: matches in the 30 days up to the snapshot date, newest first.
pub(super) fn recent_matches(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let matches = require(registry, LogicalName::Matches, &["date", "team1", "team2"])?;
    let as_of = registry.as_of();
    let cutoff = as_of - Duration::days(RECENT_WINDOW_DAYS);

    let mut recent: Vec<(usize, NaiveDate)> = all_rows(matches)
        .filter_map(|row| matches.value(row, "date").as_date().map(|d| (row, d)))
        .filter(|(_, d)| *d >= cutoff && *d <= as_of)
        .collect();
    sort_date_desc_by(&mut recent, |(_, d)| Some(*d));
    recent.truncate(RECENT_CAP);

    let columns = ["description", "team1", "team2", "venue_name", "venue_city", "date"];
    let mut out = ResultTable::new(&columns);
    for (row, _) in recent {
        out.push_row(project(matches, row, &columns))?;
    }
    Ok(out)
}

/// Q5: wins per team, from match winners or a teams table.
pub(super) fn team_wins(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let mut out = ResultTable::new(&["team", "wins"]);

    let from_matches = require(registry, LogicalName::Matches, &["winner"]);
    if let Ok(matches) = from_matches {
        let mut wins: Vec<(String, usize)> = group_rows(all_rows(matches), |row| matches.value(row, "winner").key())
            .into_iter()
            .map(|(team, rows)| (team, rows.len()))
            .collect();
        wins.sort_by(|a, b| b.1.cmp(&a.1));
        for (team, count) in wins {
            out.push_row(vec![Value::Text(team), Value::from(count)])?;
        }
        return Ok(out);
    }

    let teams = require(registry, LogicalName::Teams, &["team_name", "wins"]).map_err(|err| match from_matches {
        Err(first) => first.or(err),
        Ok(_) => err,
    })?;
    let mut rows: Vec<usize> = all_rows(teams).collect();
    sort_desc_by(&mut rows, |&row| teams.value(row, "wins").as_f64());
    for row in rows {
        out.push_row(project(teams, row, &["team_name", "wins"]))?;
    }
    Ok(out)
}

fn is_completed(matches: &LogicalTable, row: usize) -> bool {
    let finished = lower_key(matches.value(row, "status"))
        .map(|s| COMPLETED_STATUSES.contains(&s.as_str()))
        .unwrap_or(false);
    finished || matches.value(row, "winner").key().is_some()
}

/// Q10: the 20 most recent completed matches.
pub(super) fn last_completed_matches(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let (matches, _) = require_any(
        registry,
        LogicalName::Matches,
        &[&["date", "team1", "team2", "status"], &["date", "team1", "team2", "winner"]],
    )?;

    let mut completed: Vec<usize> = all_rows(matches).filter(|&row| is_completed(matches, row)).collect();
    sort_date_desc_by(&mut completed, |&row| matches.value(row, "date").as_date());
    completed.truncate(COMPLETED_CAP);

    let columns = [
        "description",
        "team1",
        "team2",
        "winner",
        "result_margin",
        "result_type",
        "venue_name",
        "date",
    ];
    let mut out = ResultTable::new(&columns);
    for row in completed {
        out.push_row(project(matches, row, &columns))?;
    }
    Ok(out)
}

/// Q12: home and away wins per team, judged by the winner's country
/// against the venue's country.
pub(super) fn home_away_wins(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let matches = require(
        registry,
        LogicalName::Matches,
        &["team1", "team2", "winner", "venue_country", "team1_country", "team2_country"],
    )?;

    let mut outcomes: Vec<(String, bool)> = Vec::new();
    for row in all_rows(matches) {
        let Some(winner) = matches.value(row, "winner").key() else {
            continue;
        };
        let venue_country = matches.value(row, "venue_country").key();
        let side = ["team1", "team2"]
            .into_iter()
            .find(|side| matches.value(row, side).key().as_deref() == Some(winner.as_str()));
        if let Some(side) = side {
            let team_country = matches.value(row, &format!("{}_country", side)).key();
            let home = team_country.is_some() && team_country == venue_country;
            outcomes.push((winner, home));
        }
    }

    let mut teams = group_rows(0..outcomes.len(), |i| Some(outcomes[i].0.clone()));
    teams.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ResultTable::new(&["team", "home_wins", "away_wins"]);
    for (team, indices) in teams {
        let home = indices.iter().filter(|&&i| outcomes[i].1).count();
        out.push_row(vec![
            Value::Text(team),
            Value::from(home),
            Value::from(indices.len() - home),
        ])?;
    }
    Ok(out)
}

/// Q17: how often the toss winner wins, per toss decision.
pub(super) fn toss_advantage(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let matches = require(registry, LogicalName::Matches, &["toss_winner", "toss_decision", "winner"])?;

    let mut decisions = group_rows(all_rows(matches), |row| matches.value(row, "toss_decision").key());
    decisions.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ResultTable::new(&[
        "toss_decision",
        "matches",
        "wins_by_toss_winner",
        "pct_wins_by_toss_winner",
    ]);
    for (decision, rows) in decisions {
        let wins = rows
            .iter()
            .filter(|&&row| {
                let toss = matches.value(row, "toss_winner").key();
                toss.is_some() && toss == matches.value(row, "winner").key()
            })
            .count();
        let pct = wins as f64 / rows.len() as f64 * 100.0;
        out.push_row(vec![
            Value::Text(decision),
            Value::from(rows.len()),
            Value::from(wins),
            rounded(Some(pct)),
        ])?;
    }
    Ok(out)
}

/// Q22: head-to-head records over the last three years for pairs that met
/// at least five times.
pub(super) fn head_to_head(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let matches = require(registry, LogicalName::Matches, &["team1", "team2", "date", "winner"])?;
    let as_of = registry.as_of();
    let cutoff = as_of - Duration::days(HEAD_TO_HEAD_WINDOW_DAYS);

    let in_window = all_rows(matches).filter(|&row| {
        matches
            .value(row, "date")
            .as_date()
            .is_some_and(|d| d >= cutoff && d <= as_of)
    });
    let mut pairs = group_rows(in_window, |row| {
        let a = matches.value(row, "team1").key()?;
        let b = matches.value(row, "team2").key()?;
        Some(if a <= b { (a, b) } else { (b, a) })
    });
    pairs.retain(|(_, rows)| rows.len() >= HEAD_TO_HEAD_MIN_MATCHES);
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ResultTable::new(&[
        "team_a",
        "team_b",
        "matches",
        "wins_a",
        "wins_b",
        "avg_margin_a",
        "avg_margin_b",
    ]);
    for ((team_a, team_b), rows) in pairs {
        let won_by = |team: &str| -> Vec<usize> {
            rows.iter()
                .copied()
                .filter(|&row| matches.value(row, "winner").key().as_deref() == Some(team))
                .collect()
        };
        let wins_a = won_by(&team_a);
        let wins_b = won_by(&team_b);
        let avg_margin = |won: &[usize]| -> f64 {
            let margins: Vec<f64> = won
                .iter()
                .filter_map(|&row| parse_margin(matches.value(row, "result_margin"), &Value::Null))
                .map(|m| m.amount)
                .collect();
            mean(&margins).unwrap_or(0.0)
        };
        out.push_row(vec![
            Value::text(team_a.as_str()),
            Value::text(team_b.as_str()),
            Value::from(rows.len()),
            Value::from(wins_a.len()),
            Value::from(wins_b.len()),
            rounded(Some(avg_margin(&wins_a))),
            rounded(Some(avg_margin(&wins_b))),
        ])?;
    }
    Ok(out)
}

/// Q15: batting in close matches (won by < 50 runs or < 5 wickets).
pub(super) fn close_match_performers(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let matches = require(registry, LogicalName::Matches, &["match_id", "result_margin"]);
    let performances = require(registry, LogicalName::Performances, &["match_id", "player_name", "runs"]);
    let (matches, performances) = match (matches, performances) {
        (Ok(m), Ok(p)) => (m, p),
        (Err(a), Err(b)) => return Err(a.or(b)),
        (Err(e), _) | (_, Err(e)) => return Err(e),
    };

    let mut close_ids: HashSet<String> = HashSet::new();
    let mut winners: HashMap<String, String> = HashMap::new();
    for row in all_rows(matches) {
        let Some(id) = matches.value(row, "match_id").key() else {
            continue;
        };
        if let Some(winner) = matches.value(row, "winner").key() {
            winners.entry(id.clone()).or_insert(winner);
        }
        let margin = parse_margin(matches.value(row, "result_margin"), matches.value(row, "result_type"));
        if margin.is_some_and(|m| m.is_close()) {
            close_ids.insert(id);
        }
    }

    let close_rows = all_rows(performances).filter(|&row| {
        performances
            .value(row, "match_id")
            .key()
            .is_some_and(|id| close_ids.contains(&id))
    });
    let mut players: Vec<(String, Vec<usize>, Option<f64>)> =
        group_rows(close_rows, |row| performances.value(row, "player_name").key())
            .into_iter()
            .map(|(player, rows)| {
                let avg = mean(&numbers(performances, &rows, "runs"));
                (player, rows, avg)
            })
            .collect();
    sort_desc_by(&mut players, |(_, _, avg)| *avg);

    let mut out = ResultTable::new(&["player_name", "avg_runs", "close_matches", "wins_when_batting"]);
    for (player, rows, avg) in players {
        let wins = rows
            .iter()
            .filter(|&&row| {
                let team = performances.value(row, "team").key();
                let winner = performances
                    .value(row, "match_id")
                    .key()
                    .and_then(|id| winners.get(&id).cloned());
                team.is_some() && team == winner
            })
            .count();
        out.push_row(vec![
            Value::Text(player),
            rounded(avg),
            Value::from(distinct(performances, &rows, "match_id")),
            Value::from(wins),
        ])?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn registry() -> TableRegistry {
        TableRegistry::new(as_of())
    }

    fn matches(columns: &[&str], rows: Vec<Vec<Value>>) -> LogicalTable {
        LogicalTable::from_rows(columns, rows).unwrap()
    }

    #[test]
    fn recent_window_is_thirty_days_up_to_snapshot() {
        let table = matches(
            &["date", "team1", "team2"],
            vec![
                vec![Value::text("2024-05-31"), Value::text("A"), Value::text("B")],
                vec![Value::text("2024-06-20"), Value::text("C"), Value::text("D")],
                vec![Value::text("2024-05-30"), Value::text("E"), Value::text("F")],
                vec![Value::text("2024-07-02"), Value::text("G"), Value::text("H")],
                vec![Value::text("not a date"), Value::text("I"), Value::text("J")],
            ],
        );
        let out = recent_matches(&registry().with_table(LogicalName::Matches, table)).unwrap();
        let team1: Vec<_> = out.column_values("team1").unwrap().into_iter().cloned().collect();
        assert_eq!(team1, vec![Value::text("C"), Value::text("A")]);
        assert_eq!(out.rows()[0][0], Value::Null);
    }

    #[test]
    fn wins_come_from_winner_column() {
        let table = matches(
            &["winner"],
            vec![
                vec![Value::text("India")],
                vec![Value::text("Australia")],
                vec![Value::text("Australia")],
                vec![Value::Null],
            ],
        );
        let out = team_wins(&registry().with_table(LogicalName::Matches, table)).unwrap();
        assert_eq!(
            out.rows(),
            &[
                vec![Value::text("Australia"), Value::Int(2)],
                vec![Value::text("India"), Value::Int(1)],
            ]
        );
    }

    #[test]
    fn wins_fall_back_to_teams_table() {
        let teams = matches(
            &["team_name", "wins"],
            vec![
                vec![Value::text("India"), Value::Int(3)],
                vec![Value::text("England"), Value::Int(7)],
            ],
        );
        let out = team_wins(&registry().with_table(LogicalName::Teams, teams)).unwrap();
        assert_eq!(out.rows()[0][0], Value::text("England"));
    }

    #[test]
    fn wins_without_either_source_names_both() {
        let err = team_wins(&registry()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "insufficient data: need columns winner on table matches or columns team_name, wins on table teams"
        );
    }

    #[test]
    fn completed_matches_use_status_or_winner() {
        let table = matches(
            &["date", "team1", "team2", "status", "winner"],
            vec![
                vec![Value::text("2024-01-01"), Value::text("A"), Value::text("B"), Value::text("Completed"), Value::Null],
                vec![Value::text("2024-02-01"), Value::text("C"), Value::text("D"), Value::text("live"), Value::Null],
                vec![Value::text("2024-03-01"), Value::text("E"), Value::text("F"), Value::Null, Value::text("E")],
            ],
        );
        let out = last_completed_matches(&registry().with_table(LogicalName::Matches, table)).unwrap();
        let team1: Vec<_> = out.column_values("team1").unwrap().into_iter().cloned().collect();
        assert_eq!(team1, vec![Value::text("E"), Value::text("A")]);
    }

    #[test]
    fn home_and_away_wins_compare_countries() {
        let table = matches(
            &["team1", "team2", "winner", "venue_country", "team1_country", "team2_country"],
            vec![
                vec![Value::text("India"), Value::text("England"), Value::text("India"), Value::text("India"), Value::text("India"), Value::text("England")],
                vec![Value::text("India"), Value::text("England"), Value::text("England"), Value::text("India"), Value::text("India"), Value::text("England")],
                vec![Value::text("England"), Value::text("India"), Value::text("India"), Value::text("England"), Value::text("England"), Value::text("India")],
                vec![Value::text("England"), Value::text("India"), Value::Null, Value::text("England"), Value::text("England"), Value::text("India")],
            ],
        );
        let out = home_away_wins(&registry().with_table(LogicalName::Matches, table)).unwrap();
        assert_eq!(
            out.rows(),
            &[
                vec![Value::text("England"), Value::Int(0), Value::Int(1)],
                vec![Value::text("India"), Value::Int(1), Value::Int(1)],
            ]
        );
    }

    #[test]
    fn toss_advantage_reports_percentages() {
        let table = matches(
            &["toss_winner", "toss_decision", "winner"],
            vec![
                vec![Value::text("A"), Value::text("field"), Value::text("A")],
                vec![Value::text("B"), Value::text("bat"), Value::text("C")],
                vec![Value::text("D"), Value::text("field"), Value::text("E")],
                vec![Value::text("F"), Value::text("field"), Value::text("F")],
            ],
        );
        let out = toss_advantage(&registry().with_table(LogicalName::Matches, table)).unwrap();
        assert_eq!(
            out.rows(),
            &[
                vec![Value::text("bat"), Value::Int(1), Value::Int(0), Value::Float(0.0)],
                vec![Value::text("field"), Value::Int(3), Value::Int(2), Value::Float(66.67)],
            ]
        );
    }

    #[test]
    fn head_to_head_needs_five_meetings_in_window() {
        let mut rows = Vec::new();
        for i in 0..5 {
            let (t1, t2) = if i % 2 == 0 { ("India", "Australia") } else { ("Australia", "India") };
            let winner = if i < 3 { "India" } else { "Australia" };
            rows.push(vec![
                Value::text(t1),
                Value::text(t2),
                Value::text(format!("2024-0{}-01", i + 1)),
                Value::text(winner),
                Value::text(format!("{} runs", 10 * (i + 1))),
            ]);
        }
        // Outside the three-year window.
        rows.push(vec![
            Value::text("India"),
            Value::text("Pakistan"),
            Value::text("2019-01-01"),
            Value::text("India"),
            Value::Null,
        ]);
        let table = matches(&["team1", "team2", "date", "winner", "result_margin"], rows);
        let out = head_to_head(&registry().with_table(LogicalName::Matches, table)).unwrap();
        assert_eq!(
            out.rows(),
            &[vec![
                Value::text("Australia"),
                Value::text("India"),
                Value::Int(5),
                Value::Int(2),
                Value::Int(3),
                Value::Float(45.0),
                Value::Float(20.0),
            ]]
        );
    }

    #[test]
    fn close_match_stats_join_matches_and_performances() {
        let m = matches(
            &["match_id", "result_margin", "result_type", "winner"],
            vec![
                vec![Value::Int(1), Value::text("12 runs"), Value::Null, Value::text("India")],
                vec![Value::Int(2), Value::Int(8), Value::text("wickets"), Value::text("England")],
                vec![Value::Int(3), Value::Int(3), Value::text("wickets"), Value::text("England")],
            ],
        );
        let p = matches(
            &["match_id", "player_name", "runs", "team"],
            vec![
                vec![Value::Int(1), Value::text("Kohli"), Value::Int(40), Value::text("India")],
                vec![Value::Int(2), Value::text("Kohli"), Value::Int(100), Value::text("India")],
                vec![Value::Int(3), Value::text("Root"), Value::Int(70), Value::text("England")],
                vec![Value::Int(3), Value::text("Kohli"), Value::Int(20), Value::text("India")],
            ],
        );
        let registry = registry()
            .with_table(LogicalName::Matches, m)
            .with_table(LogicalName::Performances, p);
        let out = close_match_performers(&registry).unwrap();
        assert_eq!(
            out.rows(),
            &[
                vec![Value::text("Root"), Value::Float(70.0), Value::Int(1), Value::Int(1)],
                vec![Value::text("Kohli"), Value::Float(30.0), Value::Int(2), Value::Int(1)],
            ]
        );
    }
}
