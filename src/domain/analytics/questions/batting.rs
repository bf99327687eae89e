//! Batting questions, mostly over the performances table.

use crate::domain::analytics::aggregate::{
    all_rows, distinct, group_rows, lower_key, max, mean, number, numbers, rounded, sample_std, sort_asc_by,
    sort_date_desc_by, sort_desc_by, sum, top_totals, year,
};
use crate::domain::analytics::question::require;
use crate::domain::analytics::{AnalysisError, ResultTable};
use crate::domain::table::{LogicalName, LogicalTable, Requirement, TableRegistry, Value};

const TOP_SCORERS: usize = 10;
const ALL_ROUNDER_RUNS: f64 = 1000.0;
const ALL_ROUNDER_WICKETS: f64 = 50.0;
const YEARLY_SINCE: i32 = 2020;
const YEARLY_MIN_MATCHES: usize = 5;
const CONSISTENCY_SINCE: i32 = 2022;
const CONSISTENCY_MIN_BALLS: f64 = 10.0;
const FORMAT_MIN_MATCHES: usize = 20;
const RANKING_CAP: usize = 50;
const FORM_INNINGS: usize = 10;

fn find_column<'a>(table: &'a LogicalTable, matches: impl Fn(&str) -> bool) -> Option<&'a str> {
    table.column_names().find(|name| matches(&name.to_lowercase()))
}

/// Q3: top ODI run scorers, from a per-player ODI runs column or from
/// ODI rows of the performances table.
pub(super) fn top_odi_scorers(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let mut out = ResultTable::new(&["player_name", "odi_runs", "bat_avg", "hundreds"]);

    let players = registry.get(LogicalName::Players).filter(|t| !t.is_empty());
    let odi_runs = players.and_then(|t| find_column(t, |c| c.contains("odi") && c.contains("runs")));
    if let (Some(players), Some(runs_column)) = (players, odi_runs) {
        let name_column = if players.has_column("full_name") { "full_name" } else { "name" };
        let avg_column = find_column(players, |c| c.contains("odi") && (c.contains("avg") || c.contains("average")));
        let hundreds_column = find_column(players, |c| c.contains("odi") && (c.contains("hundreds") || c.contains("100")));

        let mut ranked: Vec<(usize, f64)> = all_rows(players)
            .filter_map(|row| players.value(row, runs_column).as_f64().map(|runs| (row, runs)))
            .collect();
        sort_desc_by(&mut ranked, |(_, runs)| Some(*runs));
        ranked.truncate(TOP_SCORERS);

        for (row, runs) in ranked {
            let optional = |column: Option<&str>| column.map_or(Value::Null, |c| players.value(row, c).clone());
            out.push_row(vec![
                players.value(row, name_column).clone(),
                number(runs),
                optional(avg_column),
                optional(hundreds_column),
            ])?;
        }
        return Ok(out);
    }

    let performances = require(registry, LogicalName::Performances, &["format", "player_name", "runs"]).map_err(|err| {
        AnalysisError::insufficient(Requirement::new(LogicalName::Players, &["odi_runs"])).or(err)
    })?;
    let odi_rows = all_rows(performances).filter(|&row| lower_key(performances.value(row, "format")).as_deref() == Some("odi"));
    for (player, rows, total) in top_totals(performances, odi_rows, "player_name", "runs", TOP_SCORERS) {
        let bat_avg = if performances.has_column("average") {
            rounded(mean(&numbers(performances, &rows, "average")))
        } else {
            Value::Null
        };
        let hundreds = if performances.has_column("hundreds") {
            number(sum(&numbers(performances, &rows, "hundreds")))
        } else {
            Value::Null
        };
        out.push_row(vec![Value::Text(player), number(total), bat_avg, hundreds])?;
    }
    Ok(out)
}

/// Q7: highest individual score per format. Not-out markers (`*`) are
/// stripped before parsing.
pub(super) fn highest_score_per_format(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["format", "high_score"])?;

    let mut formats = group_rows(all_rows(performances), |row| performances.value(row, "format").key());
    formats.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ResultTable::new(&["format", "highest_score"]);
    for (format, rows) in formats {
        let scores: Vec<f64> = rows
            .iter()
            .filter_map(|&row| match performances.value(row, "high_score") {
                Value::Text(text) => text.replace('*', "").trim().parse::<f64>().ok(),
                other => other.as_f64(),
            })
            .collect();
        out.push_row(vec![Value::Text(format), max(&scores).map_or(Value::Null, number)])?;
    }
    Ok(out)
}

/// Q9: all-rounders with more than 1000 runs and more than 50 wickets.
/// Missing wicket counts contribute zero.
pub(super) fn all_rounders(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["player_name", "runs", "wickets"])?;

    let mut qualified: Vec<(String, f64, f64)> =
        group_rows(all_rows(performances), |row| performances.value(row, "player_name").key())
            .into_iter()
            .map(|(player, rows)| {
                let runs = sum(&numbers(performances, &rows, "runs"));
                let wickets = sum(&numbers(performances, &rows, "wickets"));
                (player, runs, wickets)
            })
            .filter(|(_, runs, wickets)| *runs > ALL_ROUNDER_RUNS && *wickets > ALL_ROUNDER_WICKETS)
            .collect();
    sort_desc_by(&mut qualified, |(_, runs, _)| Some(*runs));

    let mut out = ResultTable::new(&["player_name", "total_runs", "total_wickets"]);
    for (player, runs, wickets) in qualified {
        out.push_row(vec![Value::Text(player), number(runs), number(wickets)])?;
    }
    Ok(out)
}

/// Q11: runs per format for players with runs in at least two formats.
/// One output column per format, in name order.
pub(super) fn runs_across_formats(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["player_name", "format", "runs"])?;

    let mut formats: Vec<String> = group_rows(all_rows(performances), |row| performances.value(row, "format").key())
        .into_iter()
        .map(|(format, _)| format)
        .collect();
    formats.sort();

    let mut players = group_rows(all_rows(performances), |row| performances.value(row, "player_name").key());
    players.sort_by(|a, b| a.0.cmp(&b.0));

    let mut columns = vec!["player_name".to_string()];
    columns.extend(formats.iter().cloned());
    columns.push("formats_played".to_string());
    columns.push("overall_avg".to_string());
    let mut out = ResultTable::with_columns(columns);

    for (player, rows) in players {
        let totals: Vec<f64> = formats
            .iter()
            .map(|format| {
                let in_format: Vec<usize> = rows
                    .iter()
                    .copied()
                    .filter(|&row| performances.value(row, "format").key().as_ref() == Some(format))
                    .collect();
                sum(&numbers(performances, &in_format, "runs"))
            })
            .collect();
        let played = totals.iter().filter(|t| **t > 0.0).count();
        if played < 2 {
            continue;
        }
        let mut row = vec![Value::Text(player)];
        row.extend(totals.into_iter().map(number));
        row.push(Value::from(played));
        row.push(if performances.has_column("average") {
            rounded(mean(&numbers(performances, &rows, "average")))
        } else {
            Value::Null
        });
        out.push_row(row)?;
    }
    Ok(out)
}

/// Q16: per-player yearly batting since 2020, for years with at least
/// five matches.
pub(super) fn yearly_batting(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(
        registry,
        LogicalName::Performances,
        &["player_name", "date", "runs", "strike_rate", "match_id"],
    )?;

    let since = all_rows(performances).filter(|&row| {
        performances
            .value(row, "date")
            .as_date()
            .is_some_and(|d| year(d) >= YEARLY_SINCE)
    });
    let mut groups = group_rows(since, |row| {
        let player = performances.value(row, "player_name").key()?;
        let season = year(performances.value(row, "date").as_date()?);
        Some((player, season))
    });
    groups.retain(|(_, rows)| distinct(performances, rows, "match_id") >= YEARLY_MIN_MATCHES);
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ResultTable::new(&["player_name", "year", "matches", "avg_runs", "avg_strike_rate"]);
    for ((player, season), rows) in groups {
        out.push_row(vec![
            Value::Text(player),
            Value::from(season),
            Value::from(distinct(performances, &rows, "match_id")),
            rounded(mean(&numbers(performances, &rows, "runs"))),
            rounded(mean(&numbers(performances, &rows, "strike_rate"))),
        ])?;
    }
    Ok(out)
}

/// Q19: batting consistency since 2022 over innings of at least ten balls,
/// most consistent (lowest deviation) first.
pub(super) fn batting_consistency(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["player_name", "runs", "balls", "date"])?;

    let eligible = all_rows(performances).filter(|&row| {
        let recent = performances
            .value(row, "date")
            .as_date()
            .is_some_and(|d| year(d) >= CONSISTENCY_SINCE);
        let faced = performances
            .value(row, "balls")
            .as_f64()
            .is_some_and(|b| b >= CONSISTENCY_MIN_BALLS);
        recent && faced
    });

    let mut stats: Vec<(String, Vec<f64>, Option<f64>)> =
        group_rows(eligible, |row| performances.value(row, "player_name").key())
            .into_iter()
            .map(|(player, rows)| {
                let runs = numbers(performances, &rows, "runs");
                let std = sample_std(&runs);
                (player, runs, std)
            })
            .filter(|(_, runs, _)| !runs.is_empty())
            .collect();
    sort_asc_by(&mut stats, |(_, _, std)| *std);

    let mut out = ResultTable::new(&["player_name", "avg_runs", "std_runs", "innings"]);
    for (player, runs, std) in stats {
        out.push_row(vec![
            Value::Text(player),
            rounded(mean(&runs)),
            rounded(std),
            Value::from(runs.len()),
        ])?;
    }
    Ok(out)
}

/// Q20: matches and average per format for players with at least 20
/// matches across all formats.
pub(super) fn matches_per_format(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["player_name", "format", "match_id", "runs"])?;

    let mut groups = group_rows(all_rows(performances), |row| {
        let player = performances.value(row, "player_name").key()?;
        let format = performances.value(row, "format").key()?;
        Some((player, format))
    });
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    let matches: Vec<usize> = groups
        .iter()
        .map(|(_, rows)| distinct(performances, rows, "match_id"))
        .collect();
    let total_for = |player: &str| -> usize {
        groups
            .iter()
            .zip(&matches)
            .filter(|(((p, _), _), _)| p == player)
            .map(|(_, m)| *m)
            .sum()
    };

    let mut out = ResultTable::new(&["player_name", "format", "matches", "avg_runs", "total_matches"]);
    for (((player, format), rows), count) in groups.iter().zip(&matches) {
        let total = total_for(player);
        if total < FORMAT_MIN_MATCHES {
            continue;
        }
        out.push_row(vec![
            Value::text(player.as_str()),
            Value::text(format.as_str()),
            Value::from(*count),
            rounded(mean(&numbers(performances, rows, "runs"))),
            Value::from(total),
        ])?;
    }
    Ok(out)
}

fn mean_of(table: &LogicalTable, rows: &[usize], column: &str) -> Option<f64> {
    mean(&numbers(table, rows, column))
}

/// Q21: weighted all-round ranking.
///
/// batting = runs * 0.01 + batting average * 0.5 + strike rate * 0.3
/// bowling = wickets * 2 + (50 - bowling average) * 0.5 + (6 - economy) * 2
/// fielding = catches + stumpings
///
/// Absent sums count as zero; a bowling term whose average is absent is
/// left out.
pub(super) fn player_ranking(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["player_name"])?;

    let mut scored: Vec<(Vec<Value>, f64)> = group_rows(all_rows(performances), |row| performances.value(row, "player_name").key())
        .into_iter()
        .map(|(player, rows)| {
            let runs = sum(&numbers(performances, &rows, "runs"));
            let batting_avg = mean_of(performances, &rows, "average");
            let strike_rate = mean_of(performances, &rows, "strike_rate");
            let wickets = sum(&numbers(performances, &rows, "wickets"));
            let bowling_avg = mean_of(performances, &rows, "bowling_average");
            let economy = mean_of(performances, &rows, "economy");
            let catches = sum(&numbers(performances, &rows, "catches"));
            let stumpings = sum(&numbers(performances, &rows, "stumpings"));

            let batting = runs * 0.01 + batting_avg.unwrap_or(0.0) * 0.5 + strike_rate.unwrap_or(0.0) * 0.3;
            let bowling = wickets * 2.0
                + bowling_avg.map_or(0.0, |avg| (50.0 - avg) * 0.5)
                + economy.map_or(0.0, |econ| (6.0 - econ) * 2.0);
            let fielding = catches + stumpings;
            let total = batting + bowling + fielding;

            let row = vec![
                Value::Text(player),
                number(runs),
                rounded(batting_avg),
                rounded(strike_rate),
                number(wickets),
                rounded(bowling_avg),
                rounded(economy),
                number(catches),
                number(stumpings),
                rounded(Some(batting)),
                rounded(Some(bowling)),
                rounded(Some(fielding)),
                rounded(Some(total)),
            ];
            (row, total)
        })
        .collect();
    sort_desc_by(&mut scored, |(_, total)| Some(*total));
    scored.truncate(RANKING_CAP);

    let mut out = ResultTable::new(&[
        "player_name",
        "runs",
        "batting_avg",
        "strike_rate",
        "wickets",
        "bowling_avg",
        "economy",
        "catches",
        "stumpings",
        "batting_points",
        "bowling_points",
        "fielding_points",
        "total_score",
    ]);
    for (row, _) in scored {
        out.push_row(row)?;
    }
    Ok(out)
}

fn form_label(score: f64) -> &'static str {
    if score > 60.0 {
        "Excellent"
    } else if score > 40.0 {
        "Good"
    } else if score > 20.0 {
        "Average"
    } else {
        "Poor"
    }
}

/// Q23: recent form over each player's last ten innings.
///
/// score = mean(last 5) * 0.6 + mean(last 10) * 0.4 - 0.5 * std(last 10)
pub(super) fn recent_form(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["player_name", "date", "runs"])?;

    let mut players = group_rows(all_rows(performances), |row| performances.value(row, "player_name").key());
    players.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ResultTable::new(&[
        "player_name",
        "avg_last5",
        "avg_last10",
        "sr_last5",
        "sr_last10",
        "fifties_last10",
        "std_runs",
        "form",
    ]);
    for (player, mut rows) in players {
        sort_date_desc_by(&mut rows, |&row| performances.value(row, "date").as_date());
        rows.truncate(FORM_INNINGS);
        let last5 = &rows[..rows.len().min(5)];

        let avg5 = mean_of(performances, last5, "runs");
        let avg10 = mean_of(performances, &rows, "runs");
        let runs10 = numbers(performances, &rows, "runs");
        let std = sample_std(&runs10);
        let fifties = runs10.iter().filter(|r| **r >= 50.0).count();
        let score = avg5.unwrap_or(0.0) * 0.6 + avg10.unwrap_or(0.0) * 0.4 - 0.5 * std.unwrap_or(0.0);

        out.push_row(vec![
            Value::Text(player),
            rounded(avg5),
            rounded(avg10),
            rounded(mean_of(performances, last5, "strike_rate")),
            rounded(mean_of(performances, &rows, "strike_rate")),
            Value::from(fifties),
            rounded(Some(std.unwrap_or(0.0))),
            Value::text(form_label(score)),
        ])?;
    }
    Ok(out)
}
