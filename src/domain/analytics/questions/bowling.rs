//! Bowling questions over the performances table.

use crate::domain::analytics::aggregate::{
    all_rows, distinct, group_rows, lower_key, mean, number, numbers, rounded, sort_asc_by, sum,
};
use crate::domain::analytics::question::require;
use crate::domain::analytics::{AnalysisError, ResultTable};
use crate::domain::table::{LogicalName, LogicalTable, TableRegistry, Value};

const VENUE_MIN_OVERS: f64 = 4.0;
const VENUE_MIN_MATCHES: usize = 3;
const ECONOMY_FORMATS: [&str; 3] = ["odi", "t20", "t20i"];
const ECONOMY_MIN_MATCHES: usize = 10;
const ECONOMY_MIN_OVERS_PER_MATCH: f64 = 2.0;

/// Distinct match ids when the table has them, otherwise one match per row.
fn match_count(table: &LogicalTable, rows: &[usize]) -> usize {
    if table.has_column("match_id") {
        distinct(table, rows, "match_id")
    } else {
        rows.len()
    }
}

/// Q14: bowling at each venue for spells of at least four overs, where the
/// bowler has played three or more matches at the venue.
pub(super) fn bowling_by_venue(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["player_name", "venue", "wickets", "overs"])?;

    let spells = all_rows(performances).filter(|&row| {
        performances
            .value(row, "overs")
            .as_f64()
            .is_some_and(|overs| overs >= VENUE_MIN_OVERS)
    });
    let mut groups = group_rows(spells, |row| {
        let player = performances.value(row, "player_name").key()?;
        let venue = performances.value(row, "venue").key()?;
        Some((player, venue))
    });
    groups.retain(|(_, rows)| match_count(performances, rows) >= VENUE_MIN_MATCHES);
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ResultTable::new(&["player_name", "venue", "matches", "avg_economy", "total_wickets"]);
    for ((player, venue), rows) in groups {
        out.push_row(vec![
            Value::Text(player),
            Value::Text(venue),
            Value::from(match_count(performances, &rows)),
            rounded(mean(&numbers(performances, &rows, "economy"))),
            number(sum(&numbers(performances, &rows, "wickets"))),
        ])?;
    }
    Ok(out)
}

/// Q18: most economical limited-overs bowlers with at least ten matches
/// and two overs per match in the format.
pub(super) fn economical_bowlers(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(
        registry,
        LogicalName::Performances,
        &["player_name", "format", "overs", "economy", "wickets", "match_id"],
    )?;

    let limited_overs = all_rows(performances).filter(|&row| {
        lower_key(performances.value(row, "format")).is_some_and(|f| ECONOMY_FORMATS.contains(&f.as_str()))
    });

    struct Bowler {
        row: Vec<Value>,
        economy: Option<f64>,
    }

    let mut bowlers: Vec<Bowler> = Vec::new();
    for ((player, format), rows) in group_rows(limited_overs, |row| {
        let player = performances.value(row, "player_name").key()?;
        let format = performances.value(row, "format").key()?;
        Some((player, format))
    }) {
        let matches = distinct(performances, &rows, "match_id");
        let total_overs = sum(&numbers(performances, &rows, "overs"));
        let overs_per_match = if matches == 0 { 0.0 } else { total_overs / matches as f64 };
        if matches < ECONOMY_MIN_MATCHES || overs_per_match < ECONOMY_MIN_OVERS_PER_MATCH {
            continue;
        }
        let economy = mean(&numbers(performances, &rows, "economy"));
        bowlers.push(Bowler {
            row: vec![
                Value::Text(player),
                Value::Text(format),
                Value::from(matches),
                number(total_overs),
                rounded(Some(overs_per_match)),
                rounded(economy),
                number(sum(&numbers(performances, &rows, "wickets"))),
            ],
            economy,
        });
    }
    sort_asc_by(&mut bowlers, |b| b.economy);

    let mut out = ResultTable::new(&[
        "player_name",
        "format",
        "matches",
        "total_overs",
        "avg_overs_per_match",
        "economy",
        "total_wickets",
    ]);
    for bowler in bowlers {
        out.push_row(bowler.row)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn registry(columns: &[&str], rows: Vec<Vec<Value>>) -> TableRegistry {
        TableRegistry::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
            .with_table(LogicalName::Performances, LogicalTable::from_rows(columns, rows).unwrap())
    }

    #[test]
    fn venue_spells_need_four_overs_and_three_matches() {
        let spell = |player: &str, venue: &str, overs: f64, wickets: i64, match_id: i64| {
            vec![
                Value::text(player),
                Value::text(venue),
                Value::Int(wickets),
                Value::Float(overs),
                Value::Int(match_id),
                Value::Float(4.5),
            ]
        };
        let registry = registry(
            &["player_name", "venue", "wickets", "overs", "match_id", "economy"],
            vec![
                spell("Bumrah", "Wankhede", 4.0, 2, 1),
                spell("Bumrah", "Wankhede", 10.0, 3, 2),
                spell("Bumrah", "Wankhede", 8.0, 1, 3),
                spell("Bumrah", "Eden", 10.0, 5, 4),
                spell("Part-timer", "Wankhede", 2.0, 1, 1),
                spell("Part-timer", "Wankhede", 3.0, 0, 2),
                spell("Part-timer", "Wankhede", 1.0, 0, 3),
            ],
        );
        let out = bowling_by_venue(&registry).unwrap();
        assert_eq!(
            out.rows(),
            &[vec![
                Value::text("Bumrah"),
                Value::text("Wankhede"),
                Value::Int(3),
                Value::Float(4.5),
                Value::Int(6),
            ]]
        );
    }

    #[test]
    fn economical_bowlers_sort_by_economy_ascending() {
        let mut rows = Vec::new();
        for (player, economy) in [("Costly", 7.5), ("Tight", 4.1)] {
            for m in 0..10 {
                rows.push(vec![
                    Value::text(player),
                    Value::text("ODI"),
                    Value::Float(10.0),
                    Value::Float(economy),
                    Value::Int(1),
                    Value::Int(m),
                ]);
            }
        }
        // Test-match figures are ignored.
        for m in 0..10 {
            rows.push(vec![
                Value::text("Red ball"),
                Value::text("Test"),
                Value::Float(20.0),
                Value::Float(2.0),
                Value::Int(2),
                Value::Int(m),
            ]);
        }
        let registry = registry(&["player_name", "format", "overs", "economy", "wickets", "match_id"], rows);
        let out = economical_bowlers(&registry).unwrap();
        let names: Vec<_> = out.column_values("player_name").unwrap().into_iter().cloned().collect();
        assert_eq!(names, vec![Value::text("Tight"), Value::text("Costly")]);
        assert_eq!(out.rows()[0][4], Value::Float(10.0));
    }

    #[test]
    fn economical_bowlers_need_ten_matches() {
        let rows = (0..9)
            .map(|m| {
                vec![
                    Value::text("Nine"),
                    Value::text("T20"),
                    Value::Float(4.0),
                    Value::Float(6.0),
                    Value::Int(1),
                    Value::Int(m),
                ]
            })
            .collect();
        let registry = registry(&["player_name", "format", "overs", "economy", "wickets", "match_id"], rows);
        assert!(economical_bowlers(&registry).unwrap().is_empty());
    }
}
