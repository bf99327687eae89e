//! Quarter-over-quarter career trajectory.

use std::cmp::Ordering;

use crate::domain::analytics::aggregate::{all_rows, distinct, group_rows, mean, numbers, quarter, rounded};
use crate::domain::analytics::question::require;
use crate::domain::analytics::{AnalysisError, ResultTable};
use crate::domain::table::{LogicalName, LogicalTable, TableRegistry, Value};

const MIN_QUARTERS: usize = 6;
const MIN_MATCHES_PER_QUARTER: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trajectory {
    Ascending,
    Declining,
    Stable,
}

impl Trajectory {
    fn classify(improving: usize, declining: usize) -> Self {
        match improving.cmp(&declining) {
            Ordering::Greater => Trajectory::Ascending,
            Ordering::Less => Trajectory::Declining,
            Ordering::Equal => Trajectory::Stable,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Trajectory::Ascending => "Career Ascending",
            Trajectory::Declining => "Career Declining",
            Trajectory::Stable => "Career Stable",
        }
    }
}

struct QuarterStats {
    matches: usize,
    avg_runs: Option<f64>,
}

fn quarter_stats(performances: &LogicalTable, rows: &[usize]) -> QuarterStats {
    let matches = if performances.has_column("match_id") {
        distinct(performances, rows, "match_id")
    } else {
        rows.len()
    };
    QuarterStats {
        matches,
        avg_runs: mean(&numbers(performances, rows, "runs")),
    }
}

/// Q25: players with at least six active quarters averaging three or more
/// matches per quarter, classified by how often their quarterly average
/// rose versus fell.
pub(super) fn quarterly_trajectory(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let performances = require(registry, LogicalName::Performances, &["player_name", "date", "runs"])?;

    let dated = all_rows(performances).filter(|&row| performances.value(row, "date").as_date().is_some());
    let mut players = group_rows(dated, |row| performances.value(row, "player_name").key());
    players.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = ResultTable::new(&[
        "player_name",
        "quarters",
        "avg_matches_per_quarter",
        "improving_quarters",
        "declining_quarters",
        "trajectory",
    ]);
    for (player, rows) in players {
        let mut quarters = group_rows(rows, |row| performances.value(row, "date").as_date().map(quarter));
        if quarters.len() < MIN_QUARTERS {
            continue;
        }
        quarters.sort_by_key(|(q, _)| *q);

        let stats: Vec<QuarterStats> = quarters
            .iter()
            .map(|(_, rows)| quarter_stats(performances, rows))
            .collect();
        let avg_matches = stats.iter().map(|s| s.matches as f64).sum::<f64>() / stats.len() as f64;
        if avg_matches < MIN_MATCHES_PER_QUARTER {
            continue;
        }

        let (mut improving, mut declining) = (0, 0);
        for pair in stats.windows(2) {
            if let (Some(prev), Some(next)) = (pair[0].avg_runs, pair[1].avg_runs) {
                if next > prev {
                    improving += 1;
                } else if next < prev {
                    declining += 1;
                }
            }
        }

        out.push_row(vec![
            Value::Text(player),
            Value::from(stats.len()),
            rounded(Some(avg_matches)),
            Value::from(improving),
            Value::from(declining),
            Value::text(Trajectory::classify(improving, declining).label()),
        ])?;
    }
    Ok(out)
}
