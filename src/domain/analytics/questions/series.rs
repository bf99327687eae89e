use chrono::NaiveDate;

use crate::domain::analytics::aggregate::{all_rows, year};
use crate::domain::analytics::question::require;
use crate::domain::analytics::{AnalysisError, ResultTable};
use crate::domain::table::{LogicalName, TableRegistry};

const SERIES_YEAR: i32 = 2024;

/// Q8: series that started in 2024, earliest first.
pub(super) fn series_started_in_2024(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let series = require(registry, LogicalName::Series, &["start_date", "name"])?;

    let mut started: Vec<(usize, NaiveDate)> = all_rows(series)
        .filter_map(|row| series.value(row, "start_date").as_date().map(|d| (row, d)))
        .filter(|(_, start)| year(*start) == SERIES_YEAR)
        .collect();
    started.sort_by_key(|(_, start)| *start);

    let columns = ["name", "host_country", "match_type", "start_date", "total_matches"];
    let mut out = ResultTable::new(&columns);
    for (row, _) in started {
        out.push_row(columns.iter().map(|c| series.value(row, c).clone()).collect())?;
    }
    Ok(out)
}
