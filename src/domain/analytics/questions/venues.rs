use crate::domain::analytics::aggregate::{all_rows, sort_desc_by};
use crate::domain::analytics::question::require;
use crate::domain::analytics::{AnalysisError, ResultTable};
use crate::domain::table::{LogicalName, TableRegistry};

const LARGE_VENUE_CAPACITY: f64 = 50_000.0;

/// Q4: venues holding more than 50,000, largest first. Capacities that do
/// not parse as numbers are left out.
pub(super) fn large_venues(registry: &TableRegistry) -> Result<ResultTable, AnalysisError> {
    let venues = require(registry, LogicalName::Venues, &["capacity"])?;

    let mut large: Vec<(usize, f64)> = all_rows(venues)
        .filter_map(|row| venues.value(row, "capacity").as_f64().map(|c| (row, c)))
        .filter(|(_, capacity)| *capacity > LARGE_VENUE_CAPACITY)
        .collect();
    sort_desc_by(&mut large, |(_, capacity)| Some(*capacity));

    let columns = ["name", "city", "country", "capacity"];
    let mut out = ResultTable::new(&columns);
    for (row, _) in large {
        out.push_row(columns.iter().map(|c| venues.value(row, c).clone()).collect())?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{LogicalTable, Value};
    use chrono::NaiveDate;

    #[test]
    fn capacity_threshold_is_strict() {
        let venues = LogicalTable::from_rows(
            &["name", "capacity"],
            vec![
                vec![Value::text("Exactly"), Value::Int(50_000)],
                vec![Value::text("Just over"), Value::Int(50_001)],
                vec![Value::text("MCG"), Value::text("100024")],
                vec![Value::text("Unknown"), Value::text("n/a")],
            ],
        )
        .unwrap();
        let registry = TableRegistry::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .with_table(LogicalName::Venues, venues);

        let out = large_venues(&registry).unwrap();
        let names: Vec<_> = out.column_values("name").unwrap().into_iter().cloned().collect();
        assert_eq!(names, vec![Value::text("MCG"), Value::text("Just over")]);
        assert_eq!(out.rows()[0][1], Value::Null);
    }
}
