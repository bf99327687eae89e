//! Analyzer errors.

use thiserror::Error;

use crate::domain::table::Requirement;

/// Why an analyzer could not produce a table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// None of the acceptable requirement sets is satisfied.
    #[error("insufficient data: need {}", describe(.0))]
    Insufficient(Vec<Requirement>),

    /// Data was present but the computation failed.
    #[error("{0}")]
    Computation(String),
}

impl AnalysisError {
    pub fn insufficient(requirement: Requirement) -> Self {
        AnalysisError::Insufficient(vec![requirement])
    }

    pub fn computation(message: impl Into<String>) -> Self {
        AnalysisError::Computation(message.into())
    }

    /// Combines two unmet alternatives into one "a or b" error.
    ///
    /// A computation error on either side wins.
    pub fn or(self, other: AnalysisError) -> AnalysisError {
        match (self, other) {
            (AnalysisError::Insufficient(mut a), AnalysisError::Insufficient(b)) => {
                a.extend(b);
                AnalysisError::Insufficient(a)
            }
            (err @ AnalysisError::Computation(_), _) | (_, err @ AnalysisError::Computation(_)) => err,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, AnalysisError::Insufficient(_))
    }
}

fn describe(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::LogicalName;

    #[test]
    fn insufficient_message_names_columns_and_table() {
        let err = AnalysisError::insufficient(Requirement::new(LogicalName::Players, &["country", "name"]));
        assert_eq!(err.to_string(), "insufficient data: need columns country, name on table players");
    }

    #[test]
    fn alternatives_join_with_or() {
        let err = AnalysisError::insufficient(Requirement::new(LogicalName::Matches, &["winner"]))
            .or(AnalysisError::insufficient(Requirement::new(LogicalName::Teams, &["team_name", "wins"])));
        assert_eq!(
            err.to_string(),
            "insufficient data: need columns winner on table matches or columns team_name, wins on table teams"
        );
    }

    #[test]
    fn computation_error_survives_or() {
        let err = AnalysisError::computation("boom")
            .or(AnalysisError::insufficient(Requirement::new(LogicalName::Teams, &["wins"])));
        assert_eq!(err, AnalysisError::Computation("boom".to_string()));
        assert!(!err.is_insufficient());
    }
}
