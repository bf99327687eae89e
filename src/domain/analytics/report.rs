//! The ordered output of one batch run.

use chrono::NaiveDate;
use serde::Serialize;

use super::result::AnalysisResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub ordinal: u8,
    pub label: String,
    pub result: AnalysisResult,
}

impl ReportEntry {
    /// Download name, e.g. `Q04_Venues_with_capacity_50000.csv`.
    pub fn file_name(&self) -> String {
        let mut slug = String::new();
        for word in self
            .label
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            if !slug.is_empty() {
                slug.push('_');
            }
            slug.push_str(word);
        }
        format!("Q{:02}_{}.csv", self.ordinal, slug)
    }
}

/// One entry per question, in ordinal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub as_of: NaiveDate,
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    pub fn get(&self, ordinal: u8) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.ordinal == ordinal)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_placeholder()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::result::Placeholder;

    #[test]
    fn file_name_is_padded_and_slugged() {
        let entry = ReportEntry {
            ordinal: 4,
            label: "Venues with capacity > 50000".to_string(),
            result: AnalysisResult::Placeholder(Placeholder::error("x")),
        };
        assert_eq!(entry.file_name(), "Q04_Venues_with_capacity_50000.csv");
    }
}
