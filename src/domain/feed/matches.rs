//! Match listings from the upstream feed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Which listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchCategory {
    Live,
    Recent,
    Upcoming,
}

impl MatchCategory {
    /// Path segment on the upstream API.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchCategory::Live => "live",
            MatchCategory::Recent => "recent",
            MatchCategory::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(MatchCategory::Live),
            "recent" => Ok(MatchCategory::Recent),
            "upcoming" => Ok(MatchCategory::Upcoming),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("expected live, recent or upcoming, got '{}'", other),
            )),
        }
    }
}

/// One match as shown on a listing card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub team1: String,
    pub team2: String,
    pub status: String,
    pub venue: String,
    /// First-innings score as `runs/wickets`, `-` where unknown.
    pub team1_score: String,
    pub team2_score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesMatches {
    pub series_name: String,
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchTypeGroup {
    pub match_type: String,
    pub series: Vec<SeriesMatches>,
}

/// Listing grouped by match type, then series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MatchFeed {
    pub groups: Vec<MatchTypeGroup>,
}

impl MatchFeed {
    /// Parses the upstream listing body. A body without `typeMatches` is an
    /// empty feed; missing fields take display defaults.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let wire: WireFeed = serde_json::from_str(body)?;
        Ok(wire.into())
    }

    pub fn match_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.series)
            .map(|s| s.matches.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.match_count() == 0
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Upstream wire shapes
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct WireFeed {
    #[serde(rename = "typeMatches", default)]
    type_matches: Vec<WireTypeMatch>,
}

#[derive(Debug, Deserialize)]
struct WireTypeMatch {
    #[serde(rename = "matchType", default)]
    match_type: Option<String>,
    #[serde(rename = "seriesMatches", default)]
    series_matches: Vec<WireSeriesEntry>,
}

/// Series entries interleave with ad slots that have no wrapper.
#[derive(Debug, Deserialize)]
struct WireSeriesEntry {
    #[serde(rename = "seriesAdWrapper", default)]
    wrapper: Option<WireSeries>,
}

#[derive(Debug, Deserialize)]
struct WireSeries {
    #[serde(rename = "seriesName", default)]
    series_name: Option<String>,
    #[serde(default)]
    matches: Vec<WireMatch>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMatch {
    #[serde(rename = "matchInfo", default)]
    info: WireMatchInfo,
    #[serde(rename = "matchScore", default)]
    score: WireMatchScore,
}

#[derive(Debug, Default, Deserialize)]
struct WireMatchInfo {
    #[serde(default)]
    team1: Option<WireTeam>,
    #[serde(default)]
    team2: Option<WireTeam>,
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "venueInfo", default)]
    venue: Option<WireVenue>,
}

#[derive(Debug, Deserialize)]
struct WireTeam {
    #[serde(rename = "teamName", default)]
    team_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireVenue {
    #[serde(default)]
    ground: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireMatchScore {
    #[serde(rename = "team1Score", default)]
    team1: Option<WireTeamScore>,
    #[serde(rename = "team2Score", default)]
    team2: Option<WireTeamScore>,
}

#[derive(Debug, Deserialize)]
struct WireTeamScore {
    #[serde(default)]
    inngs1: Option<WireInnings>,
}

#[derive(Debug, Deserialize)]
struct WireInnings {
    #[serde(default)]
    runs: Option<serde_json::Value>,
    #[serde(default)]
    wickets: Option<serde_json::Value>,
}

fn scalar(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => "-".to_string(),
    }
}

fn score_line(score: Option<&WireTeamScore>) -> String {
    let innings = score.and_then(|s| s.inngs1.as_ref());
    format!(
        "{}/{}",
        scalar(innings.and_then(|i| i.runs.as_ref())),
        scalar(innings.and_then(|i| i.wickets.as_ref()))
    )
}

fn team_name(team: Option<&WireTeam>) -> String {
    team.and_then(|t| t.team_name.clone())
        .unwrap_or_else(|| "TBD".to_string())
}

impl From<WireMatch> for MatchSummary {
    fn from(wire: WireMatch) -> Self {
        MatchSummary {
            team1: team_name(wire.info.team1.as_ref()),
            team2: team_name(wire.info.team2.as_ref()),
            status: wire.info.status.unwrap_or_else(|| "No Status".to_string()),
            venue: wire
                .info
                .venue
                .and_then(|v| v.ground)
                .unwrap_or_else(|| "Unknown Venue".to_string()),
            team1_score: score_line(wire.score.team1.as_ref()),
            team2_score: score_line(wire.score.team2.as_ref()),
        }
    }
}

impl From<WireFeed> for MatchFeed {
    fn from(wire: WireFeed) -> Self {
        let groups = wire
            .type_matches
            .into_iter()
            .map(|group| MatchTypeGroup {
                match_type: group.match_type.unwrap_or_else(|| "Other".to_string()),
                series: group
                    .series_matches
                    .into_iter()
                    .filter_map(|entry| entry.wrapper)
                    .map(|series| SeriesMatches {
                        series_name: series.series_name.unwrap_or_else(|| "Unknown Series".to_string()),
                        matches: series.matches.into_iter().map(MatchSummary::from).collect(),
                    })
                    .collect(),
            })
            .collect();
        MatchFeed { groups }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "typeMatches": [{
            "matchType": "International",
            "seriesMatches": [
                {"seriesAdWrapper": {
                    "seriesName": "India tour of Australia",
                    "matches": [
                        {
                            "matchInfo": {
                                "team1": {"teamName": "Australia"},
                                "team2": {"teamName": "India"},
                                "status": "India won by 295 runs",
                                "venueInfo": {"ground": "Perth Stadium"}
                            },
                            "matchScore": {
                                "team1Score": {"inngs1": {"runs": 104, "wickets": 10}},
                                "team2Score": {"inngs1": {"runs": 150, "wickets": 10}}
                            }
                        },
                        {"matchInfo": {"team1": {"teamName": "Australia"}}}
                    ]
                }},
                {"adDetail": {"name": "ad"}}
            ]
        }]
    }"#;

    #[test]
    fn parses_grouped_listing() {
        let feed = MatchFeed::from_json(LISTING).unwrap();
        assert_eq!(feed.groups.len(), 1);
        assert_eq!(feed.groups[0].match_type, "International");
        assert_eq!(feed.groups[0].series.len(), 1);
        assert_eq!(feed.match_count(), 2);

        let first = &feed.groups[0].series[0].matches[0];
        assert_eq!(first.team2, "India");
        assert_eq!(first.venue, "Perth Stadium");
        assert_eq!(first.team1_score, "104/10");
    }

    #[test]
    fn missing_fields_take_display_defaults() {
        let feed = MatchFeed::from_json(LISTING).unwrap();
        let sparse = &feed.groups[0].series[0].matches[1];
        assert_eq!(sparse.team2, "TBD");
        assert_eq!(sparse.status, "No Status");
        assert_eq!(sparse.venue, "Unknown Venue");
        assert_eq!(sparse.team1_score, "-/-");
    }

    #[test]
    fn body_without_listing_is_empty() {
        let feed = MatchFeed::from_json(r#"{"message": "no matches"}"#).unwrap();
        assert!(feed.is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(MatchFeed::from_json("<html>").is_err());
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Live".parse::<MatchCategory>().unwrap(), MatchCategory::Live);
        assert!("finished".parse::<MatchCategory>().is_err());
    }
}
