//! Player rankings from the upstream feed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Rankings shown per list.
pub const RANKING_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingCategory {
    Batsmen,
    Bowlers,
}

impl RankingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingCategory::Batsmen => "batsmen",
            RankingCategory::Bowlers => "bowlers",
        }
    }
}

impl fmt::Display for RankingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "batsmen" | "batters" => Ok(RankingCategory::Batsmen),
            "bowlers" => Ok(RankingCategory::Bowlers),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("expected batsmen or bowlers, got '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameFormat {
    T20,
    Odi,
    Test,
}

impl GameFormat {
    /// Value of the upstream `formatType` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameFormat::T20 => "t20",
            GameFormat::Odi => "odi",
            GameFormat::Test => "test",
        }
    }
}

impl fmt::Display for GameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "t20" | "t20i" => Ok(GameFormat::T20),
            "odi" => Ok(GameFormat::Odi),
            "test" => Ok(GameFormat::Test),
            other => Err(ValidationError::invalid_format(
                "format",
                format!("expected t20, odi or test, got '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("up") => Trend::Up,
            Some(t) if t.eq_ignore_ascii_case("down") => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub rank: u32,
    pub name: String,
    pub country: String,
    pub rating: Option<u32>,
    pub trend: Trend,
}

/// Parses a rankings body into the top entries by rank.
///
/// Entries whose rank is not a number are dropped. A body without a `rank`
/// list yields no entries.
pub fn parse_rankings(body: &str) -> Result<Vec<RankingEntry>, serde_json::Error> {
    let wire: WireRankings = serde_json::from_str(body)?;
    let mut entries: Vec<RankingEntry> = wire
        .rank
        .into_iter()
        .filter_map(|raw| {
            Some(RankingEntry {
                rank: number(raw.rank.as_ref())?,
                name: raw.name.unwrap_or_default(),
                country: raw.country.unwrap_or_default(),
                rating: number(raw.rating.as_ref()),
                trend: Trend::parse(raw.trend.as_deref()),
            })
        })
        .collect();
    entries.sort_by_key(|e| e.rank);
    entries.truncate(RANKING_LIMIT);
    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct WireRankings {
    #[serde(default)]
    rank: Vec<WireRank>,
}

#[derive(Debug, Deserialize)]
struct WireRank {
    #[serde(default)]
    rank: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    rating: Option<serde_json::Value>,
    #[serde(default)]
    trend: Option<String>,
}

/// Ranks and ratings arrive as strings or numbers.
fn number(value: Option<&serde_json::Value>) -> Option<u32> {
    match value? {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
