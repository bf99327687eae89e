//! The 25 analytical questions, in report order.
//!
//! Each analyzer checks its required columns first and returns
//! [`AnalysisError::Insufficient`](super::AnalysisError) without computing
//! anything when they are missing. Optional columns read as null.

mod batting;
mod bowling;
mod matches;
mod partnerships;
mod players;
mod series;
mod trends;
mod venues;

use super::question::AnalysisQuestion;

/// The standard catalog, ordinals 1 through 25.
pub fn catalog() -> Vec<AnalysisQuestion> {
    vec![
        AnalysisQuestion::new(1, "Players from India", players::players_from_india),
        AnalysisQuestion::new(2, "Recent matches (last 30 days)", matches::recent_matches),
        AnalysisQuestion::new(3, "Top 10 ODI run scorers", batting::top_odi_scorers),
        AnalysisQuestion::new(4, "Venues with capacity > 50000", venues::large_venues),
        AnalysisQuestion::new(5, "Team wins", matches::team_wins),
        AnalysisQuestion::new(6, "Player counts by role", players::players_by_role),
        AnalysisQuestion::new(7, "Highest score per format", batting::highest_score_per_format),
        AnalysisQuestion::new(8, "Series started in 2024", series::series_started_in_2024),
        AnalysisQuestion::new(
            9,
            "All-rounders with > 1000 runs and > 50 wickets",
            batting::all_rounders,
        ),
        AnalysisQuestion::new(10, "Last 20 completed matches", matches::last_completed_matches),
        AnalysisQuestion::new(
            11,
            "Player runs across formats (>= 2 formats)",
            batting::runs_across_formats,
        ),
        AnalysisQuestion::new(12, "Home vs away wins", matches::home_away_wins),
        AnalysisQuestion::new(13, "Partnerships of 100+ runs", partnerships::century_partnerships),
        AnalysisQuestion::new(
            14,
            "Bowling by venue (>= 3 matches)",
            bowling::bowling_by_venue,
        ),
        AnalysisQuestion::new(15, "Player stats in close matches", matches::close_match_performers),
        AnalysisQuestion::new(
            16,
            "Yearly batting since 2020 (>= 5 matches)",
            batting::yearly_batting,
        ),
        AnalysisQuestion::new(17, "Toss advantage by decision", matches::toss_advantage),
        AnalysisQuestion::new(
            18,
            "Economical bowlers in ODI and T20",
            bowling::economical_bowlers,
        ),
        AnalysisQuestion::new(19, "Batting consistency since 2022", batting::batting_consistency),
        AnalysisQuestion::new(
            20,
            "Matches per format (players with >= 20 matches)",
            batting::matches_per_format,
        ),
        AnalysisQuestion::new(21, "Weighted player ranking", batting::player_ranking),
        AnalysisQuestion::new(
            22,
            "Head-to-head, last 3 years (>= 5 matches)",
            matches::head_to_head,
        ),
        AnalysisQuestion::new(23, "Recent form (last 10 innings)", batting::recent_form),
        AnalysisQuestion::new(
            24,
            "Successful partnerships (>= 5 together)",
            partnerships::successful_pairs,
        ),
        AnalysisQuestion::new(25, "Quarterly performance trajectory", trends::quarterly_trajectory),
    ]
}
